use std::sync::Arc;

use crate::config::ExtractConfig;
use crate::coords::Rect;
use crate::error::ParseOutcome;
use crate::paint::{PaintGenerator, PaintServerRegistry, ResolvedPaint};
use crate::text::{self, FontCache, FontDescriptor, TextFrame};
use crate::value::AttrBag;

/// Mutable extraction state owned by one host: the font shorthand cache and
/// the paint servers of currently mounted gradients and patterns.
#[derive(Debug)]
pub struct ExtractContext {
    config: ExtractConfig,
    fonts: FontCache,
    servers: PaintServerRegistry,
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

impl ExtractContext {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            fonts: FontCache::new(config.font_cache_capacity),
            servers: PaintServerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    pub fn servers(&self) -> &PaintServerRegistry {
        &self.servers
    }

    pub fn extract_font(&mut self, bag: &AttrBag) -> Option<Arc<FontDescriptor>> {
        text::extract_font(bag, &mut self.fonts, &self.config)
    }

    pub fn extract_text_frame(&mut self, bag: &AttrBag) -> TextFrame {
        text::extract_text_frame(bag, &mut self.fonts, &self.config)
    }

    pub fn register_paint_server(&mut self, id: &str, owner: &str, generator: PaintGenerator) {
        self.servers.register(id, owner, generator);
    }

    pub fn unregister_paint_server(&mut self, id: &str, owner: &str) -> bool {
        self.servers.unregister(id, owner)
    }

    pub fn resolve_paint(
        &self,
        paint: &str,
        opacity: f32,
        dimensions: Option<Rect>,
        owner: &str,
    ) -> ParseOutcome<ResolvedPaint> {
        self.servers.resolve(paint, opacity, dimensions, owner)
    }
}
