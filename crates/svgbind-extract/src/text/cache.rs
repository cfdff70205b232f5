use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::config::ExtractConfig;

use super::font::{parse_font_shorthand, FontDescriptor};

/// Memoized `font` shorthand parses, keyed by the exact source string.
///
/// Unbounded by default. With a capacity, the least recently used entry is
/// evicted first; a capacity of zero stores nothing.
#[derive(Debug)]
pub struct FontCache {
    entries: Option<LruCache<String, Arc<FontDescriptor>>>,
    parses: usize,
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FontCache {
    pub fn new(capacity: Option<usize>) -> Self {
        let entries = match capacity {
            None => Some(LruCache::unbounded()),
            Some(cap) => NonZeroUsize::new(cap).map(LruCache::new),
        };
        Self { entries, parses: 0 }
    }

    /// Returns the cached descriptor for `src`, parsing it on a miss.
    ///
    /// Hits hand back the same `Arc` every time.
    pub fn get_or_parse(&mut self, src: &str, config: &ExtractConfig) -> Arc<FontDescriptor> {
        if let Some(hit) = self.entries.as_mut().and_then(|cache| cache.get(src)) {
            return Arc::clone(hit);
        }

        let font = Arc::new(parse_font_shorthand(src, config));
        self.parses += 1;

        if let Some(cache) = self.entries.as_mut() {
            if let Some((evicted, _)) = cache.push(src.to_string(), Arc::clone(&font)) {
                log::debug!("font cache evicted {evicted:?}");
            }
        }
        font
    }

    /// Number of shorthand strings actually parsed (cache misses).
    pub fn parse_count(&self) -> usize {
        self.parses
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        if let Some(cache) = self.entries.as_mut() {
            cache.clear();
        }
    }
}
