use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ExtractConfig;
use crate::coords::Vec2;
use crate::error::ParseOutcome;
use crate::native::NativeValue;
use crate::value::{keyword, AttrBag, AttrValue};

use super::cache::FontCache;
use super::font::{font_from_fields, FontDescriptor};

const FONT_FIELDS: [&str; 4] = ["fontFamily", "fontSize", "fontWeight", "fontStyle"];

// ── Anchor ────────────────────────────────────────────────────────────────

/// Discriminants are the native `alignment` codes: left, right, center.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start = 0,
    End = 1,
    Middle = 2,
}

/// Reads `textAnchor`. Unknown keywords degrade to `start`.
pub fn parse_text_anchor(value: Option<&AttrValue>) -> ParseOutcome<TextAnchor> {
    keyword(
        value,
        &[("start", TextAnchor::Start), ("middle", TextAnchor::Middle), ("end", TextAnchor::End)],
    )
}

// ── Content ───────────────────────────────────────────────────────────────

/// Text children: a plain string or a sequence of strings and nested spans.
#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Text(String),
    Spans(Vec<TextContent>),
}

impl TextContent {
    pub fn from_value(value: &AttrValue) -> TextContent {
        match value {
            AttrValue::Str(s) => TextContent::Text(s.clone()),
            AttrValue::Number(n) => TextContent::Text(n.to_string()),
            AttrValue::List(items) => TextContent::Spans(items.iter().map(TextContent::from_value).collect()),
            AttrValue::Map(span) => span
                .get("children")
                .map_or(TextContent::Text(String::new()), TextContent::from_value),
            AttrValue::Bool(_) => TextContent::Text(String::new()),
        }
    }

    /// Concatenates everything, joining sequence entries with `\n`.
    pub fn flatten(&self) -> String {
        match self {
            TextContent::Text(s) => s.clone(),
            TextContent::Spans(items) => items.iter().map(TextContent::flatten).collect::<Vec<_>>().join("\n"),
        }
    }

    /// Lines split strictly on `\n`.
    pub fn lines(&self) -> Vec<String> {
        self.flatten().split('\n').map(str::to_string).collect()
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub font: Option<Arc<FontDescriptor>>,
    pub lines: Vec<String>,
}

impl TextFrame {
    pub fn to_native(&self) -> NativeValue {
        let mut fields = BTreeMap::new();
        fields.insert(
            "font".to_string(),
            self.font.as_ref().map_or(NativeValue::Null, |f| f.to_native()),
        );
        fields.insert("lines".to_string(), NativeValue::array(self.lines.iter().map(NativeValue::str)));
        NativeValue::record(fields)
    }
}

/// Resolves the element's font from `font` (shorthand string or object) or
/// the individual font attributes. `None` when nothing font-related is set.
pub fn extract_font(bag: &AttrBag, cache: &mut FontCache, config: &ExtractConfig) -> Option<Arc<FontDescriptor>> {
    match bag.get("font") {
        Some(AttrValue::Str(s)) => return Some(cache.get_or_parse(s, config)),
        Some(AttrValue::Map(fields)) => return Some(Arc::new(font_from_fields(fields, config))),
        Some(other) => log::warn!("font: {other:?} is neither a shorthand string nor an object"),
        None => {}
    }
    FONT_FIELDS
        .iter()
        .any(|name| bag.contains(name))
        .then(|| Arc::new(font_from_fields(bag, config)))
}

/// Font plus lines of the element's `children`.
pub fn extract_text_frame(bag: &AttrBag, cache: &mut FontCache, config: &ExtractConfig) -> TextFrame {
    let lines = bag
        .get("children")
        .map(TextContent::from_value)
        .map_or_else(|| vec![String::new()], |c| c.lines());
    TextFrame { font: extract_font(bag, cache, config), lines }
}

/// Start position: `x + dx`, `y + dy`. `None` when none of them is set.
pub fn text_position(bag: &AttrBag) -> Option<Vec2> {
    if !["x", "y", "dx", "dy"].iter().any(|k| bag.contains(k)) {
        return None;
    }
    let get = |k: &str| bag.get_f32(k).unwrap_or(0.0);
    Some(Vec2::new(get("x"), get("y")) + Vec2::new(get("dx"), get("dy")))
}
