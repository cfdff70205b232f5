use crate::coords::{parse_length, Length};
use crate::error::{ExtractError, ParseOutcome};
use crate::native::{NativeProps, NativeValue};
use crate::value::{keyword, AttrBag, AttrValue};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextPathMethod {
    #[default]
    Align = 0,
    Stretch = 1,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextPathSpacing {
    #[default]
    Exact = 0,
    Auto = 1,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextPathSide {
    #[default]
    Left = 0,
    Right = 1,
}

/// `"#curve"` → `"curve"`. Anything else fails.
pub fn parse_href(value: &AttrValue) -> ParseOutcome<String> {
    let id = value
        .as_str()
        .and_then(|s| s.trim().strip_prefix('#'))
        .filter(|id| !id.is_empty());
    match id {
        Some(id) => ParseOutcome::Parsed(id.to_string()),
        None => ParseOutcome::Failed(ExtractError::InvalidHref(match value {
            AttrValue::Str(s) => s.clone(),
            other => format!("{other:?}"),
        })),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPathAttrs {
    pub href: String,
    pub start_offset: Length,
    pub method: TextPathMethod,
    pub spacing: TextPathSpacing,
    pub side: TextPathSide,
}

impl TextPathAttrs {
    pub fn write_native(&self, props: &mut NativeProps) {
        props.insert("href", self.href.as_str());
        props.insert("startOffset", self.start_offset.to_native());
        props.insert("method", NativeValue::from(self.method as u8));
        props.insert("spacing", NativeValue::from(self.spacing as u8));
        props.insert("side", NativeValue::from(self.side as u8));
    }
}

/// Reads a text path's reference and layout attributes.
///
/// A missing or malformed `href` is an error; the caller is expected to fall
/// back to rendering the content as a plain span.
pub fn extract_text_path(bag: &AttrBag) -> Result<TextPathAttrs, ExtractError> {
    let href = match bag.get("href") {
        Some(v) => parse_href(v).into_result()?,
        None => return Err(ExtractError::InvalidHref(String::new())),
    };
    let start_offset = bag
        .get("startOffset")
        .and_then(|v| parse_length(v).settle("startOffset"))
        .unwrap_or(Length::absolute(0.0));
    Ok(TextPathAttrs {
        href,
        start_offset,
        method: keyword(
            bag.get("method"),
            &[("align", TextPathMethod::Align), ("stretch", TextPathMethod::Stretch)],
        )
        .settle("method")
        .unwrap_or_default(),
        spacing: keyword(
            bag.get("spacing"),
            &[("exact", TextPathSpacing::Exact), ("auto", TextPathSpacing::Auto)],
        )
        .settle("spacing")
        .unwrap_or_default(),
        side: keyword(bag.get("side"), &[("left", TextPathSide::Left), ("right", TextPathSide::Right)])
            .settle("side")
            .unwrap_or_default(),
    })
}
