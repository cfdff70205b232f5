use crate::error::{ParseOutcome, Warning};
use crate::native::NativeValue;
use crate::value::AttrValue;

use super::color::{parse_color, Rgba};

/// What a fill or stroke is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    Solid(Rgba),
    CurrentColor,
    /// Reference to a gradient or pattern registered under this id.
    Server(String),
}

impl Paint {
    /// Brush encoding understood by the native side.
    ///
    /// `Solid` → `[0, r, g, b, a]` (normalized), `Server` → `[1, id]`,
    /// `CurrentColor` → `[2]`, `None` → `null`.
    pub fn to_native(&self) -> NativeValue {
        match self {
            Paint::None => NativeValue::Null,
            Paint::Solid(c) => {
                let [r, g, b, a] = c.normalized();
                NativeValue::numbers([0.0, r, g, b, a])
            }
            Paint::Server(id) => NativeValue::array([NativeValue::Number(1.0), NativeValue::str(id)]),
            Paint::CurrentColor => NativeValue::numbers([2.0]),
        }
    }
}

/// `"url(#grad)"` → `Some("grad")`.
pub fn url_id(s: &str) -> Option<&str> {
    let id = s.trim().strip_prefix("url(#")?.strip_suffix(')')?;
    (!id.is_empty()).then_some(id)
}

/// Resolves a `fill`/`stroke` declaration.
///
/// Unreadable colors degrade to [`Paint::None`] with a warning.
pub fn extract_paint(value: Option<&AttrValue>) -> ParseOutcome<Paint> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(Paint::None);
    };
    if value.is_blank() {
        return ParseOutcome::Parsed(Paint::None);
    }
    if let Some(s) = value.as_str() {
        match s.trim() {
            "none" => return ParseOutcome::Parsed(Paint::None),
            "currentColor" => return ParseOutcome::Parsed(Paint::CurrentColor),
            other => {
                if let Some(id) = url_id(other) {
                    return ParseOutcome::Parsed(Paint::Server(id.to_string()));
                }
            }
        }
    }
    match parse_color(value) {
        Some(c) => ParseOutcome::Parsed(Paint::Solid(c)),
        None => ParseOutcome::Degraded(
            Paint::None,
            Warning::new(format!("{value:?} is not a valid color or brush")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(s: &str) -> ParseOutcome<Paint> {
        extract_paint(Some(&AttrValue::from(s)))
    }

    #[test]
    fn keywords() {
        assert_eq!(paint("none"), ParseOutcome::Parsed(Paint::None));
        assert_eq!(paint(""), ParseOutcome::Parsed(Paint::None));
        assert_eq!(paint("currentColor"), ParseOutcome::Parsed(Paint::CurrentColor));
        assert_eq!(extract_paint(None), ParseOutcome::Parsed(Paint::None));
    }

    #[test]
    fn url_reference() {
        assert_eq!(paint("url(#grad1)"), ParseOutcome::Parsed(Paint::Server("grad1".into())));
        assert!(paint("url(#)").is_degraded());
    }

    #[test]
    fn solid_native_encoding() {
        let native = paint("#ff0000").into_value().unwrap().to_native();
        assert_eq!(native, NativeValue::numbers([0.0, 1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn server_and_current_encoding() {
        let server = Paint::Server("g".into()).to_native();
        assert_eq!(server, NativeValue::array([NativeValue::Number(1.0), NativeValue::str("g")]));
        assert_eq!(Paint::CurrentColor.to_native(), NativeValue::numbers([2.0]));
        assert!(Paint::None.to_native().is_null());
    }

    #[test]
    fn malformed_degrades_to_none() {
        let out = paint("not-a-color");
        assert_eq!(out.value(), Some(&Paint::None));
        assert!(out.warning().is_some());
    }

    #[test]
    fn solid_channels_in_range() {
        for s in ["#abc", "rgba(255,255,255,0.2)", "hsl(10, 20%, 30%)", "teal"] {
            let native = paint(s).into_value().unwrap().to_native();
            let items = native.as_array().unwrap();
            assert_eq!(items.len(), 5);
            assert_eq!(items[0], NativeValue::Number(0.0));
            for ch in &items[1..] {
                let v = ch.as_f32().unwrap();
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
