use crate::error::{ParseOutcome, Warning};
use crate::native::{NativeProps, NativeValue};
use crate::value::{AttrBag, AttrValue};

use super::brush::{extract_paint, Paint};
use super::color::Rgba;
use super::opacity::extract_opacity;

/// Attributes that make an element carry a fill descriptor.
pub const FILL_ATTRS: [&str; 3] = ["fill", "fillOpacity", "fillRule"];

/// Winding rule for fills and clip paths.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FillRule {
    EvenOdd = 0,
    #[default]
    NonZero = 1,
}

impl FillRule {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Reads `fillRule` / `clipRule`. Unknown keywords degrade to `nonzero`.
pub fn parse_fill_rule(value: Option<&AttrValue>) -> ParseOutcome<FillRule> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(FillRule::default());
    };
    match value.as_str().map(str::trim) {
        Some("evenodd") => ParseOutcome::Parsed(FillRule::EvenOdd),
        Some("nonzero") => ParseOutcome::Parsed(FillRule::NonZero),
        _ => ParseOutcome::Degraded(
            FillRule::default(),
            Warning::new(format!("{value:?} is not a fill rule (evenodd | nonzero)")),
        ),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillDescriptor {
    pub paint: Paint,
    pub opacity: f32,
    pub rule: FillRule,
}

impl FillDescriptor {
    pub fn write_native(&self, props: &mut NativeProps) {
        props.insert("fill", self.paint.to_native());
        props.insert("fillOpacity", self.opacity);
        props.insert("fillRule", NativeValue::from(self.rule.code()));
    }
}

/// Shapes the fill attributes of one element.
///
/// Returns `None` when no fill attribute is declared, leaving the native
/// default in place. A declared fill rule or opacity without `fill` paints
/// black.
pub fn extract_fill(bag: &AttrBag) -> Option<FillDescriptor> {
    if !FILL_ATTRS.iter().any(|name| bag.contains(name)) {
        return None;
    }
    let paint = match bag.get("fill") {
        None => Paint::Solid(Rgba::BLACK),
        Some(v) => extract_paint(Some(v)).settle("fill").unwrap_or(Paint::None),
    };
    let opacity = extract_opacity(bag.get("fillOpacity"), 1.0).settle("fillOpacity").unwrap_or(1.0);
    let rule = parse_fill_rule(bag.get("fillRule")).settle("fillRule").unwrap_or_default();
    Some(FillDescriptor { paint, opacity, rule })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fill_attrs_no_descriptor() {
        assert_eq!(extract_fill(&AttrBag::new().with("stroke", "red")), None);
    }

    #[test]
    fn defaults_when_only_rule_declared() {
        let fill = extract_fill(&AttrBag::new().with("fillRule", "evenodd")).unwrap();
        assert_eq!(fill.paint, Paint::Solid(Rgba::BLACK));
        assert_eq!(fill.opacity, 1.0);
        assert_eq!(fill.rule, FillRule::EvenOdd);
    }

    #[test]
    fn explicit_fill() {
        let bag = AttrBag::new().with("fill", "none").with("fillOpacity", "40%");
        let fill = extract_fill(&bag).unwrap();
        assert_eq!(fill.paint, Paint::None);
        assert_eq!(fill.opacity, 0.4);
        assert_eq!(fill.rule, FillRule::NonZero);
    }

    #[test]
    fn unknown_rule_degrades() {
        let out = parse_fill_rule(Some(&AttrValue::from("winding")));
        assert_eq!(out.value(), Some(&FillRule::NonZero));
        assert!(out.is_degraded());
    }

    #[test]
    fn native_fields() {
        let mut props = NativeProps::new();
        extract_fill(&AttrBag::new().with("fill", "#000")).unwrap().write_native(&mut props);
        assert_eq!(props.get("fillRule"), Some(&NativeValue::Number(1.0)));
        assert_eq!(props.get("fillOpacity"), Some(&NativeValue::Number(1.0)));
        assert_eq!(props.get("fill"), Some(&NativeValue::numbers([0.0, 0.0, 0.0, 0.0, 1.0])));
    }
}
