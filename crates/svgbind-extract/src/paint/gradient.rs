use crate::coords::parse_length;
use crate::error::ParseOutcome;
use crate::native::NativeValue;
use crate::value::{keyword, AttrBag, AttrValue};

use super::color::{parse_color, Rgba};
use super::opacity::extract_opacity;

/// Coordinate system for gradient and pattern geometry.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Units {
    /// Fractions of the painted element's bounding box.
    #[default]
    ObjectBoundingBox = 0,
    UserSpaceOnUse = 1,
}

/// Reads `gradientUnits` / `patternUnits` / `patternContentUnits`.
pub fn parse_units(value: Option<&AttrValue>) -> ParseOutcome<Units> {
    keyword(
        value,
        &[("objectBoundingBox", Units::ObjectBoundingBox), ("userSpaceOnUse", Units::UserSpaceOnUse)],
    )
}

/// A single gradient stop. `offset` is in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

fn stop_offset(bag: &AttrBag) -> f32 {
    bag.get("offset")
        .and_then(|v| parse_length(v).settle("offset"))
        .map_or(0.0, |len| len.value)
        .clamp(0.0, 1.0)
}

fn stop_color(bag: &AttrBag) -> Rgba {
    let Some(value) = bag.get("stopColor") else {
        return Rgba::BLACK;
    };
    parse_color(value).unwrap_or_else(|| {
        log::warn!("stopColor: {value:?} is not a valid color, using black");
        Rgba::BLACK
    })
}

/// Reads `offset`, `stopColor` and `stopOpacity` from each stop declaration.
///
/// Offsets are clamped to `[0, 1]` and stops come back sorted by offset;
/// stops with equal offsets keep their declaration order.
pub fn extract_stops(stops: &[AttrBag]) -> Vec<ColorStop> {
    let mut out: Vec<ColorStop> = stops
        .iter()
        .map(|bag| {
            let opacity = extract_opacity(bag.get("stopOpacity"), 1.0).settle("stopOpacity").unwrap_or(1.0);
            ColorStop::new(stop_offset(bag), stop_color(bag).with_opacity(opacity))
        })
        .collect();
    out.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    out
}

/// Flat native encoding: `[offset, r, g, b, a, offset, r, g, b, a, …]`.
pub fn stops_to_native(stops: &[ColorStop]) -> NativeValue {
    NativeValue::numbers(stops.iter().flat_map(|s| {
        let [r, g, b, a] = s.color.normalized();
        [s.offset, r, g, b, a]
    }))
}

/// Fades every stop by `opacity`.
pub fn faded(stops: &[ColorStop], opacity: f32) -> Vec<ColorStop> {
    stops
        .iter()
        .map(|s| ColorStop::new(s.offset, s.color.with_opacity(opacity)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(offset: impl Into<AttrValue>, color: &str) -> AttrBag {
        AttrBag::new().with("offset", offset).with("stopColor", color)
    }

    #[test]
    fn sorted_and_clamped() {
        let stops = extract_stops(&[stop("100%", "red"), stop(-0.5, "blue"), stop("50%", "lime")]);
        let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        assert_eq!(stops[0].color, Rgba::new(0, 0, 255, 1.0));
    }

    #[test]
    fn equal_offsets_keep_order() {
        let stops = extract_stops(&[stop(0.5, "red"), stop(0.5, "blue")]);
        assert_eq!(stops[0].color.r, 255);
        assert_eq!(stops[1].color.b, 255);
    }

    #[test]
    fn stop_opacity_applied() {
        let bag = stop(0, "white").with("stopOpacity", 0.5);
        assert_eq!(extract_stops(&[bag])[0].color.a, 0.5);
    }

    #[test]
    fn missing_or_bad_color_is_black() {
        let stops = extract_stops(&[AttrBag::new(), stop(1, "nope")]);
        assert!(stops.iter().all(|s| s.color == Rgba::BLACK));
    }

    #[test]
    fn flat_native_array() {
        let native = stops_to_native(&[ColorStop::new(0.25, Rgba::new(255, 0, 0, 0.5))]);
        assert_eq!(native, NativeValue::numbers([0.25, 1.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn units_keyword() {
        assert_eq!(parse_units(None), ParseOutcome::Parsed(Units::ObjectBoundingBox));
        assert_eq!(
            parse_units(Some(&AttrValue::from("userSpaceOnUse"))),
            ParseOutcome::Parsed(Units::UserSpaceOnUse)
        );
        assert!(parse_units(Some(&AttrValue::from("pixels"))).is_degraded());
    }
}
