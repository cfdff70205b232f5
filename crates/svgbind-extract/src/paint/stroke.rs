use crate::error::{ParseOutcome, Warning};
use crate::native::{NativeProps, NativeValue};
use crate::value::{finite_f32, keyword, parse_number, AttrBag, AttrValue};

use super::brush::{extract_paint, Paint};
use super::color::Rgba;
use super::opacity::extract_opacity;

pub const STROKE_ATTRS: [&str; 8] = [
    "stroke",
    "strokeOpacity",
    "strokeWidth",
    "strokeLinecap",
    "strokeLinejoin",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
];

pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;
pub const DEFAULT_MITER_LIMIT: f32 = 4.0;

// ── Caps and joins ────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

/// Unknown keywords degrade to `butt`.
pub fn parse_line_cap(value: Option<&AttrValue>) -> ParseOutcome<LineCap> {
    keyword(value, &[("butt", LineCap::Butt), ("round", LineCap::Round), ("square", LineCap::Square)])
}

/// Unknown keywords degrade to `miter`.
pub fn parse_line_join(value: Option<&AttrValue>) -> ParseOutcome<LineJoin> {
    keyword(value, &[("miter", LineJoin::Miter), ("round", LineJoin::Round), ("bevel", LineJoin::Bevel)])
}

// ── Dash array ────────────────────────────────────────────────────────────

/// Normalizes `strokeDasharray`.
///
/// Strings split on commas and whitespace; lists are taken as-is. A lone
/// entry is duplicated. `"none"` or an empty value means no dashing. Any
/// negative or non-numeric entry drops the whole pattern with a warning.
pub fn parse_dash_array(value: Option<&AttrValue>) -> ParseOutcome<Option<Vec<f32>>> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(None);
    };
    let entries: Option<Vec<f32>> = match value {
        AttrValue::Str(s) if s.trim() == "none" => return ParseOutcome::Parsed(None),
        AttrValue::Str(s) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(parse_number)
            .collect(),
        AttrValue::List(items) => items.iter().map(AttrValue::as_f32).collect(),
        AttrValue::Number(n) => finite_f32(*n).map(|n| vec![n]),
        _ => None,
    };
    match entries {
        Some(dashes) if dashes.iter().all(|d| *d >= 0.0) => {
            if dashes.is_empty() {
                return ParseOutcome::Parsed(None);
            }
            let mut dashes = dashes;
            if dashes.len() == 1 {
                dashes.push(dashes[0]);
            }
            ParseOutcome::Parsed(Some(dashes))
        }
        _ => ParseOutcome::Degraded(
            None,
            Warning::new(format!("{value:?} is not a valid dash array, drawing a solid line")),
        ),
    }
}

// ── StrokeDescriptor ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDescriptor {
    pub paint: Paint,
    pub opacity: f32,
    pub width: f32,
    pub dash_array: Option<Vec<f32>>,
    /// Present exactly when `dash_array` is.
    pub dash_offset: Option<f32>,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
}

impl StrokeDescriptor {
    pub fn write_native(&self, props: &mut NativeProps) {
        props.insert("stroke", self.paint.to_native());
        props.insert("strokeOpacity", self.opacity);
        props.insert("strokeWidth", self.width);
        props.insert("strokeLinecap", NativeValue::from(self.cap as u8));
        props.insert("strokeLinejoin", NativeValue::from(self.join as u8));
        props.insert(
            "strokeDasharray",
            self.dash_array.as_ref().map_or(NativeValue::Null, |d| NativeValue::numbers(d.iter().copied())),
        );
        props.insert("strokeDashoffset", self.dash_offset);
        props.insert("strokeMiterlimit", self.miter_limit);
    }
}

fn stroke_width(value: Option<&AttrValue>) -> ParseOutcome<f32> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(DEFAULT_STROKE_WIDTH);
    };
    match value.as_f32() {
        Some(w) if w >= 0.0 => ParseOutcome::Parsed(w),
        _ => ParseOutcome::Degraded(
            DEFAULT_STROKE_WIDTH,
            Warning::new(format!("{value:?} is not a valid stroke width, using {DEFAULT_STROKE_WIDTH}")),
        ),
    }
}

fn miter_limit(value: Option<&AttrValue>) -> ParseOutcome<f32> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(DEFAULT_MITER_LIMIT);
    };
    match value.as_f32() {
        Some(m) if m > 0.0 => ParseOutcome::Parsed(m),
        _ => ParseOutcome::Degraded(
            DEFAULT_MITER_LIMIT,
            Warning::new(format!("{value:?} is not a valid miter limit, using {DEFAULT_MITER_LIMIT}")),
        ),
    }
}

/// Shapes the stroke attributes of one element.
///
/// `None` when there is no `stroke` or when `strokeWidth` is exactly zero.
pub fn extract_stroke(bag: &AttrBag) -> Option<StrokeDescriptor> {
    let stroke = bag.get("stroke").filter(|v| !v.is_blank())?;

    let width = stroke_width(bag.get("strokeWidth")).settle("strokeWidth")?;
    if width == 0.0 {
        return None;
    }

    let paint = match extract_paint(Some(stroke)) {
        ParseOutcome::Parsed(p) => p,
        degraded => {
            if let Some(w) = degraded.warning() {
                log::warn!("stroke: {w}, drawing black");
            }
            Paint::Solid(Rgba::BLACK)
        }
    };

    let dash_array = parse_dash_array(bag.get("strokeDasharray")).settle("strokeDasharray").flatten();
    let dash_offset = dash_array.as_ref().map(|_| bag.get_f32("strokeDashoffset").unwrap_or(0.0));

    Some(StrokeDescriptor {
        paint,
        opacity: extract_opacity(bag.get("strokeOpacity"), 1.0).settle("strokeOpacity").unwrap_or(1.0),
        width,
        dash_array,
        dash_offset,
        cap: parse_line_cap(bag.get("strokeLinecap")).settle("strokeLinecap").unwrap_or_default(),
        join: parse_line_join(bag.get("strokeLinejoin")).settle("strokeLinejoin").unwrap_or_default(),
        miter_limit: miter_limit(bag.get("strokeMiterlimit"))
            .settle("strokeMiterlimit")
            .unwrap_or(DEFAULT_MITER_LIMIT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashes(s: &str) -> ParseOutcome<Option<Vec<f32>>> {
        parse_dash_array(Some(&AttrValue::from(s)))
    }

    // ── dash array ──

    #[test]
    fn lone_dash_duplicated() {
        assert_eq!(dashes("5"), ParseOutcome::Parsed(Some(vec![5.0, 5.0])));
    }

    #[test]
    fn comma_and_space_separators() {
        assert_eq!(dashes("5, 10 2"), ParseOutcome::Parsed(Some(vec![5.0, 10.0, 2.0])));
        assert_eq!(dashes("5,10"), ParseOutcome::Parsed(Some(vec![5.0, 10.0])));
    }

    #[test]
    fn none_and_empty_mean_solid() {
        assert_eq!(dashes("none"), ParseOutcome::Parsed(None));
        assert_eq!(dashes("  "), ParseOutcome::Parsed(None));
    }

    #[test]
    fn negative_or_garbage_dropped() {
        assert!(dashes("5,-1").is_degraded());
        assert_eq!(dashes("5,x").into_value(), Some(None));
    }

    #[test]
    fn even_and_odd_lists_kept_as_written() {
        assert_eq!(dashes("2,4,6"), ParseOutcome::Parsed(Some(vec![2.0, 4.0, 6.0])));
    }

    #[test]
    fn list_form() {
        let list = AttrValue::from(vec![AttrValue::from(3), AttrValue::from(1)]);
        assert_eq!(parse_dash_array(Some(&list)), ParseOutcome::Parsed(Some(vec![3.0, 1.0])));
    }

    // ── descriptor ──

    #[test]
    fn no_stroke_no_descriptor() {
        assert_eq!(extract_stroke(&AttrBag::new().with("strokeWidth", 2)), None);
        assert_eq!(extract_stroke(&AttrBag::new().with("stroke", "")), None);
    }

    #[test]
    fn zero_width_suppresses() {
        let bag = AttrBag::new().with("stroke", "red").with("strokeWidth", "0");
        assert_eq!(extract_stroke(&bag), None);
    }

    #[test]
    fn defaults() {
        let s = extract_stroke(&AttrBag::new().with("stroke", "blue")).unwrap();
        assert_eq!(s.width, 1.0);
        assert_eq!(s.miter_limit, 4.0);
        assert_eq!(s.cap, LineCap::Butt);
        assert_eq!(s.join, LineJoin::Miter);
        assert_eq!(s.dash_array, None);
        assert_eq!(s.dash_offset, None);
    }

    #[test]
    fn negative_width_falls_back() {
        let bag = AttrBag::new().with("stroke", "red").with("strokeWidth", -3);
        assert_eq!(extract_stroke(&bag).unwrap().width, 1.0);
    }

    #[test]
    fn overflowing_width_falls_back() {
        let bag = AttrBag::new().with("stroke", "red").with("strokeWidth", 1e300);
        let s = extract_stroke(&bag).unwrap();
        assert_eq!(s.width, 1.0);

        let mut props = NativeProps::new();
        s.write_native(&mut props);
        assert_eq!(props.to_json().unwrap()["strokeWidth"], 1.0);
    }

    #[test]
    fn non_positive_miter_limit_falls_back() {
        for limit in [0.0, -2.0] {
            let bag = AttrBag::new().with("stroke", "red").with("strokeMiterlimit", limit);
            assert_eq!(extract_stroke(&bag).unwrap().miter_limit, DEFAULT_MITER_LIMIT);
        }
        assert!(miter_limit(Some(&AttrValue::from(0.0))).is_degraded());
        let bag = AttrBag::new().with("stroke", "red").with("strokeMiterlimit", "10");
        assert_eq!(extract_stroke(&bag).unwrap().miter_limit, 10.0);
    }

    #[test]
    fn offset_only_with_dashes() {
        let bag = AttrBag::new().with("stroke", "red").with("strokeDashoffset", 3);
        assert_eq!(extract_stroke(&bag).unwrap().dash_offset, None);

        let bag = bag.with("strokeDasharray", "4 2");
        assert_eq!(extract_stroke(&bag).unwrap().dash_offset, Some(3.0));

        let bag = AttrBag::new().with("stroke", "red").with("strokeDasharray", "4");
        assert_eq!(extract_stroke(&bag).unwrap().dash_offset, Some(0.0));
    }

    #[test]
    fn unparsable_stroke_is_black() {
        let s = extract_stroke(&AttrBag::new().with("stroke", "chartreuse-ish")).unwrap();
        assert_eq!(s.paint, Paint::Solid(Rgba::BLACK));
    }

    #[test]
    fn unknown_cap_and_join_fall_back_to_first() {
        let bag = AttrBag::new()
            .with("stroke", "red")
            .with("strokeLinecap", "pointy")
            .with("strokeLinejoin", "bevel");
        let s = extract_stroke(&bag).unwrap();
        assert_eq!(s.cap, LineCap::Butt);
        assert_eq!(s.join, LineJoin::Bevel);
        assert!(parse_line_cap(Some(&AttrValue::from("pointy"))).is_degraded());
    }

    #[test]
    fn native_fields() {
        let bag = AttrBag::new().with("stroke", "red").with("strokeLinecap", "round");
        let mut props = NativeProps::new();
        extract_stroke(&bag).unwrap().write_native(&mut props);
        assert_eq!(props.get("strokeLinecap"), Some(&NativeValue::Number(1.0)));
        assert_eq!(props.get("strokeDasharray"), Some(&NativeValue::Null));
        assert_eq!(props.get("strokeDashoffset"), Some(&NativeValue::Null));
        assert_eq!(props.get("strokeMiterlimit"), Some(&NativeValue::Number(4.0)));
    }
}
