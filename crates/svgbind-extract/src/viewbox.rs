//! `viewBox` and `preserveAspectRatio`.

use crate::error::{ExtractError, ParseOutcome, Warning};
use crate::native::{NativeProps, NativeValue};
use crate::scan::Cursor;
use crate::value::{AttrBag, AttrValue};

/// Alignment half of `preserveAspectRatio`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Align {
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    #[default]
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

const ALIGN_NAMES: [(&str, Align); 10] = [
    ("none", Align::None),
    ("xMinYMin", Align::XMinYMin),
    ("xMidYMin", Align::XMidYMin),
    ("xMaxYMin", Align::XMaxYMin),
    ("xMinYMid", Align::XMinYMid),
    ("xMidYMid", Align::XMidYMid),
    ("xMaxYMid", Align::XMaxYMid),
    ("xMinYMax", Align::XMinYMax),
    ("xMidYMax", Align::XMidYMax),
    ("xMaxYMax", Align::XMaxYMax),
];

impl Align {
    pub fn name(self) -> &'static str {
        ALIGN_NAMES
            .iter()
            .find(|(_, a)| *a == self)
            .map_or("xMidYMid", |(n, _)| n)
    }

    pub fn from_name(name: &str) -> Option<Align> {
        ALIGN_NAMES.iter().find(|(n, _)| *n == name).map(|(_, a)| *a)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MeetOrSlice {
    #[default]
    Meet = 0,
    Slice = 1,
    None = 2,
}

impl MeetOrSlice {
    pub fn from_name(name: &str) -> Option<MeetOrSlice> {
        match name {
            "meet" => Some(MeetOrSlice::Meet),
            "slice" => Some(MeetOrSlice::Slice),
            "none" => Some(MeetOrSlice::None),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
    pub align: Align,
    pub meet_or_slice: MeetOrSlice,
}

impl ViewBox {
    pub fn write_native(&self, props: &mut NativeProps) {
        props.insert("minX", self.min_x);
        props.insert("minY", self.min_y);
        props.insert("vbWidth", self.width);
        props.insert("vbHeight", self.height);
        props.insert("align", self.align.name());
        props.insert("meetOrSlice", NativeValue::from(self.meet_or_slice as u8));
    }
}

/// Parses `"minX minY width height"`. Width and height must be positive.
pub fn parse_view_box(src: &str) -> ParseOutcome<[f32; 4]> {
    let invalid = || ParseOutcome::Failed(ExtractError::InvalidViewBox(src.to_string()));
    match Cursor::new(src).number_list() {
        Ok(nums) => match nums[..] {
            [x, y, w, h] if w > 0.0 && h > 0.0 => ParseOutcome::Parsed([x, y, w, h]),
            _ => invalid(),
        },
        Err(_) => invalid(),
    }
}

/// Parses `"<align> [meet|slice]"`, defaulting to `xMidYMid meet`.
///
/// Unknown keywords degrade to the default for that half.
pub fn parse_aspect_ratio(value: Option<&AttrValue>) -> ParseOutcome<(Align, MeetOrSlice)> {
    let Some(src) = value.and_then(AttrValue::as_str) else {
        return match value {
            None => ParseOutcome::Parsed((Align::default(), MeetOrSlice::default())),
            Some(other) => ParseOutcome::Degraded(
                (Align::default(), MeetOrSlice::default()),
                Warning::new(format!("{other:?} is not a preserveAspectRatio string")),
            ),
        };
    };

    let mut tokens = src.split_whitespace();
    let mut problems = Vec::new();

    let align = match tokens.next() {
        None => Align::default(),
        Some(t) => Align::from_name(t).unwrap_or_else(|| {
            problems.push(format!("unknown align {t:?}"));
            Align::default()
        }),
    };
    let meet_or_slice = match tokens.next() {
        None => MeetOrSlice::default(),
        Some(t) => MeetOrSlice::from_name(t).unwrap_or_else(|| {
            problems.push(format!("unknown meetOrSlice {t:?}"));
            MeetOrSlice::default()
        }),
    };

    if problems.is_empty() {
        ParseOutcome::Parsed((align, meet_or_slice))
    } else {
        ParseOutcome::Degraded((align, meet_or_slice), Warning::new(problems.join(", ")))
    }
}

/// Reads `viewBox` and `preserveAspectRatio` from an element.
///
/// `Ok(None)` when no `viewBox` is declared.
pub fn extract_view_box(bag: &AttrBag) -> Result<Option<ViewBox>, ExtractError> {
    let Some(value) = bag.get("viewBox") else {
        return Ok(None);
    };
    let rect = match value {
        AttrValue::Str(s) => parse_view_box(s).into_result()?,
        AttrValue::List(items) => {
            let nums: Option<Vec<f32>> = items.iter().map(AttrValue::as_f32).collect();
            match nums.as_deref() {
                Some(&[x, y, w, h]) if w > 0.0 && h > 0.0 => [x, y, w, h],
                _ => return Err(ExtractError::InvalidViewBox(format!("{value:?}"))),
            }
        }
        other => return Err(ExtractError::InvalidViewBox(format!("{other:?}"))),
    };
    let (align, meet_or_slice) = parse_aspect_ratio(bag.get("preserveAspectRatio"))
        .settle("preserveAspectRatio")
        .unwrap_or_default();
    let [min_x, min_y, width, height] = rect;
    Ok(Some(ViewBox { min_x, min_y, width, height, align, meet_or_slice }))
}
