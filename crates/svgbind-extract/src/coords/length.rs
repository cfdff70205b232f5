use std::collections::BTreeMap;

use crate::error::{ExtractError, ParseOutcome};
use crate::native::NativeValue;
use crate::value::{finite_f32, parse_number, AttrBag, AttrValue};

/// A coordinate or size that may be relative to a reference dimension.
///
/// Percentages are stored as fractions: `"50%"` → `{ is_percentage: true, value: 0.5 }`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Length {
    pub is_percentage: bool,
    pub value: f32,
}

impl Length {
    #[inline]
    pub const fn absolute(value: f32) -> Self {
        Self { is_percentage: false, value }
    }

    /// `fraction` is in [0, 1] for 0%–100%.
    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self { is_percentage: true, value: fraction }
    }

    /// Absolute lengths cross as numbers, percentages as `"NN%"` strings.
    pub fn to_native(self) -> NativeValue {
        if self.is_percentage {
            // Round away float noise from the fraction round-trip (0.07 * 100).
            let pct = (self.value as f64 * 100.0 * 1e4).round() / 1e4;
            NativeValue::str(format!("{pct}%"))
        } else {
            NativeValue::Number(self.value)
        }
    }
}

/// Parses a number, numeric string or `"NN%"` string.
pub fn parse_length(value: &AttrValue) -> ParseOutcome<Length> {
    match value {
        AttrValue::Number(n) => match finite_f32(*n) {
            Some(n) => ParseOutcome::Parsed(Length::absolute(n)),
            None => ParseOutcome::Failed(ExtractError::InvalidLength(n.to_string())),
        },
        AttrValue::Str(s) => parse_length_str(s),
        other => ParseOutcome::Failed(ExtractError::InvalidLength(format!("{other:?}"))),
    }
}

pub fn parse_length_str(s: &str) -> ParseOutcome<Length> {
    let trimmed = s.trim();
    let parsed = match trimmed.strip_suffix('%') {
        Some(pct) => parse_number(pct).map(|n| Length::percent(n / 100.0)),
        None => parse_number(trimmed).map(Length::absolute),
    };
    match parsed {
        Some(len) => ParseOutcome::Parsed(len),
        None => ParseOutcome::Failed(ExtractError::InvalidLength(s.to_string())),
    }
}

/// Reads `key` as a length, logging and dropping invalid values.
pub fn length_attr(bag: &AttrBag, key: &str) -> Option<Length> {
    parse_length(bag.get(key)?).settle(key)
}

/// Parses every listed attribute that is present.
///
/// Absent names are omitted, not defaulted. Invalid values are logged and
/// omitted as well.
pub fn format_percentage_props<'a>(bag: &AttrBag, names: &[&'a str]) -> BTreeMap<&'a str, Length> {
    names
        .iter()
        .filter_map(|&name| length_attr(bag, name).map(|len| (name, len)))
        .collect()
}
