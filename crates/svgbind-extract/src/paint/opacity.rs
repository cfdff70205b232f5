use crate::error::{ParseOutcome, Warning};
use crate::value::{finite_f32, parse_number, AttrValue};

/// Normalizes an opacity declaration to `[0, 1]`.
///
/// Accepts numbers, numeric strings and percentage strings. Absent values
/// yield `default` silently; unreadable ones yield `default` with a warning.
pub fn extract_opacity(value: Option<&AttrValue>, default: f32) -> ParseOutcome<f32> {
    let Some(value) = value else {
        return ParseOutcome::Parsed(default);
    };
    let parsed = match value {
        AttrValue::Number(n) => finite_f32(*n),
        AttrValue::Str(s) => match s.trim().strip_suffix('%') {
            Some(pct) => parse_number(pct).map(|n| n / 100.0),
            None => parse_number(s),
        },
        _ => None,
    };
    match parsed {
        Some(o) => ParseOutcome::Parsed(o.clamp(0.0, 1.0)),
        None => ParseOutcome::Degraded(
            default,
            Warning::new(format!("{value:?} is not a valid opacity, using {default}")),
        ),
    }
}
