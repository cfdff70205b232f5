use std::fmt;

use crate::transform::TransformError;

// ── Warning ───────────────────────────────────────────────────────────────

/// Diagnostic attached to a value that was replaced by a safe default.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning(pub String);

impl Warning {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ExtractError ──────────────────────────────────────────────────────────

/// An attribute that could not be turned into anything usable.
///
/// These are the "visible" failures: the caller decides how to fall back
/// (drop the attribute, degrade the element, report to the developer).
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    Transform(TransformError),
    /// A transform attribute that is neither a string, a 6-number matrix nor an object.
    TransformShape(String),
    InvalidLength(String),
    InvalidPoints { token: String, offset: usize },
    /// Point lists must hold whole `x,y` pairs.
    OddCoordinateCount(usize),
    InvalidViewBox(String),
    /// A reference that is not of the form `#id`.
    InvalidHref(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Transform(e) => write!(f, "{e}"),
            ExtractError::TransformShape(got) => {
                write!(f, "transform must be a list string, 6-number matrix or object, got {got}")
            }
            ExtractError::InvalidLength(s) => write!(f, "{s:?} is not a length or percentage"),
            ExtractError::InvalidPoints { token, offset } => {
                write!(f, "invalid coordinate {token:?} at offset {offset} in point list")
            }
            ExtractError::OddCoordinateCount(n) => {
                write!(f, "point list has {n} coordinates, expected x,y pairs")
            }
            ExtractError::InvalidViewBox(s) => {
                write!(f, "invalid viewBox {s:?}, expected four numbers \"minX minY width height\"")
            }
            ExtractError::InvalidHref(s) => {
                write!(f, "invalid href {s:?}, expected a reference like \"#id\"")
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Transform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransformError> for ExtractError {
    fn from(e: TransformError) -> Self {
        ExtractError::Transform(e)
    }
}

// ── ParseOutcome ──────────────────────────────────────────────────────────

/// Result of parsing one attribute.
///
/// - `Parsed`: the input was valid.
/// - `Degraded`: the input was invalid and a default was substituted.
/// - `Failed`: no usable value exists.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Degraded(T, Warning),
    Failed(ExtractError),
}

impl<T> ParseOutcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Degraded(v, _) => Some(v),
            ParseOutcome::Failed(_) => None,
        }
    }

    /// Usable value without logging anything.
    pub fn into_value(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Degraded(v, _) => Some(v),
            ParseOutcome::Failed(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&Warning> {
        match self {
            ParseOutcome::Degraded(_, w) => Some(w),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExtractError> {
        match self {
            ParseOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ParseOutcome::Degraded(..))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ParseOutcome::Failed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(v) => ParseOutcome::Parsed(f(v)),
            ParseOutcome::Degraded(v, w) => ParseOutcome::Degraded(f(v), w),
            ParseOutcome::Failed(e) => ParseOutcome::Failed(e),
        }
    }

    /// Degraded values count as success; the warning is dropped.
    pub fn into_result(self) -> Result<T, ExtractError> {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Degraded(v, _) => Ok(v),
            ParseOutcome::Failed(e) => Err(e),
        }
    }

    /// Logs any diagnostic against `attr` and returns the usable value.
    pub fn settle(self, attr: &str) -> Option<T> {
        match self {
            ParseOutcome::Parsed(v) => Some(v),
            ParseOutcome::Degraded(v, w) => {
                log::warn!("{attr}: {w}");
                Some(v)
            }
            ParseOutcome::Failed(e) => {
                log::warn!("{attr}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_still_yields_value() {
        let o = ParseOutcome::Degraded(1.0, Warning::new("bad opacity"));
        assert!(o.is_degraded());
        assert_eq!(o.warning().map(|w| w.0.as_str()), Some("bad opacity"));
        assert_eq!(o.settle("opacity"), Some(1.0));
    }

    #[test]
    fn failed_settles_to_none() {
        let o: ParseOutcome<f32> = ParseOutcome::Failed(ExtractError::InvalidLength("abc".into()));
        assert!(o.clone().into_result().is_err());
        assert_eq!(o.settle("width"), None);
    }

    #[test]
    fn map_keeps_warning() {
        let o = ParseOutcome::Degraded(2, Warning::new("w")).map(|n| n * 2);
        assert_eq!(o, ParseOutcome::Degraded(4, Warning::new("w")));
    }

    #[test]
    fn error_messages_name_the_input() {
        let e = ExtractError::InvalidHref("foo".into());
        assert!(e.to_string().contains("\"foo\""));
    }
}
