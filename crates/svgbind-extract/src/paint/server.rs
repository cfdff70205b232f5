//! Gradient and pattern paint servers, and the per-context registry that
//! resolves `url(#id)` references against them.

use std::collections::HashMap;
use std::fmt;

use crate::coords::{Length, Rect};
use crate::error::{ParseOutcome, Warning};
use crate::native::{NativeProps, NativeValue};
use crate::transform::Matrix;

use super::brush::{url_id, Paint};
use super::color::{parse_color_str, Rgba};
use super::gradient::{faded, stops_to_native, ColorStop, Units};

// ── PaintServer ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PaintServer {
    LinearGradient {
        x1: Length,
        y1: Length,
        x2: Length,
        y2: Length,
        stops: Vec<ColorStop>,
        units: Units,
        matrix: Option<Matrix>,
    },
    RadialGradient {
        fx: Length,
        fy: Length,
        rx: Length,
        ry: Length,
        cx: Length,
        cy: Length,
        stops: Vec<ColorStop>,
        units: Units,
        matrix: Option<Matrix>,
    },
    Pattern {
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        units: Units,
        content_units: Units,
        matrix: Option<Matrix>,
        opacity: f32,
    },
}

impl PaintServer {
    /// Copy with every color (or the pattern as a whole) faded by `opacity`.
    pub fn faded(&self, opacity: f32) -> PaintServer {
        let mut out = self.clone();
        match &mut out {
            PaintServer::LinearGradient { stops, .. } | PaintServer::RadialGradient { stops, .. } => {
                *stops = faded(stops, opacity);
            }
            PaintServer::Pattern { opacity: o, .. } => *o = (*o * opacity).clamp(0.0, 1.0),
        }
        out
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PaintServer::LinearGradient { .. } => "linearGradient",
            PaintServer::RadialGradient { .. } => "radialGradient",
            PaintServer::Pattern { .. } => "pattern",
        }
    }

    /// Writes the element-level fields (`x1`, `gradient`, `patternUnits`, …).
    pub fn write_native(&self, props: &mut NativeProps) {
        let matrix_native = |m: &Option<Matrix>| m.map_or(NativeValue::Null, |m| m.to_native());
        match self {
            PaintServer::LinearGradient { x1, y1, x2, y2, stops, units, matrix } => {
                props.insert("x1", x1.to_native());
                props.insert("y1", y1.to_native());
                props.insert("x2", x2.to_native());
                props.insert("y2", y2.to_native());
                props.insert("gradient", stops_to_native(stops));
                props.insert("gradientUnits", NativeValue::from(*units as u8));
                props.insert("gradientTransform", matrix_native(matrix));
            }
            PaintServer::RadialGradient { fx, fy, rx, ry, cx, cy, stops, units, matrix } => {
                props.insert("fx", fx.to_native());
                props.insert("fy", fy.to_native());
                props.insert("rx", rx.to_native());
                props.insert("ry", ry.to_native());
                props.insert("cx", cx.to_native());
                props.insert("cy", cy.to_native());
                props.insert("gradient", stops_to_native(stops));
                props.insert("gradientUnits", NativeValue::from(*units as u8));
                props.insert("gradientTransform", matrix_native(matrix));
            }
            PaintServer::Pattern { x, y, width, height, units, content_units, matrix, opacity } => {
                props.insert("x", x.to_native());
                props.insert("y", y.to_native());
                props.insert("width", width.to_native());
                props.insert("height", height.to_native());
                props.insert("patternUnits", NativeValue::from(*units as u8));
                props.insert("patternContentUnits", NativeValue::from(*content_units as u8));
                props.insert("patternTransform", matrix_native(matrix));
                props.insert("opacity", *opacity);
            }
        }
    }

    /// Self-describing record: the element-level fields plus `type`.
    pub fn to_native(&self) -> NativeValue {
        let mut props = NativeProps::new();
        props.insert("type", self.kind());
        self.write_native(&mut props);
        props.into_record()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────

/// Builds a paint server for a referencing element.
///
/// Called with the referencing element's bounding box (when known) and the
/// opacity to apply.
pub type PaintGenerator = Box<dyn Fn(Option<Rect>, f32) -> PaintServer + Send + Sync>;

/// Result of resolving a paint reference or color string.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPaint {
    None,
    Solid(Rgba),
    Server(PaintServer),
}

/// Paint servers of the mounted gradient and pattern elements.
///
/// Keyed by `"id:owner"` so identical ids in different documents do not
/// collide.
#[derive(Default)]
pub struct PaintServerRegistry {
    generators: HashMap<String, PaintGenerator>,
}

impl fmt::Debug for PaintServerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintServerRegistry")
            .field("keys", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn key(id: &str, owner: &str) -> String {
    format!("{id}:{owner}")
}

impl PaintServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the generator for `id` within `owner`.
    pub fn register(&mut self, id: &str, owner: &str, generator: PaintGenerator) {
        let k = key(id, owner);
        log::debug!("paint server registered: {k}");
        self.generators.insert(k, generator);
    }

    /// Returns `true` when something was removed.
    pub fn unregister(&mut self, id: &str, owner: &str) -> bool {
        let k = key(id, owner);
        let removed = self.generators.remove(&k).is_some();
        if removed {
            log::debug!("paint server unregistered: {k}");
        }
        removed
    }

    pub fn contains(&self, id: &str, owner: &str) -> bool {
        self.generators.contains_key(&key(id, owner))
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Keeps a [`Paint::Server`] reference only while its id is registered
    /// under `owner`; anything else passes through.
    pub fn check_reference(&self, paint: Paint, owner: &str) -> ParseOutcome<Paint> {
        match paint {
            Paint::Server(id) if !self.contains(&id, owner) => ParseOutcome::Degraded(
                Paint::None,
                Warning::new(format!("no paint server registered for \"{id}\" in \"{owner}\"")),
            ),
            other => ParseOutcome::Parsed(other),
        }
    }

    /// Resolves `url(#id)` against the registry, or any other string as a
    /// solid color with `opacity` applied.
    ///
    /// A `NaN` opacity counts as `1`. Unregistered ids and unreadable colors
    /// degrade to [`ResolvedPaint::None`].
    pub fn resolve(
        &self,
        paint: &str,
        opacity: f32,
        dimensions: Option<Rect>,
        owner: &str,
    ) -> ParseOutcome<ResolvedPaint> {
        let opacity = if opacity.is_nan() { 1.0 } else { opacity };

        if let Some(id) = url_id(paint) {
            return match self.generators.get(&key(id, owner)) {
                Some(generate) => ParseOutcome::Parsed(ResolvedPaint::Server(generate(dimensions, opacity))),
                None => ParseOutcome::Degraded(
                    ResolvedPaint::None,
                    Warning::new(format!("no paint server registered for \"{id}\" in \"{owner}\"")),
                ),
            };
        }

        match parse_color_str(paint) {
            Some(c) => ParseOutcome::Parsed(ResolvedPaint::Solid(c.with_opacity(opacity))),
            None => ParseOutcome::Degraded(
                ResolvedPaint::None,
                Warning::new(format!("{paint:?} is not a valid color or paint reference")),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_to_blue() -> PaintServer {
        PaintServer::LinearGradient {
            x1: Length::percent(0.0),
            y1: Length::percent(0.0),
            x2: Length::percent(1.0),
            y2: Length::percent(0.0),
            stops: vec![
                ColorStop::new(0.0, Rgba::new(255, 0, 0, 1.0)),
                ColorStop::new(1.0, Rgba::new(0, 0, 255, 1.0)),
            ],
            units: Units::ObjectBoundingBox,
            matrix: None,
        }
    }

    fn registry() -> PaintServerRegistry {
        let mut reg = PaintServerRegistry::new();
        let server = red_to_blue();
        reg.register("g", "svg1", Box::new(move |_, opacity| server.faded(opacity)));
        reg
    }

    #[test]
    fn registered_gradient_resolves() {
        let reg = registry();
        match reg.resolve("url(#g)", 0.5, None, "svg1") {
            ParseOutcome::Parsed(ResolvedPaint::Server(PaintServer::LinearGradient { stops, .. })) => {
                assert_eq!(stops[0].color.a, 0.5);
                assert_eq!(stops[1].color.a, 0.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unregistered_id_fails_closed() {
        let reg = registry();
        let out = reg.resolve("url(#missing)", 1.0, None, "svg1");
        assert_eq!(out.value(), Some(&ResolvedPaint::None));
        assert!(out.is_degraded());
        // Same id, different owner.
        assert!(reg.resolve("url(#g)", 1.0, None, "svg2").is_degraded());
    }

    #[test]
    fn references_checked_per_owner() {
        let reg = registry();
        let mounted = Paint::Server("g".to_string());
        assert_eq!(reg.check_reference(mounted.clone(), "svg1"), ParseOutcome::Parsed(mounted.clone()));
        let out = reg.check_reference(mounted, "svg2");
        assert!(out.is_degraded());
        assert_eq!(out.into_value(), Some(Paint::None));

        let solid = Paint::Solid(Rgba::BLACK);
        assert_eq!(reg.check_reference(solid.clone(), "svg2"), ParseOutcome::Parsed(solid));
    }

    #[test]
    fn plain_color_gets_opacity() {
        let reg = PaintServerRegistry::new();
        let out = reg.resolve("red", 0.25, None, "svg1");
        assert_eq!(out, ParseOutcome::Parsed(ResolvedPaint::Solid(Rgba::new(255, 0, 0, 0.25))));
    }

    #[test]
    fn nan_opacity_is_opaque() {
        let reg = PaintServerRegistry::new();
        let out = reg.resolve("#000", f32::NAN, None, "svg1");
        assert_eq!(out, ParseOutcome::Parsed(ResolvedPaint::Solid(Rgba::BLACK)));
    }

    #[test]
    fn unregister_removes() {
        let mut reg = registry();
        assert!(reg.contains("g", "svg1"));
        assert!(reg.unregister("g", "svg1"));
        assert!(!reg.unregister("g", "svg1"));
        assert!(reg.is_empty());
    }

    #[test]
    fn native_record_names_fields() {
        let native = red_to_blue().to_native();
        let NativeValue::Record(fields) = native else { panic!("expected record") };
        assert_eq!(fields["type"], NativeValue::str("linearGradient"));
        assert_eq!(fields["x2"], NativeValue::str("100%"));
        assert_eq!(fields["gradient"].as_array().map(<[_]>::len), Some(10));
    }
}
