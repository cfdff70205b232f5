use crate::coords::Vec2;
use crate::error::ExtractError;
use crate::value::{parse_number, AttrBag, AttrValue};

use super::{parse_transform_list, Matrix};

/// Discrete transform attributes, excluding the `x`/`y` translate aliases.
pub const DISCRETE_ATTRS: [&str; 14] = [
    "translate",
    "translateX",
    "translateY",
    "scale",
    "scaleX",
    "scaleY",
    "rotation",
    "rotate",
    "skew",
    "skewX",
    "skewY",
    "origin",
    "originX",
    "originY",
];

/// Discrete transform properties, angles in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformProps {
    pub translate: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
    pub skew: Vec2,
    pub origin: Vec2,
}

impl Default for TransformProps {
    fn default() -> Self {
        Self {
            translate: Vec2::zero(),
            scale: Vec2::splat(1.0),
            rotation: 0.0,
            skew: Vec2::zero(),
            origin: Vec2::zero(),
        }
    }
}

impl TransformProps {
    /// Reads discrete props. With `xy_as_translate`, `x`/`y` stand in for
    /// `translateX`/`translateY` when those are absent.
    pub fn from_bag(bag: &AttrBag, xy_as_translate: bool) -> Self {
        let d = TransformProps::default();
        let tx_key = if xy_as_translate && !bag.contains("translateX") { "x" } else { "translateX" };
        let ty_key = if xy_as_translate && !bag.contains("translateY") { "y" } else { "translateY" };
        Self {
            translate: axis(bag, "translate", tx_key, ty_key, d.translate),
            scale: axis(bag, "scale", "scaleX", "scaleY", d.scale),
            rotation: bag
                .get_f32("rotation")
                .or_else(|| bag.get_f32("rotate"))
                .unwrap_or(d.rotation),
            skew: axis(bag, "skew", "skewX", "skewY", d.skew),
            origin: axis(bag, "origin", "originX", "originY", d.origin),
        }
    }

    /// `T(origin) · T(translate) · R · S · K · T(−origin)`.
    pub fn to_matrix(&self) -> Matrix {
        let back = -self.origin;
        Matrix::translate(self.origin.x, self.origin.y)
            .multiply(&Matrix::translate(self.translate.x, self.translate.y))
            .multiply(&Matrix::rotate(self.rotation))
            .multiply(&Matrix::scale(self.scale.x, self.scale.y))
            .multiply(&Matrix::skew(self.skew.x, self.skew.y))
            .multiply(&Matrix::translate(back.x, back.y))
    }
}

/// Splits a universal value (`5`, `"5, 10"`, `[5, 10]`) into two axes, then
/// lets the axis-specific attributes override each side.
fn axis(bag: &AttrBag, universal: &str, x_key: &str, y_key: &str, default: Vec2) -> Vec2 {
    let mut out = default;
    if let Some(v) = bag.get(universal) {
        match split_universal(v) {
            Some(p) => out = p,
            None => log::warn!("{universal}: {v:?} is not a number or number pair"),
        }
    }
    if let Some(x) = bag.get_f32(x_key) {
        out.x = x;
    }
    if let Some(y) = bag.get_f32(y_key) {
        out.y = y;
    }
    out
}

fn split_universal(value: &AttrValue) -> Option<Vec2> {
    let nums: Vec<f32> = match value {
        AttrValue::Number(_) => vec![value.as_f32()?],
        AttrValue::Str(s) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(parse_number)
            .collect::<Option<_>>()?,
        AttrValue::List(items) => items.iter().map(AttrValue::as_f32).collect::<Option<_>>()?,
        _ => return None,
    };
    match nums[..] {
        [v] => Some(Vec2::splat(v)),
        [x, y] => Some(Vec2::new(x, y)),
        _ => None,
    }
}

// ── extraction ────────────────────────────────────────────────────────────

/// Where an element's transform may come from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TransformSource {
    /// Element-specific attribute that wins over `transform`
    /// (`gradientTransform`, `patternTransform`, `maskTransform`).
    pub own_attr: Option<&'static str>,
    /// Whether `x`/`y` act as a translation for this element.
    pub xy_as_translate: bool,
}

impl TransformSource {
    pub const PLAIN: TransformSource = TransformSource { own_attr: None, xy_as_translate: false };

    pub const fn own(attr: &'static str) -> Self {
        Self { own_attr: Some(attr), xy_as_translate: false }
    }

    pub const fn positioned() -> Self {
        Self { own_attr: None, xy_as_translate: true }
    }
}

/// Resolves an element's transform matrix.
///
/// An explicit transform (list string, 6-number array or nested object)
/// wins over discrete props. `Ok(None)` means nothing was declared.
pub fn extract_transform(bag: &AttrBag, source: TransformSource) -> Result<Option<Matrix>, ExtractError> {
    let explicit = source
        .own_attr
        .and_then(|name| bag.get(name))
        .or_else(|| bag.get("transform"));

    if let Some(value) = explicit {
        return explicit_transform(value).map(Some);
    }

    let declared = DISCRETE_ATTRS.iter().any(|name| bag.contains(name))
        || (source.xy_as_translate && (bag.contains("x") || bag.contains("y")));
    Ok(declared.then(|| TransformProps::from_bag(bag, source.xy_as_translate).to_matrix()))
}

fn explicit_transform(value: &AttrValue) -> Result<Matrix, ExtractError> {
    match value {
        AttrValue::Str(s) => Ok(parse_transform_list(s)?),
        AttrValue::List(items) => {
            let nums: Option<Vec<f32>> = items.iter().map(AttrValue::as_f32).collect();
            match nums.as_deref() {
                Some(&[a, b, c, d, e, f]) => Ok(Matrix::new(a, b, c, d, e, f)),
                _ => Err(ExtractError::TransformShape(format!("{value:?}"))),
            }
        }
        AttrValue::Map(inner) => Ok(TransformProps::from_bag(inner, false).to_matrix()),
        other => Err(ExtractError::TransformShape(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(m: Matrix, expected: [f32; 6]) -> bool {
        m.to_array().iter().zip(expected).all(|(a, b)| (a - b).abs() < 1e-5)
    }

    // ── discrete props ──

    #[test]
    fn universal_split_and_override() {
        let bag = AttrBag::new().with("scale", "2, 3").with("scaleY", 4);
        let props = TransformProps::from_bag(&bag, false);
        assert_eq!(props.scale, Vec2::new(2.0, 4.0));

        let bag = AttrBag::new().with("translate", 5);
        assert_eq!(TransformProps::from_bag(&bag, false).translate, Vec2::splat(5.0));
    }

    #[test]
    fn rotate_alias() {
        let bag = AttrBag::new().with("rotate", 30);
        assert_eq!(TransformProps::from_bag(&bag, false).rotation, 30.0);
        let bag = bag.with("rotation", 10);
        assert_eq!(TransformProps::from_bag(&bag, false).rotation, 10.0);
    }

    #[test]
    fn xy_translate_only_when_positioned() {
        let bag = AttrBag::new().with("x", 7).with("y", 8);
        assert_eq!(TransformProps::from_bag(&bag, true).translate, Vec2::new(7.0, 8.0));
        assert_eq!(TransformProps::from_bag(&bag, false).translate, Vec2::zero());
        let bag = bag.with("translateX", 1);
        assert_eq!(TransformProps::from_bag(&bag, true).translate, Vec2::new(1.0, 8.0));
    }

    #[test]
    fn translate_applies_after_scale() {
        let props = TransformProps {
            translate: Vec2::new(10.0, 0.0),
            scale: Vec2::splat(2.0),
            ..TransformProps::default()
        };
        assert_eq!(props.to_matrix().transform_point(Vec2::new(1.0, 0.0)), Vec2::new(12.0, 0.0));

        let bag = AttrBag::new().with("translateX", 10).with("scale", 2);
        assert_eq!(TransformProps::from_bag(&bag, false), props);
    }

    #[test]
    fn origin_composition() {
        // Scale 2 about (10, 10): (10,10) stays, (11,10) → (12,10).
        let bag = AttrBag::new().with("scale", 2).with("origin", "10, 10");
        let m = extract_transform(&bag, TransformSource::PLAIN).unwrap().unwrap();
        assert!(close(m, [2.0, 0.0, 0.0, 2.0, -10.0, -10.0]), "{m:?}");
        assert_eq!(m.transform_point(Vec2::new(10.0, 10.0)), Vec2::new(10.0, 10.0));
    }

    // ── precedence ──

    #[test]
    fn explicit_wins_over_discrete() {
        let bag = AttrBag::new().with("transform", "translate(3)").with("scale", 9);
        let m = extract_transform(&bag, TransformSource::PLAIN).unwrap();
        assert_eq!(m, Some(Matrix::translate(3.0, 0.0)));
    }

    #[test]
    fn own_attr_wins_over_transform() {
        let bag = AttrBag::new()
            .with("transform", "translate(3)")
            .with("gradientTransform", "scale(2)");
        let m = extract_transform(&bag, TransformSource::own("gradientTransform")).unwrap();
        assert_eq!(m, Some(Matrix::scale(2.0, 2.0)));
    }

    #[test]
    fn nothing_declared() {
        let bag = AttrBag::new().with("fill", "red").with("x", 3);
        assert_eq!(extract_transform(&bag, TransformSource::PLAIN), Ok(None));
    }

    #[test]
    fn matrix_array_and_object() {
        let list: Vec<AttrValue> = [1, 0, 0, 1, 4, 5].into_iter().map(AttrValue::from).collect();
        let bag = AttrBag::new().with("transform", list);
        assert_eq!(extract_transform(&bag, TransformSource::PLAIN), Ok(Some(Matrix::translate(4.0, 5.0))));

        let obj = AttrBag::new().with("translateX", 2);
        let bag = AttrBag::new().with("transform", obj);
        assert_eq!(extract_transform(&bag, TransformSource::PLAIN), Ok(Some(Matrix::translate(2.0, 0.0))));
    }

    #[test]
    fn malformed_is_visible() {
        let bag = AttrBag::new().with("transform", "rotate(");
        assert!(matches!(
            extract_transform(&bag, TransformSource::PLAIN),
            Err(ExtractError::Transform(_))
        ));
        let bag = AttrBag::new().with("transform", true);
        assert!(matches!(
            extract_transform(&bag, TransformSource::PLAIN),
            Err(ExtractError::TransformShape(_))
        ));
    }
}
