use std::collections::{BTreeMap, HashMap};

use state::InitCell;

use crate::native::{NativeProps, NativeValue};

use super::ElementKind;

// ── AttributeSet ──────────────────────────────────────────────────────────

/// How one native field is compared between updates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Element-wise comparison instead of identity.
    pub requires_deep_compare: bool,
}

const SHALLOW: AttributeSpec = AttributeSpec { requires_deep_compare: false };
const DEEP: AttributeSpec = AttributeSpec { requires_deep_compare: true };

/// Native fields declared for one element kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    attrs: BTreeMap<&'static str, AttributeSpec>,
}

impl AttributeSet {
    fn of(shallow: &[&'static str], deep: &[&'static str]) -> Self {
        let attrs = shallow
            .iter()
            .map(|n| (*n, SHALLOW))
            .chain(deep.iter().map(|n| (*n, DEEP)))
            .collect();
        Self { attrs }
    }

    /// Every attribute of both sets. `other` wins on conflicts.
    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        let mut attrs = self.attrs.clone();
        attrs.extend(other.attrs.iter().map(|(k, v)| (*k, *v)));
        AttributeSet { attrs }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attrs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attrs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

// ── DiffRegistry ──────────────────────────────────────────────────────────

/// Per-kind attribute sets, built once for the whole process.
#[derive(Debug)]
pub struct DiffRegistry {
    sets: HashMap<ElementKind, AttributeSet>,
}

static REGISTRY: InitCell<DiffRegistry> = InitCell::new();

/// The process-wide registry.
pub fn registry() -> &'static DiffRegistry {
    REGISTRY.get_or_init(DiffRegistry::build)
}

impl DiffRegistry {
    fn build() -> Self {
        let view_box = AttributeSet::of(&["minX", "minY", "vbWidth", "vbHeight", "align", "meetOrSlice", "name"], &[]);
        let node = AttributeSet::of(
            &["name", "opacity", "clipRule", "clipPathRef", "responsible"],
            &["matrix", "clipPath", "propList"],
        );
        let fill_and_stroke = AttributeSet::of(
            &[
                "fillOpacity",
                "fillRule",
                "strokeOpacity",
                "strokeWidth",
                "strokeLinecap",
                "strokeLinejoin",
                "strokeDashoffset",
                "strokeMiterlimit",
            ],
            &["fill", "stroke", "strokeDasharray"],
        );
        let renderable = node.union(&fill_and_stroke);
        let clip_path = AttributeSet::of(&["name"], &[]);

        let path = AttributeSet::of(&[], &["d"]).union(&renderable);
        let span = AttributeSet::of(&["fontFamily", "fontSize", "fontWeight", "fontStyle", "line"], &["frame"])
            .union(&renderable);
        let text = AttributeSet::of(&["alignment"], &["frame"]).union(&renderable);
        let text_path = AttributeSet::of(&["href", "startOffset", "method", "spacing", "side"], &[]).union(&span);
        let gradient_common = AttributeSet::of(&["gradientUnits"], &["gradient", "gradientTransform"]);
        let linear = AttributeSet::of(&["x1", "y1", "x2", "y2"], &[])
            .union(&gradient_common)
            .union(&clip_path);
        let radial = AttributeSet::of(&["fx", "fy", "rx", "ry", "cx", "cy", "r"], &[])
            .union(&gradient_common)
            .union(&clip_path);
        let mask = AttributeSet::of(&["x", "y", "width", "height", "maskUnits", "maskContentUnits"], &["maskTransform"])
            .union(&clip_path);
        let pattern = AttributeSet::of(
            &["x", "y", "width", "height", "patternUnits", "patternContentUnits"],
            &["patternTransform"],
        )
        .union(&view_box)
        .union(&clip_path);
        let svg = AttributeSet::of(&["bbWidth", "bbHeight"], &[]).union(&view_box);

        let sets = HashMap::from([
            (ElementKind::Group, renderable.clone()),
            (ElementKind::Use, AttributeSet::of(&["href", "width", "height"], &[]).union(&renderable)),
            (ElementKind::Path, path.clone()),
            (ElementKind::Polygon, path.clone()),
            (ElementKind::Polyline, path),
            (ElementKind::TSpan, span),
            (ElementKind::Text, text),
            (ElementKind::TextPath, text_path),
            (ElementKind::ClipPath, clip_path),
            (ElementKind::LinearGradient, linear),
            (ElementKind::RadialGradient, radial),
            (ElementKind::Circle, AttributeSet::of(&["cx", "cy", "r"], &[]).union(&renderable)),
            (ElementKind::Ellipse, AttributeSet::of(&["cx", "cy", "rx", "ry"], &[]).union(&renderable)),
            (
                ElementKind::Image,
                AttributeSet::of(&["x", "y", "width", "height", "src", "align", "meetOrSlice"], &[]).union(&renderable),
            ),
            (ElementKind::Line, AttributeSet::of(&["x1", "y1", "x2", "y2"], &[]).union(&renderable)),
            (
                ElementKind::Rect,
                AttributeSet::of(&["x", "y", "width", "height", "rx", "ry"], &[]).union(&renderable),
            ),
            (ElementKind::Mask, mask),
            (ElementKind::Pattern, pattern),
            (ElementKind::Svg, svg),
        ]);
        log::debug!("attribute diff registry built for {} element kinds", sets.len());
        Self { sets }
    }

    pub fn attributes(&self, kind: ElementKind) -> Option<&AttributeSet> {
        self.sets.get(&kind)
    }

    pub fn is_declared(&self, kind: ElementKind, name: &str) -> bool {
        self.attributes(kind).is_some_and(|set| set.contains(name))
    }

    /// `false` for shallow and for undeclared attributes.
    pub fn requires_deep_compare(&self, kind: ElementKind, name: &str) -> bool {
        self.attributes(kind)
            .and_then(|set| set.get(name))
            .is_some_and(|spec| spec.requires_deep_compare)
    }

    /// Whether `name` must be resent when going from `old` to `new`.
    ///
    /// Absent on both sides is unchanged; absent on one side is changed.
    /// Deep attributes compare arrays element by element; shallow ones
    /// compare scalars by value and arrays or records by identity.
    pub fn attribute_changed(
        &self,
        kind: ElementKind,
        name: &str,
        old: Option<&NativeValue>,
        new: Option<&NativeValue>,
    ) -> bool {
        match (old, new) {
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
            (Some(a), Some(b)) if self.requires_deep_compare(kind, name) => deep_differ(a, b),
            (Some(a), Some(b)) => !a.same(b),
        }
    }

    /// Declared fields whose value changed between two extractions.
    ///
    /// Fields that disappeared come back as `Null` so the native side resets
    /// them.
    pub fn changed_fields(&self, kind: ElementKind, old: &NativeProps, new: &NativeProps) -> NativeProps {
        let mut out = NativeProps::new();
        let Some(set) = self.attributes(kind) else {
            return out;
        };
        for name in set.names() {
            let (before, after) = (old.get(name), new.get(name));
            if self.attribute_changed(kind, name, before, after) {
                out.insert(name, after.cloned().unwrap_or(NativeValue::Null));
            }
        }
        out
    }
}

fn deep_differ(a: &NativeValue, b: &NativeValue) -> bool {
    match (a.as_array(), b.as_array()) {
        (Some(xs), Some(ys)) => xs.len() != ys.len() || xs.iter().zip(ys).any(|(x, y)| x != y),
        _ => a != b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── declarations ──

    #[test]
    fn deep_attributes() {
        let reg = registry();
        for name in ["matrix", "clipPath", "propList", "fill", "stroke", "strokeDasharray", "d"] {
            assert!(reg.requires_deep_compare(ElementKind::Path, name), "{name}");
        }
        assert!(reg.requires_deep_compare(ElementKind::LinearGradient, "gradient"));
        assert!(reg.requires_deep_compare(ElementKind::Text, "frame"));
        assert!(!reg.requires_deep_compare(ElementKind::Path, "opacity"));
        assert!(!reg.requires_deep_compare(ElementKind::Path, "nonexistent"));
    }

    #[test]
    fn sets_are_unions() {
        let reg = registry();
        assert!(reg.is_declared(ElementKind::Circle, "r"));
        assert!(reg.is_declared(ElementKind::Circle, "strokeWidth"));
        assert!(reg.is_declared(ElementKind::Circle, "clipPathRef"));
        assert!(!reg.is_declared(ElementKind::ClipPath, "fill"));
        assert!(reg.is_declared(ElementKind::TextPath, "fontSize"));
        assert!(reg.is_declared(ElementKind::Svg, "meetOrSlice"));
        for kind in ElementKind::ALL {
            assert!(reg.attributes(kind).is_some(), "{kind:?}");
        }
    }

    #[test]
    fn registry_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
    }

    // ── comparison ──

    #[test]
    fn deep_compare_is_element_wise() {
        let reg = registry();
        let a = NativeValue::numbers([1.0, 2.0]);
        let b = NativeValue::numbers([1.0, 2.0]);
        assert!(!reg.attribute_changed(ElementKind::Path, "matrix", Some(&a), Some(&b)));
        let c = NativeValue::numbers([1.0, 3.0]);
        assert!(reg.attribute_changed(ElementKind::Path, "matrix", Some(&a), Some(&c)));
        let d = NativeValue::numbers([1.0]);
        assert!(reg.attribute_changed(ElementKind::Path, "matrix", Some(&a), Some(&d)));
    }

    #[test]
    fn shallow_compare_uses_identity_for_arrays() {
        let reg = registry();
        let a = NativeValue::numbers([1.0, 2.0]);
        let b = NativeValue::numbers([1.0, 2.0]);
        assert!(reg.attribute_changed(ElementKind::Rect, "width", Some(&a), Some(&b)));
        assert!(!reg.attribute_changed(ElementKind::Rect, "width", Some(&a), Some(&a.clone())));
        let n = NativeValue::Number(4.0);
        assert!(!reg.attribute_changed(ElementKind::Rect, "width", Some(&n), Some(&NativeValue::Number(4.0))));
    }

    #[test]
    fn absence_rules() {
        let reg = registry();
        let v = NativeValue::numbers([1.0]);
        assert!(!reg.attribute_changed(ElementKind::Path, "fill", None, None));
        assert!(reg.attribute_changed(ElementKind::Path, "fill", None, Some(&v)));
        assert!(reg.attribute_changed(ElementKind::Path, "fill", Some(&v), None));
    }

    #[test]
    fn changed_fields_only_declared_and_changed() {
        let reg = registry();
        let mut old = NativeProps::new();
        old.insert("r", 5.0f32);
        old.insert("fill", NativeValue::numbers([0.0, 1.0, 0.0, 0.0, 1.0]));
        old.insert("strokeWidth", 2.0f32);

        let mut new = NativeProps::new();
        new.insert("r", 6.0f32);
        new.insert("fill", NativeValue::numbers([0.0, 1.0, 0.0, 0.0, 1.0]));
        new.insert("bogus", 1.0f32);

        let changed = reg.changed_fields(ElementKind::Circle, &old, &new);
        assert_eq!(changed.get("r"), Some(&NativeValue::Number(6.0)));
        assert_eq!(changed.get("strokeWidth"), Some(&NativeValue::Null));
        assert!(!changed.contains("fill"));
        assert!(!changed.contains("bogus"));
    }
}
