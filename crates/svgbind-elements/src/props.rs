//! Props shared by every drawable element: opacity, transform, clipping,
//! fill and stroke.

use svgbind_extract::paint::{
    self, extract_fill, extract_opacity, extract_stroke, parse_fill_rule, url_id, FillDescriptor, FillRule, Paint,
    PaintServerRegistry, StrokeDescriptor,
};
use svgbind_extract::transform::{extract_transform, Matrix, TransformSource};
use svgbind_extract::{AttrBag, AttrValue, ExtractError, NativeProps, NativeValue};

/// Normalized common props of one renderable element.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableProps {
    /// The element's `id`, if any.
    pub name: Option<String>,
    pub opacity: f32,
    pub matrix: Option<Matrix>,
    pub clip_path_ref: Option<String>,
    /// Only meaningful together with `clip_path_ref`.
    pub clip_rule: Option<FillRule>,
    pub fill: Option<FillDescriptor>,
    pub stroke: Option<StrokeDescriptor>,
    /// Fill and stroke attributes explicitly declared on the element.
    pub prop_list: Vec<&'static str>,
}

impl RenderableProps {
    /// Reads the common props. A malformed transform fails the element.
    pub fn extract(bag: &AttrBag, source: TransformSource) -> Result<Self, ExtractError> {
        let clip_path_ref = clip_path_ref(bag.get("clipPath"));
        let clip_rule = clip_path_ref
            .as_ref()
            .map(|_| parse_fill_rule(bag.get("clipRule")).settle("clipRule").unwrap_or_default());

        Ok(Self {
            name: element_name(bag),
            opacity: extract_opacity(bag.get("opacity"), 1.0).settle("opacity").unwrap_or(1.0),
            matrix: extract_transform(bag, source)?,
            clip_path_ref,
            clip_rule,
            fill: extract_fill(bag),
            stroke: extract_stroke(bag),
            prop_list: paint::prop_list(bag),
        })
    }

    /// Drops fill and stroke references to paint servers not mounted under
    /// `owner`, so the native side never receives a dangling brush.
    pub fn check_paint_servers(&mut self, servers: &PaintServerRegistry, owner: &str) {
        let fill = self.fill.as_mut().map(|f| ("fill", &mut f.paint));
        let stroke = self.stroke.as_mut().map(|s| ("stroke", &mut s.paint));
        for (attr, paint) in fill.into_iter().chain(stroke) {
            let checked = servers.check_reference(std::mem::replace(paint, Paint::None), owner);
            *paint = checked.settle(attr).unwrap_or(Paint::None);
        }
    }

    pub fn write_native(&self, props: &mut NativeProps) {
        props.insert_opt("name", self.name.as_deref());
        props.insert("opacity", self.opacity);
        props.insert_opt("matrix", self.matrix.map(|m| m.to_native()));
        props.insert_opt("clipPathRef", self.clip_path_ref.as_deref());
        props.insert_opt("clipRule", self.clip_rule.map(FillRule::code));
        if let Some(fill) = &self.fill {
            fill.write_native(props);
        }
        if let Some(stroke) = &self.stroke {
            stroke.write_native(props);
        }
        props.insert("propList", NativeValue::array(self.prop_list.iter().copied().map(NativeValue::str)));
    }
}

/// `id` as the element's native name.
pub(crate) fn element_name(bag: &AttrBag) -> Option<String> {
    bag.get_str("id").filter(|id| !id.is_empty()).map(str::to_string)
}

fn clip_path_ref(value: Option<&AttrValue>) -> Option<String> {
    let value = value?;
    match value.as_str().and_then(url_id) {
        Some(id) => Some(id.to_string()),
        None => {
            log::warn!("clipPath: {value:?} is not a url(#id) reference, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_element_has_defaults() {
        let props = RenderableProps::extract(&AttrBag::new(), TransformSource::PLAIN).unwrap();
        assert_eq!(props.opacity, 1.0);
        assert!(props.matrix.is_none());
        assert!(props.fill.is_none());
        assert!(props.stroke.is_none());
        assert!(props.prop_list.is_empty());

        let mut native = NativeProps::new();
        props.write_native(&mut native);
        assert!(!native.contains("matrix"));
        assert!(!native.contains("fill"));
        assert_eq!(native.get("propList"), Some(&NativeValue::array(Vec::new())));
    }

    #[test]
    fn clip_path_reference() {
        let bag = AttrBag::new().with("clipPath", "url(#c1)").with("clipRule", "evenodd");
        let props = RenderableProps::extract(&bag, TransformSource::PLAIN).unwrap();
        assert_eq!(props.clip_path_ref.as_deref(), Some("c1"));
        assert_eq!(props.clip_rule, Some(FillRule::EvenOdd));

        let bad = AttrBag::new().with("clipPath", "c1").with("clipRule", "evenodd");
        let props = RenderableProps::extract(&bad, TransformSource::PLAIN).unwrap();
        assert!(props.clip_path_ref.is_none());
        assert!(props.clip_rule.is_none());
    }

    #[test]
    fn fill_stroke_and_prop_list() {
        let bag = AttrBag::new()
            .with("fill", "red")
            .with("stroke", "blue")
            .with("strokeWidth", 2.0)
            .with("id", "shape");
        let props = RenderableProps::extract(&bag, TransformSource::PLAIN).unwrap();
        assert_eq!(props.prop_list, vec!["fill", "stroke", "strokeWidth"]);
        assert_eq!(props.name.as_deref(), Some("shape"));

        let mut native = NativeProps::new();
        props.write_native(&mut native);
        assert_eq!(native.get("name"), Some(&NativeValue::str("shape")));
        assert_eq!(native.get("strokeWidth"), Some(&NativeValue::Number(2.0)));
        assert!(matches!(props.fill.map(|f| f.paint), Some(Paint::Solid(_))));
    }

    #[test]
    fn unmounted_server_reference_degrades_to_none() {
        let bag = AttrBag::new().with("fill", "url(#nope)").with("stroke", "url(#gone)");
        let mut props = RenderableProps::extract(&bag, TransformSource::PLAIN).unwrap();
        props.check_paint_servers(&PaintServerRegistry::new(), "doc");
        assert_eq!(props.fill.as_ref().map(|f| &f.paint), Some(&Paint::None));
        assert_eq!(props.stroke.as_ref().map(|s| &s.paint), Some(&Paint::None));

        let mut native = NativeProps::new();
        props.write_native(&mut native);
        assert_eq!(native.get("fill"), Some(&NativeValue::Null));
        assert_eq!(native.get("stroke"), Some(&NativeValue::Null));
    }

    #[test]
    fn bad_transform_fails() {
        let bag = AttrBag::new().with("transform", "wobble(3)");
        assert!(RenderableProps::extract(&bag, TransformSource::PLAIN).is_err());
    }

    #[test]
    fn positioned_source_translates() {
        let bag = AttrBag::new().with("x", 5.0).with("y", 7.0);
        let props = RenderableProps::extract(&bag, TransformSource::positioned()).unwrap();
        assert_eq!(props.matrix, Some(Matrix::translate(5.0, 7.0)));
        let plain = RenderableProps::extract(&bag, TransformSource::PLAIN).unwrap();
        assert!(plain.matrix.is_none());
    }
}
