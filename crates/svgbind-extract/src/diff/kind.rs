/// Every element kind that reaches the native side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Group,
    Path,
    Text,
    TSpan,
    TextPath,
    Use,
    ClipPath,
    LinearGradient,
    RadialGradient,
    Circle,
    Ellipse,
    Image,
    Line,
    Rect,
    Polygon,
    Polyline,
    Mask,
    Pattern,
    Svg,
}

impl ElementKind {
    pub const ALL: [ElementKind; 19] = [
        ElementKind::Group,
        ElementKind::Path,
        ElementKind::Text,
        ElementKind::TSpan,
        ElementKind::TextPath,
        ElementKind::Use,
        ElementKind::ClipPath,
        ElementKind::LinearGradient,
        ElementKind::RadialGradient,
        ElementKind::Circle,
        ElementKind::Ellipse,
        ElementKind::Image,
        ElementKind::Line,
        ElementKind::Rect,
        ElementKind::Polygon,
        ElementKind::Polyline,
        ElementKind::Mask,
        ElementKind::Pattern,
        ElementKind::Svg,
    ];

    /// Element tag name as written in markup (`"g"`, `"linearGradient"`, …).
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Group => "g",
            ElementKind::Path => "path",
            ElementKind::Text => "text",
            ElementKind::TSpan => "tspan",
            ElementKind::TextPath => "textPath",
            ElementKind::Use => "use",
            ElementKind::ClipPath => "clipPath",
            ElementKind::LinearGradient => "linearGradient",
            ElementKind::RadialGradient => "radialGradient",
            ElementKind::Circle => "circle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Image => "image",
            ElementKind::Line => "line",
            ElementKind::Rect => "rect",
            ElementKind::Polygon => "polygon",
            ElementKind::Polyline => "polyline",
            ElementKind::Mask => "mask",
            ElementKind::Pattern => "pattern",
            ElementKind::Svg => "svg",
        }
    }

    /// Inverse of [`name`](Self::name); also accepts ASCII case variants.
    pub fn from_name(name: &str) -> Option<ElementKind> {
        ElementKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Kinds that register a paint server when mounted.
    pub fn is_paint_server(self) -> bool {
        matches!(self, ElementKind::LinearGradient | ElementKind::RadialGradient | ElementKind::Pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ElementKind::from_name("LINEARGRADIENT"), Some(ElementKind::LinearGradient));
        assert_eq!(ElementKind::from_name("blink"), None);
    }
}
