//! Typed per-kind element records and the builders that fill them from an
//! attribute bag.

use std::collections::BTreeMap;

use svgbind_extract::coords::{format_percentage_props, length_attr, Length, Vec2};
use svgbind_extract::diff::ElementKind;
use svgbind_extract::paint::{extract_stops, parse_units, ColorStop, PaintServer, Units};
use svgbind_extract::points::{polygon_path, polyline_path};
use svgbind_extract::text::{
    extract_text_path, parse_href, parse_text_anchor, text_position, TextAnchor, TextFrame, TextPathAttrs,
};
use svgbind_extract::transform::{extract_transform, Matrix, TransformSource};
use svgbind_extract::viewbox::{extract_view_box, parse_aspect_ratio, Align, MeetOrSlice, ViewBox};
use svgbind_extract::{AttrBag, AttrValue, ExtractContext, ExtractError, NativeProps, NativeValue};

use crate::props::{element_name, RenderableProps};

// ── Records ───────────────────────────────────────────────────────────────

/// Circle, ellipse, line and rect: common props plus declared geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeProps {
    pub base: RenderableProps,
    /// Only the geometry attributes actually declared.
    pub geometry: BTreeMap<&'static str, Length>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathProps {
    pub base: RenderableProps,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageProps {
    pub shape: ShapeProps,
    /// Passed through verbatim; resolving it is up to the native side.
    pub src: Option<String>,
    pub align: Align,
    pub meet_or_slice: MeetOrSlice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseProps {
    pub shape: ShapeProps,
    pub href: Option<String>,
}

/// Text and tspan.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub base: RenderableProps,
    pub frame: TextFrame,
    pub alignment: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPathProps {
    pub text: TextProps,
    pub path: TextPathAttrs,
}

/// Linear and radial gradients, and patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintServerProps {
    pub name: Option<String>,
    pub server: PaintServer,
    /// Patterns only.
    pub view_box: Option<ViewBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaskProps {
    pub name: Option<String>,
    pub geometry: BTreeMap<&'static str, Length>,
    pub units: Units,
    pub content_units: Units,
    pub matrix: Option<Matrix>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgProps {
    pub view_box: Option<ViewBox>,
    pub bb_width: Option<Length>,
    pub bb_height: Option<Length>,
}

/// One element's normalized props, validated once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Group(RenderableProps),
    Shape(ShapeProps),
    Path(PathProps),
    Image(ImageProps),
    Use(UseProps),
    Text(TextProps),
    TextPath(TextPathProps),
    ClipPath { name: Option<String> },
    PaintServer(PaintServerProps),
    Mask(MaskProps),
    Svg(SvgProps),
}

impl Element {
    /// Flat native-ready record.
    pub fn to_native(&self) -> NativeProps {
        let mut props = NativeProps::new();
        match self {
            Element::Group(base) => base.write_native(&mut props),
            Element::Shape(shape) => shape.write_native(&mut props),
            Element::Path(path) => {
                path.base.write_native(&mut props);
                props.insert("d", path.d.as_str());
            }
            Element::Image(image) => {
                image.shape.write_native(&mut props);
                props.insert_opt("src", image.src.as_deref());
                props.insert("align", image.align.name());
                props.insert("meetOrSlice", NativeValue::from(image.meet_or_slice as u8));
            }
            Element::Use(use_) => {
                use_.shape.write_native(&mut props);
                props.insert_opt("href", use_.href.as_deref());
            }
            Element::Text(text) => text.write_native(&mut props),
            Element::TextPath(text_path) => {
                text_path.text.write_native(&mut props);
                text_path.path.write_native(&mut props);
            }
            Element::ClipPath { name } => props.insert_opt("name", name.as_deref()),
            Element::PaintServer(ps) => {
                props.insert_opt("name", ps.name.as_deref());
                ps.server.write_native(&mut props);
                if let Some(vb) = &ps.view_box {
                    vb.write_native(&mut props);
                }
            }
            Element::Mask(mask) => {
                props.insert_opt("name", mask.name.as_deref());
                write_lengths(&mask.geometry, &mut props);
                props.insert("maskUnits", NativeValue::from(mask.units as u8));
                props.insert("maskContentUnits", NativeValue::from(mask.content_units as u8));
                props.insert_opt("maskTransform", mask.matrix.map(|m| m.to_native()));
            }
            Element::Svg(svg) => {
                if let Some(vb) = &svg.view_box {
                    vb.write_native(&mut props);
                }
                props.insert_opt("bbWidth", svg.bb_width.map(Length::to_native));
                props.insert_opt("bbHeight", svg.bb_height.map(Length::to_native));
            }
        }
        props
    }

    /// The common renderable props, for kinds that carry them.
    fn base_mut(&mut self) -> Option<&mut RenderableProps> {
        match self {
            Element::Group(base) => Some(base),
            Element::Shape(shape) | Element::Image(ImageProps { shape, .. }) | Element::Use(UseProps { shape, .. }) => {
                Some(&mut shape.base)
            }
            Element::Path(path) => Some(&mut path.base),
            Element::Text(text) | Element::TextPath(TextPathProps { text, .. }) => Some(&mut text.base),
            Element::ClipPath { .. } | Element::PaintServer(_) | Element::Mask(_) | Element::Svg(_) => None,
        }
    }

    /// The id and descriptor of a gradient or pattern.
    pub fn paint_server(&self) -> Option<(&str, &PaintServer)> {
        match self {
            Element::PaintServer(ps) => ps.name.as_deref().map(|id| (id, &ps.server)),
            _ => None,
        }
    }
}

impl ShapeProps {
    fn write_native(&self, props: &mut NativeProps) {
        self.base.write_native(props);
        write_lengths(&self.geometry, props);
    }
}

impl TextProps {
    fn write_native(&self, props: &mut NativeProps) {
        self.base.write_native(props);
        props.insert("alignment", NativeValue::from(self.alignment as u8));
        props.insert("frame", self.frame.to_native());
        if let Some(font) = &self.frame.font {
            props.insert("fontFamily", font.family.as_str());
            props.insert("fontSize", font.size);
            props.insert("fontWeight", font.weight.name());
            props.insert("fontStyle", font.style.name());
        }
    }
}

fn write_lengths(lengths: &BTreeMap<&'static str, Length>, props: &mut NativeProps) {
    for (name, len) in lengths {
        props.insert(*name, len.to_native());
    }
}

// ── Build ─────────────────────────────────────────────────────────────────

/// An element record together with the kind it was built as.
///
/// The kind can differ from the requested one: a text path whose `href`
/// cannot be read is built as a plain span.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub kind: ElementKind,
    pub element: Element,
}

impl Extracted {
    pub fn to_native(&self) -> NativeProps {
        self.element.to_native()
    }
}

/// Builds the typed record for `kind` from its declared attributes.
///
/// Fill and stroke references resolve against the paint servers mounted
/// under `owner`.
pub fn build_element(
    kind: ElementKind,
    bag: &AttrBag,
    owner: &str,
    ctx: &mut ExtractContext,
) -> Result<Extracted, ExtractError> {
    let (kind, mut element) = build_record(kind, bag, ctx)?;
    if let Some(base) = element.base_mut() {
        base.check_paint_servers(ctx.servers(), owner);
    }
    Ok(Extracted { kind, element })
}

fn build_record(
    kind: ElementKind,
    bag: &AttrBag,
    ctx: &mut ExtractContext,
) -> Result<(ElementKind, Element), ExtractError> {
    let element = match kind {
        ElementKind::Group => Element::Group(RenderableProps::extract(bag, TransformSource::positioned())?),
        ElementKind::Circle => Element::Shape(build_shape(bag, &["cx", "cy", "r"])?),
        ElementKind::Ellipse => Element::Shape(build_shape(bag, &["cx", "cy", "rx", "ry"])?),
        ElementKind::Line => Element::Shape(build_shape(bag, &["x1", "y1", "x2", "y2"])?),
        ElementKind::Rect => Element::Shape(build_shape(bag, &["x", "y", "width", "height", "rx", "ry"])?),
        ElementKind::Path => Element::Path(build_path(bag)?),
        ElementKind::Polygon => Element::Path(build_poly(bag, true)?),
        ElementKind::Polyline => Element::Path(build_poly(bag, false)?),
        ElementKind::Image => Element::Image(build_image(bag)?),
        ElementKind::Use => Element::Use(build_use(bag)?),
        ElementKind::Text | ElementKind::TSpan => Element::Text(build_text(bag, ctx)?),
        ElementKind::TextPath => match extract_text_path(bag) {
            Ok(path) => Element::TextPath(TextPathProps { text: build_text(bag, ctx)?, path }),
            Err(e) => {
                log::warn!("textPath: {e}, rendering as tspan");
                return Ok((ElementKind::TSpan, Element::Text(build_text(bag, ctx)?)));
            }
        },
        ElementKind::ClipPath => Element::ClipPath { name: element_name(bag) },
        ElementKind::LinearGradient => Element::PaintServer(build_linear_gradient(bag)?),
        ElementKind::RadialGradient => Element::PaintServer(build_radial_gradient(bag)?),
        ElementKind::Pattern => Element::PaintServer(build_pattern(bag)?),
        ElementKind::Mask => Element::Mask(build_mask(bag)?),
        ElementKind::Svg => Element::Svg(build_svg(bag)?),
    };
    Ok((kind, element))
}

// ── Shapes ────────────────────────────────────────────────────────────────

fn build_shape(bag: &AttrBag, geometry: &[&'static str]) -> Result<ShapeProps, ExtractError> {
    Ok(ShapeProps {
        base: RenderableProps::extract(bag, TransformSource::PLAIN)?,
        geometry: format_percentage_props(bag, geometry),
    })
}

fn build_path(bag: &AttrBag) -> Result<PathProps, ExtractError> {
    Ok(PathProps {
        base: RenderableProps::extract(bag, TransformSource::PLAIN)?,
        d: bag.get_str("d").unwrap_or_default().to_string(),
    })
}

fn build_poly(bag: &AttrBag, closed: bool) -> Result<PathProps, ExtractError> {
    let d = match bag.get("points") {
        Some(points) if closed => polygon_path(points).into_result()?,
        Some(points) => polyline_path(points).into_result()?,
        None => String::new(),
    };
    Ok(PathProps { base: RenderableProps::extract(bag, TransformSource::PLAIN)?, d })
}

fn build_image(bag: &AttrBag) -> Result<ImageProps, ExtractError> {
    let (align, meet_or_slice) = parse_aspect_ratio(bag.get("preserveAspectRatio"))
        .settle("preserveAspectRatio")
        .unwrap_or_default();
    Ok(ImageProps {
        shape: build_shape(bag, &["x", "y", "width", "height"])?,
        src: bag.get_str("href").or_else(|| bag.get_str("src")).map(str::to_string),
        align,
        meet_or_slice,
    })
}

fn build_use(bag: &AttrBag) -> Result<UseProps, ExtractError> {
    Ok(UseProps {
        shape: ShapeProps {
            base: RenderableProps::extract(bag, TransformSource::positioned())?,
            geometry: format_percentage_props(bag, &["width", "height"]),
        },
        href: bag.get("href").and_then(|v| parse_href(v).settle("href")),
    })
}

// ── Text ──────────────────────────────────────────────────────────────────

fn build_text(bag: &AttrBag, ctx: &mut ExtractContext) -> Result<TextProps, ExtractError> {
    let mut base = RenderableProps::extract(bag, TransformSource::PLAIN)?;
    // The start position applies outside the element's own transform.
    if let Some(Vec2 { x, y }) = text_position(bag) {
        let inner = base.matrix.unwrap_or_default();
        base.matrix = Some(Matrix::translate(x, y).multiply(&inner));
    }
    Ok(TextProps {
        base,
        frame: ctx.extract_text_frame(bag),
        alignment: parse_text_anchor(bag.get("textAnchor")).settle("textAnchor").unwrap_or_default(),
    })
}

// ── Paint servers ─────────────────────────────────────────────────────────

/// Stop declarations from `stops`, or from the element's `children`.
fn stop_bags(bag: &AttrBag) -> Vec<AttrBag> {
    let Some(AttrValue::List(items)) = bag.get("stops").or_else(|| bag.get("children")) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            AttrValue::Map(stop) => Some(stop.clone()),
            other => {
                log::warn!("gradient stop: {other:?} is not an object, skipping");
                None
            }
        })
        .collect()
}

/// `default` when `key` is absent; unknown keywords degrade to object
/// bounding box.
fn units_or(bag: &AttrBag, key: &str, default: Units) -> Units {
    match bag.get(key) {
        Some(value) => parse_units(Some(value)).settle(key).unwrap_or_default(),
        None => default,
    }
}

fn gradient_parts(bag: &AttrBag) -> Result<(Vec<ColorStop>, Units, Option<Matrix>), ExtractError> {
    let units = units_or(bag, "gradientUnits", Units::ObjectBoundingBox);
    let matrix = extract_transform(bag, TransformSource::own("gradientTransform"))?;
    Ok((extract_stops(&stop_bags(bag)), units, matrix))
}

fn length_or(bag: &AttrBag, key: &str, default: Length) -> Length {
    length_attr(bag, key).unwrap_or(default)
}

fn build_linear_gradient(bag: &AttrBag) -> Result<PaintServerProps, ExtractError> {
    let (stops, units, matrix) = gradient_parts(bag)?;
    let server = PaintServer::LinearGradient {
        x1: length_or(bag, "x1", Length::percent(0.0)),
        y1: length_or(bag, "y1", Length::percent(0.0)),
        x2: length_or(bag, "x2", Length::percent(1.0)),
        y2: length_or(bag, "y2", Length::percent(0.0)),
        stops,
        units,
        matrix,
    };
    Ok(PaintServerProps { name: element_name(bag), server, view_box: None })
}

fn build_radial_gradient(bag: &AttrBag) -> Result<PaintServerProps, ExtractError> {
    let (stops, units, matrix) = gradient_parts(bag)?;
    let half = Length::percent(0.5);
    let r = length_or(bag, "r", half);
    let server = PaintServer::RadialGradient {
        fx: length_or(bag, "fx", half),
        fy: length_or(bag, "fy", half),
        rx: length_or(bag, "rx", r),
        ry: length_or(bag, "ry", r),
        cx: length_or(bag, "cx", half),
        cy: length_or(bag, "cy", half),
        stops,
        units,
        matrix,
    };
    Ok(PaintServerProps { name: element_name(bag), server, view_box: None })
}

fn build_pattern(bag: &AttrBag) -> Result<PaintServerProps, ExtractError> {
    let zero = Length::absolute(0.0);
    let server = PaintServer::Pattern {
        x: length_or(bag, "x", zero),
        y: length_or(bag, "y", zero),
        width: length_or(bag, "width", zero),
        height: length_or(bag, "height", zero),
        units: units_or(bag, "patternUnits", Units::ObjectBoundingBox),
        content_units: units_or(bag, "patternContentUnits", Units::UserSpaceOnUse),
        matrix: extract_transform(bag, TransformSource::own("patternTransform"))?,
        opacity: 1.0,
    };
    Ok(PaintServerProps { name: element_name(bag), server, view_box: extract_view_box(bag)? })
}

// ── Containers ────────────────────────────────────────────────────────────

fn build_mask(bag: &AttrBag) -> Result<MaskProps, ExtractError> {
    Ok(MaskProps {
        name: element_name(bag),
        geometry: format_percentage_props(bag, &["x", "y", "width", "height"]),
        units: units_or(bag, "maskUnits", Units::ObjectBoundingBox),
        content_units: units_or(bag, "maskContentUnits", Units::UserSpaceOnUse),
        matrix: extract_transform(bag, TransformSource::own("maskTransform"))?,
    })
}

fn build_svg(bag: &AttrBag) -> Result<SvgProps, ExtractError> {
    Ok(SvgProps {
        view_box: extract_view_box(bag)?,
        bb_width: length_attr(bag, "width"),
        bb_height: length_attr(bag, "height"),
    })
}
