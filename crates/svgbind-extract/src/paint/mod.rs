//! Colors, paints and the fill/stroke descriptors built from them.

mod brush;
mod color;
mod fill;
mod gradient;
mod opacity;
mod server;
mod stroke;

pub use brush::{extract_paint, url_id, Paint};
pub use color::{parse_color, parse_color_str, Rgba};
pub use fill::{extract_fill, parse_fill_rule, FillDescriptor, FillRule, FILL_ATTRS};
pub use gradient::{extract_stops, faded, parse_units, stops_to_native, ColorStop, Units};
pub use opacity::extract_opacity;
pub use server::{PaintGenerator, PaintServer, PaintServerRegistry, ResolvedPaint};
pub use stroke::{
    extract_stroke, parse_dash_array, parse_line_cap, parse_line_join, LineCap, LineJoin, StrokeDescriptor,
    DEFAULT_MITER_LIMIT, DEFAULT_STROKE_WIDTH, STROKE_ATTRS,
};

use crate::value::AttrBag;

/// Fill and stroke attribute names explicitly declared on `bag`, in
/// declaration-table order.
///
/// The native side uses this list to tell inherited values from explicit ones.
pub fn prop_list(bag: &AttrBag) -> Vec<&'static str> {
    FILL_ATTRS
        .iter()
        .chain(STROKE_ATTRS.iter())
        .copied()
        .filter(|name| bag.contains(name))
        .collect()
}
