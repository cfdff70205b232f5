//! Coordinate and geometry types.
//!
//! Canonical space is SVG user space: origin top-left, +X right, +Y down.

mod length;
mod rect;
mod vec2;

pub use length::{format_percentage_props, length_attr, parse_length, parse_length_str, Length};
pub use rect::Rect;
pub use vec2::Vec2;
