//! Fonts, text content and text paths.

mod cache;
mod font;
mod frame;
mod path;

pub use cache::FontCache;
pub use font::{first_family, font_from_fields, parse_font_shorthand, FontDescriptor, FontStyle, FontWeight};
pub use frame::{
    extract_font, extract_text_frame, parse_text_anchor, text_position, TextAnchor, TextContent, TextFrame,
};
pub use path::{
    extract_text_path, parse_href, TextPathAttrs, TextPathMethod, TextPathSide, TextPathSpacing,
};
