//! Attribute extraction for native vector-graphics views.
//!
//! Declared element attributes arrive as an [`AttrBag`] (color strings, dash
//! patterns, transform lists, font shorthand, point lists, percentages) and
//! leave as fixed-shape [`NativeProps`] fields a native rendering host can
//! consume without further parsing.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`paint`] | colors, paints, opacity, fill/stroke shaping, gradients, paint servers |
//! | [`coords`] | `Vec2`, `Rect`, `Length` |
//! | [`transform`] | affine `Matrix`, transform-list parser, discrete prop composition |
//! | [`text`] | font shorthand + cache, text frames, text anchors, text paths |
//! | [`points`] | polygon / polyline point lists |
//! | [`viewbox`] | `viewBox` and `preserveAspectRatio` |
//! | [`diff`] | per-element attribute sets and update differencing |
//! | [`error`] | `ParseOutcome`, `ExtractError`, `Warning` |
//!
//! # Failure policy
//!
//! Nothing in this crate panics on bad input. Every parser reports through
//! [`ParseOutcome`]: colors, opacities and enum keywords degrade to a safe
//! default with a [`Warning`], while transform lists, lengths, point lists,
//! view boxes and text-path references fail with an [`ExtractError`] the
//! caller is expected to handle.

pub mod config;
pub mod context;
pub mod coords;
pub mod diff;
pub mod error;
pub mod logging;
pub mod native;
pub mod paint;
pub mod points;
pub mod text;
pub mod transform;
pub mod value;
pub mod viewbox;

mod scan;

pub use config::ExtractConfig;
pub use context::ExtractContext;
pub use error::{ExtractError, ParseOutcome, Warning};
pub use native::{NativeProps, NativeValue};
pub use value::{AttrBag, AttrValue};
