//! Affine transforms: the matrix type, the SVG transform-list grammar, and
//! composition from discrete props.

mod compose;
mod matrix;
mod parser;

pub use compose::{extract_transform, TransformProps, TransformSource, DISCRETE_ATTRS};
pub use matrix::Matrix;
pub use parser::{parse_transform_list, TransformError};
