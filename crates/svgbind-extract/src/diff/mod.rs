//! Which native fields each element kind declares, and how to tell whether
//! a field changed between two extractions.

mod kind;
mod registry;

pub use kind::ElementKind;
pub use registry::{registry, AttributeSet, AttributeSpec, DiffRegistry};
