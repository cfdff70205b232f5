//! Per-element call contract between a declarative component tree and
//! native vector views.
//!
//! Each element kind gets a typed record ([`Element`]) built once from its
//! declared attributes; the record flattens into the [`NativeProps`] a
//! native view consumes. [`SvgHost`] owns the extraction context and adds
//! paint-server mount/unmount and update diffing on top.
//!
//! ```no_run
//! use svgbind_elements::{HostConfig, SvgHost};
//! use svgbind_extract::diff::ElementKind;
//! use svgbind_extract::AttrBag;
//!
//! let mut host = SvgHost::new(HostConfig::default());
//! let circle = AttrBag::new().with("r", 10.0).with("fill", "tomato");
//! let props = host.extract(ElementKind::Circle, &circle, "root")?.to_native();
//! # Ok::<(), svgbind_extract::ExtractError>(())
//! ```

pub mod config;
pub mod element;
pub mod host;
pub mod props;

pub use config::HostConfig;
pub use element::{build_element, Element, Extracted};
pub use host::{NativeUpdate, SvgHost};
pub use props::RenderableProps;

pub use svgbind_extract::NativeProps;
