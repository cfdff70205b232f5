use anyhow::{Context, Result};

use svgbind_extract::coords::Rect;
use svgbind_extract::diff::{registry, ElementKind};
use svgbind_extract::logging::init_logging;
use svgbind_extract::paint::ResolvedPaint;
use svgbind_extract::{AttrBag, ExtractContext, ExtractError, NativeProps, ParseOutcome};

use crate::config::HostConfig;
use crate::element::{build_element, Extracted};

// ── NativeUpdate ──────────────────────────────────────────────────────────

/// Result of re-extracting a mounted element.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeUpdate {
    pub kind: ElementKind,
    /// The full record, to keep as `previous` for the next update.
    pub props: NativeProps,
    /// Only the declared fields that must cross to the native view.
    pub changed: NativeProps,
}

impl NativeUpdate {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

// ── SvgHost ───────────────────────────────────────────────────────────────

/// Entry point for a rendering host.
///
/// Owns the extraction context (font cache, mounted paint servers) for one
/// native view tree.
#[derive(Debug, Default)]
pub struct SvgHost {
    ctx: ExtractContext,
}

impl SvgHost {
    pub fn new(config: HostConfig) -> Self {
        if let Some(logging) = config.logging {
            init_logging(logging);
        }
        log::debug!("svg host created");
        Self { ctx: ExtractContext::new(config.extract) }
    }

    pub fn context(&self) -> &ExtractContext {
        &self.ctx
    }

    /// Builds the element record for `kind` inside the tree `owner`.
    pub fn extract(&mut self, kind: ElementKind, bag: &AttrBag, owner: &str) -> Result<Extracted, ExtractError> {
        build_element(kind, bag, owner, &mut self.ctx)
    }

    /// Re-extracts an element and reports which fields changed since
    /// `previous`.
    pub fn update(
        &mut self,
        kind: ElementKind,
        previous: &NativeProps,
        bag: &AttrBag,
        owner: &str,
    ) -> Result<NativeUpdate, ExtractError> {
        let extracted = self.extract(kind, bag, owner)?;
        let props = extracted.to_native();
        let changed = registry().changed_fields(extracted.kind, previous, &props);
        log::trace!("<{}> update: {} changed field(s)", extracted.kind.name(), changed.len());
        Ok(NativeUpdate { kind: extracted.kind, props, changed })
    }

    /// Extracts an element and, for gradients and patterns with an `id`,
    /// registers its paint server under `owner`.
    ///
    /// Mounting again with the same id replaces the previous server.
    pub fn mount(&mut self, kind: ElementKind, bag: &AttrBag, owner: &str) -> Result<Extracted, ExtractError> {
        let extracted = self.extract(kind, bag, owner)?;
        match extracted.element.paint_server() {
            Some((id, server)) => {
                let server = server.clone();
                self.ctx
                    .register_paint_server(id, owner, Box::new(move |_, opacity| server.faded(opacity)));
            }
            None if kind.is_paint_server() => {
                log::warn!("<{}> without an id cannot be referenced", kind.name());
            }
            None => {}
        }
        Ok(extracted)
    }

    /// Drops the paint server registered for `id` under `owner`.
    pub fn unmount(&mut self, id: &str, owner: &str) -> bool {
        self.ctx.unregister_paint_server(id, owner)
    }

    pub fn resolve_paint(
        &self,
        paint: &str,
        opacity: f32,
        dimensions: Option<Rect>,
        owner: &str,
    ) -> ParseOutcome<ResolvedPaint> {
        self.ctx.resolve_paint(paint, opacity, dimensions, owner)
    }

    /// JSON in, JSON out: `{ "kind": "...", "props": { ... } }`.
    pub fn extract_json(
        &mut self,
        kind_name: &str,
        attrs: &serde_json::Value,
        owner: &str,
    ) -> Result<serde_json::Value> {
        let kind = ElementKind::from_name(kind_name)
            .with_context(|| format!("unknown element kind \"{kind_name}\""))?;
        anyhow::ensure!(attrs.is_object(), "attributes of <{kind_name}> must be a JSON object");
        let bag = AttrBag::from_json(attrs).context("failed to read attribute object")?;

        let extracted = self
            .extract(kind, &bag, owner)
            .with_context(|| format!("failed to extract <{kind_name}>"))?;
        let props = extracted
            .to_native()
            .to_json()
            .context("failed to serialize native props")?;
        Ok(serde_json::json!({ "kind": extracted.kind.name(), "props": props }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use svgbind_extract::logging::LoggingConfig;
    use svgbind_extract::paint::{Paint, PaintServer};
    use svgbind_extract::{AttrValue, NativeValue};

    fn gradient_bag(id: &str) -> AttrBag {
        let stop = |offset: &str, color: &str| {
            AttrValue::Map(AttrBag::new().with("offset", offset).with("stopColor", color))
        };
        AttrBag::new()
            .with("id", id)
            .with("stops", vec![stop("0", "red"), stop("1", "blue")])
    }

    // ── lifecycle ──

    #[test]
    fn new_installs_logger_once() {
        let config = HostConfig::new().with_logging(LoggingConfig::default().with_filter("warn"));
        let _a = SvgHost::new(config.clone());
        let _b = SvgHost::new(config);
    }

    #[test]
    fn mount_registers_gradient() {
        let mut host = SvgHost::default();
        host.mount(ElementKind::LinearGradient, &gradient_bag("sky"), "doc").unwrap();
        assert!(host.context().servers().contains("sky", "doc"));

        let bbox = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
        match host.resolve_paint("url(#sky)", 0.5, Some(bbox), "doc") {
            ParseOutcome::Parsed(ResolvedPaint::Server(PaintServer::LinearGradient { stops, .. })) => {
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[0].color.a, 0.5);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(host.unmount("sky", "doc"));
        assert!(host.resolve_paint("url(#sky)", 1.0, None, "doc").is_degraded());
    }

    #[test]
    fn fill_reference_needs_mounted_server() {
        let mut host = SvgHost::default();
        let rect = AttrBag::new().with("fill", "url(#sky)").with("stroke", "url(#gone)");

        let native = host.extract(ElementKind::Rect, &rect, "doc").unwrap().to_native();
        assert_eq!(native.get("fill"), Some(&NativeValue::Null));
        assert_eq!(native.get("stroke"), Some(&NativeValue::Null));

        host.mount(ElementKind::LinearGradient, &gradient_bag("sky"), "doc").unwrap();
        let native = host.extract(ElementKind::Rect, &rect, "doc").unwrap().to_native();
        assert_eq!(native.get("fill"), Some(&Paint::Server("sky".to_string()).to_native()));
        assert_eq!(native.get("stroke"), Some(&NativeValue::Null));

        // Mounted in another tree only.
        let native = host.extract(ElementKind::Rect, &rect, "other").unwrap().to_native();
        assert_eq!(native.get("fill"), Some(&NativeValue::Null));
    }

    #[test]
    fn mount_plain_shape_registers_nothing() {
        let mut host = SvgHost::default();
        host.mount(ElementKind::Rect, &AttrBag::new().with("id", "r"), "doc").unwrap();
        assert!(host.context().servers().is_empty());
    }

    // ── updates ──

    #[test]
    fn update_reports_only_changes() {
        let mut host = SvgHost::default();
        let bag = AttrBag::new().with("r", 5.0).with("strokeDasharray", "2,4").with("stroke", "red");
        let first = host.extract(ElementKind::Circle, &bag, "doc").unwrap().to_native();

        let same = host.update(ElementKind::Circle, &first, &bag, "doc").unwrap();
        assert!(same.is_empty(), "{:?}", same.changed);

        let bag = bag.with("r", 6.0);
        let update = host.update(ElementKind::Circle, &first, &bag, "doc").unwrap();
        assert_eq!(update.changed.len(), 1);
        assert_eq!(update.changed.get("r"), Some(&NativeValue::Number(6.0)));
    }

    #[test]
    fn removed_field_is_reset() {
        let mut host = SvgHost::default();
        let first = host
            .extract(ElementKind::Rect, &AttrBag::new().with("fill", "red"), "doc")
            .unwrap()
            .to_native();
        let update = host.update(ElementKind::Rect, &first, &AttrBag::new(), "doc").unwrap();
        assert_eq!(update.changed.get("fill"), Some(&NativeValue::Null));
    }

    #[test]
    fn text_path_fallback_diffs_as_span() {
        let mut host = SvgHost::default();
        let update = host
            .update(ElementKind::TextPath, &NativeProps::new(), &AttrBag::new().with("children", "x"), "doc")
            .unwrap();
        assert_eq!(update.kind, ElementKind::TSpan);
        assert!(update.changed.contains("frame"));
    }

    // ── json ──

    #[test]
    fn extract_json_round() {
        let mut host = SvgHost::default();
        let out = host
            .extract_json("polygon", &json!({ "points": "0,0 10,0 10,10", "fill": "#f00" }), "doc")
            .unwrap();
        assert_eq!(out["kind"], "polygon");
        assert_eq!(out["props"]["d"], "M0,0L10,0L10,10z");
        assert_eq!(out["props"]["fill"], json!([0.0, 1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn extract_json_errors_carry_context() {
        let mut host = SvgHost::default();
        let err = host.extract_json("blob", &json!({}), "doc").unwrap_err();
        assert!(err.to_string().contains("unknown element kind"));

        let err = host.extract_json("rect", &json!([1, 2]), "doc").unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));

        let err = host.extract_json("path", &json!({ "transform": "spin(1)" }), "doc").unwrap_err();
        assert_eq!(err.to_string(), "failed to extract <path>");
        assert!(err.chain().count() >= 2);
    }
}
