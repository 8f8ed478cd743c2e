//! WASM bindings for the palace-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Every entry point returns scene JSON; failures go into its `error` field.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::error::PayloadError;
use crate::layout::{layout_gallery, GalleryConfig, UnitSource};
use crate::output::SceneOutput;
use crate::payload::decode_payload;
use crate::session::GallerySession;

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn console_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Forward decoding notes to the browser console; nothing listens to
/// `tracing` events there.
fn report_warnings(warnings: &[String]) {
    for w in warnings {
        console_warn(&format!("Analysis payload: {}", w));
    }
}

fn error_scene(cfg: &GalleryConfig, err: &PayloadError) -> String {
    console_error(&format!("Error building gallery: {}", err));
    SceneOutput { placeholder: Some(cfg.placeholder.clone()), ..SceneOutput::default() }
        .with_error(err.to_string())
        .to_json()
}

fn build_with<U: UnitSource + ?Sized>(payload: &str, cfg: &GalleryConfig, units: &mut U) -> String {
    match decode_payload(payload) {
        Ok(decoded) => {
            report_warnings(&decoded.warnings);
            let gallery = layout_gallery(&decoded.nodes, cfg, units);
            SceneOutput::from_gallery(&gallery, cfg).with_warnings(decoded.warnings).to_json()
        }
        Err(e) => error_scene(cfg, &e),
    }
}

/// Lay out an analysis response with fresh randomness.
#[wasm_bindgen]
pub fn build_gallery(payload: &str) -> String {
    build_with(payload, &GalleryConfig::default(), &mut StdRng::from_entropy())
}

/// Lay out an analysis response with reproducible scatter.
#[wasm_bindgen]
pub fn build_gallery_seeded(payload: &str, seed: u64) -> String {
    build_with(payload, &GalleryConfig::default(), &mut StdRng::seed_from_u64(seed))
}

/// Lay out with config overrides given as JSON (missing fields use defaults).
#[wasm_bindgen]
pub fn build_gallery_with_config(payload: &str, config: &str) -> String {
    let cfg = match parse_config(config) {
        Ok(cfg) => cfg,
        Err(e) => return error_scene(&GalleryConfig::default(), &e),
    };
    build_with(payload, &cfg, &mut StdRng::from_entropy())
}

fn parse_config(config: &str) -> Result<GalleryConfig, PayloadError> {
    let cfg: GalleryConfig = serde_json::from_str(config)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Gallery that survives failed refreshes.
#[wasm_bindgen]
pub struct PalaceSession {
    inner: GallerySession,
}

#[wasm_bindgen]
impl PalaceSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PalaceSession {
        PalaceSession { inner: GallerySession::default() }
    }

    /// Rebuild from a new analysis response. On failure the previous
    /// gallery is returned along with the error.
    pub fn refresh(&mut self, payload: &str) -> String {
        match self.inner.refresh(payload) {
            Ok(_) => {
                report_warnings(self.inner.warnings());
                self.inner.scene().to_json()
            }
            Err(e) => {
                console_error(&format!("Error refreshing gallery: {}", e));
                self.inner.scene().with_error(e.to_string()).to_json()
            }
        }
    }

    pub fn scene(&self) -> String {
        self.inner.scene().to_json()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for PalaceSession {
    fn default() -> Self {
        Self::new()
    }
}
