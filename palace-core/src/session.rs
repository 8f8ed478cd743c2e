//! Last-good gallery state across analysis refreshes.
//!
//! A refresh either replaces the whole gallery or leaves it untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::layout::{layout_gallery, Gallery, GalleryConfig};
use crate::output::SceneOutput;
use crate::payload::decode_payload;

pub struct GallerySession {
    config: GalleryConfig,
    rng: StdRng,
    gallery: Gallery,
    warnings: Vec<String>,
}

impl GallerySession {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config, rng: StdRng::from_entropy(), gallery: Gallery::default(), warnings: Vec::new() }
    }

    /// Session whose scatter is reproducible for a given refresh sequence.
    pub fn with_seed(config: GalleryConfig, seed: u64) -> Self {
        Self { config, rng: StdRng::seed_from_u64(seed), gallery: Gallery::default(), warnings: Vec::new() }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Notes about records patched up during the last successful refresh.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Decode `payload` and rebuild the gallery from it.
    /// On error the previous gallery and its warnings are kept.
    pub fn refresh(&mut self, payload: &str) -> Result<&Gallery> {
        let decoded = decode_payload(payload)?;
        let gallery = layout_gallery(&decoded.nodes, &self.config, &mut self.rng);
        tracing::debug!(
            clusters = gallery.clusters.len(),
            items = gallery.item_count(),
            "gallery rebuilt"
        );
        self.gallery = gallery;
        self.warnings = decoded.warnings;
        Ok(&self.gallery)
    }

    pub fn scene(&self) -> SceneOutput {
        SceneOutput::from_gallery(&self.gallery, &self.config).with_warnings(self.warnings.clone())
    }

    pub fn clear(&mut self) {
        self.gallery = Gallery::default();
        self.warnings.clear();
    }
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new(GalleryConfig::default())
    }
}
