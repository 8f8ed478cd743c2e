//! Layout core for the memory palace gallery.
//!
//! Knowledge nodes from the analysis service are grouped by cluster, the
//! clusters are set out on a ring of pedestals, and each cluster's nodes are
//! scattered around its pedestal. The result is handed to the 3D renderer as
//! JSON.

pub mod error;
pub mod layout;
pub mod model;
pub mod output;
pub mod payload;
pub mod session;
mod wasm;

pub use error::{ConfigError, PayloadError};
pub use layout::{layout_gallery, Cluster, Gallery, GalleryConfig, PlacedItem, UnitSource};
pub use model::{GroupKey, Node, Vec3};
pub use output::SceneOutput;
pub use payload::Decoded;
pub use session::GallerySession;
pub use wasm::{build_gallery, build_gallery_seeded, build_gallery_with_config, PalaceSession};
