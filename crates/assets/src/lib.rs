//! Vehicle model import and background loading.
//!
//! Models are identified by a content hash of the file bytes. The renderer
//! consumes a [`VehicleModel`] handle, never raw file paths.
//!
//! Only the glTF JSON document is interpreted: scene name, mesh and material
//! counts, and local bounds from `POSITION` accessors. Vertex data stays on
//! disk.

mod loader;
mod model;

pub use loader::spawn_load;
pub use model::{Aabb, VehicleModel, import_model, parse_glb, parse_gltf_json};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    /// First eight bytes of the SHA-256 digest of `bytes`.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        AssetId(u64::from_le_bytes(head))
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a GLB container: {0}")]
    BadContainer(String),
    #[error("unsupported model format `{0}` (expected .glb or .gltf)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_is_content_addressed() {
        assert_eq!(AssetId::of_bytes(b"car"), AssetId::of_bytes(b"car"));
        assert_ne!(AssetId::of_bytes(b"car"), AssetId::of_bytes(b"van"));
    }

    #[test]
    fn asset_id_display_is_fixed_width_hex() {
        assert_eq!(AssetId(0xab).to_string(), "00000000000000ab");
    }
}
