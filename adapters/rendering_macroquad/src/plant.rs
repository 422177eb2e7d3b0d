use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use macroquad::texture::{FilterMode, Texture2D};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Waterweed drawn when no picture is configured.
const BUNDLED_WATERWEED: &[u8] = include_bytes!("../assets/waterweed.png");

/// Encoded plant picture read from disk before the window opens.
#[derive(Clone, Debug)]
pub(crate) struct PlantImage {
    bytes: Vec<u8>,
}

impl PlantImage {
    /// Waterweed picture shipped with the backend.
    pub(crate) fn bundled() -> Self {
        Self {
            bytes: BUNDLED_WATERWEED.to_vec(),
        }
    }

    /// Reads and sanity checks the image at `path`.
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read plant image at {}", path.display()))?;
        Self::from_bytes(bytes)
            .with_context(|| format!("failed to load plant image at {}", path.display()))
    }

    fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if !bytes.starts_with(&PNG_SIGNATURE) {
            bail!("unsupported image format, expected a PNG file");
        }
        Ok(Self { bytes })
    }

    /// Uploads the image. Must run inside the macroquad window context.
    pub(crate) fn into_texture(self) -> Texture2D {
        let texture = Texture2D::from_file_with_format(&self.bytes, None);
        texture.set_filter(FilterMode::Linear);
        texture
    }
}
