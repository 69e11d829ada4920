/// Image loader
///
/// Decodes the asset into RGBA8 pixels at its natural size. The pixels are
/// uploaded to the GPU unchanged; all color work happens in the shader.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::error::{Result, ViewerError};

/// A decoded image
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// RGBA8 pixels, row-major, no padding
    pub pixels: Arc<Vec<u8>>,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

impl LoadedImage {
    /// Bytes per row of the unpadded pixel data
    pub fn bytes_per_row(&self) -> u32 {
        4 * self.width
    }

    /// Number of pixels, wide enough for any pair of u32 dimensions
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Load and decode an image file
///
/// # Returns
/// * `Ok(LoadedImage)` - RGBA8 pixels and dimensions
/// * `Err(ViewerError::AssetNotFound)` - nothing at `path`
/// * `Err(ViewerError::AssetDecode)` - the file is not a readable image
pub async fn load_image(path: PathBuf) -> Result<LoadedImage> {
    // Spawn blocking because decoding is CPU-intensive
    let join_path = path.clone();
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| ViewerError::AssetDecode {
            path: join_path,
            reason: format!("Task join error: {}", e),
        })?
}

/// Blocking implementation of image loading
fn load_image_blocking(path: &Path) -> Result<LoadedImage> {
    // Verify file exists
    if !path.exists() {
        return Err(ViewerError::AssetNotFound(path.to_path_buf()));
    }

    let decoded = image::open(path).map_err(|e| ViewerError::AssetDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    if width == 0 || height == 0 {
        return Err(ViewerError::AssetDecode {
            path: path.to_path_buf(),
            reason: "image has no pixels".to_string(),
        });
    }

    let image = LoadedImage {
        pixels: Arc::new(rgba.into_raw()),
        width,
        height,
    };

    log::info!(
        "📷 Loaded {}: {}x{} ({} pixels)",
        path.display(),
        width,
        height,
        image.pixel_count()
    );

    Ok(image)
}
