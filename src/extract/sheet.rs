use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use log::debug;

use crate::atlas::TextureAtlas;
use crate::error::{Result, SparrowError};

/// Resolve the packed sheet named by an atlas.
///
/// The atlas's `imagePath` is relative to the directory holding the atlas file.
pub fn resolve_sheet_path(atlas_path: &Path, atlas: &TextureAtlas) -> PathBuf {
    let image_path = Path::new(atlas.image_path());
    if image_path.is_absolute() {
        return image_path.to_path_buf();
    }
    atlas_path
        .parent()
        .map(|dir| dir.join(image_path))
        .unwrap_or_else(|| image_path.to_path_buf())
}

/// Decode a packed sheet in its native pixel format
pub fn load_sheet(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(SparrowError::InputNotFound(path.to_path_buf()));
    }

    let sheet = ImageReader::open(path)
        .map_err(|e| SparrowError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| SparrowError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| SparrowError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(
        "Loaded sheet {} ({}x{})",
        path.display(),
        sheet.width(),
        sheet.height()
    );

    Ok(sheet)
}
