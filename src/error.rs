use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparrowError {
    #[error("Sub-texture '{name}' does not exist")]
    NotFound { name: String },

    #[error("Image does not support cropping")]
    CroppingUnsupported,

    #[error("Invalid geometry for sub-texture '{name}': {reason}")]
    InvalidRegionGeometry { name: String, reason: String },

    #[error("Sub-texture '{name}' would overwrite '{other}' at '{path}'")]
    OutputCollision {
        name: String,
        other: String,
        path: PathBuf,
    },

    #[error("Duplicate sub-texture name '{0}'")]
    DuplicateRegionName(String),

    #[error("Failed to parse texture atlas: {0}")]
    AtlasParse(#[from] quick_xml::DeError),

    #[error("Failed to encode texture atlas: {0}")]
    AtlasEncode(#[from] quick_xml::SeError),

    #[error("Failed to read texture atlas '{path}': {source}")]
    AtlasRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

impl SparrowError {
    pub(crate) fn geometry(name: &str, reason: impl Into<String>) -> Self {
        SparrowError::InvalidRegionGeometry {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SparrowError>;
