pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod output;
pub mod sprite;

pub use atlas::TextureAtlas;
pub use cli::{CliArgs, Command, CompressionLevel};
pub use error::{Result, SparrowError};
pub use geometry::Rect;
pub use sprite::{CroppableBuffer, PixelBuffer, Region, Trim, reconstruct, reconstruct_dyn};
