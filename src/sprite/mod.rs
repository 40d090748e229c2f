mod buffer;
mod region;
mod restore;

pub use buffer::{CroppableBuffer, PixelBuffer};
pub use region::{Region, Trim};
pub use restore::{Padding, pad, reconstruct, reconstruct_dyn};
