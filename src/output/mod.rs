mod format;
mod naming;

pub use format::save_region_image;
pub use naming::{atlas_output_dir, sprite_png_path};
