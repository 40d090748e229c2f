mod types;
mod xml;

pub use types::TextureAtlas;
