use std::path::{Path, PathBuf};

/// Output path for a sprite: `<dir>/<name>.png`
///
/// Path separators inside the sprite name are replaced so every sprite
/// lands directly in `dir`.
pub fn sprite_png_path(dir: &Path, name: &str) -> PathBuf {
    let file_stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    dir.join(format!("{}.png", file_stem))
}

/// Directory for one atlas's sprites when extracting into per-atlas folders
pub fn atlas_output_dir(output_dir: &Path, atlas_path: &Path) -> PathBuf {
    let stem = atlas_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "atlas".to_string());
    output_dir.join(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_png_path() {
        let path = sprite_png_path(Path::new("out"), "BF HEY!!0025");
        assert_eq!(path, PathBuf::from("out/BF HEY!!0025.png"));
    }

    #[test]
    fn test_sprite_png_path_flattens_separators() {
        let path = sprite_png_path(Path::new("out"), "hero/walk\\0001");
        assert_eq!(path, PathBuf::from("out/hero_walk_0001.png"));
    }

    #[test]
    fn test_atlas_output_dir() {
        let dir = atlas_output_dir(Path::new("out"), Path::new("sheets/BOYFRIEND.xml"));
        assert_eq!(dir, PathBuf::from("out/BOYFRIEND"));
    }
}
