use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail, ensure};
use log::debug;

use super::types::{CompressConfig, SparrowConfig};
use crate::cli::CompressionLevel;

/// Config file version understood by this build
pub const CONFIG_VERSION: u32 = 1;

/// A parsed config file together with the directory its relative paths
/// resolve against
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SparrowConfig,
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: SparrowConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        ensure!(
            config.version == CONFIG_VERSION,
            "unsupported config version {} (expected {})",
            config.version,
            CONFIG_VERSION
        );

        let config_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self { config, config_dir })
    }

    /// Atlas files named by the config's `input` entries, in order and
    /// without repeats.
    ///
    /// Wildcard entries expand to the `.xml` files they match and must match
    /// at least one. Plain entries are taken as given.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut atlases = Vec::new();

        for entry in &self.config.input {
            let paths = if has_wildcards(entry) {
                self.expand(entry)?
            } else {
                vec![self.config_dir.join(entry)]
            };
            atlases.extend(paths.into_iter().filter(|path| seen.insert(path.clone())));
        }

        Ok(atlases)
    }

    fn expand(&self, entry: &str) -> Result<Vec<PathBuf>> {
        let pattern = self.config_dir.join(entry);
        let matches = glob::glob(&pattern.to_string_lossy())
            .with_context(|| format!("invalid glob pattern: {}", entry))?;

        let mut atlases = Vec::new();
        for path in matches {
            let path = path.with_context(|| format!("failed to read glob entry: {}", entry))?;
            if is_atlas_file(&path) {
                atlases.push(path);
            } else {
                debug!("Skipping non-atlas match {}", path.display());
            }
        }

        if atlases.is_empty() {
            bail!("'{}' does not match any atlas file", entry);
        }
        Ok(atlases)
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }

    /// Compression level requested by the config, if any.
    pub fn compression(&self) -> Result<Option<CompressionLevel>> {
        match &self.config.compress {
            None => Ok(None),
            Some(CompressConfig::Level(n)) if *n <= 6 => Ok(Some(CompressionLevel::Level(*n))),
            Some(CompressConfig::Level(n)) => {
                bail!("compression level must be 0-6 or 'max', got {} in config", n)
            }
            Some(CompressConfig::Max(s)) => s
                .parse()
                .map(Some)
                .map_err(|e: String| anyhow!("invalid compress value in config: {}", e)),
        }
    }
}

fn has_wildcards(entry: &str) -> bool {
    entry.chars().any(|c| matches!(c, '*' | '?' | '['))
}

fn is_atlas_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, json: &str) -> LoadedConfig {
        let path = dir.join("sparrow.json");
        std::fs::write(&path, json).unwrap();
        LoadedConfig::load(&path).unwrap()
    }

    #[test]
    fn test_has_wildcards() {
        assert!(has_wildcards("*.xml"));
        assert!(has_wildcards("sheets/**/*.xml"));
        assert!(has_wildcards("week?.xml"));
        assert!(has_wildcards("week[0-9].xml"));
        assert!(!has_wildcards("characters/BOYFRIEND.xml"));
    }

    #[test]
    fn test_resolve_inputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sheets")).unwrap();
        std::fs::write(dir.path().join("sheets/a.xml"), "").unwrap();
        std::fs::write(dir.path().join("sheets/b.XML"), "").unwrap();
        std::fs::write(dir.path().join("sheets/b.png"), "").unwrap();
        let loaded = write_config(
            dir.path(),
            r#"{ "input": ["sheets/*", "sheets/a.xml", "extra.xml"], "output_dir": "frames", "compress": "max" }"#,
        );

        assert_eq!(
            loaded.resolve_inputs().unwrap(),
            vec![
                dir.path().join("sheets/a.xml"),
                dir.path().join("sheets/b.XML"),
                dir.path().join("extra.xml"),
            ]
        );
        assert_eq!(loaded.resolve_output_dir(), dir.path().join("frames"));
        assert_eq!(loaded.compression().unwrap(), Some(CompressionLevel::Max));
    }

    #[test]
    fn test_unmatched_pattern() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sheet.png"), "").unwrap();
        let loaded = write_config(dir.path(), r#"{ "input": ["*.xml"] }"#);

        let err = loaded.resolve_inputs().unwrap_err();

        assert!(err.to_string().contains("does not match any atlas file"));
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparrow.json");
        std::fs::write(&path, r#"{ "version": 2, "input": ["*.xml"] }"#).unwrap();

        let err = LoadedConfig::load(&path).unwrap_err();

        assert!(err.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn test_invalid_compression() {
        let loaded = LoadedConfig {
            config: SparrowConfig {
                compress: Some(CompressConfig::Level(9)),
                ..SparrowConfig::default()
            },
            config_dir: PathBuf::from("."),
        };

        assert!(loaded.compression().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(LoadedConfig::load(Path::new("no/such/sparrow.json")).is_err());
    }
}
