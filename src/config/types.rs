use serde::{Deserialize, Serialize};

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Sparrow extraction config file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparrowConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Atlas XML file paths or glob patterns
    pub input: Vec<String>,
    /// Output directory for sprite files
    pub output_dir: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
    /// Continue with the remaining sprites when one fails
    pub keep_going: bool,
    /// Write each atlas's sprites into a subdirectory named after the atlas
    pub atlas_subdirs: bool,
}

impl Default for SparrowConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output_dir: "out".to_string(),
            compress: None,
            keep_going: false,
            atlas_subdirs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config: SparrowConfig = serde_json::from_str(r#"{ "input": ["*.xml"] }"#).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.input, vec!["*.xml".to_string()]);
        assert_eq!(config.output_dir, "out");
        assert!(config.compress.is_none());
        assert!(!config.keep_going);
    }

    #[test]
    fn test_compress_variants() {
        let level: SparrowConfig = serde_json::from_str(r#"{ "compress": 4 }"#).unwrap();
        assert_eq!(level.compress, Some(CompressConfig::Level(4)));

        let max: SparrowConfig = serde_json::from_str(r#"{ "compress": "max" }"#).unwrap();
        assert_eq!(max.compress, Some(CompressConfig::Max("max".to_string())));
    }
}
