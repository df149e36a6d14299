//! @ai:module:intent Configuration structs loaded from swagdoc.toml
//! @ai:module:layer infrastructure
//! @ai:module:public_api SwagdocConfig, InfoConfig, ScanConfig
//! @ai:module:depends_on language, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::{detect_language, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "swagdoc.toml";

/// @ai:intent Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwagdocConfig {
    #[serde(default)]
    pub info: InfoConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// @ai:intent API metadata written to the document's info section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
}

/// @ai:intent Which sources to scan and where type definitions come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,
    #[serde(default)]
    pub types_file: Option<PathBuf>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// Restrict scanning to these language names; all supported languages when unset.
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            base_path: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir(),
            types_file: None,
            exclude: default_exclude(),
            languages: None,
        }
    }
}

fn default_title() -> String {
    "API".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_search_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    ["vendor", "node_modules", ".git", "target"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl SwagdocConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// @ai:intent Load `path` if given, else ./swagdoc.toml if present, else defaults
    /// @ai:effects fs:read
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ScanConfig {
    /// @ai:intent Check whether a walked entry's name is in the exclude list
    /// @ai:effects pure
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.exclude.iter().any(|e| e == name))
            .unwrap_or(false)
    }

    /// @ai:intent Check whether a file has a supported and enabled language
    /// @ai:effects pure
    pub fn accepts_file(&self, path: &Path) -> bool {
        match detect_language(path) {
            Some(language) => self.accepts_language(language),
            None => false,
        }
    }

    pub fn accepts_language(&self, language: Language) -> bool {
        self.languages
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .any(|n| Language::from_name(n) == Some(language))
            })
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: SwagdocConfig = toml::from_str("").unwrap();
        assert_eq!(config.info.title, "API");
        assert_eq!(config.info.version, "1.0");
        assert_eq!(config.scan.search_dir, PathBuf::from("."));
        assert!(config.scan.exclude.contains(&"vendor".to_string()));
    }

    #[test]
    fn test_partial_file() {
        let config: SwagdocConfig = toml::from_str(
            r#"
[info]
title = "Pet Store"
base_path = "/v1"

[scan]
search_dir = "internal/api"
types_file = "types.json"
languages = ["go"]
"#,
        )
        .unwrap();

        assert_eq!(config.info.title, "Pet Store");
        assert_eq!(config.info.version, "1.0");
        assert_eq!(config.info.base_path.as_deref(), Some("/v1"));
        assert_eq!(config.scan.types_file, Some(PathBuf::from("types.json")));
        assert!(config.scan.accepts_file(Path::new("a/handler.go")));
        assert!(!config.scan.accepts_file(Path::new("a/handler.ts")));
    }

    #[test]
    fn test_invalid_toml() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        std::fs::write(file.path(), "[info\ntitle = 1").unwrap();
        assert!(matches!(
            SwagdocConfig::load(file.path()).unwrap_err(),
            Error::Config(_)
        ));
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let mut config = SwagdocConfig::default();
        config.info.title = "Orders".to_string();
        config.save(file.path()).unwrap();

        let loaded = SwagdocConfig::load(file.path()).unwrap();
        assert_eq!(loaded.info.title, "Orders");
        assert_eq!(loaded.scan.exclude, config.scan.exclude);
    }

    #[test]
    fn test_is_excluded_by_name() {
        let scan = ScanConfig::default();
        assert!(scan.is_excluded(Path::new("project/vendor")));
        assert!(!scan.is_excluded(Path::new("vendor/api")));
    }
}
