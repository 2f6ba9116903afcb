use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: Option<String>,
    /// Search fonts installed on the host in addition to the embedded ones.
    pub system: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub keep_heading_with_next: bool,
    pub keep_together_max_items: usize,
    pub keep_tables_together: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            keep_heading_with_next: true,
            keep_together_max_items: 5,
            keep_tables_together: true,
        }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`, checked by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. A missing file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_code_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[page]\nnumbers = true\n\n[font]\nfamily = \"DejaVu Sans Mono\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap().unwrap();
        assert!(config.page.numbers);
        assert_eq!(config.font.family.as_deref(), Some("DejaVu Sans Mono"));
        assert!(!config.font.system);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nkeep_together_max_items = \"many\"").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config file"));
    }
}
