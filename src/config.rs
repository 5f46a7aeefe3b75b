use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MetatraceError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Call graph display settings
    pub display: DisplayConfig,

    /// Trace decoding settings
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Terminal width used for wrapping (0 or 1 disables wrapping)
    pub width: usize,

    /// Keep every frame, including substitution and checking bookkeeping
    pub full_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Fail on compressed names and unnamed file ids instead of degrading
    pub strict: bool,

    /// Label of the synthesized root node
    pub root_name: String,

    /// Type the evaluated expression produced
    pub evaluation_result: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                width: 80,
                full_mode: false,
            },
            trace: TraceConfig {
                strict: false,
                root_name: "<root>".to_string(),
                evaluation_result: String::new(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MetatraceError::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MetatraceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                // Try common config file locations
                let candidates = [
                    "Metatrace.toml",
                    "metatrace.toml",
                    ".metatrace.toml",
                ];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metatrace.toml");

        let mut config = Config::default();
        config.display.width = 120;
        config.trace.root_name = "int_<fib<5>::value>".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.display.width, 120);
        assert!(!loaded.display.full_mode);
        assert_eq!(loaded.trace.root_name, "int_<fib<5>::value>");
    }

    #[test]
    fn test_missing_explicit_path_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.display.width, 80);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[display]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, MetatraceError::Config(_)));
    }
}
