//! xaml2svg configuration file handling
//!
//! Settings are read from `xaml2svg.toml` in the working directory, or from
//! the file named by `--config`. Every setting has a default, so the file
//! itself is optional.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use xaml2svg::{ConvertOptions, FileNaming, DEFAULT_FALLBACK_COLOR};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "xaml2svg.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Xaml2SvgConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub fill: FillConfig,
}

/// Output file settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub naming: Naming,
}

/// How output files are named
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// Logical name without the size suffix
    #[default]
    Name,
    /// Full identifier
    Key,
}

impl From<Naming> for FileNaming {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Name => FileNaming::Name,
            Naming::Key => FileNaming::Key,
        }
    }
}

/// Fill settings
#[derive(Debug, Deserialize, Serialize)]
pub struct FillConfig {
    /// Color substituted for brushes with no SVG counterpart
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
        }
    }
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_COLOR.to_string()
}

impl Xaml2SvgConfig {
    /// Load an explicit config file; it must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Xaml2SvgConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load `xaml2svg.toml` from `dir`, or defaults when there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            naming: self.output.naming.into(),
            fallback_color: self.fill.fallback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Xaml2SvgConfig = toml::from_str("").unwrap();
        assert_eq!(config.to_options(), ConvertOptions::default());
    }

    #[test]
    fn test_parse_config() {
        let config: Xaml2SvgConfig = toml::from_str(
            r##"
            [output]
            naming = "key"

            [fill]
            fallback = "#ff00ff"
            "##,
        )
        .unwrap();

        let options = config.to_options();
        assert_eq!(options.naming, FileNaming::Key);
        assert_eq!(options.fallback_color, "#ff00ff");
    }

    #[test]
    fn test_unknown_naming_rejected() {
        let result: Result<Xaml2SvgConfig, _> = toml::from_str("[output]\nnaming = \"title\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        let config = Xaml2SvgConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.output.naming, Naming::Name);

        fs::write(dir.path().join(CONFIG_FILE), "[fill]\nfallback = \"black\"\n").unwrap();
        let config = Xaml2SvgConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.fill.fallback, "black");

        fs::write(dir.path().join(CONFIG_FILE), "[fill\n").unwrap();
        assert!(Xaml2SvgConfig::load_from_dir(dir.path()).is_err());
    }
}
