//! Serializable monitor configuration.

use crate::universe::Universe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Breadth aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadthConfig {
    /// Section whose instruments are aggregated.
    pub section: String,
    /// Advancer share (percent) above which breadth is strong.
    pub strong_above: f64,
    /// Advancer share (percent) below which breadth is weak.
    pub weak_below: f64,
}

impl Default for BreadthConfig {
    fn default() -> Self {
        Self {
            section: "sectors".into(),
            strong_above: 60.0,
            weak_below: 40.0,
        }
    }
}

/// Monitor configuration: the universe plus breadth settings.
///
/// ```toml
/// [breadth]
/// section = "sectors"
/// strong_above = 60.0
/// weak_below = 40.0
///
/// [[section]]
/// key = "sectors"
/// title = "Sectors"
/// items = [{ name = "Technology", symbol = "XLK" }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub breadth: BreadthConfig,
    #[serde(flatten)]
    pub universe: Universe,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            breadth: BreadthConfig::default(),
            universe: Universe::default_monitor(),
        }
    }
}

impl MonitorConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config from `path` if given, otherwise the built-in default.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.universe.validate()?;
        if self.universe.section(&self.breadth.section).is_none() {
            return Err(ConfigError::Invalid(format!(
                "breadth section '{}' is not in the universe",
                self.breadth.section
            )));
        }
        let (weak, strong) = (self.breadth.weak_below, self.breadth.strong_above);
        if !(0.0..=100.0).contains(&weak) || !(0.0..=100.0).contains(&strong) || weak > strong {
            return Err(ConfigError::Invalid(format!(
                "breadth thresholds must satisfy 0 <= weak_below ({weak}) <= strong_above ({strong}) <= 100"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
        [breadth]
        section = "sectors"
        strong_above = 55.0

        [[section]]
        key = "indices"
        title = "US Equity Indices"
        items = [{ name = "S&P 500", symbol = "SPY" }]

        [[section]]
        key = "sectors"
        title = "Sectors"
        items = [
            { name = "Technology", symbol = "XLK" },
            { name = "Energy", symbol = "XLE" },
        ]
    "#;

    #[test]
    fn parses_universe_and_breadth() {
        let cfg = MonitorConfig::from_toml(SMALL).unwrap();
        assert_eq!(cfg.universe.sections.len(), 2);
        assert_eq!(cfg.breadth.strong_above, 55.0);
        // Unspecified threshold keeps its default.
        assert_eq!(cfg.breadth.weak_below, 40.0);
    }

    #[test]
    fn breadth_table_is_optional() {
        let toml = r#"
            [[section]]
            key = "sectors"
            title = "Sectors"
            items = [{ name = "Energy", symbol = "XLE" }]
        "#;
        let cfg = MonitorConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.breadth, BreadthConfig::default());
    }

    #[test]
    fn unknown_breadth_section_is_rejected() {
        let toml = SMALL.replace(r#"section = "sectors""#, r#"section = "crypto""#);
        assert!(matches!(
            MonitorConfig::from_toml(&toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut cfg = MonitorConfig::default();
        cfg.breadth.weak_below = 70.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(MonitorConfig::default().validate().is_ok());
        assert!(MonitorConfig::load_or_default(None).is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            MonitorConfig::from_toml("[[section]\nkey ="),
            Err(ConfigError::Parse(_))
        ));
    }
}
