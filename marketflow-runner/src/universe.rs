//! Universe configuration: section-organized instrument lists.
//!
//! The universe is stored as TOML with one `[[section]]` table per monitor
//! table. Section order and item order are preserved; they are the display
//! order downstream.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One monitored instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub symbol: String,
}

/// A titled group of instruments (e.g. "Sectors").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub items: Vec<Instrument>,
}

impl Section {
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.symbol.as_str())
    }
}

/// The complete universe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    #[serde(rename = "section", default)]
    pub sections: Vec<Section>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Every symbol in section order, first occurrence only.
    pub fn all_symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .flat_map(|s| s.symbols())
            .filter(|sym| seen.insert(*sym))
            .collect()
    }

    /// Look up a section by key.
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.all_symbols().len()
    }

    /// Structural checks: at least one section, unique section keys, no blank symbols.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Invalid("universe has no sections".into()));
        }
        let mut keys = HashSet::new();
        for section in &self.sections {
            if !keys.insert(section.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate section key '{}'",
                    section.key
                )));
            }
            if let Some(item) = section.items.iter().find(|i| i.symbol.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "section '{}' has a blank symbol for '{}'",
                    section.key, item.name
                )));
            }
        }
        Ok(())
    }

    /// The monitor's default universe: alternatives, global equities,
    /// US equity indices, and sector ETFs.
    pub fn default_monitor() -> Self {
        fn section(key: &str, title: &str, items: &[(&str, &str)]) -> Section {
            Section {
                key: key.into(),
                title: title.into(),
                items: items
                    .iter()
                    .map(|&(name, symbol)| Instrument {
                        name: name.into(),
                        symbol: symbol.into(),
                    })
                    .collect(),
            }
        }

        let sections = vec![
            section(
                "alternatives",
                "Equity Alternatives",
                &[
                    ("10-Yr T-Note Futures", "ZN=F"),
                    ("U.S. Dollar Index", "DX-Y.NYB"),
                    ("T-Bond Futures", "ZB=F"),
                    ("Light Crude Oil Futures", "CL=F"),
                    ("Gold Futures", "GC=F"),
                    ("Bitcoin", "BTC-USD"),
                ],
            ),
            section(
                "global",
                "Global Equities",
                &[
                    ("Europe Equity", "IEV"),
                    ("Total Intl Stock", "VXUS"),
                    ("Total US Stock", "VTI"),
                    ("Emerging Markets", "EEM"),
                ],
            ),
            section(
                "indices",
                "US Equity Indices",
                &[
                    ("Innovation", "ARKK"),
                    ("S&P 500 Equal Wt", "RSP"),
                    ("Russell 2000", "IWM"),
                    ("LT US Treasuries", "TLT"),
                    ("Dow Jones", "DIA"),
                    ("S&P 500", "SPY"),
                    ("Nasdaq", "QQQ"),
                ],
            ),
            section(
                "sectors",
                "Sectors",
                &[
                    ("Gold Miners", "GDX"),
                    ("Transportation", "IYT"),
                    ("Software", "IGV"),
                    ("Financials", "XLF"),
                    ("Retail", "XRT"),
                    ("Home Builders", "XHB"),
                    ("Regional Banks", "KRE"),
                    ("Real Estate", "IYR"),
                    ("Aerospace + Defense", "ITA"),
                    ("Industrials", "XLI"),
                    ("Energy", "XLE"),
                    ("Consumer Discr.", "XLY"),
                    ("Materials", "XLB"),
                    ("Consumer Staples", "XLP"),
                    ("Health Care", "XLV"),
                    ("Blockchain", "BLOK"),
                    ("Utilities", "XLU"),
                    ("Biotech", "XBI"),
                    ("US Cannabis", "MSOS"),
                    ("Technology", "XLK"),
                    ("Chinese Tech", "KWEB"),
                    ("Solar Energy", "TAN"),
                    ("Semiconductors", "SOXX"),
                ],
            ),
        ];

        Self { sections }
    }
}
