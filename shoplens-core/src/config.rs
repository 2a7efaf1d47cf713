//! Dashboard configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::CurrencyFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transaction CSV, relative to the working directory.
    pub data_path: PathBuf,
    pub display: DisplayConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dashboard/main_data.csv"),
            display: DisplayConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Bars per top/bottom chart.
    pub top_n: usize,
    /// Used for total revenue and the ranking charts.
    pub revenue_currency: CurrencyFormat,
    /// Used for the mean monetary metric.
    pub monetary_currency: CurrencyFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            revenue_currency: CurrencyFormat::brl(),
            monetary_currency: CurrencyFormat::aud_es_co(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Aggregate views kept in memory before the oldest is evicted.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 32 }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Defaults when the file does not exist; a malformed file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let cfg = Config::from_toml(
            r#"
data_path = "data/orders.csv"

[display]
top_n = 3

[display.revenue_currency]
symbol = "$"
thousands_separator = ","
decimal_separator = "."
"#,
        )
        .unwrap();

        assert_eq!(cfg.data_path, PathBuf::from("data/orders.csv"));
        assert_eq!(cfg.display.top_n, 3);
        assert_eq!(cfg.display.revenue_currency.format(1234.5), "$ 1,234.50");
        assert_eq!(cfg.display.monetary_currency, CurrencyFormat::aud_es_co());
        assert_eq!(cfg.cache.capacity, 32);
    }

    #[test]
    fn huge_currency_decimals_render_without_overflow() {
        let cfg = Config::from_toml("[display.revenue_currency]\ndecimals = 20\n").unwrap();
        assert_eq!(cfg.display.revenue_currency.decimals, 20);
        assert_eq!(cfg.display.revenue_currency.format(1.0), "R$ 1,000000000");
    }

    #[test]
    fn roundtrip_through_toml() {
        let mut cfg = Config::default();
        cfg.cache.capacity = 4;
        let text = cfg.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("top_n = [unclosed"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoplens.toml");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
        assert!(matches!(Config::load(&path), Err(ConfigError::Read { .. })));
    }
}
