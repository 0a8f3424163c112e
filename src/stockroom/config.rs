use crate::commands::ledger::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATABASE_FILE: &str = "inventory.db";
const DEFAULT_LEDGER_FILE: &str = "stock.json";

pub const CONFIG_KEYS: [&str; 3] = ["database-file", "ledger-file", "low-stock-threshold"];

/// Configuration stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockConfig {
    /// SQLite file of the inventory, relative to the data dir unless absolute
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// JSON file of the priced stock list, relative to the data dir unless absolute
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,

    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_ledger_file() -> String {
    DEFAULT_LEDGER_FILE.to_string()
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            ledger_file: default_ledger_file(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl StockConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: StockConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }

    pub fn ledger_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.ledger_file)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "database-file" => Some(self.database_file.clone()),
            "ledger-file" => Some(self.ledger_file.clone()),
            "low-stock-threshold" => Some(self.low_stock_threshold.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "database-file" | "ledger-file" if value.is_empty() => {
                Err(StockError::Config(format!("{} cannot be empty", key)))
            }
            "database-file" => {
                self.database_file = value.to_string();
                Ok(())
            }
            "ledger-file" => {
                self.ledger_file = value.to_string();
                Ok(())
            }
            "low-stock-threshold" => {
                let threshold: i64 = value.parse().map_err(|_| {
                    StockError::Config(format!("low-stock-threshold must be a whole number: {}", value))
                })?;
                if threshold < 0 {
                    return Err(StockError::Config(
                        "low-stock-threshold cannot be negative".to_string(),
                    ));
                }
                self.low_stock_threshold = threshold;
                Ok(())
            }
            other => Err(StockError::Config(format!("Unknown config key: {}", other))),
        }
    }
}
