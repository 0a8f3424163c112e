use crate::api::{InventoryApi, LedgerApi};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::store::json::JsonFileStore;
use crate::store::sqlite::SqliteStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "STOCKROOM_HOME";

pub struct InventoryContext {
    pub api: InventoryApi<SqliteStore>,
}

pub struct LedgerContext {
    pub api: LedgerApi<JsonFileStore>,
    pub config: StockConfig,
}

/// Picks the data directory: explicit flag, then `STOCKROOM_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "stockroom", "stockroom")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StockError::Config("Could not determine data dir".to_string()))
}

pub fn initialize_inventory(data_dir: &Path) -> Result<InventoryContext> {
    let config = StockConfig::load(data_dir)?;
    let store = SqliteStore::open(config.database_path(data_dir))?;
    let api = InventoryApi::new(store, data_dir.to_path_buf());
    Ok(InventoryContext { api })
}

pub fn initialize_ledger(data_dir: &Path) -> Result<LedgerContext> {
    let config = StockConfig::load(data_dir)?;
    let store = JsonFileStore::new(config.ledger_path(data_dir));
    let api = LedgerApi::new(store, data_dir.to_path_buf());
    Ok(LedgerContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_wins_over_everything() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/somewhere"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn inventory_context_creates_database_in_data_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize_inventory(temp.path()).unwrap();
        assert!(temp.path().join("inventory.db").exists());
        assert_eq!(ctx.api.data_dir(), temp.path());
    }

    #[test]
    fn inventory_context_follows_configured_database() {
        let temp = TempDir::new().unwrap();
        let mut config = StockConfig::default();
        config.set("database-file", "estoque.db").unwrap();
        config.save(temp.path()).unwrap();

        initialize_inventory(temp.path()).unwrap();
        assert!(temp.path().join("estoque.db").exists());
        assert!(!temp.path().join("inventory.db").exists());
    }

    #[test]
    fn ledger_context_follows_configured_file() {
        let temp = TempDir::new().unwrap();
        let mut config = StockConfig::default();
        config.set("ledger-file", "loja.json").unwrap();
        config.save(temp.path()).unwrap();

        let mut ctx = initialize_ledger(temp.path()).unwrap();
        ctx.api.register("1", "Balde", "2", "9.90").unwrap();
        assert!(temp.path().join("loja.json").exists());
        assert_eq!(ctx.config.ledger_file, "loja.json");
    }
}
