use super::CatalogStore;
use crate::error::Result;
use crate::model::PricedStockItem;
use std::fs;
use std::path::{Path, PathBuf};

/// Priced stock list kept as one pretty-printed JSON array.
///
/// Every save rewrites the file in full. A missing file loads as an empty list.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Result<Vec<PricedStockItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<PricedStockItem> = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn save(&mut self, items: &[PricedStockItem]) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "stock list written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("stock.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data").join("stock.json"));
        let items = vec![
            PricedStockItem::new("001", "Sabão em pó", 12, 8.5),
            PricedStockItem::new("002", "Água sanitária", 0, 3.25),
        ];
        store.save(&items).unwrap();

        let reloaded = JsonFileStore::new(store.path()).load().unwrap();
        assert_eq!(reloaded, items);
    }

    #[test]
    fn file_is_pretty_array_with_raw_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock.json");
        let mut store = JsonFileStore::new(&path);
        store
            .save(&[PricedStockItem::new("001", "Detergente neutro ação", 4, 2.0)])
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("ação"));
        assert!(raw.contains("\"price\": 2.0"));

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        for key in ["code", "name", "quantity", "price"] {
            assert!(first.get(key).is_some(), "missing key {}", key);
        }
    }
}
