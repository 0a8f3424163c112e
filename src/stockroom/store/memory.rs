use super::{matches_filter, CatalogStore, InventoryStore};
use crate::error::{Result, StockError};
use crate::model::{
    Category, ChemicalItem, ChemicalUpdate, PricedStockItem, StockItem, StockItemUpdate,
};
use std::collections::BTreeMap;

/// In-memory inventory for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    items: BTreeMap<(Category, String), StockItem>,
    chemicals: BTreeMap<String, ChemicalItem>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_name<T>(records: &mut [T], key: impl Fn(&T) -> (&str, &str)) {
    records.sort_by(|a, b| key(a).cmp(&key(b)));
}

impl InventoryStore for InMemoryStore {
    fn insert_item(&mut self, category: Category, item: &StockItem) -> Result<()> {
        let key = (category, item.code.clone());
        if self.items.contains_key(&key) {
            return Err(StockError::DuplicateKey(item.code.clone()));
        }
        self.items.insert(key, item.clone());
        Ok(())
    }

    fn list_items(&self, category: Category, filter: Option<&str>) -> Result<Vec<StockItem>> {
        let mut listed: Vec<StockItem> = self
            .items
            .iter()
            .filter(|((c, _), item)| *c == category && matches_filter(&item.code, &item.name, filter))
            .map(|(_, item)| item.clone())
            .collect();
        sort_by_name(&mut listed, |i| (i.name.as_str(), i.code.as_str()));
        Ok(listed)
    }

    fn get_item(&self, category: Category, code: &str) -> Result<Option<StockItem>> {
        Ok(self.items.get(&(category, code.to_string())).cloned())
    }

    fn update_item(
        &mut self,
        category: Category,
        code: &str,
        update: &StockItemUpdate,
    ) -> Result<()> {
        let item = self
            .items
            .get_mut(&(category, code.to_string()))
            .ok_or_else(|| StockError::NotFound(code.to_string()))?;
        update.apply(item);
        Ok(())
    }

    fn delete_item(&mut self, category: Category, code: &str) -> Result<bool> {
        Ok(self.items.remove(&(category, code.to_string())).is_some())
    }

    fn insert_chemical(&mut self, item: &ChemicalItem) -> Result<()> {
        if self.chemicals.contains_key(&item.code) {
            return Err(StockError::DuplicateKey(item.code.clone()));
        }
        self.chemicals.insert(item.code.clone(), item.clone());
        Ok(())
    }

    fn list_chemicals(&self, filter: Option<&str>) -> Result<Vec<ChemicalItem>> {
        let mut listed: Vec<ChemicalItem> = self
            .chemicals
            .values()
            .filter(|item| matches_filter(&item.code, &item.name, filter))
            .cloned()
            .collect();
        sort_by_name(&mut listed, |i| (i.name.as_str(), i.code.as_str()));
        Ok(listed)
    }

    fn get_chemical(&self, code: &str) -> Result<Option<ChemicalItem>> {
        Ok(self.chemicals.get(code).cloned())
    }

    fn update_chemical(&mut self, code: &str, update: &ChemicalUpdate) -> Result<()> {
        let item = self
            .chemicals
            .get_mut(code)
            .ok_or_else(|| StockError::NotFound(code.to_string()))?;
        update.apply(item);
        Ok(())
    }

    fn delete_chemical(&mut self, code: &str) -> Result<bool> {
        Ok(self.chemicals.remove(code).is_some())
    }
}

/// In-memory priced list. `save` replaces the whole list, like the file store.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: Vec<PricedStockItem>,
    saves: usize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<PricedStockItem>) -> Self {
        Self { items, saves: 0 }
    }

    /// Number of times the list was written back.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl CatalogStore for InMemoryCatalog {
    fn load(&self) -> Result<Vec<PricedStockItem>> {
        Ok(self.items.clone())
    }

    fn save(&mut self, items: &[PricedStockItem]) -> Result<()> {
        self.items = items.to_vec();
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{DensityInput, DensityUnit};
    use chrono::NaiveDate;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_items(mut self, count: usize, category: Category) -> Self {
            for i in 0..count {
                let item = StockItem::new(
                    format!("C{:03}", i + 1),
                    format!("Item {}", i + 1),
                    (i as i64 + 1) * 10,
                );
                self.store.insert_item(category, &item).unwrap();
            }
            self
        }

        pub fn with_item(mut self, category: Category, code: &str, name: &str, qty: i64) -> Self {
            self.store
                .insert_item(category, &StockItem::new(code, name, qty))
                .unwrap();
            self
        }

        pub fn with_chemical(mut self, code: &str, name: &str, expiry: Option<NaiveDate>) -> Self {
            let item = ChemicalItem::new(
                code,
                name,
                DensityInput::new(1.0, DensityUnit::KgPerLiter),
                10.0,
            )
            .with_expiry_date(expiry);
            self.store.insert_chemical(&item).unwrap();
            self
        }
    }
}
