//! # API Facade
//!
//! Thin facade over the command layer. Every client, the `stockroom` and
//! `stocklist` binaries included, goes through these two types:
//!
//! - [`InventoryApi`] over an [`InventoryStore`]: the three simple categories
//!   plus the chemical ledger.
//! - [`LedgerApi`] over a [`CatalogStore`]: the flat priced stock list.
//!
//! The facade dispatches and returns `Result<CmdResult>`. It never prints,
//! never exits and holds no business rules; those live in `commands/*.rs`.
//!
//! Both types are generic over their store, so production wires
//! `SqliteStore` / `JsonFileStore` while tests use `InMemoryStore` /
//! `InMemoryCatalog`.

use crate::commands;
use crate::error::Result;
use crate::model::Category;
use crate::store::{CatalogStore, InventoryStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use crate::commands::chemicals::{ChemicalEdit, ChemicalForm};
pub use crate::commands::config::ConfigAction;
pub use crate::commands::update::ItemEdit;
pub use crate::commands::{ChemicalRow, CmdMessage, CmdResult, MassPreview, MessageLevel};

pub struct InventoryApi<S: InventoryStore> {
    store: S,
    data_dir: PathBuf,
}

impl<S: InventoryStore> InventoryApi<S> {
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn create_item(
        &mut self,
        category: Category,
        code: &str,
        name: &str,
        quantity: &str,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.store, category, code, name, quantity)
    }

    pub fn list_items(&self, category: Category, filter: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.store, category, filter)
    }

    pub fn view_item(&self, category: Category, code: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, category, code)
    }

    pub fn update_item(
        &mut self,
        category: Category,
        code: &str,
        edit: &ItemEdit,
    ) -> Result<CmdResult> {
        commands::update::run(&mut self.store, category, code, edit)
    }

    pub fn withdraw(&mut self, category: Category, code: &str, amount: &str) -> Result<CmdResult> {
        commands::withdraw::run(&mut self.store, category, code, amount)
    }

    pub fn delete_item(&mut self, category: Category, code: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, category, code)
    }

    pub fn create_chemical(&mut self, form: &ChemicalForm) -> Result<CmdResult> {
        commands::chemicals::create(&mut self.store, form)
    }

    pub fn list_chemicals(&self, filter: Option<&str>, today: NaiveDate) -> Result<CmdResult> {
        commands::chemicals::list(&self.store, filter, today)
    }

    pub fn view_chemical(&self, code: &str, today: NaiveDate) -> Result<CmdResult> {
        commands::chemicals::view(&self.store, code, today)
    }

    pub fn update_chemical(&mut self, code: &str, edit: &ChemicalEdit) -> Result<CmdResult> {
        commands::chemicals::update(&mut self.store, code, edit)
    }

    pub fn delete_chemical(&mut self, code: &str) -> Result<CmdResult> {
        commands::chemicals::delete(&mut self.store, code)
    }

    pub fn expiry(&self, today: NaiveDate) -> Result<CmdResult> {
        commands::expiry::run(&self.store, today)
    }

    /// Mass preview for a density and volume that are not stored anywhere.
    pub fn convert(&self, density: &str, unit: &str, liters: &str) -> Result<CmdResult> {
        commands::convert::run(density, unit, liters)
    }

    pub fn report_stock(&self, category: Category) -> Result<CmdResult> {
        commands::report::stock(&self.store, category)
    }

    pub fn report_chemicals(&self, today: NaiveDate) -> Result<CmdResult> {
        commands::report::chemicals(&self.store, today)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

pub struct LedgerApi<C: CatalogStore> {
    store: C,
    data_dir: PathBuf,
}

impl<C: CatalogStore> LedgerApi<C> {
    pub fn new(store: C, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn register(
        &mut self,
        code: &str,
        name: &str,
        quantity: &str,
        price: &str,
    ) -> Result<CmdResult> {
        commands::ledger::register(&mut self.store, code, name, quantity, price)
    }

    pub fn list(&self, filter: Option<&str>) -> Result<CmdResult> {
        commands::ledger::list(&self.store, filter)
    }

    pub fn receive(&mut self, code: &str, amount: &str) -> Result<CmdResult> {
        commands::ledger::receive(&mut self.store, code, amount)
    }

    pub fn issue(&mut self, code: &str, amount: &str) -> Result<CmdResult> {
        commands::ledger::issue(&mut self.store, code, amount)
    }

    pub fn low_stock(&self, threshold: i64) -> Result<CmdResult> {
        commands::ledger::low_stock(&self.store, threshold)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::model::PricedStockItem;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::{InMemoryCatalog, InMemoryStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn inventory(store: InMemoryStore) -> InventoryApi<InMemoryStore> {
        InventoryApi::new(store, PathBuf::from("unused"))
    }

    #[test]
    fn create_then_list_goes_to_the_right_category() {
        let mut api = inventory(InMemoryStore::new());
        api.create_item(Category::Labels, "L1", "Etiqueta", "100").unwrap();

        assert_eq!(
            api.list_items(Category::Labels, None)
                .unwrap()
                .listed_items
                .len(),
            1
        );
        assert!(api
            .list_items(Category::Products, None)
            .unwrap()
            .listed_items
            .is_empty());
    }

    #[test]
    fn edit_and_withdraw_dispatch() {
        let store = StoreFixture::new()
            .with_item(Category::SafetyItems, "S1", "Luva", 10)
            .store;
        let mut api = inventory(store);

        let edit = ItemEdit {
            name: Some("Luva nitrílica".into()),
            quantity: None,
        };
        api.update_item(Category::SafetyItems, "S1", &edit).unwrap();
        api.withdraw(Category::SafetyItems, "S1", "4").unwrap();

        let viewed = api.view_item(Category::SafetyItems, "S1").unwrap();
        assert_eq!(viewed.listed_items[0].name, "Luva nitrílica");
        assert_eq!(viewed.listed_items[0].quantity, 6);
    }

    #[test]
    fn delete_missing_item_is_not_an_error() {
        let mut api = inventory(InMemoryStore::new());
        let result = api.delete_item(Category::Products, "nope").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn chemical_flow_dispatches() {
        let mut api = inventory(InMemoryStore::new());
        let form = ChemicalForm {
            code: "F1".into(),
            name: "Solvente".into(),
            density: "0.8".into(),
            unit: Some("g/cm³".into()),
            liters: "10".into(),
            expiry_date: Some("2024-01-05".into()),
            ..Default::default()
        };
        api.create_chemical(&form).unwrap();

        let listed = api.list_chemicals(None, today()).unwrap();
        assert_eq!(listed.listed_chemicals.len(), 1);
        assert!((listed.listed_chemicals[0].item.kilograms - 8.0).abs() < 1e-9);

        let report = api.expiry(today()).unwrap().expiry.unwrap();
        assert_eq!(report.expiring_soon.len(), 1);

        api.delete_chemical("F1").unwrap();
        assert!(matches!(
            api.view_chemical("F1", today()),
            Err(StockError::NotFound(_))
        ));
    }

    #[test]
    fn convert_needs_no_store_state() {
        let api = inventory(InMemoryStore::new());
        let preview = api.convert("850", "kg/m³", "2").unwrap().preview.unwrap();
        assert!((preview.kilograms - 1.7).abs() < 1e-9);
    }

    #[test]
    fn ledger_dispatches() {
        let mut api = LedgerApi::new(
            InMemoryCatalog::with_items(vec![PricedStockItem::new("001", "Balde", 2, 12.0)]),
            PathBuf::from("unused"),
        );
        api.register("002", "Pano", "20", "1.5").unwrap();
        api.receive("001", "1").unwrap();
        api.issue("002", "5").unwrap();

        let low = api.low_stock(5).unwrap();
        let codes: Vec<_> = low.listed_priced.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["001"]);
        assert_eq!(api.list(Some("Pano")).unwrap().listed_priced[0].quantity, 15);
    }
}
