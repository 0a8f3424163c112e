//! # Storage Layer
//!
//! Two storage abstractions live here, one per program:
//!
//! - [`InventoryStore`]: the relational inventory. Three [`Category`] tables
//!   with the `code / name / quantity` shape, plus the chemical ledger.
//!   - [`sqlite::SqliteStore`]: production, one SQLite file.
//!   - [`memory::InMemoryStore`]: tests, no persistence.
//!
//! - [`CatalogStore`]: the flat priced stock list. The whole list is loaded,
//!   mutated in memory and written back on every change.
//!   - [`json::JsonFileStore`]: production, one JSON array file.
//!   - [`memory::InMemoryCatalog`]: tests.
//!
//! ## Store contract
//!
//! - `insert_*` reports [`StockError::DuplicateKey`](crate::error::StockError::DuplicateKey)
//!   when the code already exists and leaves the stored record untouched.
//!   Every store detects duplicates itself, callers never pre-check.
//! - `list_*` filters on a case-sensitive substring of code or name and
//!   orders by name, then code. An empty filter is the same as no filter.
//! - `update_*` touches only the supplied fields and reports `NotFound` for a
//!   missing code.
//! - `delete_*` on a missing code is a no-op. The returned flag says whether a
//!   record was removed.

use crate::error::Result;
use crate::model::{
    Category, ChemicalItem, ChemicalUpdate, PricedStockItem, StockItem, StockItemUpdate,
};

pub mod json;
pub mod memory;
pub mod sqlite;

pub trait InventoryStore {
    fn insert_item(&mut self, category: Category, item: &StockItem) -> Result<()>;

    fn list_items(&self, category: Category, filter: Option<&str>) -> Result<Vec<StockItem>>;

    fn get_item(&self, category: Category, code: &str) -> Result<Option<StockItem>>;

    fn update_item(&mut self, category: Category, code: &str, update: &StockItemUpdate)
        -> Result<()>;

    fn delete_item(&mut self, category: Category, code: &str) -> Result<bool>;

    fn insert_chemical(&mut self, item: &ChemicalItem) -> Result<()>;

    fn list_chemicals(&self, filter: Option<&str>) -> Result<Vec<ChemicalItem>>;

    fn get_chemical(&self, code: &str) -> Result<Option<ChemicalItem>>;

    fn update_chemical(&mut self, code: &str, update: &ChemicalUpdate) -> Result<()>;

    fn delete_chemical(&mut self, code: &str) -> Result<bool>;
}

/// Whole-list persistence for the priced stock list.
pub trait CatalogStore {
    fn load(&self) -> Result<Vec<PricedStockItem>>;

    fn save(&mut self, items: &[PricedStockItem]) -> Result<()>;
}

/// Normalizes a user filter: blank filters match everything.
pub(crate) fn effective_filter(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

pub(crate) fn matches_filter(code: &str, name: &str, filter: Option<&str>) -> bool {
    match effective_filter(filter) {
        Some(term) => code.contains(term) || name.contains(term),
        None => true,
    }
}
