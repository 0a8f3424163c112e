use super::{effective_filter, InventoryStore};
use crate::error::{Result, StockError};
use crate::expiry::{parse_date, DATE_FORMAT};
use crate::model::{
    Category, ChemicalItem, ChemicalUpdate, DensityUnit, StockItem, StockItemUpdate,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

/// Columns the chemical ledger needs beyond `code` and `name`. Older databases
/// may lack some of them; they are added (null-filled) when the store opens.
const CHEMICAL_COLUMNS: [(&str, &str); 7] = [
    ("density_kg_per_l", "REAL"),
    ("source_unit", "TEXT"),
    ("liters", "REAL"),
    ("kilograms", "REAL"),
    ("storage_location", "TEXT"),
    ("lot", "TEXT"),
    ("expiry_date", "TEXT"),
];

const CHEMICAL_SELECT: &str = "SELECT code, name, density_kg_per_l, source_unit, liters, \
     kilograms, storage_location, lot, expiry_date FROM chemicals";

/// SQLite-backed inventory. Every mutation is a single auto-committed
/// statement or a short transaction.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened inventory database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_tables()?;
        store.repair_chemical_columns()?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<()> {
        for category in Category::ALL {
            self.conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    code TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    quantity INTEGER NOT NULL
                )",
                category.table_name()
            ))?;
        }
        // Only the key columns here; the rest come from repair_chemical_columns
        // so old and new databases take the same path.
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS chemicals (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )",
        )?;
        Ok(())
    }

    /// Adds any missing chemical ledger column and returns the names added.
    pub fn repair_chemical_columns(&self) -> Result<Vec<String>> {
        let existing: Vec<String> = {
            let mut stmt = self.conn.prepare("PRAGMA table_info(chemicals)")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
            rows.collect::<std::result::Result<_, _>>()?
        };

        let mut added = Vec::new();
        for (column, sql_type) in CHEMICAL_COLUMNS {
            if existing.iter().any(|c| c == column) {
                continue;
            }
            self.conn.execute_batch(&format!(
                "ALTER TABLE chemicals ADD COLUMN {} {}",
                column, sql_type
            ))?;
            added.push(column.to_string());
        }

        if !added.is_empty() {
            tracing::info!(columns = %added.join(", "), "chemical ledger columns added");
        }
        Ok(added)
    }

    fn chemical_from_row(row: &Row<'_>) -> rusqlite::Result<ChemicalItem> {
        let code: String = row.get(0)?;
        let unit_raw: Option<String> = row.get(3)?;
        let source_unit = match unit_raw.as_deref() {
            None | Some("") => DensityUnit::default(),
            Some(raw) => raw.parse::<DensityUnit>().unwrap_or_else(|_| {
                tracing::warn!(code = %code, unit = raw, "unrecognized density unit, assuming kg/L");
                DensityUnit::default()
            }),
        };
        let expiry_raw: Option<String> = row.get(8)?;
        let expiry_date = match expiry_raw.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    tracing::debug!(code = %code, expiry = raw, "ignoring unparseable expiry date");
                }
                parsed
            }
        };

        Ok(ChemicalItem {
            code,
            name: row.get(1)?,
            density_kg_per_l: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
            source_unit,
            liters: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
            kilograms: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
            storage_location: row.get(6)?,
            lot: row.get(7)?,
            expiry_date,
        })
    }

    fn stock_item_from_row(row: &Row<'_>) -> rusqlite::Result<StockItem> {
        Ok(StockItem {
            code: row.get(0)?,
            name: row.get(1)?,
            quantity: row.get(2)?,
        })
    }
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn map_insert_error(err: rusqlite::Error, code: &str) -> StockError {
    if is_primary_key_violation(&err) {
        StockError::DuplicateKey(code.to_string())
    } else {
        StockError::Database(err)
    }
}

fn optional_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

impl InventoryStore for SqliteStore {
    fn insert_item(&mut self, category: Category, item: &StockItem) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (code, name, quantity) VALUES (?1, ?2, ?3)",
                    category.table_name()
                ),
                params![item.code, item.name, item.quantity],
            )
            .map_err(|e| map_insert_error(e, &item.code))?;
        Ok(())
    }

    fn list_items(&self, category: Category, filter: Option<&str>) -> Result<Vec<StockItem>> {
        let table = category.table_name();
        let items = match effective_filter(filter) {
            Some(term) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT code, name, quantity FROM {} \
                     WHERE instr(code, ?1) > 0 OR instr(name, ?1) > 0 \
                     ORDER BY name, code",
                    table
                ))?;
                let rows = stmt.query_map([term], Self::stock_item_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT code, name, quantity FROM {} ORDER BY name, code",
                    table
                ))?;
                let rows = stmt.query_map([], Self::stock_item_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(items)
    }

    fn get_item(&self, category: Category, code: &str) -> Result<Option<StockItem>> {
        let item = self
            .conn
            .query_row(
                &format!(
                    "SELECT code, name, quantity FROM {} WHERE code = ?1",
                    category.table_name()
                ),
                [code],
                Self::stock_item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn update_item(
        &mut self,
        category: Category,
        code: &str,
        update: &StockItemUpdate,
    ) -> Result<()> {
        if self.get_item(category, code)?.is_none() {
            return Err(StockError::NotFound(code.to_string()));
        }
        let table = category.table_name();
        let tx = self.conn.transaction()?;
        if let Some(name) = &update.name {
            tx.execute(
                &format!("UPDATE {} SET name = ?1 WHERE code = ?2", table),
                params![name, code],
            )?;
        }
        if let Some(quantity) = update.quantity {
            tx.execute(
                &format!("UPDATE {} SET quantity = ?1 WHERE code = ?2", table),
                params![quantity, code],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_item(&mut self, category: Category, code: &str) -> Result<bool> {
        let removed = self.conn.execute(
            &format!("DELETE FROM {} WHERE code = ?1", category.table_name()),
            [code],
        )?;
        Ok(removed > 0)
    }

    fn insert_chemical(&mut self, item: &ChemicalItem) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO chemicals
                    (code, name, density_kg_per_l, source_unit, liters, kilograms,
                     storage_location, lot, expiry_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    item.code,
                    item.name,
                    item.density_kg_per_l,
                    item.source_unit.as_str(),
                    item.liters,
                    item.kilograms,
                    item.storage_location,
                    item.lot,
                    item.expiry_date.map(|d| d.format(DATE_FORMAT).to_string()),
                ],
            )
            .map_err(|e| map_insert_error(e, &item.code))?;
        Ok(())
    }

    fn list_chemicals(&self, filter: Option<&str>) -> Result<Vec<ChemicalItem>> {
        let items = match effective_filter(filter) {
            Some(term) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{} WHERE instr(code, ?1) > 0 OR instr(name, ?1) > 0 ORDER BY name, code",
                    CHEMICAL_SELECT
                ))?;
                let rows = stmt.query_map([term], Self::chemical_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{} ORDER BY name, code", CHEMICAL_SELECT))?;
                let rows = stmt.query_map([], Self::chemical_from_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(items)
    }

    fn get_chemical(&self, code: &str) -> Result<Option<ChemicalItem>> {
        let item = self
            .conn
            .query_row(
                &format!("{} WHERE code = ?1", CHEMICAL_SELECT),
                [code],
                Self::chemical_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn update_chemical(&mut self, code: &str, update: &ChemicalUpdate) -> Result<()> {
        let mut item = self
            .get_chemical(code)?
            .ok_or_else(|| StockError::NotFound(code.to_string()))?;
        update.apply(&mut item);

        let mut columns: Vec<(&str, Value)> = Vec::new();
        if let Some(name) = &update.name {
            columns.push(("name", Value::Text(name.clone())));
        }
        if update.density.is_some() {
            columns.push(("density_kg_per_l", Value::Real(item.density_kg_per_l)));
            columns.push(("source_unit", Value::Text(item.source_unit.as_str().into())));
        }
        if let Some(liters) = update.liters {
            columns.push(("liters", Value::Real(liters)));
        }
        if let Some(location) = &update.storage_location {
            columns.push(("storage_location", optional_text(location)));
        }
        if let Some(lot) = &update.lot {
            columns.push(("lot", optional_text(lot)));
        }
        if let Some(date) = &update.expiry_date {
            let text = date.map(|d| d.format(DATE_FORMAT).to_string());
            columns.push(("expiry_date", optional_text(&text)));
        }
        columns.push(("kilograms", Value::Real(item.kilograms)));

        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE chemicals SET {} WHERE code = ?{}",
            assignments.join(", "),
            columns.len() + 1
        );
        let values = columns
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(Value::Text(code.to_string())));
        self.conn.execute(&sql, params_from_iter(values))?;
        Ok(())
    }

    fn delete_chemical(&mut self, code: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM chemicals WHERE code = ?1", [code])?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry;
    use crate::model::DensityInput;
    use chrono::NaiveDate;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn solvent() -> ChemicalItem {
        ChemicalItem::new(
            "Q-01",
            "Solvente",
            DensityInput::new(870.0, DensityUnit::KgPerCubicMeter),
            20.0,
        )
        .with_storage_location(Some("Shelf B".into()))
        .with_lot(Some("L2024-7".into()))
        .with_expiry_date(NaiveDate::from_ymd_opt(2024, 6, 30))
    }

    #[test]
    fn insert_then_get_returns_same_item() {
        let mut store = store();
        let item = StockItem::new("P-1", "Caixa 30x30", 12);
        store.insert_item(Category::Products, &item).unwrap();
        assert_eq!(
            store.get_item(Category::Products, "P-1").unwrap(),
            Some(item)
        );
    }

    #[test]
    fn duplicate_code_is_reported_and_original_kept() {
        let mut store = store();
        store
            .insert_item(Category::Labels, &StockItem::new("R-1", "Sleeve 1L", 100))
            .unwrap();
        let err = store
            .insert_item(Category::Labels, &StockItem::new("R-1", "Other", 1))
            .unwrap_err();
        assert!(matches!(err, StockError::DuplicateKey(code) if code == "R-1"));
        let kept = store.get_item(Category::Labels, "R-1").unwrap().unwrap();
        assert_eq!(kept.name, "Sleeve 1L");
        assert_eq!(kept.quantity, 100);
    }

    #[test]
    fn same_code_in_different_tables_is_allowed() {
        let mut store = store();
        let item = StockItem::new("X", "Gloves", 4);
        store.insert_item(Category::Products, &item).unwrap();
        store.insert_item(Category::SafetyItems, &item).unwrap();
        assert_eq!(store.list_items(Category::SafetyItems, None).unwrap().len(), 1);
    }

    #[test]
    fn list_filter_is_case_sensitive_substring_on_code_or_name() {
        let mut store = store();
        for (code, name) in [("AB-1", "Zeta"), ("X-2", "Alpha bottle"), ("Y-3", "alpha cap")] {
            store
                .insert_item(Category::Products, &StockItem::new(code, name, 1))
                .unwrap();
        }
        let by_name = store.list_items(Category::Products, Some("Alpha")).unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].code, "X-2");

        let by_code = store.list_items(Category::Products, Some("AB")).unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].name, "Zeta");

        let all = store.list_items(Category::Products, Some("  ")).unwrap();
        let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha bottle", "Zeta", "alpha cap"]);
    }

    #[test]
    fn update_touches_only_supplied_fields() {
        let mut store = store();
        store
            .insert_item(Category::Products, &StockItem::new("P-1", "Tape", 5))
            .unwrap();
        store
            .update_item(
                Category::Products,
                "P-1",
                &StockItemUpdate {
                    quantity: Some(9),
                    ..Default::default()
                },
            )
            .unwrap();
        let item = store.get_item(Category::Products, "P-1").unwrap().unwrap();
        assert_eq!(item.name, "Tape");
        assert_eq!(item.quantity, 9);
    }

    #[test]
    fn update_missing_code_is_not_found() {
        let mut store = store();
        let err = store
            .update_item(
                Category::Products,
                "nope",
                &StockItemUpdate {
                    name: Some("x".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }

    #[test]
    fn delete_missing_code_is_a_no_op() {
        let mut store = store();
        store
            .insert_item(Category::Products, &StockItem::new("P-1", "Tape", 5))
            .unwrap();
        assert!(!store.delete_item(Category::Products, "P-9").unwrap());
        assert_eq!(store.list_items(Category::Products, None).unwrap().len(), 1);
        assert!(store.delete_item(Category::Products, "P-1").unwrap());
        assert!(store.list_items(Category::Products, None).unwrap().is_empty());
        assert!(!store.delete_chemical("Q-404").unwrap());
    }

    #[test]
    fn chemical_round_trip() {
        let mut store = store();
        let item = solvent();
        store.insert_chemical(&item).unwrap();
        let loaded = store.get_chemical("Q-01").unwrap().unwrap();
        assert_eq!(loaded, item);
        assert_eq!(loaded.source_unit, DensityUnit::KgPerCubicMeter);
        assert!((loaded.kilograms - 17.4).abs() < 1e-9);
    }

    #[test]
    fn duplicate_chemical_is_reported() {
        let mut store = store();
        store.insert_chemical(&solvent()).unwrap();
        let err = store.insert_chemical(&solvent()).unwrap_err();
        assert!(matches!(err, StockError::DuplicateKey(_)));
    }

    #[test]
    fn chemical_update_recomputes_stored_mass() {
        let mut store = store();
        store.insert_chemical(&solvent()).unwrap();
        store
            .update_chemical(
                "Q-01",
                &ChemicalUpdate {
                    density: Some(DensityInput::new(1.1, DensityUnit::GramPerCubicCentimeter)),
                    ..Default::default()
                },
            )
            .unwrap();
        let loaded = store.get_chemical("Q-01").unwrap().unwrap();
        assert!((loaded.density_kg_per_l - 1.1).abs() < 1e-9);
        assert_eq!(loaded.source_unit, DensityUnit::GramPerCubicCentimeter);
        assert!((loaded.kilograms - 22.0).abs() < 1e-9);
        assert_eq!(loaded.lot.as_deref(), Some("L2024-7"));

        store
            .update_chemical(
                "Q-01",
                &ChemicalUpdate {
                    liters: Some(2.0),
                    lot: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        let loaded = store.get_chemical("Q-01").unwrap().unwrap();
        assert!((loaded.kilograms - 2.2).abs() < 1e-9);
        assert_eq!(loaded.lot, None);
        assert_eq!(loaded.storage_location.as_deref(), Some("Shelf B"));
    }

    #[test]
    fn legacy_chemicals_table_gains_missing_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE chemicals (code TEXT PRIMARY KEY, name TEXT NOT NULL, liters REAL);
             INSERT INTO chemicals (code, name, liters) VALUES ('OLD', 'Legacy', 3.0);",
        )
        .unwrap();
        let store = SqliteStore::with_connection(conn).unwrap();

        assert!(store.repair_chemical_columns().unwrap().is_empty());
        let legacy = store.get_chemical("OLD").unwrap().unwrap();
        assert_eq!(legacy.liters, 3.0);
        assert_eq!(legacy.density_kg_per_l, 0.0);
        assert_eq!(legacy.source_unit, DensityUnit::KgPerLiter);
        assert_eq!(legacy.expiry_date, None);
    }

    #[test]
    fn unparseable_expiry_is_excluded_from_scan() {
        let store = store();
        store
            .conn
            .execute_batch(
                "INSERT INTO chemicals (code, name, expiry_date) VALUES ('A', 'Bad date', '31/12/2023');
                 INSERT INTO chemicals (code, name, expiry_date) VALUES ('B', 'Empty date', '');
                 INSERT INTO chemicals (code, name, expiry_date) VALUES ('C', 'Expired', '2023-12-31');",
            )
            .unwrap();
        let items = store.list_chemicals(None).unwrap();
        assert_eq!(items.len(), 3);

        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = expiry::scan(&items, today);
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].code, "C");
        assert!(report.expiring_soon.is_empty());
    }

    #[test]
    fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store
                .insert_item(Category::Products, &StockItem::new("P", "Persisted", 1))
                .unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get_item(Category::Products, "P").unwrap().unwrap().name,
            "Persisted"
        );
    }
}
