//! Chemical / formulation ledger commands.
//!
//! Densities arrive as text plus a unit and are stored converted to kg/L. The
//! stored mass is recomputed by the model on every create and edit.

use chrono::NaiveDate;

use crate::commands::{ChemicalRow, CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::expiry::{self, EXPIRY_ALERT_DAYS};
use crate::model::{ChemicalItem, ChemicalUpdate, DensityInput, DensityUnit};
use crate::store::InventoryStore;

use super::helpers::{optional_text, parse_expiry, parse_non_negative_decimal, required};

/// Raw registration form.
#[derive(Debug, Clone, Default)]
pub struct ChemicalForm {
    pub code: String,
    pub name: String,
    pub density: String,
    /// Blank means kg/L.
    pub unit: Option<String>,
    pub liters: String,
    pub storage_location: Option<String>,
    pub lot: Option<String>,
    pub expiry_date: Option<String>,
}

/// Raw edit form. `None` keeps a field; for the optional text fields a blank
/// value clears it.
#[derive(Debug, Clone, Default)]
pub struct ChemicalEdit {
    pub name: Option<String>,
    pub density: Option<String>,
    pub unit: Option<String>,
    pub liters: Option<String>,
    pub storage_location: Option<String>,
    pub lot: Option<String>,
    pub expiry_date: Option<String>,
}

pub(crate) fn parse_unit(raw: Option<&str>, default: DensityUnit) -> Result<DensityUnit> {
    match optional_text(raw) {
        None => Ok(default),
        Some(text) => text.parse().map_err(StockError::Validation),
    }
}

fn row(item: ChemicalItem, today: NaiveDate) -> ChemicalRow {
    let status = expiry::classify(item.expiry_date, today);
    ChemicalRow { item, status }
}

pub fn create<S: InventoryStore>(store: &mut S, form: &ChemicalForm) -> Result<CmdResult> {
    let code = required("Code", &form.code)?;
    let name = required("Name", &form.name)?;
    let density = parse_non_negative_decimal("Density", &form.density)?;
    let unit = parse_unit(form.unit.as_deref(), DensityUnit::KgPerLiter)?;
    let liters = parse_non_negative_decimal("Liters", &form.liters)?;
    let expiry_date = parse_expiry(form.expiry_date.as_deref())?;

    let item = ChemicalItem::new(code, name, DensityInput::new(density, unit), liters)
        .with_storage_location(optional_text(form.storage_location.as_deref()))
        .with_lot(optional_text(form.lot.as_deref()))
        .with_expiry_date(expiry_date);
    store.insert_chemical(&item)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Formulation registered ({}): {}, {:.3} kg",
        item.code, item.name, item.kilograms
    )));
    Ok(result)
}

/// Lists the ledger and runs the expiry scan over every entry, the way the
/// ledger view alerts when it is opened.
pub fn list<S: InventoryStore>(
    store: &S,
    filter: Option<&str>,
    today: NaiveDate,
) -> Result<CmdResult> {
    let rows = store
        .list_chemicals(filter)?
        .into_iter()
        .map(|item| row(item, today))
        .collect();
    let report = expiry::scan(&store.list_chemicals(None)?, today);

    let mut result = CmdResult::default();
    if !report.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Expiry alert: {} expired, {} expiring within {} days",
            report.expired.len(),
            report.expiring_soon.len(),
            EXPIRY_ALERT_DAYS
        )));
    }
    Ok(result.with_listed_chemicals(rows).with_expiry(report))
}

pub fn view<S: InventoryStore>(store: &S, code: &str, today: NaiveDate) -> Result<CmdResult> {
    let code = code.trim();
    let item = store
        .get_chemical(code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;
    Ok(CmdResult::default().with_listed_chemicals(vec![row(item, today)]))
}

pub fn update<S: InventoryStore>(
    store: &mut S,
    code: &str,
    edit: &ChemicalEdit,
) -> Result<CmdResult> {
    let code = code.trim();
    let current = store
        .get_chemical(code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;

    let density = match (edit.density.as_deref(), edit.unit.as_deref()) {
        (Some(value), unit) => Some(DensityInput::new(
            parse_non_negative_decimal("Density", value)?,
            parse_unit(unit, current.source_unit)?,
        )),
        (None, Some(_)) => {
            return Err(StockError::Validation(
                "A new density unit needs the density value it applies to".to_string(),
            ))
        }
        (None, None) => None,
    };

    let update = ChemicalUpdate {
        name: edit.name.as_deref().map(|n| required("Name", n)).transpose()?,
        density,
        liters: edit
            .liters
            .as_deref()
            .map(|l| parse_non_negative_decimal("Liters", l))
            .transpose()?,
        storage_location: edit
            .storage_location
            .as_deref()
            .map(|v| optional_text(Some(v))),
        lot: edit.lot.as_deref().map(|v| optional_text(Some(v))),
        expiry_date: edit
            .expiry_date
            .as_deref()
            .map(|v| parse_expiry(Some(v)))
            .transpose()?,
    };
    if update.is_empty() {
        return Err(StockError::Validation("Nothing to update".to_string()));
    }

    store.update_chemical(code, &update)?;
    let item = store
        .get_chemical(code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Formulation updated ({}): {}, {:.3} kg",
        item.code, item.name, item.kilograms
    )));
    Ok(result)
}

pub fn delete<S: InventoryStore>(store: &mut S, code: &str) -> Result<CmdResult> {
    let code = code.trim();
    let existing = store.get_chemical(code)?;
    let removed = store.delete_chemical(code)?;

    let mut result = CmdResult::default();
    match existing {
        Some(item) if removed => result.add_message(CmdMessage::success(format!(
            "Formulation removed ({}): {}",
            item.code, item.name
        ))),
        _ => result.add_message(CmdMessage::info(format!(
            "Nothing to remove: {} is not in the ledger",
            code
        ))),
    }
    Ok(result)
}
