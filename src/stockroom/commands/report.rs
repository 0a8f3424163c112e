use chrono::NaiveDate;

use crate::commands::{ChemicalRow, CmdResult};
use crate::error::Result;
use crate::expiry::classify;
use crate::model::Category;
use crate::store::InventoryStore;

/// Full listing of one stock category.
pub fn stock<S: InventoryStore>(store: &S, category: Category) -> Result<CmdResult> {
    let items = store.list_items(category, None)?;
    Ok(CmdResult::default().with_listed_items(items))
}

/// Full listing of the chemical ledger with every column and each row's
/// expiry status.
pub fn chemicals<S: InventoryStore>(store: &S, today: NaiveDate) -> Result<CmdResult> {
    let rows = store
        .list_chemicals(None)?
        .into_iter()
        .map(|item| {
            let status = classify(item.expiry_date, today);
            ChemicalRow { item, status }
        })
        .collect();
    Ok(CmdResult::default().with_listed_chemicals(rows))
}
