use crate::commands::CmdResult;
use crate::error::{Result, StockError};
use crate::model::Category;
use crate::store::InventoryStore;

pub fn run<S: InventoryStore>(store: &S, category: Category, code: &str) -> Result<CmdResult> {
    let code = code.trim();
    let item = store
        .get_item(category, code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;
    Ok(CmdResult::default().with_listed_items(vec![item]))
}
