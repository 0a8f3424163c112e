use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Category;
use crate::store::InventoryStore;

pub fn run<S: InventoryStore>(
    store: &S,
    category: Category,
    filter: Option<&str>,
) -> Result<CmdResult> {
    let items = store.list_items(category, filter)?;
    Ok(CmdResult::default().with_listed_items(items))
}
