use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::{Category, StockItemUpdate};
use crate::store::InventoryStore;

use super::helpers::parse_amount;

/// Takes `amount` units out of stock. The quantity never goes below zero.
pub fn run<S: InventoryStore>(
    store: &mut S,
    category: Category,
    code: &str,
    amount: &str,
) -> Result<CmdResult> {
    let code = code.trim();
    let amount = parse_amount(amount)?;
    let mut item = store
        .get_item(category, code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;

    if amount > item.quantity {
        return Err(StockError::InsufficientQuantity {
            code: item.code,
            requested: amount,
            available: item.quantity,
        });
    }

    item.quantity -= amount;
    store.update_item(
        category,
        code,
        &StockItemUpdate {
            quantity: Some(item.quantity),
            ..Default::default()
        },
    )?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Withdrew {} of {}. New stock: {}",
        amount, item.name, item.quantity
    )));
    Ok(result.with_affected_items(vec![item]))
}
