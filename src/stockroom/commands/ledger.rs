//! Commands of the flat priced stock list.
//!
//! The list is loaded whole, changed in memory and written back whole. A
//! failed validation or check returns before anything is written.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::PricedStockItem;
use crate::store::{matches_filter, CatalogStore};

use super::helpers::{parse_amount, parse_non_negative_decimal, parse_quantity, required};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

fn find_mut<'a>(items: &'a mut [PricedStockItem], code: &str) -> Result<&'a mut PricedStockItem> {
    items
        .iter_mut()
        .find(|item| item.code == code)
        .ok_or_else(|| StockError::NotFound(code.to_string()))
}

pub fn register<C: CatalogStore>(
    store: &mut C,
    code: &str,
    name: &str,
    quantity: &str,
    price: &str,
) -> Result<CmdResult> {
    let code = required("Code", code)?;
    let name = required("Name", name)?;
    let quantity = parse_quantity(quantity)?;
    let price = parse_non_negative_decimal("Price", price)?;

    let mut items = store.load()?;
    if items.iter().any(|item| item.code == code) {
        return Err(StockError::DuplicateKey(code));
    }
    let item = PricedStockItem::new(code, name, quantity, price);
    items.push(item.clone());
    store.save(&items)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Registered ({}): {}",
        item.code, item.name
    )));
    Ok(result.with_listed_priced(vec![item]))
}

pub fn list<C: CatalogStore>(store: &C, filter: Option<&str>) -> Result<CmdResult> {
    let mut items: Vec<PricedStockItem> = store
        .load()?
        .into_iter()
        .filter(|item| matches_filter(&item.code, &item.name, filter))
        .collect();
    items.sort_by(|a, b| (&a.name, &a.code).cmp(&(&b.name, &b.code)));
    Ok(CmdResult::default().with_listed_priced(items))
}

/// Stock entry: adds `amount` to the item's quantity.
pub fn receive<C: CatalogStore>(store: &mut C, code: &str, amount: &str) -> Result<CmdResult> {
    let code = code.trim();
    let amount = parse_amount(amount)?;

    let mut items = store.load()?;
    let item = find_mut(&mut items, code)?;
    item.quantity = item.quantity.checked_add(amount).ok_or_else(|| {
        StockError::Validation(format!(
            "Amount {} would overflow the stock of {}",
            amount, item.code
        ))
    })?;
    let updated = item.clone();
    store.save(&items)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Received {} of {}. New stock: {}",
        amount, updated.name, updated.quantity
    )));
    Ok(result.with_listed_priced(vec![updated]))
}

/// Stock exit: removes `amount` from the item's quantity, never below zero.
pub fn issue<C: CatalogStore>(store: &mut C, code: &str, amount: &str) -> Result<CmdResult> {
    let code = code.trim();
    let amount = parse_amount(amount)?;

    let mut items = store.load()?;
    let item = find_mut(&mut items, code)?;
    if amount > item.quantity {
        return Err(StockError::InsufficientQuantity {
            code: item.code.clone(),
            requested: amount,
            available: item.quantity,
        });
    }
    item.quantity -= amount;
    let updated = item.clone();
    store.save(&items)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Issued {} of {}. New stock: {}",
        amount, updated.name, updated.quantity
    )));
    Ok(result.with_listed_priced(vec![updated]))
}

/// Items whose quantity is strictly below `threshold`.
pub fn low_stock<C: CatalogStore>(store: &C, threshold: i64) -> Result<CmdResult> {
    let low: Vec<PricedStockItem> = store
        .load()?
        .into_iter()
        .filter(|item| item.quantity < threshold)
        .collect();

    let mut result = CmdResult::default();
    if low.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No item below {} units",
            threshold
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} item(s) below {} units",
            low.len(),
            threshold
        )));
    }
    Ok(result.with_listed_priced(low))
}
