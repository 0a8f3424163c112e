use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Category, StockItem};
use crate::store::InventoryStore;

use super::helpers::{parse_quantity, required};

pub fn run<S: InventoryStore>(
    store: &mut S,
    category: Category,
    code: &str,
    name: &str,
    quantity: &str,
) -> Result<CmdResult> {
    let code = required("Code", code)?;
    let name = required("Name", name)?;
    let quantity = parse_quantity(quantity)?;

    let item = StockItem::new(code, name, quantity);
    store.insert_item(category, &item)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Registered in {} ({}): {}",
        category.label(),
        item.code,
        item.name
    )));
    Ok(result.with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn registers_item() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, Category::Products, " P1 ", "Tape", "12").unwrap();
        assert_eq!(result.affected_items[0], StockItem::new("P1", "Tape", 12));
        assert_eq!(
            store.get_item(Category::Products, "P1").unwrap(),
            Some(StockItem::new("P1", "Tape", 12))
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let mut store = InMemoryStore::new();
        for (code, name, qty) in [("", "Tape", "1"), ("P1", " ", "1"), ("P1", "Tape", "")] {
            let err = run(&mut store, Category::Products, code, name, qty).unwrap_err();
            assert!(matches!(err, StockError::Validation(_)));
        }
        assert!(store.list_items(Category::Products, None).unwrap().is_empty());
    }

    #[test]
    fn rejects_negative_quantity() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, Category::Labels, "L1", "Sleeve", "-3").unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
    }

    #[test]
    fn duplicate_code_leaves_existing_record() {
        let mut store = InMemoryStore::new();
        run(&mut store, Category::SafetyItems, "E1", "Gloves", "5").unwrap();
        let err = run(&mut store, Category::SafetyItems, "E1", "Boots", "9").unwrap_err();
        assert!(matches!(err, StockError::DuplicateKey(_)));
        let item = store.get_item(Category::SafetyItems, "E1").unwrap().unwrap();
        assert_eq!(item.name, "Gloves");
        assert_eq!(item.quantity, 5);
    }
}
