use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::{Category, StockItemUpdate};
use crate::store::InventoryStore;

use super::helpers::{parse_quantity, required};

/// Raw edit form for a stock item. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub quantity: Option<String>,
}

pub fn run<S: InventoryStore>(
    store: &mut S,
    category: Category,
    code: &str,
    edit: &ItemEdit,
) -> Result<CmdResult> {
    let code = code.trim();
    let update = StockItemUpdate {
        name: edit.name.as_deref().map(|n| required("Name", n)).transpose()?,
        quantity: edit.quantity.as_deref().map(parse_quantity).transpose()?,
    };
    if update.is_empty() {
        return Err(StockError::Validation(
            "Nothing to update: give a new name and/or quantity".to_string(),
        ));
    }

    store.update_item(category, code, &update)?;
    let item = store
        .get_item(category, code)?
        .ok_or_else(|| StockError::NotFound(code.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated ({}): {}, quantity {}",
        item.code, item.name, item.quantity
    )));
    Ok(result.with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn edit(name: Option<&str>, quantity: Option<&str>) -> ItemEdit {
        ItemEdit {
            name: name.map(String::from),
            quantity: quantity.map(String::from),
        }
    }

    #[test]
    fn updates_name_and_quantity() {
        let mut fixture = StoreFixture::new().with_item(Category::Products, "P1", "Tape", 2);
        run(&mut fixture.store, Category::Products, "P1", &edit(Some("Tape 50m"), Some("7")))
            .unwrap();
        let item = fixture.store.get_item(Category::Products, "P1").unwrap().unwrap();
        assert_eq!(item.name, "Tape 50m");
        assert_eq!(item.quantity, 7);
    }

    #[test]
    fn quantity_only_keeps_name() {
        let mut fixture = StoreFixture::new().with_item(Category::Products, "P1", "Tape", 2);
        run(&mut fixture.store, Category::Products, "P1", &edit(None, Some("0"))).unwrap();
        let item = fixture.store.get_item(Category::Products, "P1").unwrap().unwrap();
        assert_eq!(item.name, "Tape");
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut fixture = StoreFixture::new().with_item(Category::Products, "P1", "Tape", 2);
        for bad in [edit(Some(""), Some("3")), edit(Some("New"), Some("-1")), edit(None, None)] {
            let err = run(&mut fixture.store, Category::Products, "P1", &bad).unwrap_err();
            assert!(matches!(err, StockError::Validation(_)));
        }
        let item = fixture.store.get_item(Category::Products, "P1").unwrap().unwrap();
        assert_eq!(item.name, "Tape");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn missing_code_is_not_found() {
        let mut fixture = StoreFixture::new();
        let err = run(&mut fixture.store, Category::Products, "P9", &edit(Some("X"), None))
            .unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }
}
