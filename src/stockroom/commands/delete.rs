use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Category;
use crate::store::InventoryStore;

pub fn run<S: InventoryStore>(store: &mut S, category: Category, code: &str) -> Result<CmdResult> {
    let code = code.trim();
    let existing = store.get_item(category, code)?;
    let removed = store.delete_item(category, code)?;

    let mut result = CmdResult::default();
    match existing {
        Some(item) if removed => {
            result.add_message(CmdMessage::success(format!(
                "Removed ({}): {}",
                item.code, item.name
            )));
            result.affected_items.push(item);
        }
        _ => result.add_message(CmdMessage::info(format!(
            "Nothing to remove: {} is not in {}",
            code,
            category.label()
        ))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn removes_item() {
        let mut fixture = StoreFixture::new().with_item(Category::Products, "P1", "Tape", 1);
        let result = run(&mut fixture.store, Category::Products, "P1").unwrap();
        assert_eq!(result.affected_items.len(), 1);
        assert!(fixture.store.get_item(Category::Products, "P1").unwrap().is_none());
    }

    #[test]
    fn missing_code_is_a_silent_no_op() {
        let mut fixture = StoreFixture::new().with_item(Category::Products, "P1", "Tape", 1);
        let result = run(&mut fixture.store, Category::Products, "P2").unwrap();
        assert!(result.affected_items.is_empty());
        assert_eq!(
            fixture.store.list_items(Category::Products, None).unwrap().len(),
            1
        );
    }
}
