use colored::Colorize;
use stockroom::api::{CmdMessage, MessageLevel};
use stockroom::config::{StockConfig, CONFIG_KEYS};
use stockroom::model::PricedStockItem;
use unicode_width::UnicodeWidthStr;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Products with quantity under `low_threshold` are highlighted.
pub(crate) fn print_items(items: &[PricedStockItem], low_threshold: i64) {
    if items.is_empty() {
        println!("No products found.");
        return;
    }

    let code_width = items
        .iter()
        .map(|i| i.code.width())
        .chain(std::iter::once("CODE".width()))
        .max()
        .unwrap_or(0);
    let name_width = items
        .iter()
        .map(|i| i.name.width())
        .chain(std::iter::once("NAME".width()))
        .max()
        .unwrap_or(0);
    let qty_width = items
        .iter()
        .map(|i| i.quantity.to_string().len())
        .chain(std::iter::once("QUANTITY".len()))
        .max()
        .unwrap_or(0);

    println!(
        "{}",
        format!(
            "{}  {}  {:>qty$}  {:>10}",
            pad("CODE", code_width),
            pad("NAME", name_width),
            "QUANTITY",
            "PRICE",
            qty = qty_width
        )
        .bold()
    );
    for item in items {
        let line = format!(
            "{}  {}  {:>qty$}  {:>10}",
            pad(&item.code, code_width),
            pad(&item.name, name_width),
            item.quantity,
            format_price(item.price),
            qty = qty_width
        );
        if item.quantity < low_threshold {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

pub(crate) fn print_config(config: &StockConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
