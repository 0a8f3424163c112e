use colored::Colorize;
use stockroom::api::{ChemicalRow, CmdMessage, MassPreview, MessageLevel};
use stockroom::config::{StockConfig, CONFIG_KEYS};
use stockroom::expiry::{ExpiryReport, ExpiryStatus, DATE_FORMAT};
use stockroom::model::{ChemicalItem, StockItem};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Alert,
    Warn,
}

fn print_toned(line: String, tone: Tone) {
    match tone {
        Tone::Plain => println!("{}", line),
        Tone::Alert => println!("{}", line.red()),
        Tone::Warn => println!("{}", line.yellow()),
    }
}

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

/// Left-aligns to a display width, so accented names line up.
fn pad(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn column_widths(header: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn print_table(header: &[&str], rows: &[Vec<String>], tones: &[Tone]) {
    let widths = column_widths(header, rows);
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    println!("{}", format_row(&header_cells, &widths).bold());
    for (row, tone) in rows.iter().zip(tones) {
        print_toned(format_row(row, &widths), *tone);
    }
}

pub(crate) fn print_items(items: &[StockItem]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| vec![item.code.clone(), item.name.clone(), item.quantity.to_string()])
        .collect();
    print_table(&["CODE", "NAME", "QUANTITY"], &rows, &vec![Tone::Plain; rows.len()]);
}

pub(crate) fn print_item_detail(item: &StockItem) {
    println!("{} {}", item.code.yellow(), item.name.bold());
    println!("quantity: {}", item.quantity);
}

fn date_text(item: &ChemicalItem) -> String {
    item.expiry_date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn status_text(status: &ExpiryStatus) -> String {
    match status {
        ExpiryStatus::Expired { days_overdue } => format!("expired {} day(s) ago", days_overdue),
        ExpiryStatus::ExpiringSoon { days_left: 0 } => "expires today".to_string(),
        ExpiryStatus::ExpiringSoon { days_left } => format!("expires in {} day(s)", days_left),
        ExpiryStatus::Ok => "ok".to_string(),
        ExpiryStatus::Unknown => "-".to_string(),
    }
}

fn status_tone(status: &ExpiryStatus) -> Tone {
    match status {
        ExpiryStatus::Expired { .. } => Tone::Alert,
        ExpiryStatus::ExpiringSoon { .. } => Tone::Warn,
        _ => Tone::Plain,
    }
}

/// Ledger table. `full` adds every stored column, as the report does.
pub(crate) fn print_chemicals(rows: &[ChemicalRow], full: bool) {
    if rows.is_empty() {
        println!("No formulations found.");
        return;
    }
    let header: &[&str] = if full {
        &[
            "CODE", "NAME", "DENSITY (kg/L)", "UNIT", "LITERS", "KG", "LOCATION", "LOT",
            "EXPIRY", "STATUS",
        ]
    } else {
        &["CODE", "NAME", "KG", "LITERS", "EXPIRY", "STATUS"]
    };
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let item = &row.item;
            if full {
                vec![
                    item.code.clone(),
                    item.name.clone(),
                    format!("{:.4}", item.density_kg_per_l),
                    item.source_unit.to_string(),
                    format!("{:.3}", item.liters),
                    format!("{:.3}", item.kilograms),
                    item.storage_location.clone().unwrap_or_default(),
                    item.lot.clone().unwrap_or_default(),
                    date_text(item),
                    status_text(&row.status),
                ]
            } else {
                vec![
                    item.code.clone(),
                    item.name.clone(),
                    format!("{:.3}", item.kilograms),
                    format!("{:.3}", item.liters),
                    date_text(item),
                    status_text(&row.status),
                ]
            }
        })
        .collect();
    let tones: Vec<Tone> = rows.iter().map(|row| status_tone(&row.status)).collect();
    print_table(header, &cells, &tones);
}

pub(crate) fn print_chemical_detail(row: &ChemicalRow) {
    let item = &row.item;
    println!("{} {}", item.code.yellow(), item.name.bold());
    println!(
        "density: {:.4} kg/L (entered as {})",
        item.density_kg_per_l, item.source_unit
    );
    println!("liters: {:.3}", item.liters);
    println!("mass: {:.3} kg", item.kilograms);
    if let Some(location) = &item.storage_location {
        println!("location: {}", location);
    }
    if let Some(lot) = &item.lot {
        println!("lot: {}", lot);
    }
    if item.expiry_date.is_some() {
        let line = format!("expiry: {} ({})", date_text(item), status_text(&row.status));
        print_toned(line, status_tone(&row.status));
    }
}

pub(crate) fn print_expiry_report(report: &ExpiryReport) {
    if !report.expired.is_empty() {
        println!("{}", "Expired:".red().bold());
        for entry in &report.expired {
            println!(
                "  {}  {}  {}",
                entry.code.red(),
                entry.name,
                entry.expiry_date.format(DATE_FORMAT)
            );
        }
    }
    if !report.expiring_soon.is_empty() {
        println!("{}", "Expiring soon:".yellow().bold());
        for entry in &report.expiring_soon {
            println!(
                "  {}  {}  {}  ({} day(s) left)",
                entry.code.yellow(),
                entry.name,
                entry.expiry_date.format(DATE_FORMAT),
                entry.days_left
            );
        }
    }
}

pub(crate) fn print_preview(preview: &MassPreview) {
    println!(
        "mass {:.3} kg (density {:.4} kg/L)",
        preview.kilograms, preview.density_kg_per_l
    );
}

pub(crate) fn print_config(config: &StockConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
