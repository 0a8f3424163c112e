use chrono::{Local, NaiveDate};
use clap::Parser;
use stockroom::api::{ChemicalEdit, ChemicalForm, CmdResult, ConfigAction, ItemEdit};
use stockroom::error::Result;
use stockroom::init::{initialize_inventory, resolve_data_dir, InventoryContext};
use stockroom::logging;
use stockroom::model::Category;

mod args;
mod print;

use args::{ChemCommands, Cli, Commands, ReportTarget};
use print::{
    print_chemical_detail, print_chemicals, print_config, print_expiry_report,
    print_item_detail, print_items, print_messages, print_preview,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
    let mut ctx = initialize_inventory(&data_dir)?;

    match cli.command {
        Commands::Add {
            category,
            code,
            name,
            quantity,
        } => handle_add(&mut ctx, category, code, name, quantity),
        Commands::List { category, search } => handle_list(&ctx, category, search),
        Commands::View { category, code } => handle_view(&ctx, category, code),
        Commands::Edit {
            category,
            code,
            name,
            quantity,
        } => handle_edit(&mut ctx, category, code, ItemEdit { name, quantity }),
        Commands::Withdraw {
            category,
            code,
            amount,
        } => handle_withdraw(&mut ctx, category, code, amount),
        Commands::Remove { category, code } => handle_remove(&mut ctx, category, code),
        Commands::Chem { command } => handle_chem(&mut ctx, command),
        Commands::Report { target } => handle_report(&ctx, target),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn handle_add(
    ctx: &mut InventoryContext,
    category: Category,
    code: String,
    name: String,
    quantity: String,
) -> Result<()> {
    let result = ctx.api.create_item(category, &code, &name, &quantity)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &InventoryContext, category: Category, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_items(category, search.as_deref())?;
    print_items(&result.listed_items);
    Ok(())
}

fn handle_view(ctx: &InventoryContext, category: Category, code: String) -> Result<()> {
    let result = ctx.api.view_item(category, &code)?;
    for item in &result.listed_items {
        print_item_detail(item);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut InventoryContext,
    category: Category,
    code: String,
    edit: ItemEdit,
) -> Result<()> {
    let result = ctx.api.update_item(category, &code, &edit)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_withdraw(
    ctx: &mut InventoryContext,
    category: Category,
    code: String,
    amount: String,
) -> Result<()> {
    let result = ctx.api.withdraw(category, &code, &amount)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut InventoryContext, category: Category, code: String) -> Result<()> {
    let result = ctx.api.delete_item(category, &code)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_chem(ctx: &mut InventoryContext, command: ChemCommands) -> Result<()> {
    let result: CmdResult = match command {
        ChemCommands::Add {
            code,
            name,
            density,
            unit,
            liters,
            location,
            lot,
            expiry,
        } => {
            let form = ChemicalForm {
                code,
                name,
                density,
                unit,
                liters,
                storage_location: location,
                lot,
                expiry_date: expiry,
            };
            ctx.api.create_chemical(&form)?
        }
        ChemCommands::List { search } => {
            let result = ctx.api.list_chemicals(search.as_deref(), today())?;
            if let Some(report) = &result.expiry {
                print_expiry_report(report);
            }
            print_messages(&result.messages);
            print_chemicals(&result.listed_chemicals, false);
            return Ok(());
        }
        ChemCommands::View { code } => {
            let result = ctx.api.view_chemical(&code, today())?;
            for row in &result.listed_chemicals {
                print_chemical_detail(row);
            }
            return Ok(());
        }
        ChemCommands::Edit {
            code,
            name,
            density,
            unit,
            liters,
            location,
            lot,
            expiry,
        } => {
            let edit = ChemicalEdit {
                name,
                density,
                unit,
                liters,
                storage_location: location,
                lot,
                expiry_date: expiry,
            };
            ctx.api.update_chemical(&code, &edit)?
        }
        ChemCommands::Remove { code } => ctx.api.delete_chemical(&code)?,
        ChemCommands::Expiry => {
            let result = ctx.api.expiry(today())?;
            print_messages(&result.messages);
            if let Some(report) = &result.expiry {
                print_expiry_report(report);
            }
            return Ok(());
        }
        ChemCommands::Convert {
            density,
            unit,
            liters,
        } => {
            let result = ctx
                .api
                .convert(&density, &unit, liters.as_deref().unwrap_or_default())?;
            if let Some(preview) = &result.preview {
                print_preview(preview);
            }
            return Ok(());
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_report(ctx: &InventoryContext, target: ReportTarget) -> Result<()> {
    match target {
        ReportTarget::Stock(category) => {
            let result = ctx.api.report_stock(category)?;
            println!("{}", category.label());
            print_items(&result.listed_items);
        }
        ReportTarget::Chemicals => {
            let result = ctx.api.report_chemicals(today())?;
            println!("Chemical ledger");
            print_chemicals(&result.listed_chemicals, true);
        }
    }
    Ok(())
}

fn handle_config(ctx: &InventoryContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
