use clap::Parser;
use stockroom::api::ConfigAction;
use stockroom::error::Result;
use stockroom::init::{initialize_ledger, resolve_data_dir, LedgerContext};
use stockroom::logging;

mod args;
mod print;

use args::{Cli, Commands};
use print::{print_config, print_items, print_messages};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
    let mut ctx = initialize_ledger(&data_dir)?;

    match cli.command {
        Some(Commands::Add {
            code,
            name,
            quantity,
            price,
        }) => handle_add(&mut ctx, code, name, quantity, price),
        Some(Commands::List { search }) => handle_list(&ctx, search),
        Some(Commands::Receive { code, amount }) => handle_receive(&mut ctx, code, amount),
        Some(Commands::Issue { code, amount }) => handle_issue(&mut ctx, code, amount),
        Some(Commands::LowStock { threshold }) => handle_low_stock(&ctx, threshold),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None),
    }
}

fn handle_add(
    ctx: &mut LedgerContext,
    code: String,
    name: String,
    quantity: String,
    price: String,
) -> Result<()> {
    let result = ctx.api.register(&code, &name, &quantity, &price)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &LedgerContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list(search.as_deref())?;
    print_items(&result.listed_priced, ctx.config.low_stock_threshold);
    Ok(())
}

fn handle_receive(ctx: &mut LedgerContext, code: String, amount: String) -> Result<()> {
    let result = ctx.api.receive(&code, &amount)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_issue(ctx: &mut LedgerContext, code: String, amount: String) -> Result<()> {
    let result = ctx.api.issue(&code, &amount)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_low_stock(ctx: &LedgerContext, threshold: Option<i64>) -> Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.low_stock_threshold);
    let result = ctx.api.low_stock(threshold)?;
    print_messages(&result.messages);
    if !result.listed_priced.is_empty() {
        print_items(&result.listed_priced, threshold);
    }
    Ok(())
}

fn handle_config(ctx: &LedgerContext, key: Option<String>, value: Option<String>) -> Result<()> {
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
