use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stocklist", version)]
#[command(about = "Priced stock list kept in a JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the stock file and config (default: $STOCKROOM_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new product
    #[command(alias = "a")]
    Add {
        code: String,
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// List the stock
    #[command(alias = "ls")]
    List {
        /// Only products whose code or name contains this text (case-sensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Stock entry: add units to a product
    #[command(alias = "in")]
    Receive {
        code: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Stock exit: take units out of a product
    #[command(alias = "out")]
    Issue {
        code: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Products below the low-stock threshold
    LowStock {
        /// Overrides the configured threshold
        #[arg(short, long)]
        threshold: Option<i64>,
    },

    /// Get or set configuration (config.json in the data dir, shared by stockroom and stocklist)
    Config {
        /// Configuration key: database-file (stockroom), ledger-file and low-stock-threshold (stocklist)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
