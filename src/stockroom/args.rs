use clap::{Parser, Subcommand};
use stockroom::model::Category;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "stockroom", version)]
#[command(about = "Inventory for stock categories and the chemical ledger", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the database and config (default: $STOCKROOM_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register an item in a category (products, safety, labels)
    #[command(alias = "a")]
    Add {
        category: Category,
        code: String,
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// List the items of a category
    #[command(alias = "ls")]
    List {
        category: Category,

        /// Only items whose code or name contains this text (case-sensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one item
    #[command(alias = "v")]
    View { category: Category, code: String },

    /// Change the name and/or quantity of an item
    #[command(alias = "e")]
    Edit {
        category: Category,
        code: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<String>,
    },

    /// Take units out of stock
    #[command(alias = "w")]
    Withdraw {
        category: Category,
        code: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove an item (no-op if the code is unknown)
    #[command(alias = "rm")]
    Remove { category: Category, code: String },

    /// Chemical / formulation ledger
    #[command(alias = "c")]
    Chem {
        #[command(subcommand)]
        command: ChemCommands,
    },

    /// Full listing of a category, or of the chemical ledger with every column
    Report { target: ReportTarget },

    /// Get or set configuration (config.json in the data dir, shared by stockroom and stocklist)
    Config {
        /// Configuration key: database-file (stockroom), ledger-file and low-stock-threshold (stocklist)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChemCommands {
    /// Register a formulation
    #[command(alias = "a")]
    Add {
        code: String,
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        density: String,

        /// kg/L (default), g/cm³ or kg/m³
        #[arg(long)]
        unit: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        liters: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        lot: Option<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        expiry: Option<String>,
    },

    /// List the ledger, with the expiry alert
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one formulation
    #[command(alias = "v")]
    View { code: String },

    /// Change fields of a formulation; an empty text value clears it
    #[command(alias = "e")]
    Edit {
        code: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        density: Option<String>,

        /// Unit of --density
        #[arg(long)]
        unit: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        liters: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        lot: Option<String>,

        /// YYYY-MM-DD, or "" to clear
        #[arg(long)]
        expiry: Option<String>,
    },

    /// Remove a formulation (no-op if the code is unknown)
    #[command(alias = "rm")]
    Remove { code: String },

    /// Expired and soon-to-expire formulations
    Expiry,

    /// Compute the mass for a density and volume without storing anything
    Convert {
        #[arg(allow_hyphen_values = true)]
        density: String,

        #[arg(long, default_value = "kg/L")]
        unit: String,

        /// Volume in litres (default 0)
        #[arg(long, allow_hyphen_values = true)]
        liters: Option<String>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ReportTarget {
    Stock(Category),
    Chemicals,
}

impl FromStr for ReportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chemicals" | "chem" | "formulations" => Ok(ReportTarget::Chemicals),
            other => other.parse().map(ReportTarget::Stock),
        }
    }
}
