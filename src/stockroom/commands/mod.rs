use crate::config::StockConfig;
use crate::expiry::{ExpiryReport, ExpiryStatus};
use crate::model::{ChemicalItem, PricedStockItem, StockItem};

pub mod chemicals;
pub mod config;
pub mod convert;
pub mod create;
pub mod delete;
pub mod expiry;
pub mod helpers;
pub mod ledger;
pub mod list;
pub mod report;
pub mod update;
pub mod view;
pub mod withdraw;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A chemical ledger entry together with its expiry status for the day the
/// listing was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalRow {
    pub item: ChemicalItem,
    pub status: ExpiryStatus,
}

/// Live density × volume computation, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPreview {
    pub density_kg_per_l: f64,
    pub liters: f64,
    pub kilograms: f64,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<StockItem>,
    pub listed_items: Vec<StockItem>,
    pub listed_chemicals: Vec<ChemicalRow>,
    pub listed_priced: Vec<PricedStockItem>,
    pub expiry: Option<ExpiryReport>,
    pub preview: Option<MassPreview>,
    pub config: Option<StockConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<StockItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<StockItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_listed_chemicals(mut self, rows: Vec<ChemicalRow>) -> Self {
        self.listed_chemicals = rows;
        self
    }

    pub fn with_listed_priced(mut self, items: Vec<PricedStockItem>) -> Self {
        self.listed_priced = items;
        self
    }

    pub fn with_expiry(mut self, report: ExpiryReport) -> Self {
        self.expiry = Some(report);
        self
    }

    pub fn with_preview(mut self, preview: MassPreview) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn with_config(mut self, config: StockConfig) -> Self {
        self.config = Some(config);
        self
    }
}
