use chrono::NaiveDate;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::expiry::{scan, EXPIRY_ALERT_DAYS};
use crate::store::InventoryStore;

/// On-demand expiry scan over the whole chemical ledger.
pub fn run<S: InventoryStore>(store: &S, today: NaiveDate) -> Result<CmdResult> {
    let report = scan(&store.list_chemicals(None)?, today);

    let mut result = CmdResult::default();
    if report.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No formulation expired or expiring within {} days",
            EXPIRY_ALERT_DAYS
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} expired, {} expiring within {} days",
            report.expired.len(),
            report.expiring_soon.len(),
            EXPIRY_ALERT_DAYS
        )));
    }
    Ok(result.with_expiry(report))
}
