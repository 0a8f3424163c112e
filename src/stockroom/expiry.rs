//! Expiry classification for the chemical ledger.
//!
//! A record with no expiry date (or one that could not be parsed when it was
//! read back from storage) is [`ExpiryStatus::Unknown`] and never shows up in
//! an [`ExpiryReport`].

use chrono::NaiveDate;

use crate::model::ChemicalItem;

/// Length of the alert window in calendar days, today included: with a
/// window of 10, an item expiring on today + 9 is still flagged.
pub const EXPIRY_ALERT_DAYS: i64 = 10;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired { days_overdue: i64 },
    ExpiringSoon { days_left: i64 },
    Ok,
    Unknown,
}

impl ExpiryStatus {
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            ExpiryStatus::Expired { .. } | ExpiryStatus::ExpiringSoon { .. }
        )
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::Unknown;
    };
    let days = days_until(expiry, today);
    if days < 0 {
        ExpiryStatus::Expired { days_overdue: -days }
    } else if days < EXPIRY_ALERT_DAYS {
        ExpiryStatus::ExpiringSoon { days_left: days }
    } else {
        ExpiryStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpiredEntry {
    pub code: String,
    pub name: String,
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringEntry {
    pub code: String,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub days_left: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpiryReport {
    pub expired: Vec<ExpiredEntry>,
    pub expiring_soon: Vec<ExpiringEntry>,
}

impl ExpiryReport {
    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.expiring_soon.is_empty()
    }
}

pub fn scan(items: &[ChemicalItem], today: NaiveDate) -> ExpiryReport {
    let mut report = ExpiryReport::default();
    for item in items {
        let Some(expiry_date) = item.expiry_date else {
            continue;
        };
        match classify(Some(expiry_date), today) {
            ExpiryStatus::Expired { .. } => report.expired.push(ExpiredEntry {
                code: item.code.clone(),
                name: item.name.clone(),
                expiry_date,
            }),
            ExpiryStatus::ExpiringSoon { days_left } => {
                report.expiring_soon.push(ExpiringEntry {
                    code: item.code.clone(),
                    name: item.name.clone(),
                    expiry_date,
                    days_left,
                })
            }
            ExpiryStatus::Ok | ExpiryStatus::Unknown => {}
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DensityInput, DensityUnit};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn chemical(code: &str, expiry: Option<&str>) -> ChemicalItem {
        ChemicalItem::new(
            code,
            format!("Chemical {}", code),
            DensityInput::new(1.0, DensityUnit::KgPerLiter),
            1.0,
        )
        .with_expiry_date(expiry.map(date))
    }

    #[test]
    fn day_before_today_is_expired() {
        let today = date("2024-01-01");
        let report = scan(&[chemical("A", Some("2023-12-31"))], today);
        assert_eq!(report.expired.len(), 1);
        assert!(report.expiring_soon.is_empty());
    }

    #[test]
    fn tenth_day_is_expiring_soon() {
        let today = date("2024-01-01");
        let report = scan(&[chemical("A", Some("2024-01-10"))], today);
        assert!(report.expired.is_empty());
        assert_eq!(report.expiring_soon.len(), 1);
        assert_eq!(report.expiring_soon[0].days_left, 9);
    }

    #[test]
    fn eleventh_day_is_outside_the_window() {
        let today = date("2024-01-01");
        let report = scan(&[chemical("A", Some("2024-01-11"))], today);
        assert!(report.is_empty());
        assert_eq!(classify(Some(date("2024-01-11")), today), ExpiryStatus::Ok);
    }

    #[test]
    fn scan_partitions_mixed_items() {
        let today = date("2024-01-01");
        let items = vec![
            chemical("A", Some("2023-06-01")),
            chemical("B", Some("2024-01-05")),
            chemical("C", Some("2025-01-01")),
            chemical("D", None),
        ];
        let report = scan(&items, today);
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].code, "A");
        assert_eq!(report.expiring_soon.len(), 1);
        assert_eq!(report.expiring_soon[0].code, "B");
        assert_eq!(report.expiring_soon[0].days_left, 4);
    }

    #[test]
    fn expiring_today_is_not_expired() {
        let today = date("2024-01-01");
        assert_eq!(
            classify(Some(today), today),
            ExpiryStatus::ExpiringSoon { days_left: 0 }
        );
    }

    #[test]
    fn missing_dates_are_skipped() {
        let today = date("2024-01-01");
        let report = scan(&[chemical("A", None)], today);
        assert!(report.is_empty());
        assert_eq!(classify(None, today), ExpiryStatus::Unknown);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("01/02/2024").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert_eq!(parse_date(" 2024-02-29 "), Some(date("2024-02-29")));
    }
}
