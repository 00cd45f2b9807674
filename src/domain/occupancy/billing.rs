//! Occupancy billing
//!
//! A fixed price is charged as-is. An hourly price is charged per
//! started hour: any remainder beyond whole hours counts as a full hour.

use chrono::{DateTime, Utc};

use super::model::{OccupancyRecord, Pricing};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Billing policy applied when a record is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingPolicy {
    /// Lower bound on billed hours for hourly records. Zero keeps a
    /// same-instant close free of charge.
    pub minimum_billed_hours: i64,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            minimum_billed_hours: 0,
        }
    }
}

impl BillingPolicy {
    pub fn new(minimum_billed_hours: i64) -> Self {
        Self {
            minimum_billed_hours: minimum_billed_hours.max(0),
        }
    }

    /// Whole hours billed between `start` and `end`, rounded up.
    /// Negative spans (clock skew) are treated as zero.
    pub fn billed_hours(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let millis = (end - start).num_milliseconds().max(0);
        let hours = millis / MILLIS_PER_HOUR + i64::from(millis % MILLIS_PER_HOUR > 0);
        hours.max(self.minimum_billed_hours)
    }

    /// Amount owed for a record. An open record is billed up to its
    /// start time, i.e. only the policy minimum applies. Saturates at
    /// `i64::MAX`.
    pub fn compute_total(&self, record: &OccupancyRecord) -> i64 {
        match record.pricing {
            Pricing::Fixed(rate) => rate,
            Pricing::Hourly(rate) => {
                let end = record.end_time.unwrap_or(record.start_time);
                rate.saturating_mul(self.billed_hours(record.start_time, end))
            }
        }
    }

    /// Billed hours for a record, `None` for fixed pricing
    pub fn billed_hours_for(&self, record: &OccupancyRecord) -> Option<i64> {
        match record.pricing {
            Pricing::Fixed(_) => None,
            Pricing::Hourly(_) => {
                let end = record.end_time.unwrap_or(record.start_time);
                Some(self.billed_hours(record.start_time, end))
            }
        }
    }
}

/// Format an amount in smallest currency unit as a human-readable string
pub fn format_amount(amount: i64, currency: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

// ── Tests ──────────────────────────────────────────────────────
