//! Running revenue total

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::Serialize;

/// Snapshot of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenueSnapshot {
    pub total: i64,
    pub closed_records: u64,
}

/// Accumulates the totals of closed occupancy records.
///
/// Values are folded in only after the record they belong to has been
/// closed and persisted.
#[derive(Debug, Default)]
pub struct RevenueLedger {
    total: AtomicI64,
    closed_records: AtomicU64,
}

impl RevenueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `amount` into the total, saturating instead of wrapping
    pub fn record(&self, amount: i64) {
        // the closure never returns None, so the update cannot fail
        let _ = self
            .total
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |total| {
                Some(total.saturating_add(amount))
            });
        self.closed_records.fetch_add(1, Ordering::SeqCst);
        if amount > 0 {
            metrics::counter!("parking_revenue_total").increment(amount as u64);
        }
    }

    pub fn snapshot(&self) -> RevenueSnapshot {
        RevenueSnapshot {
            total: self.total.load(Ordering::SeqCst),
            closed_records: self.closed_records.load(Ordering::SeqCst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn accumulates_totals() {
        let ledger = RevenueLedger::new();
        ledger.record(10);
        ledger.record(0);
        ledger.record(50);
        assert_eq!(
            ledger.snapshot(),
            RevenueSnapshot {
                total: 60,
                closed_records: 3
            }
        );
    }

    #[test]
    fn total_saturates_instead_of_wrapping() {
        let ledger = RevenueLedger::new();
        ledger.record(i64::MAX);
        ledger.record(100);
        let snap = ledger.snapshot();
        assert_eq!(snap.total, i64::MAX);
        assert_eq!(snap.closed_records, 2);
    }

    #[tokio::test]
    async fn concurrent_records_are_not_lost() {
        let ledger = Arc::new(RevenueLedger::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    ledger.record(5);
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        let snap = ledger.snapshot();
        assert_eq!(snap.total, 4000);
        assert_eq!(snap.closed_records, 800);
    }
}
