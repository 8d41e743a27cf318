use crate::models::{Transaction, TransactionId};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Ordered list of recorded sales, newest first.
///
/// Serializes as a bare JSON array of transactions, which is the on-disk
/// format of the data file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Records a sale at `now` and returns it.
    ///
    /// Returns `None` without touching the ledger when the name is blank,
    /// the quantity is not positive, or the price is not a positive number.
    pub fn add<Tz: TimeZone>(
        &mut self,
        name: &str,
        quantity: i64,
        price: f64,
        now: &DateTime<Tz>,
    ) -> Option<&Transaction> {
        let name = name.trim();
        if name.is_empty() || !price.is_finite() || price <= 0.0 {
            return None;
        }
        let quantity = u32::try_from(quantity).ok().filter(|qty| *qty > 0)?;

        self.transactions.insert(
            0,
            Transaction {
                id: Uuid::new_v4(),
                name: name.to_string(),
                quantity,
                price,
                timestamp: now.timestamp_millis(),
            },
        );
        self.transactions.first()
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        self.transactions.len() != before
    }

    /// Drops repeated ids, keeping the first (newest) record for each.
    /// Returns how many records were dropped.
    pub fn dedup_ids(&mut self) -> usize {
        let before = self.transactions.len();
        let mut seen = HashSet::with_capacity(before);
        self.transactions.retain(|tx| seen.insert(tx.id));
        before - self.transactions.len()
    }

    /// Removes every record stamped at or after `cutoff` (epoch millis) and
    /// returns how many went.
    pub fn clear_up_to(&mut self, cutoff: i64) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.timestamp < cutoff);
        before - self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 8, 15, 30, 0).unwrap()
    }

    #[test]
    fn add_prepends_trimmed_record() {
        let mut ledger = Ledger::default();
        ledger.add("Coffee", 1, 18000.0, &now()).expect("first add");
        let added = ledger.add("  Tea  ", 2, 12000.0, &now()).cloned().expect("second add");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0], added);
        assert_eq!(added.name, "Tea");
        assert_eq!(added.quantity, 2);
        assert_eq!(added.timestamp, now().timestamp_millis());
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let mut ledger = Ledger::default();
        let first = ledger.add("A", 1, 1.0, &now()).map(|tx| tx.id).unwrap();
        let second = ledger.add("A", 1, 1.0, &now()).map(|tx| tx.id).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn add_rejects_invalid_input() {
        let mut ledger = Ledger::default();
        ledger.add("Coffee", 1, 18000.0, &now()).unwrap();
        let snapshot = ledger.clone();

        assert!(ledger.add("   ", 1, 100.0, &now()).is_none());
        assert!(ledger.add("", 1, 100.0, &now()).is_none());
        assert!(ledger.add("Tea", 0, 100.0, &now()).is_none());
        assert!(ledger.add("Tea", -3, 100.0, &now()).is_none());
        assert!(ledger.add("Tea", 1, 0.0, &now()).is_none());
        assert!(ledger.add("Tea", 1, -5.0, &now()).is_none());
        assert!(ledger.add("Tea", 1, f64::NAN, &now()).is_none());
        assert!(ledger.add("Tea", 1, f64::INFINITY, &now()).is_none());
        assert!(ledger.add("Tea", i64::MAX, 100.0, &now()).is_none());

        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut ledger = Ledger::default();
        let id = ledger.add("Coffee", 1, 18000.0, &now()).unwrap().id;
        ledger.add("Tea", 1, 9000.0, &now()).unwrap();

        assert!(ledger.remove(id));
        assert!(!ledger.remove(id));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].name, "Tea");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut ledger = Ledger::default();
        ledger.add("Coffee", 1, 18000.0, &now()).unwrap();
        assert!(!ledger.remove(Uuid::new_v4()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_up_to_keeps_older_records() {
        let mut ledger = Ledger::default();
        let today = now();
        let yesterday = today - Duration::days(1);
        ledger.add("Old", 1, 100.0, &yesterday).unwrap();
        ledger.add("New", 1, 100.0, &today).unwrap();
        ledger.add("Newer", 3, 100.0, &today).unwrap();

        let cutoff = Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap();
        let removed = ledger.clear_up_to(cutoff.timestamp_millis());

        assert_eq!(removed, 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].name, "Old");
    }

    #[test]
    fn dedup_ids_keeps_first_record() {
        let mut ledger = Ledger::default();
        ledger.add("Older", 1, 100.0, &(now() - Duration::hours(1))).unwrap();
        ledger.add("Newer", 1, 200.0, &now()).unwrap();
        ledger.add("Other", 1, 300.0, &now()).unwrap();
        let id = ledger.transactions[1].id;
        ledger.transactions[2].id = id;

        assert_eq!(ledger.dedup_ids(), 1);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[1].name, "Newer");
        assert_eq!(ledger.dedup_ids(), 0);
    }

    #[test]
    fn clear_up_to_includes_cutoff_instant() {
        let mut ledger = Ledger::default();
        let cutoff = Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap();
        ledger.add("Midnight", 1, 100.0, &cutoff).unwrap();
        assert_eq!(ledger.clear_up_to(cutoff.timestamp_millis()), 1);
        assert!(ledger.is_empty());
    }
}
