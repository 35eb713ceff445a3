//! Order payloads and the persisted purchase record.

use crate::error::CommerceError;
use crate::ids::{LessonId, OrderId};
use crate::money::Money;
use classcart_cache::Store;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One order line: all reservations of a single lesson collapsed together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedLine {
    pub lesson_id: LessonId,
    /// Subject at reservation time (denormalized for display).
    pub subject: String,
    /// Price per booking at reservation time.
    pub unit_price: Money,
    /// Number of reservations collapsed into this line.
    pub quantity: i64,
}

impl AggregatedLine {
    /// `unit_price * quantity`, checked.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The payload submitted to the remote order service. Immutable once
/// submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// Client-generated key the order service deduplicates resubmissions on.
    pub idempotency_key: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub lines: Vec<AggregatedLine>,
    pub total: Money,
}

/// Acknowledgement returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
}

/// One line of the persisted purchase record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLine {
    pub subject: String,
    pub price: Money,
    pub quantity: i64,
}

/// The last completed order, persisted for display after navigation.
///
/// Never mutated; the next successful checkout replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    pub lines: Vec<PurchaseLine>,
    pub total: Money,
    pub order_id: OrderId,
}

impl PurchaseRecord {
    /// Build a record from the aggregated order lines.
    pub fn from_lines(lines: &[AggregatedLine], total: Money, order_id: OrderId) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| PurchaseLine {
                    subject: l.subject.clone(),
                    price: l.unit_price,
                    quantity: l.quantity,
                })
                .collect(),
            total,
            order_id,
        }
    }
}

/// Persists the last-purchase snapshot.
pub struct PurchaseStore {
    store: Store,
}

impl PurchaseStore {
    const KEY: &'static str = "purchase:last";

    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open over the default key-value store.
    pub fn open_default() -> Result<Self, CommerceError> {
        Ok(Self::new(Store::open_default()?))
    }

    /// Replace the stored record.
    pub fn save(&self, record: &PurchaseRecord) -> Result<(), CommerceError> {
        self.store.set(Self::KEY, record)?;
        Ok(())
    }

    /// The last completed purchase, if any. An absent, corrupt, or unreadable
    /// snapshot degrades to `None` — startup never fails on it.
    pub fn load(&self) -> Option<PurchaseRecord> {
        match self.store.get(Self::KEY) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "could not read last-purchase snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sample_record() -> PurchaseRecord {
        PurchaseRecord {
            lines: vec![PurchaseLine {
                subject: "Science".to_string(),
                price: Money::new(3000, Currency::USD),
                quantity: 2,
            }],
            total: Money::new(6000, Currency::USD),
            order_id: OrderId::new("ord-1"),
        }
    }

    #[test]
    fn test_line_total() {
        let line = AggregatedLine {
            lesson_id: LessonId::new("sci-101"),
            subject: "Science".to_string(),
            unit_price: Money::new(3000, Currency::USD),
            quantity: 2,
        };
        assert_eq!(line.line_total().unwrap(), Money::new(6000, Currency::USD));
    }

    #[test]
    fn test_line_total_overflow() {
        let line = AggregatedLine {
            lesson_id: LessonId::new("sci-101"),
            subject: "Science".to_string(),
            unit_price: Money::new(i64::MAX, Currency::USD),
            quantity: 2,
        };
        assert!(matches!(
            line.line_total().unwrap_err(),
            CommerceError::Overflow
        ));
    }

    #[test]
    fn test_record_from_lines() {
        let lines = vec![AggregatedLine {
            lesson_id: LessonId::new("sci-101"),
            subject: "Science".to_string(),
            unit_price: Money::new(3000, Currency::USD),
            quantity: 2,
        }];
        let record = PurchaseRecord::from_lines(
            &lines,
            Money::new(6000, Currency::USD),
            OrderId::new("ord-1"),
        );
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_purchase_store_round_trip() {
        let purchases = PurchaseStore::open_default().unwrap();
        assert!(purchases.load().is_none());

        purchases.save(&sample_record()).unwrap();
        assert_eq!(purchases.load(), Some(sample_record()));
    }
}
