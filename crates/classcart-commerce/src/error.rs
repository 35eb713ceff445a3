//! Commerce error types.

use crate::ids::{LessonId, OrderId};
use classcart_data::FetchError;
use thiserror::Error;

/// A capacity write that did not reach the remote lesson service.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    /// The lesson whose spaces value is unsynced.
    pub lesson_id: LessonId,
    /// Why the write failed.
    pub reason: String,
}

/// Errors that can occur in storefront operations.
///
/// None of these are fatal: validation and capacity errors are
/// user-correctable, transport errors leave local state as it stood and name
/// the stage they interrupted.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Lesson not present in the local catalog.
    #[error("Lesson not found: {0}")]
    LessonNotFound(LessonId),

    /// The lesson is sold out; no reservation was added.
    #[error("No spaces left for lesson {0}")]
    NoCapacity(LessonId),

    /// Cart removal index out of range.
    #[error("Cart index {index} out of range ({len} reservations held)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Catalog load or refresh failed; the previous catalog state is kept.
    #[error("Lesson catalog unavailable")]
    CatalogUnavailable(#[source] FetchError),

    /// Buyer name rejected: letters and whitespace only, at least 2 characters.
    #[error("Invalid buyer name: letters only, minimum 2 characters")]
    InvalidBuyerName,

    /// Buyer phone rejected: digits only, at least 7 of them.
    #[error("Invalid buyer phone: digits only, minimum 7 digits")]
    InvalidPhone,

    /// Checkout attempted with no reservations in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order was not recorded; the whole checkout is safe to retry.
    #[error("Order submission failed")]
    OrderSubmissionFailed(#[source] FetchError),

    /// The order WAS recorded but some capacity writes failed. Not safely
    /// retryable as a whole; the coordinator retries only the listed lessons.
    #[error("Order {order_id} recorded but {} capacity write(s) failed", .failed.len())]
    PartialCheckoutFailure {
        /// Identifier of the order already recorded upstream.
        order_id: OrderId,
        /// Lessons whose capacity reached the remote store.
        synced: Vec<LessonId>,
        /// Lessons whose capacity did not, with reasons.
        failed: Vec<SyncFailure>,
    },

    /// Arithmetic overflow in money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Snapshot storage error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<classcart_cache::StoreError> for CommerceError {
    fn from(e: classcart_cache::StoreError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_display_counts_failures() {
        let err = CommerceError::PartialCheckoutFailure {
            order_id: OrderId::new("ord-1"),
            synced: vec![LessonId::new("sci-101")],
            failed: vec![
                SyncFailure {
                    lesson_id: LessonId::new("math-201"),
                    reason: "HTTP 500".to_string(),
                },
                SyncFailure {
                    lesson_id: LessonId::new("art-301"),
                    reason: "timed out".to_string(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("ord-1"));
        assert!(message.contains("2 capacity write(s)"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = CommerceError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(err.to_string(), "Cart index 3 out of range (1 reservations held)");
    }
}
