//! The checkout saga.
//!
//! Checkout is a short saga rather than a transaction: validate, submit the
//! order, propagate capacity for each line, reconcile the catalog, persist
//! the purchase record. Every failure names the stage it interrupted and
//! leaves the cart and in-memory capacity exactly as they stood after
//! aggregation.

use crate::cart::Cart;
use crate::catalog::LessonCatalog;
use crate::checkout::{AggregatedLine, BuyerInfo, OrderDraft, PurchaseRecord, PurchaseStore};
use crate::error::{CommerceError, SyncFailure};
use crate::ids::{generate_id, LessonId, OrderId};
use crate::money::Money;
use crate::remote::{LessonService, OrderService};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Stages of the checkout saga, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStage {
    /// Buyer and cart validation; no network activity.
    Validate,
    /// Order submission to the remote order service.
    SubmitOrder,
    /// Per-line capacity writes to the remote lesson service.
    PropagateCapacity,
    /// Catalog refresh against the authoritative store.
    Reconcile,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Validate => "validate",
            CheckoutStage::SubmitOrder => "submit_order",
            CheckoutStage::PropagateCapacity => "propagate_capacity",
            CheckoutStage::Reconcile => "reconcile",
        }
    }

    /// The stage a checkout error corresponds to. `None` for errors that do
    /// not arise from the saga.
    pub fn of(error: &CommerceError) -> Option<CheckoutStage> {
        match error {
            CommerceError::InvalidBuyerName
            | CommerceError::InvalidPhone
            | CommerceError::EmptyCart
            | CommerceError::Overflow => Some(CheckoutStage::Validate),
            CommerceError::OrderSubmissionFailed(_) => Some(CheckoutStage::SubmitOrder),
            CommerceError::PartialCheckoutFailure { .. } => {
                Some(CheckoutStage::PropagateCapacity)
            }
            CommerceError::CatalogUnavailable(_) => Some(CheckoutStage::Reconcile),
            _ => None,
        }
    }
}

/// A checkout attempt in flight.
///
/// Retained across failed attempts so a retry reuses the same idempotency key
/// and never resubmits an order that was already recorded. The lines are the
/// aggregation captured when the attempt was first made; later cart edits do
/// not change what the retry completes.
#[derive(Debug, Clone)]
struct PendingCheckout {
    idempotency_key: String,
    lines: Vec<AggregatedLine>,
    total: Money,
    order_id: Option<OrderId>,
    /// Lessons whose capacity write has not yet succeeded.
    unsynced: Vec<LessonId>,
}

/// Outcome of a completed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub record: PurchaseRecord,
}

/// Aggregates the cart, submits the order, propagates capacity, and
/// reconciles local state with the authoritative result.
///
/// One coordinator serializes its own checkouts (`checkout` takes `&mut
/// self`); a second checkout cannot start until the first resolves.
pub struct CheckoutCoordinator<L, O> {
    lessons: L,
    orders: O,
    purchases: PurchaseStore,
    pending: Option<PendingCheckout>,
}

impl<L, O> CheckoutCoordinator<L, O>
where
    L: LessonService,
    O: OrderService,
{
    pub fn new(lessons: L, orders: O, purchases: PurchaseStore) -> Self {
        Self {
            lessons,
            orders,
            purchases,
            pending: None,
        }
    }

    /// Whether an earlier attempt recorded an order that has not completed
    /// yet. While this is true, `checkout` finishes that order instead of
    /// submitting a new one.
    pub fn has_recorded_order(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.order_id.is_some())
    }

    /// The last completed purchase, restored from the snapshot store.
    pub fn last_purchase(&self) -> Option<PurchaseRecord> {
        self.purchases.load()
    }

    /// Run the checkout saga.
    ///
    /// On full success the cart is emptied without restoring spaces (they are
    /// now consumed), the catalog reflects server-confirmed capacity, and the
    /// purchase record is persisted. On any failure the cart and the locally
    /// held capacity stay exactly as they stood; the returned error names the
    /// failed stage (see [`CheckoutStage::of`]).
    pub async fn checkout(
        &mut self,
        buyer: &BuyerInfo,
        cart: &mut Cart,
        catalog: &mut LessonCatalog,
    ) -> Result<CheckoutReceipt, CommerceError> {
        // Validation runs before any network activity, including on retries.
        buyer.validate()?;
        if self.pending.is_none() && cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let mut pending = match self.pending.take() {
            Some(p) => {
                debug!(key = %p.idempotency_key, "resuming checkout attempt");
                p
            }
            None => {
                let lines = cart.aggregate();
                let total = order_total(&lines)?;
                let unsynced = lines.iter().map(|l| l.lesson_id.clone()).collect();
                PendingCheckout {
                    idempotency_key: generate_id(),
                    lines,
                    total,
                    order_id: None,
                    unsynced,
                }
            }
        };

        // Order submission. Skipped when a previous attempt already recorded
        // the order.
        let order_id = match pending.order_id.clone() {
            Some(id) => id,
            None => {
                let draft = OrderDraft {
                    idempotency_key: pending.idempotency_key.clone(),
                    buyer_name: buyer.name().to_string(),
                    buyer_phone: buyer.phone().to_string(),
                    lines: pending.lines.clone(),
                    total: pending.total,
                };
                match self.orders.submit_order(&draft).await {
                    Ok(receipt) => {
                        info!(order_id = %receipt.order_id, "order recorded");
                        pending.order_id = Some(receipt.order_id.clone());
                        receipt.order_id
                    }
                    Err(e) => {
                        warn!(error = %e, "order submission failed");
                        // Keep the attempt so a retry reuses the key. The
                        // local capacity decrements are a soft hold; the next
                        // successful refresh reconciles them away.
                        self.pending = Some(pending);
                        return Err(CommerceError::OrderSubmissionFailed(e));
                    }
                }
            }
        };

        // Capacity propagation: write the currently-held local spaces value
        // for every line that has not synced yet. Writes are independent and
        // run concurrently; the saga waits for all of them.
        let targets: Vec<(LessonId, i64)> = pending
            .unsynced
            .iter()
            .map(|id| (id.clone(), catalog.spaces_for(id)))
            .collect();
        let writes: Vec<_> = targets
            .iter()
            .map(|(id, spaces)| self.lessons.update_spaces(id, *spaces))
            .collect();
        let results = join_all(writes).await;

        // Lines synced by an earlier attempt stay counted as synced.
        let mut synced: Vec<LessonId> = pending
            .lines
            .iter()
            .map(|l| l.lesson_id.clone())
            .filter(|id| !pending.unsynced.contains(id))
            .collect();
        let mut failed: Vec<SyncFailure> = Vec::new();
        for ((lesson_id, _), result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => synced.push(lesson_id),
                Err(e) => failed.push(SyncFailure {
                    lesson_id,
                    reason: e.to_string(),
                }),
            }
        }

        if !failed.is_empty() {
            warn!(
                order_id = %order_id,
                failed = failed.len(),
                "capacity propagation incomplete"
            );
            pending.unsynced = failed.iter().map(|f| f.lesson_id.clone()).collect();
            self.pending = Some(pending);
            return Err(CommerceError::PartialCheckoutFailure {
                order_id,
                synced,
                failed,
            });
        }
        pending.unsynced.clear();

        // Reconcile: pull authoritative capacity, guarding against concurrent
        // buyers racing on the same lessons.
        if let Err(e) = catalog.refresh(&self.lessons).await {
            self.pending = Some(pending);
            return Err(e);
        }

        // Completion. A failed snapshot write must not turn an already
        // authoritative order into an error.
        let record = PurchaseRecord::from_lines(&pending.lines, pending.total, order_id.clone());
        if let Err(e) = self.purchases.save(&record) {
            warn!(error = %e, "could not persist purchase record");
        }
        cart.clear_after_checkout();
        info!(order_id = %order_id, lines = record.lines.len(), "checkout complete");
        Ok(CheckoutReceipt { order_id, record })
    }
}

/// Σ unit_price × quantity over the aggregated lines, checked.
fn order_total(lines: &[AggregatedLine]) -> Result<Money, CommerceError> {
    let currency = lines
        .first()
        .map(|l| l.unit_price.currency)
        .unwrap_or_default();
    let mut total = Money::zero(currency);
    for line in lines {
        let line_total = line.line_total()?;
        total = total.try_add(&line_total).ok_or(CommerceError::Overflow)?;
    }
    Ok(total)
}
