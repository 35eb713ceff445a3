//! Lesson booking domain types and checkout logic for classcart.
//!
//! This crate is the storefront core: an inventory-aware cart over a locally
//! held lesson catalog, and a checkout saga that submits orders and
//! reconciles capacity with the authoritative remote store.
//!
//! - **Catalog**: lessons with finite remaining capacity, normalized from a
//!   tolerant wire shape and replaced wholesale on every refresh
//! - **Cart**: ordered reservation snapshots that optimistically decrement
//!   catalog capacity
//! - **Checkout**: validate → submit order → propagate capacity × N →
//!   reconcile, with per-stage failure reporting and idempotent retry
//! - **Remote**: the lesson/order service boundaries and their HTTP
//!   implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use classcart_commerce::prelude::*;
//!
//! let mut state = StorefrontState::new();
//! let lessons = HttpLessonService::new("http://localhost:3000");
//! state.catalog.load(&lessons).await?;
//!
//! state.add_to_cart(&LessonId::new("sci-101"))?;
//!
//! let orders = HttpOrderService::new("http://localhost:3000");
//! let mut coordinator =
//!     CheckoutCoordinator::new(lessons, orders, PurchaseStore::open_default()?);
//!
//! let buyer = BuyerInfo::new("Jane Doe", "0123456789");
//! let receipt = coordinator
//!     .checkout(&buyer, &mut state.cart, &mut state.catalog)
//!     .await?;
//! println!("order {}", receipt.order_id);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod remote;
pub mod state;

pub use error::{CommerceError, SyncFailure};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, SyncFailure};
    pub use crate::ids::{LessonId, OrderId, UserId};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Lesson, LessonCatalog, RawLesson};

    // Cart
    pub use crate::cart::{Cart, Reservation};

    // Checkout
    pub use crate::checkout::{
        AggregatedLine, BuyerInfo, CheckoutCoordinator, CheckoutReceipt, CheckoutStage,
        OrderDraft, OrderReceipt, PurchaseLine, PurchaseRecord, PurchaseStore,
    };

    // Remote services
    pub use crate::remote::{
        HttpLessonService, HttpOrderService, LessonService, OrderService,
    };

    // State container
    pub use crate::state::StorefrontState;
}
