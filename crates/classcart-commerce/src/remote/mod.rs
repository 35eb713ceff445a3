//! Remote service boundaries.
//!
//! The storefront owns no data: lessons and orders live behind these traits.
//! Network calls are the only suspension points in the system; every
//! implementation failure surfaces as a [`FetchError`] and is mapped to a
//! stage-specific commerce error by the caller.

mod http;

pub use http::{HttpLessonService, HttpOrderService};

use crate::catalog::RawLesson;
use crate::checkout::{OrderDraft, OrderReceipt};
use crate::ids::LessonId;
use async_trait::async_trait;
use classcart_data::FetchError;
use std::sync::Arc;

/// Read/write boundary to the remote lesson service.
#[async_trait]
pub trait LessonService: Send + Sync {
    /// Fetch the full lesson collection, tolerant wire shape included.
    async fn fetch_lessons(&self) -> Result<Vec<RawLesson>, FetchError>;

    /// Partially update a lesson's remaining spaces by identifier.
    async fn update_spaces(&self, lesson_id: &LessonId, spaces: i64) -> Result<(), FetchError>;
}

/// Shared handles delegate to the inner service, so a coordinator can be
/// instantiated with an `Arc`-wrapped implementation while callers retain a
/// handle to the same instance.
#[async_trait]
impl<T: LessonService + ?Sized> LessonService for Arc<T> {
    async fn fetch_lessons(&self) -> Result<Vec<RawLesson>, FetchError> {
        (**self).fetch_lessons().await
    }

    async fn update_spaces(&self, lesson_id: &LessonId, spaces: i64) -> Result<(), FetchError> {
        (**self).update_spaces(lesson_id, spaces).await
    }
}

/// Submission boundary to the remote order service.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Record an order, returning the created-order identifier.
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, FetchError>;
}

#[async_trait]
impl<T: OrderService + ?Sized> OrderService for Arc<T> {
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, FetchError> {
        (**self).submit_order(draft).await
    }
}
