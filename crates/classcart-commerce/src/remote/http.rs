//! HTTP implementations of the remote service boundaries.

use crate::catalog::RawLesson;
use crate::checkout::{OrderDraft, OrderReceipt};
use crate::ids::{LessonId, OrderId};
use crate::remote::{LessonService, OrderService};
use async_trait::async_trait;
use classcart_data::{FetchClient, FetchError};
use serde::{Deserialize, Serialize};

/// Partial update payload for a lesson's spaces.
#[derive(Debug, Serialize)]
struct SpacesUpdate {
    spaces: i64,
}

/// Wire shape of the order service's acknowledgement.
#[derive(Debug, Deserialize)]
struct InsertedOrder {
    #[serde(rename = "insertedId")]
    inserted_id: String,
}

/// Lesson service over HTTP: `GET /api/lessons`, `PUT /api/lessons/{id}`.
pub struct HttpLessonService {
    client: FetchClient,
}

impl HttpLessonService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: FetchClient::new().with_base_url(base_url),
        }
    }

    /// Use a preconfigured client (custom timeout or headers).
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LessonService for HttpLessonService {
    async fn fetch_lessons(&self) -> Result<Vec<RawLesson>, FetchError> {
        self.client
            .get("/api/lessons")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn update_spaces(&self, lesson_id: &LessonId, spaces: i64) -> Result<(), FetchError> {
        self.client
            .put(format!("/api/lessons/{}", lesson_id))
            .json(&SpacesUpdate { spaces })?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Order service over HTTP: `POST /api/orders`.
pub struct HttpOrderService {
    client: FetchClient,
}

impl HttpOrderService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: FetchClient::new().with_base_url(base_url),
        }
    }

    /// Use a preconfigured client (custom timeout or headers).
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, FetchError> {
        let response = self
            .client
            .post("/api/orders")
            .json(draft)?
            .send()
            .await?
            .error_for_status()?;

        let inserted: InsertedOrder = response.json()?;
        Ok(OrderReceipt {
            order_id: OrderId::new(inserted.inserted_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_update_wire_shape() {
        let body = serde_json::to_string(&SpacesUpdate { spaces: 3 }).unwrap();
        assert_eq!(body, r#"{"spaces":3}"#);
    }

    #[test]
    fn test_inserted_order_wire_shape() {
        let inserted: InsertedOrder =
            serde_json::from_str(r#"{"insertedId": "ord-abc123"}"#).unwrap();
        assert_eq!(inserted.inserted_id, "ord-abc123");
    }
}
