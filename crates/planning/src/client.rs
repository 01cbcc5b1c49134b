//! reqwest-based [`Rescheduler`] talking to the planning service over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{RescheduleRequest, RescheduleResponse, Rescheduler};

/// Errors from the planning service transport.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// The HTTP request itself failed (connect, DNS, timeout, undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The planning service returned a non-2xx status code.
    #[error("Planning service error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the planning service.
#[derive(Clone)]
pub struct PlanningClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlanningClient {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `http://planner:8080/api/planning`). Every request is bounded
    /// by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PlanningError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    /// Return the response unchanged on 2xx, otherwise an
    /// [`PlanningError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PlanningError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlanningError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Rescheduler for PlanningClient {
    async fn force_reschedule(
        &self,
        order_uuid: Uuid,
    ) -> Result<RescheduleResponse, PlanningError> {
        let response = self
            .client
            .post(format!("{}/force-reschedule", self.base_url))
            .json(&RescheduleRequest { order_uuid })
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let reply: RescheduleResponse = response.json().await?;

        tracing::info!(
            %order_uuid,
            error_code = reply.error_code,
            "Planning service answered force-reschedule",
        );
        Ok(reply)
    }
}
