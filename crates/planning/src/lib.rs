//! Client for the external production planning service.
//!
//! The only operation exposed is a forced re-plan of a single order. The
//! service owns all scheduling state; this crate just forwards the request
//! and hands back whatever the service answered.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use client::{PlanningClient, PlanningError};

/// Body sent to `POST {base_url}/force-reschedule`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RescheduleRequest {
    pub order_uuid: Uuid,
}

/// Reply of the planning service.
///
/// `error_code == 0` means the re-plan was accepted. Any other value is the
/// service's own failure code and is relayed to the caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RescheduleResponse {
    pub error_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RescheduleResponse {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

/// Something that can ask the planning service to re-plan an order.
#[async_trait]
pub trait Rescheduler: Send + Sync {
    async fn force_reschedule(&self, order_uuid: Uuid)
        -> Result<RescheduleResponse, PlanningError>;
}
