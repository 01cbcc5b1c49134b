//! Shared response envelope types for API handlers.
//!
//! Resource endpoints answer with a `{ "data": ... }` envelope. The lifecycle
//! endpoints keep the `{ "success": true, ... }` shape their clients expect.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
