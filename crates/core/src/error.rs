use uuid::Uuid;

/// Domain-level error shared by the store, the lifecycle controller and the
/// HTTP layer. Messages are user-facing and passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the "order does not exist" case.
    pub fn order_not_found(id: Uuid) -> Self {
        CoreError::NotFound { entity: "Order", id }
    }
}
