//! Production order entity and input DTOs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::order_status::OrderStatus;
use crate::progress::{progress_percent, validate_quantity};
use crate::readiness::{ReadinessOutcome, ReadinessSignals};
use crate::types::{DbId, Timestamp, Version};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of the operator-facing order code.
pub const MAX_CODE_LENGTH: usize = 64;

/// Maximum length of free-text fields (customer, product).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of order notes.
pub const MAX_NOTES_LENGTH: usize = 10_000;

/// Maximum length of a suspension reason.
pub const MAX_REASON_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A production order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: DbId,
    pub uuid: Uuid,
    pub code: String,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub quantity: Decimal,
    pub worked_quantity: Decimal,
    /// Suspension reason. Set only while the order is SOSPESO.
    pub motivazione: Option<String>,
    pub signals: ReadinessSignals,
    pub version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    pub fn progress_percent(&self) -> Decimal {
        progress_percent(self.quantity, self.worked_quantity)
    }

    pub fn readiness_outcome(&self) -> ReadinessOutcome {
        ReadinessOutcome::evaluate(&self.signals, self.status)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for order intake. Status and signals are not accepted: every order
/// starts PIANIFICATO with all signals red.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub code: String,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub quantity: Decimal,
    /// Defaults to zero if omitted.
    pub worked_quantity: Option<Decimal>,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.code)?;
        validate_optional_len("customer", self.customer.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_len("product", self.product.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_len("notes", self.notes.as_deref(), MAX_NOTES_LENGTH)?;
        validate_quantity("quantity", self.quantity)?;
        if let Some(worked) = self.worked_quantity {
            validate_quantity("worked_quantity", worked)?;
        }
        Ok(())
    }
}

/// DTO for editing order details. All fields are optional; status, reason
/// and readiness signals have their own operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub code: Option<String>,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub quantity: Option<Decimal>,
    pub worked_quantity: Option<Decimal>,
}

impl UpdateOrder {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(code) = &self.code {
            validate_code(code)?;
        }
        validate_optional_len("customer", self.customer.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_len("product", self.product.as_deref(), MAX_NAME_LENGTH)?;
        validate_optional_len("notes", self.notes.as_deref(), MAX_NOTES_LENGTH)?;
        if let Some(quantity) = self.quantity {
            validate_quantity("quantity", quantity)?;
        }
        if let Some(worked) = self.worked_quantity {
            validate_quantity("worked_quantity", worked)?;
        }
        Ok(())
    }
}

/// Filters accepted by order listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |s| s == order.status)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate the order code: non-blank and within [`MAX_CODE_LENGTH`].
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        return Err(CoreError::Validation("code must not be empty".to_string()));
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "code exceeds maximum length of {MAX_CODE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a suspension reason length. Blank reasons are handled by the
/// transition rules.
pub fn validate_reason_length(reason: &str) -> Result<(), CoreError> {
    if reason.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "motivazione exceeds maximum length of {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_optional_len(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(code: &str, quantity: i64) -> NewOrder {
        NewOrder {
            code: code.to_string(),
            customer: None,
            product: None,
            notes: None,
            due_date: None,
            quantity: Decimal::from(quantity),
            worked_quantity: None,
        }
    }

    #[test]
    fn valid_intake_passes() {
        assert!(intake("ORD-001", 100).validate().is_ok());
    }

    #[test]
    fn blank_code_rejected() {
        assert!(intake("  ", 100).validate().is_err());
    }

    #[test]
    fn overlong_code_rejected() {
        let code = "x".repeat(MAX_CODE_LENGTH + 1);
        assert!(intake(&code, 1).validate().is_err());
    }

    #[test]
    fn negative_quantity_rejected() {
        assert!(intake("ORD-002", -5).validate().is_err());

        let mut input = intake("ORD-003", 5);
        input.worked_quantity = Some(Decimal::from(-1));
        assert!(input.validate().is_err());
    }

    #[test]
    fn worked_above_quantity_is_accepted() {
        let mut input = intake("ORD-004", 10);
        input.worked_quantity = Some(Decimal::from(12));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        assert!(UpdateOrder::default().validate().is_ok());

        let update = UpdateOrder {
            code: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn reason_length_limit() {
        assert!(validate_reason_length("line down").is_ok());
        assert!(validate_reason_length(&"r".repeat(MAX_REASON_LENGTH + 1)).is_err());
    }
}
