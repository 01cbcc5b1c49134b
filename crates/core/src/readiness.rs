//! Readiness signals ("semaforo") for production orders.
//!
//! Each order carries three independent tri-state gates: labels
//! (`etichette`), packaging and product (`prodotto`). The triple is a value
//! object with no optional fields: orders are created all red, and a missing
//! signal is never read as ready.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::CoreError;
use crate::order_status::OrderStatus;

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// A single tri-state readiness gate.
#[repr(i16)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Signal {
    #[default]
    Red = 0,
    Yellow = 1,
    Green = 2,
}

impl Signal {
    /// Return the stored integer value.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Parse a raw client value for the named field.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn parse_field(field: &str, value: i64) -> Result<Self, CoreError> {
        match value {
            0 => Ok(Self::Red),
            1 => Ok(Self::Yellow),
            2 => Ok(Self::Green),
            other => Err(out_of_range(field, other)),
        }
    }

    /// Parse a JSON number for the named field.
    ///
    /// Fractions and integers beyond `i64` are rejected like any other
    /// out-of-range value.
    pub fn parse_number(field: &str, value: &Number) -> Result<Self, CoreError> {
        match value.as_i64() {
            Some(v) => Self::parse_field(field, v),
            None => Err(out_of_range(field, value)),
        }
    }
}

fn out_of_range(field: &str, value: impl std::fmt::Display) -> CoreError {
    CoreError::Validation(format!(
        "{field} must be 0 (red), 1 (yellow) or 2 (green), got {value}"
    ))
}

impl TryFrom<i16> for Signal {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Signal::parse_field("signal", i64::from(value)).map_err(|e| e.to_string())
    }
}

impl From<Signal> for i16 {
    fn from(value: Signal) -> Self {
        value as i16
    }
}

// ---------------------------------------------------------------------------
// Triple
// ---------------------------------------------------------------------------

/// The three readiness signals of one order, replaced wholesale on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSignals {
    pub etichette: Signal,
    pub packaging: Signal,
    pub prodotto: Signal,
}

/// Unvalidated triple as submitted by a client.
///
/// Fields are arbitrary JSON numbers so that any out-of-range value reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignals {
    pub etichette: Number,
    pub packaging: Number,
    pub prodotto: Number,
}

impl ReadinessSignals {
    /// All gates red. The state of every new order.
    pub const ALL_RED: Self = Self {
        etichette: Signal::Red,
        packaging: Signal::Red,
        prodotto: Signal::Red,
    };

    pub fn new(etichette: Signal, packaging: Signal, prodotto: Signal) -> Self {
        Self {
            etichette,
            packaging,
            prodotto,
        }
    }

    /// Validate a client-submitted triple.
    pub fn from_raw(raw: &RawSignals) -> Result<Self, CoreError> {
        Ok(Self {
            etichette: Signal::parse_number("etichette", &raw.etichette)?,
            packaging: Signal::parse_number("packaging", &raw.packaging)?,
            prodotto: Signal::parse_number("prodotto", &raw.prodotto)?,
        })
    }

    /// Build from stored column values.
    pub fn from_columns(etichette: i16, packaging: i16, prodotto: i16) -> Result<Self, CoreError> {
        Ok(Self {
            etichette: Signal::parse_field("etichette", i64::from(etichette))?,
            packaging: Signal::parse_field("packaging", i64::from(packaging))?,
            prodotto: Signal::parse_field("prodotto", i64::from(prodotto))?,
        })
    }

    /// The sole predicate consulted to allow the launch transition.
    pub fn all_green(&self) -> bool {
        self.green_count() == 3
    }

    /// Number of gates currently green.
    pub fn green_count(&self) -> usize {
        [self.etichette, self.packaging, self.prodotto]
            .into_iter()
            .filter(|s| *s == Signal::Green)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Outcome of a save
// ---------------------------------------------------------------------------

/// Derived flags returned after persisting a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessOutcome {
    pub all_green: bool,
    /// True only when all green and the order sits in the single status from
    /// which LANCIATO is reachable. Callers use it to offer the launch; the
    /// store itself never changes status.
    pub can_transition_to_launched: bool,
}

impl ReadinessOutcome {
    pub fn evaluate(signals: &ReadinessSignals, status: OrderStatus) -> Self {
        let all_green = signals.all_green();
        Self {
            all_green,
            can_transition_to_launched: all_green && status == OrderStatus::InAllestimento,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
