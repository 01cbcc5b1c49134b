//! Order status codes.
//!
//! Statuses are exchanged on the wire and stored in the database as small
//! integers (`0..=6`). The discriminants below are those integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Lifecycle status of a production order.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum OrderStatus {
    /// Order taken in, nothing prepared yet. Initial status.
    Pianificato = 0,
    /// Labels, packaging and product are being prepared.
    InAllestimento = 1,
    /// Released to production. Requires all readiness signals green.
    Lanciato = 2,
    /// Production under way.
    InAvanzamento = 3,
    /// Put on hold with a mandatory reason.
    Sospeso = 4,
    /// Shipped to the customer.
    Evaso = 5,
    /// Invoiced and paid. Terminal.
    Saldato = 6,
}

impl OrderStatus {
    /// Every status, in code order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pianificato,
        OrderStatus::InAllestimento,
        OrderStatus::Lanciato,
        OrderStatus::InAvanzamento,
        OrderStatus::Sospeso,
        OrderStatus::Evaso,
        OrderStatus::Saldato,
    ];

    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Canonical upper-case name, as used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pianificato => "PIANIFICATO",
            Self::InAllestimento => "IN_ALLESTIMENTO",
            Self::Lanciato => "LANCIATO",
            Self::InAvanzamento => "IN_AVANZAMENTO",
            Self::Sospeso => "SOSPESO",
            Self::Evaso => "EVASO",
            Self::Saldato => "SALDATO",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pianificato => "Planned",
            Self::InAllestimento => "In Preparation",
            Self::Lanciato => "Launched",
            Self::InAvanzamento => "In Progress",
            Self::Sospeso => "Suspended",
            Self::Evaso => "Fulfilled",
            Self::Saldato => "Settled",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        self == Self::Saldato
    }
}

impl TryFrom<StatusId> for OrderStatus {
    type Error = String;

    fn try_from(value: StatusId) -> Result<Self, Self::Error> {
        OrderStatus::ALL
            .into_iter()
            .find(|s| s.id() == value)
            .ok_or_else(|| format!("Invalid order status {value}. Must be between 0 and 6"))
    }
}

impl From<OrderStatus> for StatusId {
    fn from(value: OrderStatus) -> Self {
        value as StatusId
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
