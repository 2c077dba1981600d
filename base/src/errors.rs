//! Advisory errors reported by ledger operations.

use thiserror::Error;

/// Operation failures. All of them are advisory: whenever one is
/// returned the ledger state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{name} has a balance of ${balance}, settle up before deleting")]
    DeletionBlocked { name: String, balance: String },

    #[error("no player with id {id}")]
    UnknownPlayer { id: String },

    #[error("{value:?} is not a valid number for {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} can be at most {max}")]
    ValueOutOfRange { field: &'static str, max: u64 },

    #[error("{field} must be a positive number")]
    MustBePositive { field: &'static str },

    #[error("chip value per dollar would round to zero")]
    RateTooSmall,
}
