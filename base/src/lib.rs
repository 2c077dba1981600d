//! # Home Game Ledger
//!
//! Core state machine for a home poker game ledger: buy-in settings,
//! the player roster, chip reconciliation and payout grouping.
//!
//! The front-end forwards every user action as a
//! [`LedgerEvent`](essential::LedgerEvent) into
//! [`Ledger::handle_event`](ledger::Ledger::handle_event), observes
//! notices and persistence flags on the [`Effect`](effect::Effect), and
//! renders from the derived queries.

pub mod effect;
pub mod errors;
pub mod essential;
pub mod ledger;
pub mod payout;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;
