//! # spotcore-book
//!
//! **The order-book state machine**: place, cancel, and execute orders
//! with atomic escrow settlement against the ledger.
//!
//! ## Architecture
//!
//! 1. [`OrderBook`]: owns the order store and the sequential id counter
//! 2. [`escrow`]: the settlement arithmetic — lock, refund, swap — shared
//!    by all three operations so the buy/sell asset-selection branch
//!    exists in exactly one place
//!
//! ## Operation Flow
//!
//! ```text
//! caller → OrderBook::place_order ─┐
//!        → OrderBook::cancel_order ├─▶ LedgerTxn (staged) ─▶ Ledger::commit
//!        → OrderBook::execute_order┘        │
//!                                   any check fails: txn dropped, nothing applied
//! ```
//!
//! This book does **not** match continuously: an order settles only when
//! a counterparty executes it directly, in full, at the maker's price.

pub mod book;
pub mod escrow;

pub use book::OrderBook;
