//! # spotcore-ledger
//!
//! **The balance ledger**: per-(account, asset) `u64` balances with
//! checked credit/debit and staged, all-or-nothing writes.
//!
//! ## Architecture
//!
//! 1. [`Ledger`]: the committed balance map — the source of truth
//! 2. [`LedgerTxn`]: a staged view opened per operation; reads observe
//!    one consistent snapshot, writes become visible only on commit
//!
//! ## Write Flow
//!
//! ```text
//! Ledger::begin() → LedgerTxn::{get, credit, debit}* → LedgerTxn::into_writes()
//!                 → Ledger::commit()     (or drop the txn to discard)
//! ```
//!
//! The ledger knows nothing about orders. The order book drives it
//! through this contract only, which is what lets the balances be reused
//! by other modules.

pub mod ledger;
pub mod txn;

pub use ledger::{BalanceKey, Ledger};
pub use txn::{LedgerTxn, LedgerWrites};
