//! Error types for the spotcore exchange core.
//!
//! All errors use the `SC_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Balance errors
//! - 3xx: Arithmetic errors
//!
//! Every error aborts the enclosing operation with no partial state
//! mutation; the transaction layer surfaces them to its client
//! uninterpreted. Nothing here is retried by the core.

use thiserror::Error;

use crate::{Asset, OrderId};

/// Central error enum for all spotcore operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpotcoreError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The referenced order id has no record in the book.
    #[error("SC_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Cancel or execute attempted on an already-cancelled order.
    #[error("SC_ERR_101: Order already cancelled: {0}")]
    OrderAlreadyCancelled(OrderId),

    /// Cancel or execute attempted on an already-executed order.
    #[error("SC_ERR_102: Order already executed: {0}")]
    OrderAlreadyExecuted(OrderId),

    /// Cancel attempted by an account other than the maker.
    #[error("SC_ERR_103: Sender is not the maker of {0}")]
    NotOrderOwner(OrderId),

    /// Execute attempted by the maker against their own order.
    #[error("SC_ERR_104: Self-trade blocked on {0}: maker cannot execute their own order")]
    SelfTrade(OrderId),

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// A debit would make a balance negative.
    #[error("SC_ERR_200: Insufficient {asset} balance: need {needed}, have {available}")]
    InsufficientBalance {
        asset: Asset,
        needed: u64,
        available: u64,
    },

    // =================================================================
    // Arithmetic Errors (3xx)
    // =================================================================
    /// A balance addition or `amount * price` exceeded `u64::MAX`.
    /// The core never wraps or saturates.
    #[error("SC_ERR_300: Arithmetic overflow in {what}")]
    ArithmeticOverflow { what: &'static str },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SpotcoreError>;
