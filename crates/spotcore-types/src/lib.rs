//! # spotcore-types
//!
//! Shared types and errors for the **spotcore** exchange core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`OrderId`]
//! - **Asset model**: [`Asset`], [`Side`]
//! - **Order model**: [`Order`], [`OrderStatus`]
//! - **Errors**: [`SpotcoreError`] with `SC_ERR_` prefix codes

pub mod asset;
pub mod error;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use spotcore_types::{AccountId, Order, Side, ...};

pub use asset::*;
pub use error::*;
pub use ids::*;
pub use order::*;
