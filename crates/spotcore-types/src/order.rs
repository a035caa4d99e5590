//! The order record and its lifecycle state machine.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────┐  execute   ┌──────────┐
//!   │ OPEN ├───────────▶│ EXECUTED │
//!   └──┬───┘            └──────────┘
//!      │ cancel
//!      ▼
//!   ┌───────────┐
//!   │ CANCELLED │
//!   └───────────┘
//! ```
//!
//! `Open` is the only non-terminal state. Transitions are **monotonic**:
//! once an order is cancelled or executed it accepts no further mutation,
//! which is what makes every order single-use (no double refund, no
//! double settlement).

use serde::{Deserialize, Serialize};

use crate::{AccountId, OrderId, Result, Side, SpotcoreError};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Resting in the book; escrow is held. The only state that accepts
    /// cancel or execute.
    Open,
    /// Cancelled by the maker; escrow was refunded. **Terminal.**
    Cancelled,
    /// Settled against a counterparty. **Terminal.**
    Executed,
}

impl OrderStatus {
    /// Can an order in this status transition to the given target?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Cancelled | Self::Executed)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Executed => write!(f, "EXECUTED"),
        }
    }
}

/// A single resting order.
///
/// Everything except `status` is immutable once the order is stored.
/// `amount` is the bitcoin quantity; `price` is dollars per bitcoin, so
/// the dollar leg of the trade is always `amount * price` (checked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    /// Bitcoin quantity this order trades.
    pub amount: u64,
    /// Dollars per unit of bitcoin.
    pub price: u64,
    /// The account that placed the order and holds the escrow claim.
    pub maker: AccountId,
    pub status: OrderStatus,
}

impl Order {
    /// Construct a new open order.
    #[must_use]
    pub fn new(id: OrderId, side: Side, amount: u64, price: u64, maker: AccountId) -> Self {
        Self {
            id,
            side,
            amount,
            price,
            maker,
            status: OrderStatus::Open,
        }
    }

    /// The dollar leg of this order: `amount * price`.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the product exceeds `u64::MAX`.
    /// The core never wraps or saturates.
    pub fn quote_value(&self) -> Result<u64> {
        self.amount
            .checked_mul(self.price)
            .ok_or(SpotcoreError::ArithmeticOverflow {
                what: "order quote value (amount * price)",
            })
    }

    /// The quantity of [`Side::escrow_asset`] the maker locked at
    /// placement: the dollar leg for a buy, the bitcoin leg for a sell.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the dollar leg overflows.
    pub fn escrow_value(&self) -> Result<u64> {
        match self.side {
            Side::Buy => self.quote_value(),
            Side::Sell => Ok(self.amount),
        }
    }

    /// The quantity of [`Side::receive_asset`] the counterparty must
    /// supply at execution — the mirror of [`Order::escrow_value`].
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the dollar leg overflows.
    pub fn receive_value(&self) -> Result<u64> {
        match self.side {
            Side::Buy => Ok(self.amount),
            Side::Sell => self.quote_value(),
        }
    }

    /// Whether this order still accepts cancel/execute.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Fail with the matching terminal-state error unless the order is
    /// still open.
    ///
    /// # Errors
    /// `OrderAlreadyCancelled` / `OrderAlreadyExecuted` on terminal
    /// status.
    pub fn ensure_open(&self) -> Result<()> {
        match self.status {
            OrderStatus::Open => Ok(()),
            OrderStatus::Cancelled => Err(SpotcoreError::OrderAlreadyCancelled(self.id)),
            OrderStatus::Executed => Err(SpotcoreError::OrderAlreadyExecuted(self.id)),
        }
    }

    /// Transition to CANCELLED.
    ///
    /// # Errors
    /// Returns the matching terminal-state error if the order is not open.
    pub fn mark_cancelled(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Transition to EXECUTED.
    ///
    /// # Errors
    /// Returns the matching terminal-state error if the order is not open.
    pub fn mark_executed(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.status = OrderStatus::Executed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(side: Side, amount: u64, price: u64) -> Order {
        Order::new(OrderId(0), side, amount, price, AccountId([1u8; 32]))
    }

    #[test]
    fn status_transitions_are_monotonic() {
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Executed));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Executed));
        assert!(!OrderStatus::Executed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Open));
    }

    #[test]
    fn quote_value_multiplies() {
        let o = order(Side::Sell, 2, 45_000);
        assert_eq!(o.quote_value().unwrap(), 90_000);
    }

    #[test]
    fn quote_value_overflow_fails() {
        let o = order(Side::Buy, u64::MAX, 2);
        assert!(matches!(
            o.quote_value().unwrap_err(),
            SpotcoreError::ArithmeticOverflow { .. }
        ));
    }

    #[test]
    fn escrow_value_selects_by_side() {
        let buy = order(Side::Buy, 3, 100);
        assert_eq!(buy.escrow_value().unwrap(), 300);
        assert_eq!(buy.receive_value().unwrap(), 3);

        let sell = order(Side::Sell, 3, 100);
        assert_eq!(sell.escrow_value().unwrap(), 3);
        assert_eq!(sell.receive_value().unwrap(), 300);
    }

    #[test]
    fn mark_cancelled_then_execute_fails() {
        let mut o = order(Side::Buy, 1, 1);
        o.mark_cancelled().unwrap();
        let err = o.mark_executed().unwrap_err();
        assert!(matches!(err, SpotcoreError::OrderAlreadyCancelled(_)));
    }

    #[test]
    fn mark_executed_twice_fails() {
        let mut o = order(Side::Sell, 1, 1);
        o.mark_executed().unwrap();
        let err = o.mark_executed().unwrap_err();
        assert!(matches!(err, SpotcoreError::OrderAlreadyExecuted(_)));
    }

    #[test]
    fn serde_roundtrip() {
        let o = order(Side::Sell, 1, 45_000);
        let json = serde_json::to_string(&o).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }
}
