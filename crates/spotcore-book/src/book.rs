//! The order book: order store, id counter, and the three public
//! operations.
//!
//! Each operation runs against one consistent ledger snapshot: it opens a
//! [`LedgerTxn`](spotcore_ledger::LedgerTxn), performs every validation
//! and staged balance write through it, and only after the last fallible
//! step commits the ledger writes together with the order-store mutation.
//! A failure anywhere drops the txn and leaves both the ledger and the
//! book exactly as they were.
//!
//! The caller (the surrounding transaction layer) serializes operations;
//! the `&mut` receivers encode that exclusivity, so the book itself does
//! no locking.

use std::collections::HashMap;

use spotcore_ledger::Ledger;
use spotcore_types::{AccountId, Order, OrderId, Result, Side, SpotcoreError};

use crate::escrow;

/// The set of orders plus the sequential id counter.
///
/// The book holds no ledger of its own: every operation receives an
/// explicit `&mut Ledger` handle, and the ledger never sees the book.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// All orders ever placed, keyed by id. Terminal orders stay in the
    /// map; their ids are never reused.
    orders: HashMap<OrderId, Order>,
    /// The id the next successful placement will receive.
    next_order_id: OrderId,
}

impl OrderBook {
    /// Create an empty book. The first order placed gets id 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            next_order_id: OrderId::ZERO,
        }
    }

    /// Place a new order for `sender`, escrowing the required asset.
    ///
    /// A buy locks `amount * price` dollars; a sell locks `amount`
    /// bitcoin. The opposite asset is untouched at placement time. On
    /// success the order is stored open under the returned id and the
    /// counter advances by exactly 1.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `sender` cannot cover the escrow; no
    ///   order is created and the counter does not advance
    /// - `ArithmeticOverflow` if `amount * price` overflows
    pub fn place_order(
        &mut self,
        ledger: &mut Ledger,
        sender: AccountId,
        side: Side,
        amount: u64,
        price: u64,
    ) -> Result<OrderId> {
        let id = self.next_order_id;
        let order = Order::new(id, side, amount, price, sender);

        let writes = {
            let mut txn = ledger.begin();
            escrow::lock(&mut txn, &order)?;
            txn.into_writes()
        };
        let next = id.next()?;

        // Past the last fallible step: commit everything together.
        ledger.commit(writes);
        self.orders.insert(id, order);
        self.next_order_id = next;

        tracing::debug!(
            order_id = %id,
            maker = %sender,
            side = %side,
            amount,
            price,
            "Order placed"
        );
        Ok(id)
    }

    /// Cancel an open order and refund its escrow to the maker.
    ///
    /// # Errors
    /// - `OrderNotFound` if the id was never assigned
    /// - `OrderAlreadyCancelled` / `OrderAlreadyExecuted` on terminal
    ///   orders
    /// - `NotOrderOwner` if `sender` is not the maker
    /// - `ArithmeticOverflow` if the refund would overflow the maker's
    ///   balance
    pub fn cancel_order(
        &mut self,
        ledger: &mut Ledger,
        sender: AccountId,
        order_id: OrderId,
    ) -> Result<()> {
        // Existence is checked before any field access; an unassigned id
        // must never be read through default-valued fields.
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(SpotcoreError::OrderNotFound(order_id))?;
        order.ensure_open()?;
        if sender != order.maker {
            return Err(SpotcoreError::NotOrderOwner(order_id));
        }

        let writes = {
            let mut txn = ledger.begin();
            escrow::refund(&mut txn, order)?;
            txn.into_writes()
        };

        order.mark_cancelled()?;
        ledger.commit(writes);

        tracing::debug!(order_id = %order_id, maker = %sender, "Order cancelled, escrow refunded");
        Ok(())
    }

    /// Execute an open order as the counterparty, settling both legs.
    ///
    /// `sender` supplies the asset the maker wants and receives the
    /// escrow the maker locked at placement — a full bilateral swap at
    /// the order's fixed price.
    ///
    /// # Errors
    /// - `OrderNotFound` if the id was never assigned
    /// - `SelfTrade` if `sender` is the maker
    /// - `OrderAlreadyCancelled` / `OrderAlreadyExecuted` on terminal
    ///   orders
    /// - `InsufficientBalance` if `sender` cannot supply their side
    /// - `ArithmeticOverflow` if a settled balance would overflow
    pub fn execute_order(
        &mut self,
        ledger: &mut Ledger,
        sender: AccountId,
        order_id: OrderId,
    ) -> Result<()> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(SpotcoreError::OrderNotFound(order_id))?;
        if sender == order.maker {
            tracing::warn!(
                order_id = %order_id,
                maker = %order.maker,
                "Self-trade blocked: maker attempted to execute their own order"
            );
            return Err(SpotcoreError::SelfTrade(order_id));
        }
        order.ensure_open()?;

        let writes = {
            let mut txn = ledger.begin();
            escrow::swap(&mut txn, order, sender)?;
            txn.into_writes()
        };

        order.mark_executed()?;
        ledger.commit(writes);

        tracing::debug!(
            order_id = %order_id,
            maker = %order.maker,
            taker = %sender,
            "Order executed"
        );
        Ok(())
    }

    /// Look up an order by id.
    #[must_use]
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// The id the next successful placement will receive.
    #[must_use]
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Number of orders ever stored (terminal orders included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order was ever placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders still open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.orders.values().filter(|o| o.is_open()).count()
    }
}
