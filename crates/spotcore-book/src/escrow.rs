//! Escrow settlement arithmetic.
//!
//! Every balance movement the book performs is one of three shapes, all
//! staged against a [`LedgerTxn`]:
//!
//! - [`lock`]: placement — the maker's escrow asset moves into the book
//! - [`refund`]: cancellation — the escrow moves back to the maker
//! - [`swap`]: execution — the escrow settles to the counterparty and the
//!   counterparty's asset settles to the maker
//!
//! The buy/sell selection lives in [`Order::escrow_value`] /
//! [`Order::receive_value`] and the `Side` asset accessors; these
//! helpers never branch on the side themselves. Amounts are computed
//! with checked arithmetic before any debit is staged, so an overflowing
//! `amount * price` aborts an operation before it touches a balance.

use spotcore_ledger::LedgerTxn;
use spotcore_types::{AccountId, Order, Result};

/// Stage the placement escrow: debit the maker's escrow asset.
///
/// The opposite asset is untouched — a buy locks only dollars, a sell
/// locks only bitcoin.
///
/// # Errors
/// - `ArithmeticOverflow` if the dollar leg overflows
/// - `InsufficientBalance` if the maker cannot cover the escrow
pub fn lock(txn: &mut LedgerTxn<'_>, order: &Order) -> Result<()> {
    let value = order.escrow_value()?;
    txn.debit(order.maker, order.side.escrow_asset(), value)
}

/// Stage the cancellation refund: credit the escrow back to the maker.
///
/// # Errors
/// - `ArithmeticOverflow` if the dollar leg or the refunded balance
///   overflows
pub fn refund(txn: &mut LedgerTxn<'_>, order: &Order) -> Result<()> {
    let value = order.escrow_value()?;
    txn.credit(order.maker, order.side.escrow_asset(), value)
}

/// Stage the execution swap between the maker and `taker`.
///
/// The taker supplies the asset the maker wants and receives the escrow
/// the maker locked at placement; a full bilateral settlement at the
/// order's fixed price, never partial. The taker's debit is staged
/// first, so a short taker aborts before any credit exists.
///
/// # Errors
/// - `ArithmeticOverflow` if the dollar leg or a credited balance
///   overflows
/// - `InsufficientBalance` if the taker cannot supply their side
pub fn swap(txn: &mut LedgerTxn<'_>, order: &Order, taker: AccountId) -> Result<()> {
    let escrowed = order.escrow_value()?;
    let supplied = order.receive_value()?;

    txn.debit(taker, order.side.receive_asset(), supplied)?;
    txn.credit(taker, order.side.escrow_asset(), escrowed)?;
    txn.credit(order.maker, order.side.receive_asset(), supplied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotcore_ledger::Ledger;
    use spotcore_types::{Asset, OrderId, Side, SpotcoreError};

    fn acct(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    fn sell_order(maker: AccountId, amount: u64, price: u64) -> Order {
        Order::new(OrderId(0), Side::Sell, amount, price, maker)
    }

    fn buy_order(maker: AccountId, amount: u64, price: u64) -> Order {
        Order::new(OrderId(0), Side::Buy, amount, price, maker)
    }

    #[test]
    fn lock_debits_only_the_escrow_asset() {
        let mut ledger = Ledger::new();
        let maker = acct(1);
        ledger.credit(maker, Asset::Bitcoin, 21).unwrap();
        ledger.credit(maker, Asset::Dollar, 99).unwrap();

        let order = sell_order(maker, 1, 45_000);
        let writes = {
            let mut txn = ledger.begin();
            lock(&mut txn, &order).unwrap();
            txn.into_writes()
        };
        ledger.commit(writes);

        assert_eq!(ledger.get(maker, Asset::Bitcoin), 20);
        assert_eq!(ledger.get(maker, Asset::Dollar), 99);
    }

    #[test]
    fn lock_buy_requires_the_dollar_leg() {
        let mut ledger = Ledger::new();
        let maker = acct(1);
        ledger.credit(maker, Asset::Dollar, 44_999).unwrap();

        let order = buy_order(maker, 1, 45_000);
        let mut txn = ledger.begin();
        let err = lock(&mut txn, &order).unwrap_err();
        assert_eq!(
            err,
            SpotcoreError::InsufficientBalance {
                asset: Asset::Dollar,
                needed: 45_000,
                available: 44_999,
            }
        );
    }

    #[test]
    fn lock_overflowing_quote_fails_before_any_debit() {
        let ledger = Ledger::new();
        let order = buy_order(acct(1), u64::MAX, 2);
        let mut txn = ledger.begin();
        let err = lock(&mut txn, &order).unwrap_err();
        assert!(matches!(err, SpotcoreError::ArithmeticOverflow { .. }));
        assert_eq!(txn.staged_len(), 0);
    }

    #[test]
    fn refund_mirrors_lock() {
        let mut ledger = Ledger::new();
        let maker = acct(1);
        ledger.credit(maker, Asset::Dollar, 90_000).unwrap();

        let order = buy_order(maker, 2, 45_000);
        let writes = {
            let mut txn = ledger.begin();
            lock(&mut txn, &order).unwrap();
            refund(&mut txn, &order).unwrap();
            txn.into_writes()
        };
        ledger.commit(writes);
        assert_eq!(ledger.get(maker, Asset::Dollar), 90_000);
    }

    #[test]
    fn swap_settles_both_legs_of_a_sell() {
        let mut ledger = Ledger::new();
        let maker = acct(1);
        let taker = acct(2);
        // Maker's bitcoin already escrowed (debited at placement).
        ledger.credit(taker, Asset::Dollar, 50_000).unwrap();

        let order = sell_order(maker, 1, 45_000);
        let writes = {
            let mut txn = ledger.begin();
            swap(&mut txn, &order, taker).unwrap();
            txn.into_writes()
        };
        ledger.commit(writes);

        assert_eq!(ledger.get(taker, Asset::Dollar), 5_000);
        assert_eq!(ledger.get(taker, Asset::Bitcoin), 1);
        assert_eq!(ledger.get(maker, Asset::Dollar), 45_000);
        assert_eq!(ledger.get(maker, Asset::Bitcoin), 0);
    }

    #[test]
    fn swap_settles_both_legs_of_a_buy() {
        let mut ledger = Ledger::new();
        let maker = acct(1);
        let taker = acct(2);
        // Maker's dollars already escrowed at placement.
        ledger.credit(taker, Asset::Bitcoin, 3).unwrap();

        let order = buy_order(maker, 2, 45_000);
        let writes = {
            let mut txn = ledger.begin();
            swap(&mut txn, &order, taker).unwrap();
            txn.into_writes()
        };
        ledger.commit(writes);

        assert_eq!(ledger.get(taker, Asset::Bitcoin), 1);
        assert_eq!(ledger.get(taker, Asset::Dollar), 90_000);
        assert_eq!(ledger.get(maker, Asset::Bitcoin), 2);
        assert_eq!(ledger.get(maker, Asset::Dollar), 0);
    }

    #[test]
    fn swap_short_taker_stages_nothing() {
        let ledger = Ledger::new();
        let order = sell_order(acct(1), 1, 45_000);
        let mut txn = ledger.begin();
        let err = swap(&mut txn, &order, acct(2)).unwrap_err();
        assert!(matches!(err, SpotcoreError::InsufficientBalance { .. }));
        assert_eq!(txn.staged_len(), 0);
    }
}
