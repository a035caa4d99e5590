//! The committed balance map.
//!
//! Absent entries read as zero, so accounts need no registration step.
//! All mutations are atomic: either the full operation succeeds or the
//! ledger is unchanged.

use std::collections::HashMap;

use spotcore_types::{AccountId, Asset, Result};

use crate::txn::{LedgerTxn, LedgerWrites};

/// Key into the balance map: one entry per account per asset.
pub type BalanceKey = (AccountId, Asset);

/// The source of truth for all balance state.
///
/// The in-memory map stands in for the transactional key-value state
/// service the surrounding chain layer provides: `get` is a lookup
/// defaulting to zero, `commit` applies a batch of staged writes.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Per-(account, asset) balances. Absent means zero.
    balances: HashMap<BalanceKey, u64>,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Current committed balance for an (account, asset) pair.
    /// Zero if the entry was never written. Pure read.
    #[must_use]
    pub fn get(&self, account: AccountId, asset: Asset) -> u64 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    /// Add `amount` to a balance as a single-mutation transaction.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the balance would exceed
    /// `u64::MAX`; on failure the ledger is unchanged.
    pub fn credit(&mut self, account: AccountId, asset: Asset, amount: u64) -> Result<()> {
        let writes = {
            let mut txn = self.begin();
            txn.credit(account, asset, amount)?;
            txn.into_writes()
        };
        self.commit(writes);
        Ok(())
    }

    /// Subtract `amount` from a balance as a single-mutation transaction.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount` exceeds the current
    /// balance; on failure the ledger is unchanged.
    pub fn debit(&mut self, account: AccountId, asset: Asset, amount: u64) -> Result<()> {
        let writes = {
            let mut txn = self.begin();
            txn.debit(account, asset, amount)?;
            txn.into_writes()
        };
        self.commit(writes);
        Ok(())
    }

    /// Open a staged transaction over the current committed state.
    ///
    /// Reads through the txn observe one consistent snapshot; writes
    /// stage until [`Ledger::commit`]. Dropping the txn discards them.
    #[must_use]
    pub fn begin(&self) -> LedgerTxn<'_> {
        LedgerTxn::new(self)
    }

    /// Apply a batch of staged writes. This is the only point where
    /// staged state becomes visible, and it cannot fail: every write was
    /// already validated inside the txn that produced it.
    pub fn commit(&mut self, writes: LedgerWrites) {
        let entries = writes.into_entries();
        tracing::trace!(entries = entries.len(), "Committing ledger writes");
        for (key, value) in entries {
            self.balances.insert(key, value);
        }
    }

    /// Total supply of an asset across all accounts.
    ///
    /// Widened to `u128`: the per-entry values are `u64`, but the sum
    /// over accounts may not fit.
    #[must_use]
    pub fn total_supply(&self, asset: Asset) -> u128 {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, v)| u128::from(*v))
            .sum()
    }
}
