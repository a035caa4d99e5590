//! Staged ledger transactions.
//!
//! One [`LedgerTxn`] backs one logical operation. Reads fall through to
//! the committed ledger unless the txn already staged a write for that
//! key, so an operation always observes its own pending mutations plus
//! one consistent snapshot of everything else. Nothing is visible to
//! other readers until the whole batch is committed; an operation that
//! fails partway simply drops the txn and no staged write survives.

use std::collections::HashMap;

use spotcore_types::{AccountId, Asset, Result, SpotcoreError};

use crate::ledger::{BalanceKey, Ledger};

/// A staged view over a [`Ledger`], scoped to one operation.
#[derive(Debug)]
pub struct LedgerTxn<'a> {
    base: &'a Ledger,
    staged: HashMap<BalanceKey, u64>,
}

impl<'a> LedgerTxn<'a> {
    pub(crate) fn new(base: &'a Ledger) -> Self {
        Self {
            base,
            staged: HashMap::new(),
        }
    }

    /// Balance as this transaction sees it: staged value if written,
    /// committed value otherwise, zero if never set.
    #[must_use]
    pub fn get(&self, account: AccountId, asset: Asset) -> u64 {
        self.staged
            .get(&(account, asset))
            .copied()
            .unwrap_or_else(|| self.base.get(account, asset))
    }

    /// Stage `balance + amount` for an (account, asset) pair.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the balance would exceed
    /// `u64::MAX`; nothing is staged on failure.
    pub fn credit(&mut self, account: AccountId, asset: Asset, amount: u64) -> Result<()> {
        let current = self.get(account, asset);
        let updated = current
            .checked_add(amount)
            .ok_or(SpotcoreError::ArithmeticOverflow {
                what: "balance credit",
            })?;
        self.staged.insert((account, asset), updated);
        Ok(())
    }

    /// Stage `balance - amount` for an (account, asset) pair.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount` exceeds the balance as
    /// seen by this txn; nothing is staged on failure.
    pub fn debit(&mut self, account: AccountId, asset: Asset, amount: u64) -> Result<()> {
        let current = self.get(account, asset);
        let updated = current
            .checked_sub(amount)
            .ok_or(SpotcoreError::InsufficientBalance {
                asset,
                needed: amount,
                available: current,
            })?;
        self.staged.insert((account, asset), updated);
        Ok(())
    }

    /// Number of keys this txn has staged.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Seal the txn into a write batch for [`Ledger::commit`].
    #[must_use]
    pub fn into_writes(self) -> LedgerWrites {
        LedgerWrites {
            writes: self.staged,
        }
    }
}

/// A sealed batch of validated balance writes.
///
/// Produced only by [`LedgerTxn::into_writes`], consumed only by
/// [`Ledger::commit`] — there is no way to smuggle an unvalidated write
/// into the ledger.
#[derive(Debug)]
pub struct LedgerWrites {
    writes: HashMap<BalanceKey, u64>,
}

impl LedgerWrites {
    /// Whether the batch stages no writes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub(crate) fn into_entries(self) -> HashMap<BalanceKey, u64> {
        self.writes
    }
}
