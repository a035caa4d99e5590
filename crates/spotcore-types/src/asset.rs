//! The two-asset model: the [`Asset`] tag and the order [`Side`].
//!
//! Spotcore trades exactly one pair — bitcoin against dollars — so the
//! asset tag is a closed enum rather than a free-form symbol. `Side`
//! carries the escrow-selection logic: which asset an order locks at
//! placement and which it receives at execution. Keeping that branch here
//! means place, cancel, and execute all share one asset-selection rule.

use serde::{Deserialize, Serialize};

/// Discriminator between the two balance ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Asset {
    Bitcoin,
    Dollar,
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitcoin => write!(f, "BTC"),
            Self::Dollar => write!(f, "USD"),
        }
    }
}

/// Which direction an order trades.
///
/// A buy exchanges dollars for bitcoin; a sell exchanges bitcoin for
/// dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The asset the maker locks in escrow at placement time.
    ///
    /// A buy locks dollars (the maker pays dollars, wants bitcoin); a sell
    /// locks bitcoin.
    #[must_use]
    pub fn escrow_asset(self) -> Asset {
        match self {
            Self::Buy => Asset::Dollar,
            Self::Sell => Asset::Bitcoin,
        }
    }

    /// The asset the maker receives at execution — the one the
    /// counterparty must supply.
    #[must_use]
    pub fn receive_asset(self) -> Asset {
        match self {
            Self::Buy => Asset::Bitcoin,
            Self::Sell => Asset::Dollar,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
