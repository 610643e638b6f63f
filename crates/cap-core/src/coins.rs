//! Coin balance tracking.
//!
//! Coins accumulate as the player feeds the machine. Each coin raises the
//! win probability, and a full stack forces a near-certain win.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A non-negative coin count.
///
/// Every constructor degrades gracefully: negative, missing, or malformed
/// inputs yield an empty balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinBalance(u32);

impl CoinBalance {
    /// Balance at which the win probability is overridden.
    pub const OVERRIDE_THRESHOLD: u32 = 5;

    /// Create a balance from an unsigned count.
    pub fn new(coins: u32) -> Self {
        Self(coins)
    }

    /// Create a balance from a signed count, clamping negatives to zero.
    pub fn from_signed(coins: i64) -> Self {
        Self(coins.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Parse a stored string. Missing or unparseable values give zero.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(Self::from_signed)
            .unwrap_or_default()
    }

    /// Read a balance from a JSON value: a number or a numeric string.
    ///
    /// Fractional numbers are truncated. Anything else gives zero.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Self::from_signed)
                .unwrap_or_default(),
            Value::String(s) => Self::from_stored(Some(s)),
            _ => Self::default(),
        }
    }

    /// The coin count.
    pub fn count(self) -> u32 {
        self.0
    }

    /// Add one coin, saturating at `u32::MAX`.
    pub fn add_one(self) -> Self {
        self.add_coins(1)
    }

    /// Add a batch of coins, saturating at `u32::MAX`.
    pub fn add_coins(self, coins: u32) -> Self {
        Self(self.0.saturating_add(coins))
    }

    /// Whether the balance triggers the near-certain-win override.
    pub fn triggers_override(self) -> bool {
        self.0 >= Self::OVERRIDE_THRESHOLD
    }
}

impl From<u32> for CoinBalance {
    fn from(coins: u32) -> Self {
        Self(coins)
    }
}

impl std::fmt::Display for CoinBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
