//! Weighted outcome selection.
//!
//! A single uniform draw decides between the favorable outcome and the
//! unfavorable pool. Within the pool every entry has equal weight.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::coins::CoinBalance;
use crate::odds::compute_win_probability;
use crate::outcome::{Catalog, Outcome};
use crate::profile::PlayerProfile;

/// The result of one spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// The chosen outcome.
    pub outcome: Outcome,
    /// The win probability the outcome was drawn with.
    pub probability: f64,
    /// When the spin completed.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
}

/// Draw an outcome from the catalog.
///
/// Returns the favorable outcome when a uniform draw in `[0, 1)` falls
/// below `probability`; otherwise a uniformly chosen unfavorable outcome.
/// An empty unfavorable pool falls back to the favorable outcome.
pub fn select_outcome<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    probability: f64,
    rng: &mut R,
) -> &'a Outcome {
    let draw: f64 = rng.random();
    if draw < probability {
        tracing::debug!(draw, probability, "favorable draw");
        return catalog.favorable();
    }
    let outcome = catalog
        .unfavorable()
        .choose(rng)
        .unwrap_or_else(|| catalog.favorable());
    tracing::debug!(draw, probability, code = %outcome.code, "unfavorable draw");
    outcome
}

/// Compute the probability for a profile and coin balance, draw an outcome,
/// and stamp the result with `now`.
pub fn spin<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &PlayerProfile,
    coins: CoinBalance,
    rng: &mut R,
    now: DateTime<Utc>,
) -> SpinResult {
    let probability = compute_win_probability(profile, coins);
    let outcome = select_outcome(catalog, probability, rng).clone();
    SpinResult {
        outcome,
        probability,
        timestamp: now,
    }
}
