//! Win probability computation.
//!
//! The probability is built in percentage points: a base of 15, the three
//! profile table deltas, and 1.5 points per coin. The sum is clamped to
//! `[0, 90]`. A balance of five or more coins bypasses all of that and
//! yields 0.99.

use serde::{Deserialize, Serialize};

use crate::coins::CoinBalance;
use crate::profile::PlayerProfile;

/// Base win chance in points.
pub const BASE_POINTS: f64 = 15.0;

/// Points added per coin.
pub const POINTS_PER_COIN: f64 = 1.5;

/// Upper bound of the summed total in points.
pub const MAX_POINTS: f64 = 90.0;

/// Probability returned when the coin override fires.
pub const OVERRIDE_PROBABILITY: f64 = 0.99;

/// Every component of a win probability computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsBreakdown {
    /// Base points.
    pub base: f64,
    /// Education adjustment.
    pub education: i32,
    /// Wage level adjustment.
    pub wage: i32,
    /// Occupation adjustment.
    pub occupation: i32,
    /// Coin bonus points.
    pub coin_bonus: f64,
    /// Unclamped sum of all components.
    pub raw_total: f64,
    /// Sum clamped to `[0, MAX_POINTS]`.
    pub clamped_total: f64,
    /// Whether the coin override replaced the computed total.
    pub override_applied: bool,
    /// Final probability in `[0, 1]`.
    pub probability: f64,
}

/// Compute the full odds breakdown for a profile and coin balance.
pub fn compute_odds(profile: &PlayerProfile, coins: CoinBalance) -> OddsBreakdown {
    let education = profile.education_delta();
    let wage = profile.wage_delta();
    let occupation = profile.occupation_delta();
    let coin_bonus = f64::from(coins.count()) * POINTS_PER_COIN;

    let raw_total =
        BASE_POINTS + f64::from(education) + f64::from(wage) + f64::from(occupation) + coin_bonus;
    let clamped_total = raw_total.clamp(0.0, MAX_POINTS);
    let override_applied = coins.triggers_override();

    let probability = if override_applied {
        OVERRIDE_PROBABILITY
    } else {
        clamped_total / 100.0
    };

    tracing::debug!(
        education,
        wage,
        occupation,
        coins = coins.count(),
        raw_total,
        override_applied,
        probability,
        "odds computed"
    );

    OddsBreakdown {
        base: BASE_POINTS,
        education,
        wage,
        occupation,
        coin_bonus,
        raw_total,
        clamped_total,
        override_applied,
        probability,
    }
}

/// Compute the win probability for a profile and coin balance.
pub fn compute_win_probability(profile: &PlayerProfile, coins: CoinBalance) -> f64 {
    compute_odds(profile, coins).probability
}
