//! Core types for capslot: the outcome catalog, player profiles, coin
//! balances, and the outcome selector.
//!
//! The selector is a pure function of its inputs. A profile and a coin
//! balance produce a win probability ([`compute_win_probability`]), and a
//! single uniform draw picks either the favorable outcome or one entry of
//! the unfavorable pool ([`select_outcome`]).

pub mod coins;
pub mod error;
pub mod odds;
pub mod outcome;
pub mod profile;
pub mod selector;

pub use coins::CoinBalance;
pub use error::{CoreError, CoreResult};
pub use odds::{OddsBreakdown, compute_odds, compute_win_probability};
pub use outcome::{Catalog, Outcome};
pub use profile::{EducationLevel, OccupationCategory, PlayerProfile, WageLevel};
pub use selector::{SpinResult, select_outcome, spin};
