//! The slot machine.
//!
//! `SlotMachine` owns the catalog, the persisted state, and the RNG. It
//! applies the spin lock, feeds the state into the outcome selector, plans
//! the reels for the result, and records everything in the history.

use std::path::Path;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use cap_core::{Catalog, CoinBalance, OddsBreakdown, PlayerProfile, SpinResult};

use crate::config::MachineConfig;
use crate::error::{MachineError, MachineResult};
use crate::history::HistoryEntry;
use crate::reels::{ReelPlan, glyph_alphabet, idle_glyphs};
use crate::state::MachineState;

/// The outcome of a spin together with its reel plan.
#[derive(Debug, Clone)]
pub struct SpinReport {
    /// The drawn result.
    pub result: SpinResult,
    /// Whether the favorable outcome came up.
    pub favorable: bool,
    /// Reel glyphs and stop times for presenting the spin.
    pub reels: ReelPlan,
}

/// Tally of a batch of simulated draws.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// Probability the draws were made with.
    pub probability: f64,
    /// Number of draws.
    pub draws: u64,
    /// Draws that landed on the favorable outcome.
    pub favorable: u64,
    /// Per-outcome counts in catalog order.
    pub counts: Vec<(String, u64)>,
}

impl SimulationReport {
    /// Observed fraction of favorable draws.
    pub fn favorable_rate(&self) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.favorable as f64 / self.draws as f64
        }
    }
}

/// A slot machine with persisted state.
pub struct SlotMachine {
    catalog: Catalog,
    config: MachineConfig,
    alphabet: Vec<char>,
    state: MachineState,
    rng: StdRng,
}

impl SlotMachine {
    /// Create a machine with a fresh state.
    pub fn new(catalog: Catalog, config: MachineConfig) -> Self {
        Self::with_state(catalog, config, MachineState::default())
    }

    /// Create a machine resuming from a stored state.
    pub fn with_state(catalog: Catalog, config: MachineConfig, state: MachineState) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let alphabet = glyph_alphabet(&catalog);
        Self {
            catalog,
            config,
            alphabet,
            state,
            rng,
        }
    }

    /// Load the catalog at `path`, or the standard catalog when no path is given.
    pub fn load_catalog(path: Option<&Path>) -> MachineResult<Catalog> {
        match path {
            Some(path) => Ok(Catalog::load(path)?),
            None => Ok(Catalog::standard()),
        }
    }

    /// Create a machine from an optional catalog file and a stored state.
    pub fn from_catalog_path(
        path: Option<&Path>,
        config: MachineConfig,
        state: MachineState,
    ) -> MachineResult<Self> {
        let catalog = Self::load_catalog(path)?;
        Ok(Self::with_state(catalog, config, state))
    }

    /// The outcome catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The machine configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The current state.
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Consume the machine, returning its state for persistence.
    pub fn into_state(self) -> MachineState {
        self.state
    }

    /// Glyphs the reels show before the first spin.
    pub fn idle_reels(&self) -> Vec<char> {
        idle_glyphs(self.config.reel_count)
    }

    /// Insert a coin and return the new balance.
    pub fn insert_coin(&mut self) -> CoinBalance {
        self.insert_coins(1)
    }

    /// Insert a batch of coins and return the new balance.
    ///
    /// The balance saturates at `u32::MAX`. A batch is recorded as a single
    /// history entry; an empty batch records nothing.
    pub fn insert_coins(&mut self, count: u32) -> CoinBalance {
        if count == 0 {
            return self.state.coins;
        }
        let balance = self.state.coins.add_coins(count);
        self.state.coins = balance;
        tracing::info!(count, balance = balance.count(), "coins inserted");
        self.state.history.append(HistoryEntry::CoinInserted {
            balance: balance.count(),
            timestamp: Utc::now(),
        });
        balance
    }

    /// Replace the player profile.
    pub fn set_profile(&mut self, profile: PlayerProfile) {
        tracing::info!(
            education = ?profile.education,
            wage_level = ?profile.wage_level,
            occupation = ?profile.occupation,
            "profile updated"
        );
        self.state.history.append(HistoryEntry::ProfileUpdated {
            education: profile.education.clone(),
            wage_level: profile.wage_level.clone(),
            occupation: profile.occupation.clone(),
            timestamp: Utc::now(),
        });
        self.state.profile = profile;
    }

    /// Odds for the current profile and coin balance.
    pub fn odds(&self) -> OddsBreakdown {
        cap_core::compute_odds(&self.state.profile, self.state.coins)
    }

    /// Spin the reels.
    ///
    /// Fails with [`MachineError::SpinLocked`] if the machine has already
    /// been played. On success the lock is set and the result is recorded.
    /// Coins are not consumed.
    pub fn spin(&mut self) -> MachineResult<SpinReport> {
        if self.state.spin_locked {
            tracing::info!("spin refused: machine locked");
            return Err(MachineError::SpinLocked);
        }

        let result = cap_core::spin(
            &self.catalog,
            &self.state.profile,
            self.state.coins,
            &mut self.rng,
            Utc::now(),
        );
        let favorable = self.catalog.is_favorable(&result.outcome);
        let reels = ReelPlan::new(
            &result.outcome.code,
            &self.alphabet,
            &self.config,
            &mut self.rng,
        );

        tracing::info!(
            code = %result.outcome.code,
            probability = result.probability,
            favorable,
            "spin complete"
        );

        self.state.history.append(HistoryEntry::Spin {
            code: result.outcome.code.clone(),
            title: result.outcome.title.clone(),
            probability: result.probability,
            coins: self.state.coins.count(),
            favorable,
            timestamp: result.timestamp,
        });
        self.state.last_spin = Some(result.clone());
        self.state.spin_locked = true;

        Ok(SpinReport {
            result,
            favorable,
            reels,
        })
    }

    /// The glyphs visible `t_ms` into a planned spin.
    pub fn reel_frame(&mut self, plan: &ReelPlan, t_ms: u64) -> Vec<char> {
        plan.frame_at(t_ms, &mut self.rng)
    }

    /// Clear the spin lock.
    pub fn unlock(&mut self) {
        self.state.spin_locked = false;
        tracing::info!("spin lock cleared");
        self.state
            .history
            .append(HistoryEntry::Unlocked { timestamp: Utc::now() });
    }

    /// Clear profile, coins, lock, and last spin. History is kept.
    pub fn reset(&mut self) {
        let history = std::mem::take(&mut self.state.history);
        self.state = MachineState {
            history,
            ..MachineState::default()
        };
        tracing::info!("machine reset");
        self.state
            .history
            .append(HistoryEntry::Reset { timestamp: Utc::now() });
    }

    /// Draw `draws` outcomes at a fixed probability without touching state.
    pub fn simulate(&mut self, probability: f64, draws: u64) -> MachineResult<SimulationReport> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(MachineError::InvalidProbability(probability));
        }

        let mut counts: Vec<(String, u64)> = self
            .catalog
            .outcomes()
            .map(|o| (o.code.clone(), 0))
            .collect();
        let mut favorable = 0;

        for _ in 0..draws {
            let outcome = cap_core::select_outcome(&self.catalog, probability, &mut self.rng);
            if self.catalog.is_favorable(outcome) {
                favorable += 1;
            }
            if let Some((_, count)) = counts.iter_mut().find(|(code, _)| *code == outcome.code) {
                *count += 1;
            }
        }

        tracing::debug!(probability, draws, favorable, "simulation complete");

        Ok(SimulationReport {
            probability,
            draws,
            favorable,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_core::Outcome;

    fn machine() -> SlotMachine {
        SlotMachine::new(Catalog::standard(), MachineConfig::default().with_seed(42))
    }

    #[test]
    fn fresh_machine() {
        let m = machine();
        assert_eq!(m.state().coins.count(), 0);
        assert!(!m.state().spin_locked);
        assert_eq!(m.idle_reels(), vec!['$', '$', '$']);
        assert!((m.odds().probability - 0.15).abs() < 1e-9);
    }

    #[test]
    fn spin_sets_lock_and_records() {
        let mut m = machine();
        let report = m.spin().unwrap();
        assert!(m.state().spin_locked);
        assert_eq!(m.state().last_spin.as_ref(), Some(&report.result));
        assert_eq!(m.state().history.spins().count(), 1);
        assert_eq!(report.reels.final_glyphs().len(), 3);
        let code: String = report.reels.final_glyphs().iter().collect();
        assert_eq!(code, report.result.outcome.code);
    }

    #[test]
    fn reel_frames_settle_on_result() {
        let mut m = machine();
        let report = m.spin().unwrap();
        let plan = report.reels;
        let first = m.reel_frame(&plan, 0);
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|g| m.alphabet.contains(g)));
        let last = m.reel_frame(&plan, plan.duration_ms());
        assert_eq!(last, plan.final_glyphs());
    }

    #[test]
    fn second_spin_is_refused_until_unlock() {
        let mut m = machine();
        m.spin().unwrap();
        assert!(matches!(m.spin(), Err(MachineError::SpinLocked)));
        m.unlock();
        assert!(m.spin().is_ok());
        assert_eq!(m.state().history.spins().count(), 2);
    }

    #[test]
    fn coins_raise_odds_and_are_kept() {
        let mut m = machine();
        for _ in 0..5 {
            m.insert_coin();
        }
        assert_eq!(m.state().coins.count(), 5);
        assert_eq!(m.odds().probability, 0.99);
        m.spin().unwrap();
        assert_eq!(m.state().coins.count(), 5);
    }

    #[test]
    fn coin_batch_is_one_history_entry() {
        let mut m = machine();
        let balance = m.insert_coins(40);
        assert_eq!(balance.count(), 40);
        assert_eq!(m.state().history.len(), 1);
        assert!(matches!(
            m.state().history.entries()[0],
            HistoryEntry::CoinInserted { balance: 40, .. }
        ));
    }

    #[test]
    fn huge_coin_batch_saturates_without_growing_history() {
        let mut m = machine();
        m.insert_coin();
        m.insert_coins(u32::MAX);
        assert_eq!(m.state().coins.count(), u32::MAX);
        assert_eq!(m.state().history.len(), 2);
    }

    #[test]
    fn empty_coin_batch_records_nothing() {
        let mut m = machine();
        assert_eq!(m.insert_coins(0).count(), 0);
        assert!(m.state().history.is_empty());
    }

    #[test]
    fn catalog_path_defaults_to_standard() {
        let catalog = SlotMachine::load_catalog(None).unwrap();
        assert_eq!(catalog, Catalog::standard());
    }

    #[test]
    fn catalog_file_errors_surface_as_core_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let err = SlotMachine::load_catalog(Some(&missing)).unwrap_err();
        assert!(matches!(err, MachineError::Core(cap_core::CoreError::Io(_))));

        let dupes = dir.path().join("dupes.json");
        std::fs::write(
            &dupes,
            r#"{"favorable": {"code": "A", "full": "A", "message": ""},
                "unfavorable": [{"code": "a", "full": "B", "message": ""}]}"#,
        )
        .unwrap();
        let result = SlotMachine::from_catalog_path(
            Some(&dupes),
            MachineConfig::default(),
            MachineState::default(),
        );
        assert!(matches!(
            result,
            Err(MachineError::Core(cap_core::CoreError::DuplicateCode(_)))
        ));
    }

    #[test]
    fn custom_catalog_machine_spins_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"favorable": {"code": "YES", "full": "Yes", "message": "ok"}}"#,
        )
        .unwrap();
        let mut m = SlotMachine::from_catalog_path(
            Some(&path),
            MachineConfig::default().with_seed(3),
            MachineState::default(),
        )
        .unwrap();
        assert_eq!(m.spin().unwrap().result.outcome.code, "YES");
    }

    #[test]
    fn profile_flows_into_odds() {
        let mut m = machine();
        m.set_profile(
            PlayerProfile::new()
                .with_education("PhD")
                .with_wage_level("L5")
                .with_occupation("STEM"),
        );
        assert!((m.odds().probability - 0.35).abs() < 1e-9);
        assert!(matches!(
            m.state().history.entries().last(),
            Some(HistoryEntry::ProfileUpdated { .. })
        ));
    }

    #[test]
    fn reset_keeps_history() {
        let mut m = machine();
        m.insert_coin();
        m.spin().unwrap();
        let before = m.state().history.len();
        m.reset();
        assert_eq!(m.state().coins.count(), 0);
        assert!(!m.state().spin_locked);
        assert!(m.state().last_spin.is_none());
        assert_eq!(m.state().history.len(), before + 1);
        assert!(matches!(
            m.state().history.entries().last(),
            Some(HistoryEntry::Reset { .. })
        ));
    }

    #[test]
    fn locked_state_resumes_locked() {
        let state = MachineState {
            spin_locked: true,
            ..MachineState::default()
        };
        let mut m = SlotMachine::with_state(Catalog::standard(), MachineConfig::default(), state);
        assert!(matches!(m.spin(), Err(MachineError::SpinLocked)));
    }

    #[test]
    fn seeded_machines_agree() {
        let mut a = machine();
        let mut b = machine();
        assert_eq!(
            a.spin().unwrap().result.outcome,
            b.spin().unwrap().result.outcome
        );
    }

    #[test]
    fn simulate_tallies() {
        let mut m = machine();
        let report = m.simulate(0.5, 100_000).unwrap();
        assert_eq!(report.draws, 100_000);
        assert_eq!(report.counts.len(), 13);
        assert_eq!(report.counts.iter().map(|(_, c)| c).sum::<u64>(), 100_000);
        assert_eq!(report.counts[0].1, report.favorable);
        assert!((report.favorable_rate() - 0.5).abs() < 0.01);
        assert!(m.state().history.is_empty());
    }

    #[test]
    fn simulate_rejects_bad_probability() {
        let mut m = machine();
        assert!(matches!(
            m.simulate(1.5, 10),
            Err(MachineError::InvalidProbability(_))
        ));
        assert!(m.simulate(f64::NAN, 10).is_err());
    }

    #[test]
    fn simulate_zero_draws() {
        let mut m = machine();
        let report = m.simulate(0.3, 0).unwrap();
        assert_eq!(report.favorable_rate(), 0.0);
    }

    #[test]
    fn single_outcome_catalog_always_lands() {
        let catalog = Catalog::new(Outcome::new("OK", "Okay", "Fine"), Vec::new()).unwrap();
        let mut m = SlotMachine::new(catalog, MachineConfig::default().with_seed(1));
        let report = m.spin().unwrap();
        assert!(report.favorable);
        assert_eq!(report.reels.final_glyphs(), &['O', 'K', 'K']);
    }
}
