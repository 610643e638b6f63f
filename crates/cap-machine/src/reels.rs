//! Reel layout and stop timing.
//!
//! Each reel shows one character of the chosen outcome's code. While a reel
//! spins it cycles through random glyphs drawn from the catalog's alphabet.
//! Reels stop left to right with a randomized stagger.

use rand::Rng;
use rand::seq::IndexedRandom;

use cap_core::Catalog;

use crate::config::MachineConfig;

/// Glyph shown on an idle reel.
pub const DEFAULT_GLYPH: char = '$';

/// Glyph used to pad reels when the code is empty.
pub const BLANK_GLYPH: char = '-';

/// The distinct characters of every outcome code, in first-appearance order.
pub fn glyph_alphabet(catalog: &Catalog) -> Vec<char> {
    let mut alphabet = Vec::new();
    for ch in catalog.outcomes().flat_map(|o| o.code.chars()) {
        if !alphabet.contains(&ch) {
            alphabet.push(ch);
        }
    }
    alphabet
}

/// The glyphs each reel lands on for a code.
///
/// Codes longer than the reel count are truncated. Shorter codes are padded
/// by repeating their last character.
pub fn final_glyphs(code: &str, reel_count: usize) -> Vec<char> {
    let mut glyphs: Vec<char> = code.chars().take(reel_count).collect();
    while glyphs.len() < reel_count {
        glyphs.push(glyphs.last().copied().unwrap_or(BLANK_GLYPH));
    }
    glyphs
}

/// Glyphs of a machine at rest.
pub fn idle_glyphs(reel_count: usize) -> Vec<char> {
    vec![DEFAULT_GLYPH; reel_count]
}

/// Render a row of reels as `[ H ][ 1 ][ B ]`.
pub fn render_reels(glyphs: &[char]) -> String {
    glyphs.iter().map(|g| format!("[ {g} ]")).collect()
}

/// The landing glyphs and stop times for one spin.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelPlan {
    final_glyphs: Vec<char>,
    stop_times_ms: Vec<u64>,
    alphabet: Vec<char>,
    tick_ms: u64,
}

impl ReelPlan {
    /// Plan a spin that lands on `code`.
    ///
    /// Reel `i` stops at `base + i * delay + U[0, 1) * delay` milliseconds.
    pub fn new<R: Rng + ?Sized>(
        code: &str,
        alphabet: &[char],
        config: &MachineConfig,
        rng: &mut R,
    ) -> Self {
        let final_glyphs = final_glyphs(code, config.reel_count);
        let delay = config.reel_delay_ms;
        let stop_times_ms = (0..final_glyphs.len() as u64)
            .map(|index| {
                let jitter = (rng.random::<f64>() * delay as f64) as u64;
                config.base_spin_ms + index * delay + jitter
            })
            .collect();
        Self {
            final_glyphs,
            stop_times_ms,
            alphabet: alphabet.to_vec(),
            tick_ms: config.tick_ms.max(1),
        }
    }

    /// The glyphs the reels land on.
    pub fn final_glyphs(&self) -> &[char] {
        &self.final_glyphs
    }

    /// Stop time of each reel in milliseconds from the start of the spin.
    pub fn stop_times_ms(&self) -> &[u64] {
        &self.stop_times_ms
    }

    /// Time at which the last reel stops.
    pub fn duration_ms(&self) -> u64 {
        self.stop_times_ms.iter().copied().max().unwrap_or(0)
    }

    /// Whether reel `index` has stopped at time `t_ms`.
    pub fn is_stopped(&self, index: usize, t_ms: u64) -> bool {
        self.stop_times_ms.get(index).is_none_or(|stop| t_ms >= *stop)
    }

    /// The glyphs visible at time `t_ms`.
    pub fn frame_at<R: Rng + ?Sized>(&self, t_ms: u64, rng: &mut R) -> Vec<char> {
        self.final_glyphs
            .iter()
            .enumerate()
            .map(|(index, glyph)| {
                if self.is_stopped(index, t_ms) {
                    *glyph
                } else {
                    self.alphabet.choose(rng).copied().unwrap_or(DEFAULT_GLYPH)
                }
            })
            .collect()
    }

    /// Frame times from the start of the spin up to the last stop.
    pub fn ticks(&self) -> impl Iterator<Item = u64> {
        let duration = self.duration_ms();
        let tick = self.tick_ms;
        (0..)
            .map(move |n: u64| n * tick)
            .take_while(move |t| *t < duration)
            .chain(std::iter::once(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn alphabet_is_distinct_in_order() {
        let alphabet = glyph_alphabet(&Catalog::standard());
        assert_eq!(&alphabet[..3], &['H', '1', 'B']);
        let mut sorted = alphabet.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), alphabet.len());
        assert!(alphabet.contains(&'G'));
    }

    #[test]
    fn final_glyphs_exact() {
        assert_eq!(final_glyphs("H1B", 3), vec!['H', '1', 'B']);
    }

    #[test]
    fn final_glyphs_pad_with_last() {
        assert_eq!(final_glyphs("OK", 4), vec!['O', 'K', 'K', 'K']);
    }

    #[test]
    fn final_glyphs_truncate() {
        assert_eq!(final_glyphs("ABCDE", 2), vec!['A', 'B']);
    }

    #[test]
    fn final_glyphs_empty_code() {
        assert_eq!(final_glyphs("", 3), vec!['-', '-', '-']);
    }

    #[test]
    fn render_row() {
        assert_eq!(render_reels(&['H', '1', 'B']), "[ H ][ 1 ][ B ]");
        assert_eq!(render_reels(&idle_glyphs(2)), "[ $ ][ $ ]");
    }

    #[test]
    fn stop_times_respect_bounds() {
        let config = MachineConfig::default();
        let alphabet = glyph_alphabet(&Catalog::standard());
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let plan = ReelPlan::new("RFE", &alphabet, &config, &mut rng);
            for (i, stop) in plan.stop_times_ms().iter().enumerate() {
                let lower = config.base_spin_ms + i as u64 * config.reel_delay_ms;
                assert!(*stop >= lower, "reel {i} stopped at {stop}");
                assert!(*stop < lower + config.reel_delay_ms, "reel {i} stopped at {stop}");
            }
        }
    }

    #[test]
    fn frames_settle_on_final_glyphs() {
        let config = MachineConfig::default();
        let alphabet = glyph_alphabet(&Catalog::standard());
        let mut rng = StdRng::seed_from_u64(9);
        let plan = ReelPlan::new("DEN", &alphabet, &config, &mut rng);

        let early = plan.frame_at(0, &mut rng);
        assert_eq!(early.len(), 3);
        assert!(early.iter().all(|g| alphabet.contains(g)));

        let last = plan.frame_at(plan.duration_ms(), &mut rng);
        assert_eq!(last, vec!['D', 'E', 'N']);
    }

    #[test]
    fn first_reel_stops_before_last() {
        let config = MachineConfig::default();
        let mut rng = StdRng::seed_from_u64(10);
        let plan = ReelPlan::new("QUE", &['Q', 'U', 'E'], &config, &mut rng);
        let first_stop = plan.stop_times_ms()[0];
        assert!(plan.is_stopped(0, first_stop));
        assert!(!plan.is_stopped(2, first_stop));
        assert_eq!(plan.frame_at(first_stop, &mut rng)[0], 'Q');
    }

    #[test]
    fn ticks_end_at_duration() {
        let config = MachineConfig::default().with_timing(100, 50, 40);
        let mut rng = StdRng::seed_from_u64(12);
        let plan = ReelPlan::new("H1B", &['H'], &config, &mut rng);
        let ticks: Vec<u64> = plan.ticks().collect();
        assert_eq!(ticks.first(), Some(&0));
        assert_eq!(ticks.last(), Some(&plan.duration_ms()));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_alphabet_spins_default_glyph() {
        let config = MachineConfig::default();
        let mut rng = StdRng::seed_from_u64(13);
        let plan = ReelPlan::new("AB", &[], &config, &mut rng);
        assert_eq!(plan.frame_at(0, &mut rng), vec!['$', '$', '$']);
    }
}
