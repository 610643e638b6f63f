pub mod catalog;
pub mod coin;
pub mod history;
pub mod odds;
pub mod profile;
pub mod reset;
pub mod simulate;
pub mod spin;
pub mod status;
pub mod unlock;

use std::path::PathBuf;

use cap_core::Catalog;
use cap_machine::{MachineConfig, MachineError, MachineState, SlotMachine};

/// Options shared by every command.
pub struct Context {
    /// Machine state file.
    pub state_path: PathBuf,
    /// RNG seed.
    pub seed: Option<u64>,
    /// Custom catalog file.
    pub catalog: Option<PathBuf>,
}

impl Context {
    /// The catalog to play with: the custom file if given, else the standard one.
    fn load_catalog(&self) -> Result<Catalog, String> {
        SlotMachine::load_catalog(self.catalog.as_deref()).map_err(|e| self.catalog_error(&e))
    }

    fn catalog_error(&self, e: &MachineError) -> String {
        match &self.catalog {
            Some(path) => format!("failed to load catalog {}: {e}", path.display()),
            None => e.to_string(),
        }
    }

    /// Default machine configuration with the seed applied.
    fn config(&self) -> MachineConfig {
        let config = MachineConfig::default();
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Load the stored state into a machine.
fn open_machine(ctx: &Context) -> Result<SlotMachine, String> {
    open_machine_with(ctx, ctx.config())
}

/// Load the stored state into a machine with a custom configuration.
fn open_machine_with(ctx: &Context, config: MachineConfig) -> Result<SlotMachine, String> {
    tracing::debug!(
        state = %ctx.state_path.display(),
        catalog = ?ctx.catalog,
        seed = ?config.seed,
        reels = config.reel_count,
        "opening machine"
    );
    let state = MachineState::load(&ctx.state_path);
    SlotMachine::from_catalog_path(ctx.catalog.as_deref(), config, state)
        .map_err(|e| ctx.catalog_error(&e))
}

/// Persist the machine's state.
fn save_machine(ctx: &Context, machine: SlotMachine) -> Result<(), String> {
    tracing::debug!(state = %ctx.state_path.display(), "saving machine");
    machine
        .into_state()
        .save(&ctx.state_path)
        .map_err(|e| e.to_string())
}

/// Format a probability as a percentage.
fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Format a signed point delta.
fn signed(points: f64) -> String {
    if points > 0.0 {
        format!("+{points}")
    } else {
        format!("{points}")
    }
}
