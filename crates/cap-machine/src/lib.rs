//! The capslot slot machine.
//!
//! Wraps the outcome selector with persisted machine state (profile, coins,
//! spin lock, last spin), a reel plan that turns a chosen outcome into reel
//! glyphs and stop times, and a spin history with export.

pub mod config;
pub mod error;
pub mod history;
pub mod machine;
pub mod reels;
pub mod state;

pub use config::MachineConfig;
pub use error::{MachineError, MachineResult};
pub use history::{HistoryEntry, SpinLog};
pub use machine::{SimulationReport, SlotMachine, SpinReport};
pub use reels::ReelPlan;
pub use state::MachineState;
