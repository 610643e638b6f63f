//! Persisted machine state.
//!
//! The state file is plain JSON. Reading it never fails: a missing file is
//! a fresh machine, and every malformed field falls back to its neutral
//! value independently of the others.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use cap_core::{CoinBalance, PlayerProfile, SpinResult};

use crate::error::{MachineError, MachineResult};
use crate::history::{HistoryEntry, SpinLog};

/// Everything the machine remembers between runs.
///
/// Reading goes through [`MachineState::from_value`] only, so a stored file
/// is never rejected as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MachineState {
    /// Player profile.
    pub profile: PlayerProfile,
    /// Accumulated coins.
    pub coins: CoinBalance,
    /// Set once a spin completes; blocks further spins until cleared.
    pub spin_locked: bool,
    /// The most recent spin.
    pub last_spin: Option<SpinResult>,
    /// Event history.
    pub history: SpinLog,
}

/// Rebuild the history entry by entry, dropping only the malformed ones.
fn history_from_value(value: &Value) -> SpinLog {
    let mut log = SpinLog::new();
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            tracing::warn!("history is not a list, starting empty");
        }
        return log;
    };
    let mut skipped = 0usize;
    for item in items {
        match serde_json::from_value::<HistoryEntry>(item.clone()) {
            Ok(entry) => log.append(entry),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, kept = log.len(), "dropped malformed history entries");
    }
    log
}

impl MachineState {
    /// Create a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from an arbitrary JSON value, field by field.
    pub fn from_value(value: &Value) -> Self {
        static NULL: Value = Value::Null;
        let field = |name: &str| value.get(name).unwrap_or(&NULL);

        let profile_value = field("profile");
        let text = |name: &str| {
            profile_value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let profile = PlayerProfile {
            education: text("education"),
            wage_level: text("wage_level"),
            occupation: text("occupation"),
        };

        let spin_locked = match field("spin_locked") {
            Value::Bool(b) => *b,
            Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
            Value::Number(n) => n.as_i64() == Some(1),
            _ => false,
        };

        Self {
            profile,
            coins: CoinBalance::from_json(field("coins")),
            spin_locked,
            last_spin: serde_json::from_value(field("last_spin").clone()).unwrap_or(None),
            history: history_from_value(field("history")),
        }
    }

    /// Parse a state from JSON text. Unparseable text gives a fresh state.
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!(error = %e, "state is not valid JSON, starting fresh");
                Self::default()
            }
        }
    }

    /// Load the state file at `path`.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let state = Self::from_json_str(&json);
                tracing::debug!(path = %path.display(), coins = state.coins.count(), locked = state.spin_locked, "state loaded");
                state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "state unreadable, starting fresh");
                Self::default()
            }
        }
    }

    /// Write the state to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> MachineResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        let io_err = |source: std::io::Error| MachineError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_is_fresh() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = MachineState::load(&dir.path().join("nope.json"));
        assert_eq!(state, MachineState::default());
    }

    #[test]
    fn garbage_file_is_fresh() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{{{ not json").unwrap();
        assert_eq!(MachineState::load(&path), MachineState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = MachineState {
            profile: PlayerProfile::new().with_education("PhD"),
            coins: CoinBalance::new(3),
            spin_locked: true,
            ..MachineState::default()
        };
        state.save(&path).unwrap();
        assert_eq!(MachineState::load(&path), state);
    }

    #[test]
    fn malformed_fields_degrade_independently() {
        let value = json!({
            "profile": {"education": "Master", "wage_level": 42, "occupation": null},
            "coins": "many",
            "spin_locked": "1",
            "last_spin": {"outcome": "broken"},
            "history": "nope"
        });
        let state = MachineState::from_value(&value);
        assert_eq!(state.profile.education.as_deref(), Some("Master"));
        assert!(state.profile.wage_level.is_none());
        assert!(state.profile.occupation.is_none());
        assert_eq!(state.coins.count(), 0);
        assert!(state.spin_locked);
        assert!(state.last_spin.is_none());
        assert!(state.history.is_empty());
    }

    #[test]
    fn malformed_history_entries_are_skipped_individually() {
        let value = json!({
            "history": [
                {"kind": "coin_inserted", "balance": 1, "timestamp": "2023-11-14T22:13:20Z"},
                {"kind": "spin", "code": "RFE"},
                "garbage",
                {"kind": "unlocked", "timestamp": "2023-11-14T22:13:21Z"}
            ]
        });
        let state = MachineState::from_value(&value);
        assert_eq!(state.history.len(), 2);
        assert!(matches!(
            state.history.entries()[0],
            HistoryEntry::CoinInserted { balance: 1, .. }
        ));
        assert!(matches!(
            state.history.entries()[1],
            HistoryEntry::Unlocked { .. }
        ));
    }

    #[test]
    fn history_survives_a_bad_entry_across_save() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"history": [
                {"kind": "reset", "timestamp": "2023-11-14T22:13:20Z"},
                {"kind": "bogus"}
            ]}"#,
        )
        .unwrap();
        MachineState::load(&path).save(&path).unwrap();
        let reloaded = MachineState::load(&path);
        assert_eq!(reloaded.history.len(), 1);
    }

    #[test]
    fn negative_coins_load_as_zero_and_keep_other_fields() {
        let state = MachineState::from_json_str(
            r#"{"coins": -1, "spin_locked": true, "profile": {"education": "PhD"}}"#,
        );
        assert_eq!(state.coins.count(), 0);
        assert!(state.spin_locked);
        assert_eq!(state.profile.education.as_deref(), Some("PhD"));
    }

    #[test]
    fn coins_accept_numeric_strings_and_clamp_negatives() {
        assert_eq!(MachineState::from_value(&json!({"coins": "4"})).coins.count(), 4);
        assert_eq!(MachineState::from_value(&json!({"coins": -9})).coins.count(), 0);
    }

    #[test]
    fn non_object_root_is_fresh() {
        assert_eq!(MachineState::from_value(&json!([1, 2, 3])), MachineState::default());
        assert_eq!(MachineState::from_json_str("42"), MachineState::default());
    }

    #[test]
    fn save_into_missing_parent_that_is_a_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = MachineState::default()
            .save(&blocker.join("state.json"))
            .unwrap_err();
        assert!(matches!(err, MachineError::Io { .. }));
    }
}
