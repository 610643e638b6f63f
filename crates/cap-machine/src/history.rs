//! Spin history and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the machine history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A completed spin.
    Spin {
        /// Outcome code.
        code: String,
        /// Outcome title.
        title: String,
        /// Win probability the outcome was drawn with.
        probability: f64,
        /// Coin balance at the time of the spin.
        coins: u32,
        /// Whether the favorable outcome came up.
        favorable: bool,
        /// When the spin completed.
        timestamp: DateTime<Utc>,
    },
    /// A coin was inserted.
    CoinInserted {
        /// Balance after insertion.
        balance: u32,
        /// When the coin was inserted.
        timestamp: DateTime<Utc>,
    },
    /// The player profile was changed.
    ProfileUpdated {
        /// New education value.
        education: Option<String>,
        /// New wage level value.
        wage_level: Option<String>,
        /// New occupation value.
        occupation: Option<String>,
        /// When the profile changed.
        timestamp: DateTime<Utc>,
    },
    /// The spin lock was cleared.
    Unlocked {
        /// When the lock was cleared.
        timestamp: DateTime<Utc>,
    },
    /// The machine state was reset.
    Reset {
        /// When the reset happened.
        timestamp: DateTime<Utc>,
    },
}

impl HistoryEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Spin { timestamp, .. }
            | Self::CoinInserted { timestamp, .. }
            | Self::ProfileUpdated { timestamp, .. }
            | Self::Unlocked { timestamp }
            | Self::Reset { timestamp } => *timestamp,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Spin {
                code,
                title,
                probability,
                coins,
                favorable,
                ..
            } => {
                let verdict = if *favorable { "WIN" } else { "loss" };
                format!(
                    "spin {code} ({title}) at {:.1}% with {coins} coin{}: {verdict}",
                    probability * 100.0,
                    if *coins == 1 { "" } else { "s" },
                )
            }
            Self::CoinInserted { balance, .. } => format!("coin inserted, balance {balance}"),
            Self::ProfileUpdated {
                education,
                wage_level,
                occupation,
                ..
            } => format!(
                "profile set: education={}, wage={}, occupation={}",
                education.as_deref().unwrap_or("-"),
                wage_level.as_deref().unwrap_or("-"),
                occupation.as_deref().unwrap_or("-"),
            ),
            Self::Unlocked { .. } => "spin lock cleared".to_string(),
            Self::Reset { .. } => "machine reset".to_string(),
        }
    }
}

/// A chronological log of machine events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinLog {
    entries: Vec<HistoryEntry>,
}

impl SpinLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over spin entries only.
    pub fn spins(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, HistoryEntry::Spin { .. }))
    }

    /// Number of spins that landed on the favorable outcome.
    pub fn favorable_count(&self) -> usize {
        self.spins()
            .filter(|e| matches!(e, HistoryEntry::Spin { favorable: true, .. }))
            .count()
    }

    /// Export the log as plain text, one line per entry.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Spin History\n============\n\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "{}  {}\n",
                entry.timestamp().format("%Y-%m-%d %H:%M:%S"),
                entry.describe()
            ));
        }
        out
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Spin History\n\n");
        for entry in &self.entries {
            let when = entry.timestamp().format("%Y-%m-%d %H:%M:%S");
            match entry {
                HistoryEntry::Spin {
                    code,
                    title,
                    probability,
                    favorable,
                    ..
                } => {
                    let verdict = if *favorable { "**WIN**" } else { "loss" };
                    out.push_str(&format!(
                        "- `{when}` **{code}** {title} ({:.1}%) {verdict}\n",
                        probability * 100.0
                    ));
                }
                other => {
                    out.push_str(&format!("- `{when}` *{}*\n", other.describe()));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn sample_log() -> SpinLog {
        let mut log = SpinLog::new();
        log.append(HistoryEntry::CoinInserted {
            balance: 1,
            timestamp: at(0),
        });
        log.append(HistoryEntry::Spin {
            code: "RFE".into(),
            title: "Request For Evidence".into(),
            probability: 0.165,
            coins: 1,
            favorable: false,
            timestamp: at(10),
        });
        log.append(HistoryEntry::Unlocked { timestamp: at(20) });
        log.append(HistoryEntry::Spin {
            code: "H1B".into(),
            title: "H-1B Specialty Occupation Visa".into(),
            probability: 0.99,
            coins: 5,
            favorable: true,
            timestamp: at(30),
        });
        log
    }

    #[test]
    fn empty_log() {
        let log = SpinLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.favorable_count(), 0);
    }

    #[test]
    fn counts() {
        let log = sample_log();
        assert_eq!(log.len(), 4);
        assert_eq!(log.spins().count(), 2);
        assert_eq!(log.favorable_count(), 1);
    }

    #[test]
    fn export_text() {
        insta::assert_snapshot!(sample_log().export_text(), @r"
        Spin History
        ============

        2023-11-14 22:13:20  coin inserted, balance 1
        2023-11-14 22:13:30  spin RFE (Request For Evidence) at 16.5% with 1 coin: loss
        2023-11-14 22:13:40  spin lock cleared
        2023-11-14 22:13:50  spin H1B (H-1B Specialty Occupation Visa) at 99.0% with 5 coins: WIN
        ");
    }

    #[test]
    fn export_markdown() {
        let md = sample_log().export_markdown();
        assert!(md.starts_with("# Spin History\n\n"));
        assert!(md.contains("**H1B** H-1B Specialty Occupation Visa (99.0%) **WIN**"));
        assert!(md.contains("*coin inserted, balance 1*"));
    }

    #[test]
    fn serde_round_trip() {
        let log = sample_log();
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"kind\":\"coin_inserted\""));
        let back: SpinLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
