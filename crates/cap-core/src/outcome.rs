//! Outcomes and the catalog they are drawn from.
//!
//! A catalog designates exactly one favorable outcome. Every other entry
//! belongs to the unfavorable pool, which is drawn from uniformly when the
//! favorable draw fails.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single slot machine outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Short identifier shown on the reels (e.g. "H1B").
    pub code: String,
    /// Display title.
    #[serde(rename = "full")]
    pub title: String,
    /// Display text.
    pub message: String,
}

impl Outcome {
    /// Create an outcome.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.title)
    }
}

/// Favorable entry of the standard visa catalog: `(code, title, message)`.
const STANDARD_FAVORABLE: (&str, &str, &str) = (
    "H1B",
    "H-1B Specialty Occupation Visa",
    "Congratulations. You have been validated.",
);

/// Unfavorable pool of the standard visa catalog.
const STANDARD_UNFAVORABLE: &[(&str, &str, &str)] = &[
    (
        "RFE",
        "Request For Evidence",
        "Please provide additional evidence of your existence.",
    ),
    (
        "PEN",
        "Pending Review Notice",
        "Your fate is currently under review by unseen parameters.",
    ),
    (
        "QUE",
        "Queue Placement Confirmation",
        "You are now 42,763rd in the national queue.",
    ),
    (
        "CAP",
        "Annual Cap Reached Notification",
        "Quota reached. Better luck next fiscal year.",
    ),
    (
        "LOS",
        "Lottery Outcome: System Loss",
        "System executed successfully. You didn't.",
    ),
    (
        "NOT",
        "Not Selected for Further Processing",
        "Thank you for participating in structured uncertainty.",
    ),
    (
        "DEN",
        "Denial of Petition",
        "We regret to inform you that luck remains a scarce resource.",
    ),
    (
        "EXP",
        "Expired Case Status",
        "Your status has expired while you were waiting.",
    ),
    (
        "REJ",
        "Rejection Due to Formal Error",
        "Your dream did not meet the required format.",
    ),
    (
        "OUT",
        "Out-of-Cap Notification",
        "Thank you for playing. Please exit the system.",
    ),
    (
        "FAI",
        "Failure of Random Allocation",
        "Failure successfully processed.",
    ),
    ("RNG", "Random Number Generator", "The algorithm has spoken."),
];

/// On-disk shape of a custom catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    favorable: Outcome,
    #[serde(default)]
    unfavorable: Vec<Outcome>,
}

/// An immutable catalog with one favorable outcome and an unfavorable pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    favorable: Outcome,
    unfavorable: Vec<Outcome>,
}

impl Catalog {
    /// Build a catalog, checking that codes are non-empty and unique.
    pub fn new(favorable: Outcome, unfavorable: Vec<Outcome>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for outcome in std::iter::once(&favorable).chain(&unfavorable) {
            if outcome.code.trim().is_empty() {
                return Err(CoreError::EmptyCode(outcome.title.clone()));
            }
            if !seen.insert(outcome.code.to_uppercase()) {
                return Err(CoreError::DuplicateCode(outcome.code.clone()));
            }
        }
        Ok(Self {
            favorable,
            unfavorable,
        })
    }

    /// The built-in visa lottery catalog.
    pub fn standard() -> Self {
        let (code, title, message) = STANDARD_FAVORABLE;
        Self {
            favorable: Outcome::new(code, title, message),
            unfavorable: STANDARD_UNFAVORABLE
                .iter()
                .map(|(code, title, message)| Outcome::new(*code, *title, *message))
                .collect(),
        }
    }

    /// Parse a catalog from JSON: `{"favorable": {...}, "unfavorable": [...]}`.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.favorable, file.unfavorable)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), outcomes = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The favorable outcome.
    pub fn favorable(&self) -> &Outcome {
        &self.favorable
    }

    /// The unfavorable pool.
    pub fn unfavorable(&self) -> &[Outcome] {
        &self.unfavorable
    }

    /// All outcomes, favorable first.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        std::iter::once(&self.favorable).chain(self.unfavorable.iter())
    }

    /// Total number of outcomes.
    pub fn len(&self) -> usize {
        1 + self.unfavorable.len()
    }

    /// Always false: a catalog holds at least the favorable outcome.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the given outcome is the favorable one.
    pub fn is_favorable(&self, outcome: &Outcome) -> bool {
        outcome.code == self.favorable.code
    }

    /// Look up an outcome by code (case-insensitive).
    pub fn find(&self, code: &str) -> Option<&Outcome> {
        let code = code.trim();
        self.outcomes().find(|o| o.code.eq_ignore_ascii_case(code))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
