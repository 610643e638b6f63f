//! Player profiles and the bonus tables they map into.
//!
//! Profile fields arrive as raw strings from an external store. Each field
//! is parsed on lookup; a missing or unrecognized value contributes no
//! adjustment. The deltas are in percentage points.

use serde::{Deserialize, Serialize};

/// Normalize a raw profile value for matching.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Highest completed education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    /// No formal schooling (-40).
    BelowKindergarten,
    /// Kindergarten (-30).
    Kindergarten,
    /// Elementary school (-20).
    ElementarySchool,
    /// Middle school (-12).
    MiddleSchool,
    /// High school diploma (-5).
    HighSchool,
    /// Associate degree (-2).
    Associate,
    /// Bachelor's degree (0).
    Bachelor,
    /// Master's degree (+6).
    Master,
    /// Doctorate (+5).
    PhD,
}

impl EducationLevel {
    /// Parse an education level from a stored string.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "below kindergarten" | "none" => Some(Self::BelowKindergarten),
            "kindergarten" => Some(Self::Kindergarten),
            "elementary school" | "elementary" | "primary school" => {
                Some(Self::ElementarySchool)
            }
            "middle school" | "middle" => Some(Self::MiddleSchool),
            "high school" => Some(Self::HighSchool),
            "associate" | "associate degree" => Some(Self::Associate),
            "bachelor" | "bachelors" | "bachelor's" | "bachelor degree" => Some(Self::Bachelor),
            "master" | "masters" | "master's" | "master degree" => Some(Self::Master),
            "phd" | "ph.d." | "doctorate" => Some(Self::PhD),
            _ => None,
        }
    }

    /// Probability adjustment in percentage points.
    pub fn delta(self) -> i32 {
        match self {
            Self::BelowKindergarten => -40,
            Self::Kindergarten => -30,
            Self::ElementarySchool => -20,
            Self::MiddleSchool => -12,
            Self::HighSchool => -5,
            Self::Associate => -2,
            Self::Bachelor => 0,
            Self::Master => 6,
            Self::PhD => 5,
        }
    }

    /// All education levels, lowest first.
    pub fn all() -> &'static [Self] {
        &[
            Self::BelowKindergarten,
            Self::Kindergarten,
            Self::ElementarySchool,
            Self::MiddleSchool,
            Self::HighSchool,
            Self::Associate,
            Self::Bachelor,
            Self::Master,
            Self::PhD,
        ]
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelowKindergarten => write!(f, "Below Kindergarten"),
            Self::Kindergarten => write!(f, "Kindergarten"),
            Self::ElementarySchool => write!(f, "Elementary School"),
            Self::MiddleSchool => write!(f, "Middle School"),
            Self::HighSchool => write!(f, "High School"),
            Self::Associate => write!(f, "Associate"),
            Self::Bachelor => write!(f, "Bachelor"),
            Self::Master => write!(f, "Master"),
            Self::PhD => write!(f, "PhD"),
        }
    }
}

/// Prevailing wage level, L1 (entry) through L5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WageLevel {
    /// Entry level (-2).
    L1,
    /// Qualified (+1).
    L2,
    /// Experienced (+4).
    L3,
    /// Fully competent (+7).
    L4,
    /// Top of scale (+10).
    L5,
}

impl WageLevel {
    /// Parse a wage level ("L3", "level 3", "3").
    pub fn parse(s: &str) -> Option<Self> {
        let norm = normalize(s);
        let digits = norm
            .strip_prefix("level")
            .or_else(|| norm.strip_prefix('l'))
            .unwrap_or(&norm)
            .trim();
        match digits {
            "1" | "i" => Some(Self::L1),
            "2" | "ii" => Some(Self::L2),
            "3" | "iii" => Some(Self::L3),
            "4" | "iv" => Some(Self::L4),
            "5" | "v" => Some(Self::L5),
            _ => None,
        }
    }

    /// Probability adjustment in percentage points.
    pub fn delta(self) -> i32 {
        match self {
            Self::L1 => -2,
            Self::L2 => 1,
            Self::L3 => 4,
            Self::L4 => 7,
            Self::L5 => 10,
        }
    }

    /// All wage levels, lowest first.
    pub fn all() -> &'static [Self] {
        &[Self::L1, Self::L2, Self::L3, Self::L4, Self::L5]
    }
}

impl std::fmt::Display for WageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::L3 => write!(f, "L3"),
            Self::L4 => write!(f, "L4"),
            Self::L5 => write!(f, "L5"),
        }
    }
}

/// Broad occupation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupationCategory {
    /// Science, technology, engineering, mathematics (+5).
    Stem,
    /// Healthcare (+3).
    Healthcare,
    /// Business and finance (+2).
    Business,
    /// Teaching and research (+1).
    Education,
    /// Arts and media (0).
    Arts,
    /// Anything else (0).
    Other,
}

impl OccupationCategory {
    /// Parse an occupation category from a stored string.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "stem" => Some(Self::Stem),
            "healthcare" | "health care" | "health" => Some(Self::Healthcare),
            "business" | "finance" => Some(Self::Business),
            "education" | "teaching" => Some(Self::Education),
            "arts" | "art" | "media" => Some(Self::Arts),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Probability adjustment in percentage points.
    pub fn delta(self) -> i32 {
        match self {
            Self::Stem => 5,
            Self::Healthcare => 3,
            Self::Business => 2,
            Self::Education => 1,
            Self::Arts | Self::Other => 0,
        }
    }

    /// All categories.
    pub fn all() -> &'static [Self] {
        &[
            Self::Stem,
            Self::Healthcare,
            Self::Business,
            Self::Education,
            Self::Arts,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for OccupationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stem => write!(f, "STEM"),
            Self::Healthcare => write!(f, "Healthcare"),
            Self::Business => write!(f, "Business"),
            Self::Education => write!(f, "Education"),
            Self::Arts => write!(f, "Arts"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A player profile as read from the external store.
///
/// Fields hold the raw stored strings. Typed views are parsed on demand so
/// that an unrecognized value round-trips through the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Highest completed education.
    #[serde(default)]
    pub education: Option<String>,
    /// Prevailing wage level.
    #[serde(default)]
    pub wage_level: Option<String>,
    /// Occupation category.
    #[serde(default)]
    pub occupation: Option<String>,
}

impl PlayerProfile {
    /// An empty profile (no adjustments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the education field.
    pub fn with_education(mut self, value: impl Into<String>) -> Self {
        self.education = Some(value.into());
        self
    }

    /// Set the wage level field.
    pub fn with_wage_level(mut self, value: impl Into<String>) -> Self {
        self.wage_level = Some(value.into());
        self
    }

    /// Set the occupation field.
    pub fn with_occupation(mut self, value: impl Into<String>) -> Self {
        self.occupation = Some(value.into());
        self
    }

    /// Parsed education level, if recognized.
    pub fn education_level(&self) -> Option<EducationLevel> {
        self.education.as_deref().and_then(EducationLevel::parse)
    }

    /// Parsed wage level, if recognized.
    pub fn wage(&self) -> Option<WageLevel> {
        self.wage_level.as_deref().and_then(WageLevel::parse)
    }

    /// Parsed occupation category, if recognized.
    pub fn occupation_category(&self) -> Option<OccupationCategory> {
        self.occupation.as_deref().and_then(OccupationCategory::parse)
    }

    /// Education adjustment in points (0 when missing or unrecognized).
    pub fn education_delta(&self) -> i32 {
        self.education_level().map_or(0, EducationLevel::delta)
    }

    /// Wage adjustment in points (0 when missing or unrecognized).
    pub fn wage_delta(&self) -> i32 {
        self.wage().map_or(0, WageLevel::delta)
    }

    /// Occupation adjustment in points (0 when missing or unrecognized).
    pub fn occupation_delta(&self) -> i32 {
        self.occupation_category()
            .map_or(0, OccupationCategory::delta)
    }
}
