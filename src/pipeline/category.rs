//! Education category normalization
//!
//! Raw education labels in the source are free text ("SMA UMUM",
//! "Tidak/Belum Tamat SD", "Akademi Kebidanan", ...). Every label is folded
//! into one of five canonical education levels, the `UNKNOWN` fallback, or an
//! uppercased pass-through for text no pattern recognizes.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One of the five canonical education levels used throughout the pipeline.
///
/// Variant order is the fixed display order of pivot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EducationLevel {
    SdKeBawah,
    Sd,
    Smp,
    Sma,
    DiplomaUniv,
}

/// The fixed canonical order of education levels.
pub const CANONICAL_LEVELS: [EducationLevel; 5] = [
    EducationLevel::SdKeBawah,
    EducationLevel::Sd,
    EducationLevel::Smp,
    EducationLevel::Sma,
    EducationLevel::DiplomaUniv,
];

/// Substring patterns, longest first.
///
/// Matching takes the first pattern contained in the uppercased label, so a
/// longer pattern must come before any shorter pattern it contains
/// ("SD KE BAWAH" before "SD"). Equal-length patterns keep their source order.
pub const EDUCATION_PATTERNS: [(&str, EducationLevel); 9] = [
    ("TIDAK/BELUM PERNAH SEKOLAH", EducationLevel::SdKeBawah),
    ("TIDAK/BELUM TAMAT SD", EducationLevel::SdKeBawah),
    ("SD KE BAWAH", EducationLevel::SdKeBawah),
    ("UNIVERSITAS", EducationLevel::DiplomaUniv),
    ("DIPLOMA", EducationLevel::DiplomaUniv),
    ("AKADEMI", EducationLevel::DiplomaUniv),
    ("SMA", EducationLevel::Sma),
    ("SMP", EducationLevel::Smp),
    ("SD", EducationLevel::Sd),
];

/// Text the loader substitutes for a missing education value.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

impl EducationLevel {
    /// Label as it appears in the source data and in exports.
    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::SdKeBawah => "SD KE BAWAH",
            EducationLevel::Sd => "SD",
            EducationLevel::Smp => "SMP",
            EducationLevel::Sma => "SMA",
            EducationLevel::DiplomaUniv => "DIPLOMA/UNIV",
        }
    }

    /// Identifier form (`SD_KE_BAWAH`, `DIPLOMA_UNIV`, ...).
    pub fn code(self) -> &'static str {
        match self {
            EducationLevel::SdKeBawah => "SD_KE_BAWAH",
            EducationLevel::Sd => "SD",
            EducationLevel::Smp => "SMP",
            EducationLevel::Sma => "SMA",
            EducationLevel::DiplomaUniv => "DIPLOMA_UNIV",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EducationLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl FromStr for EducationLevel {
    type Err = String;

    /// Accepts either the label (`DIPLOMA/UNIV`) or the code (`DIPLOMA_UNIV`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        CANONICAL_LEVELS
            .iter()
            .copied()
            .find(|level| level.label() == wanted || level.code() == wanted)
            .ok_or_else(|| {
                format!(
                    "'{}' is not an education level. Expected one of: {}",
                    s.trim(),
                    CANONICAL_LEVELS
                        .iter()
                        .map(|l| l.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// The category a cleaned record is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EducationCategory {
    /// A recognized canonical level
    Level(EducationLevel),
    /// Missing or non-text education value
    Unknown,
    /// Unrecognized text, kept uppercased
    Other(String),
}

impl EducationCategory {
    /// The canonical level, if this category is one.
    pub fn level(&self) -> Option<EducationLevel> {
        match self {
            EducationCategory::Level(level) => Some(*level),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EducationCategory::Level(level) => level.label(),
            EducationCategory::Unknown => UNKNOWN_LABEL,
            EducationCategory::Other(text) => text,
        }
    }
}

impl fmt::Display for EducationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EducationCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Normalize a raw education label into exactly one category.
///
/// Absent values, blank text and the literal `UNKNOWN` fill value map to
/// [`EducationCategory::Unknown`]. Text matching no pattern is returned
/// uppercased as [`EducationCategory::Other`].
pub fn normalize_education(raw: Option<&str>) -> EducationCategory {
    let Some(raw) = raw else {
        return EducationCategory::Unknown;
    };

    let upper = raw.to_uppercase();
    if let Some((_, level)) = EDUCATION_PATTERNS
        .iter()
        .find(|(pattern, _)| upper.contains(pattern))
    {
        return EducationCategory::Level(*level);
    }

    let trimmed = upper.trim();
    if trimmed.is_empty() || trimmed == UNKNOWN_LABEL {
        EducationCategory::Unknown
    } else {
        EducationCategory::Other(upper)
    }
}

/// Parse a comma-separated list of education levels, dropping duplicates.
pub fn parse_levels(list: &str) -> Result<Vec<EducationLevel>, String> {
    let mut levels = Vec::new();
    for part in list.split(',').filter(|p| !p.trim().is_empty()) {
        let level: EducationLevel = part.parse()?;
        if !levels.contains(&level) {
            levels.push(level);
        }
    }
    Ok(levels)
}
