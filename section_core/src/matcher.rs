//! Row Matching
//!
//! Finds the row(s) of a [`SectionTable`] whose depth x width equals a parsed
//! [`DesignationKey`]. Mass never narrows the candidate set.
//!
//! ## Tie-break contract
//!
//! Several rows share a depth x width when a serial size is rolled in more
//! than one mass (UC 356x406 comes in 1299, 1086, 951, ... kg/m). Under the
//! default [`MatchPolicy::FirstMatch`] the first candidate in table order wins.
//! [`MatchPolicy::PreferMass`] picks the candidate whose mass equals the one
//! supplied in the key and otherwise falls back to the first candidate.

use serde::{Deserialize, Serialize};

use crate::designation::{DesignationKey, SectionType};
use crate::errors::{SectionError, SectionResult};
use crate::table::{SectionDatabase, SectionRow, SectionTable};

/// How to choose between rows sharing a depth x width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First candidate in table order
    #[default]
    FirstMatch,
    /// Candidate with the requested mass, else the first candidate
    PreferMass,
}

impl MatchPolicy {
    /// Parse from a config value ("first_match", "prefer_mass")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_match" | "first" => Some(MatchPolicy::FirstMatch),
            "prefer_mass" | "mass" => Some(MatchPolicy::PreferMass),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::FirstMatch => write!(f, "first_match"),
            MatchPolicy::PreferMass => write!(f, "prefer_mass"),
        }
    }
}

/// Every row with the key's depth x width, in table order
pub fn match_rows<'a>(table: &'a SectionTable, key: &DesignationKey) -> Vec<&'a SectionRow> {
    table.iter().filter(|row| row.key.same_size(key)).collect()
}

/// Resolve a parsed designation to a single row
///
/// Fails with [`SectionError::NotFound`] when no row in the selected table has
/// the key's depth x width. The error names that serial size without the mass.
pub fn find_section<'a>(
    db: &'a SectionDatabase,
    section_type: SectionType,
    key: &DesignationKey,
    policy: MatchPolicy,
) -> SectionResult<&'a SectionRow> {
    let candidates = match_rows(db.table(section_type), key);

    let chosen = match (policy, key.mass) {
        (MatchPolicy::PreferMass, Some(mass)) => candidates
            .iter()
            .find(|row| row.mass() == Some(mass))
            .or_else(|| candidates.first()),
        _ => candidates.first(),
    };

    match chosen {
        Some(row) => {
            tracing::debug!(
                section_type = %section_type,
                key = %key,
                designation = %row.designation,
                candidates = candidates.len(),
                "matched section"
            );
            Ok(*row)
        }
        None => Err(SectionError::not_found(section_type, key.without_mass())),
    }
}

/// Designations of every row sharing the key's depth x width
pub fn variants<'a>(db: &'a SectionDatabase, section_type: SectionType, key: &DesignationKey) -> Vec<&'a str> {
    match_rows(db.table(section_type), key)
        .into_iter()
        .map(|row| row.designation.as_str())
        .collect()
}
