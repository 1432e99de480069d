//! Lookup Service
//!
//! Ties the parser, matcher and presentation together behind one call so the
//! CLI and the HTTP server answer identically.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use section_core::lookup::SectionLookup;
//! use section_core::matcher::MatchPolicy;
//! use section_core::sample::sample_database;
//!
//! let lookup = SectionLookup::new(Arc::new(sample_database()), MatchPolicy::FirstMatch);
//! let outcome = lookup.lookup("uc, 356x406x1299").unwrap();
//! assert_eq!(outcome.kind, "UC");
//! assert!(outcome.properties.contains_key("Izz (cm4)"));
//! ```

use std::sync::Arc;

use crate::built_up::{is_h_section_query, HSection, H_SECTION_KIND};
use crate::config::LookupConfig;
use crate::designation::{parse_designation, Designation};
use crate::errors::SectionResult;
use crate::loader::load_database;
use crate::matcher::{find_section, variants, MatchPolicy};
use crate::presentation::{properties, LookupOutcome};
use crate::table::SectionDatabase;

/// Read-only lookup context shared across requests
#[derive(Debug, Clone)]
pub struct SectionLookup {
    db: Arc<SectionDatabase>,
    policy: MatchPolicy,
}

impl SectionLookup {
    pub fn new(db: Arc<SectionDatabase>, policy: MatchPolicy) -> Self {
        Self { db, policy }
    }

    /// Load both tables named by `config`; fails if either cannot be read
    pub fn from_config(config: &LookupConfig) -> SectionResult<Self> {
        let db = load_database(&config.uc_path(), &config.ub_path())?;
        Ok(Self::new(Arc::new(db), config.match_policy))
    }

    pub fn database(&self) -> &SectionDatabase {
        &self.db
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Answer a free-form query (`"uc 356x406"`, `"h 300x150x20x10"`, ...)
    pub fn lookup(&self, input: &str) -> SectionResult<LookupOutcome> {
        if is_h_section_query(input) {
            let section = HSection::parse(input)?;
            return Ok(LookupOutcome {
                kind: H_SECTION_KIND.to_string(),
                section: section.label(),
                properties: section.properties(),
                variants: Vec::new(),
            });
        }

        let designation = parse_designation(input)?;
        self.lookup_designation(&designation)
    }

    /// Resolve an already parsed rolled-section designation
    pub fn lookup_designation(&self, designation: &Designation) -> SectionResult<LookupOutcome> {
        let Designation { section_type, key } = *designation;
        let row = find_section(&self.db, section_type, &key, self.policy)?;

        Ok(LookupOutcome {
            kind: section_type.code().to_string(),
            section: row.designation.clone(),
            properties: properties(row),
            variants: variants(&self.db, section_type, &key)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}
