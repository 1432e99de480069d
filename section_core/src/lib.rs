//! # section_core - UC/UB Steel Section Lookup
//!
//! `section_core` resolves human-entered designations such as `"uc 356x406"`
//! or `"ub,914x305x576"` against the published Universal Column and Universal
//! Beam property tables and returns the matching row as a property map.
//!
//! ## Design Philosophy
//!
//! - **Load once**: tables are read at startup and never mutated
//! - **Explicit context**: the [`SectionDatabase`] is passed in, never global
//! - **JSON-First**: properties come out as ordered `serde_json` maps
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::designation::parse_designation;
//! use section_core::matcher::{find_section, MatchPolicy};
//! use section_core::sample::sample_database;
//!
//! let db = sample_database();
//! let designation = parse_designation("uc 356x406").unwrap();
//! let row = find_section(&db, designation.section_type, &designation.key, MatchPolicy::FirstMatch).unwrap();
//! assert_eq!(row.key.depth_width(), (356, 406));
//! ```
//!
//! ## Modules
//!
//! - [`designation`] - Designation parser and normalized keys
//! - [`matcher`] - Row matching and the tie-break policy
//! - [`table`] - In-memory section tables
//! - [`loader`] - Excel/CSV table loading and column renaming
//! - [`presentation`] - Property maps and text rendering
//! - [`lookup`] - One-call lookup used by the CLI and the API
//! - [`built_up`] - Welded H sections computed from plate sizes
//! - [`config`] - Data file locations and match policy
//! - [`errors`] - Structured error types

pub mod built_up;
pub mod config;
pub mod designation;
pub mod errors;
pub mod loader;
pub mod lookup;
pub mod matcher;
pub mod presentation;
pub mod sample;
pub mod table;

// Re-export commonly used types at crate root for convenience
pub use config::LookupConfig;
pub use designation::{parse_designation, Designation, DesignationKey, SectionType};
pub use errors::{SectionError, SectionResult};
pub use lookup::SectionLookup;
pub use matcher::{find_section, match_rows, MatchPolicy};
pub use presentation::LookupOutcome;
pub use table::{SectionDatabase, SectionRow, SectionTable};
