//! Section Tables
//!
//! In-memory UC and UB property tables. A [`SectionDatabase`] is built once at
//! startup (see [`crate::loader`]) and only read afterwards; callers pass it by
//! reference or behind an `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use section_core::sample::sample_database;
//! use section_core::designation::SectionType;
//!
//! let db = sample_database();
//! let columns = db.table(SectionType::UC);
//! assert!(!columns.is_empty());
//! assert!(columns.designations().contains(&"356x406x1299"));
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::designation::{DesignationKey, SectionType};

/// Property name of the designation column
pub const DESIGNATION_PROPERTY: &str = "Section designation";

/// One physical section: its designation plus named properties in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRow {
    /// Designation as printed in the table, normalized (e.g. "356x406x1299")
    pub designation: String,

    /// Normalized depth x width (x mass) identity of the row
    pub key: DesignationKey,

    /// Property name -> value, in source column order
    pub properties: Map<String, Value>,
}

impl SectionRow {
    /// Create a row from its key and properties
    ///
    /// The designation text is the canonical form of `key`, and it is also
    /// stored under [`DESIGNATION_PROPERTY`] ahead of the other properties.
    pub fn new(key: DesignationKey, properties: Map<String, Value>) -> Self {
        Self::with_designation(key.to_string(), key, properties)
    }

    /// Create a row whose printed designation differs from the canonical key
    pub fn with_designation(designation: String, key: DesignationKey, properties: Map<String, Value>) -> Self {
        let mut ordered = Map::with_capacity(properties.len() + 1);
        ordered.insert(DESIGNATION_PROPERTY.to_string(), Value::String(designation.clone()));
        for (name, value) in properties {
            if name != DESIGNATION_PROPERTY {
                ordered.insert(name, value);
            }
        }

        Self {
            designation,
            key,
            properties: ordered,
        }
    }

    /// Look up a property by exact name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Look up a numeric property by exact name
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Mass per metre as carried in the row's designation
    pub fn mass(&self) -> Option<u32> {
        self.key.mass
    }
}

impl std::fmt::Display for SectionRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} properties)", self.designation, self.properties.len())
    }
}

/// Rows for one section type, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTable {
    section_type: SectionType,
    rows: Vec<SectionRow>,

    /// Path the table was loaded from, if any
    pub source: Option<String>,
}

impl SectionTable {
    /// Create an empty table
    pub fn new(section_type: SectionType) -> Self {
        Self {
            section_type,
            rows: Vec::new(),
            source: None,
        }
    }

    /// Section type held by this table
    pub fn section_type(&self) -> SectionType {
        self.section_type
    }

    /// Append a row, keeping table order
    pub fn push(&mut self, row: SectionRow) {
        self.rows.push(row);
    }

    /// All rows in table order
    pub fn rows(&self) -> &[SectionRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionRow> {
        self.rows.iter()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All designations in table order
    pub fn designations(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.designation.as_str()).collect()
    }

    /// Rows whose designation starts with `prefix` (e.g. "356x" lists every 356 serial size)
    pub fn search(&self, prefix: &str) -> Vec<&SectionRow> {
        let prefix = prefix.trim().to_ascii_lowercase();
        self.rows
            .iter()
            .filter(|r| r.designation.starts_with(&prefix))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SectionTable {
    type Item = &'a SectionRow;
    type IntoIter = std::slice::Iter<'a, SectionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// The UC and UB tables, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDatabase {
    uc: SectionTable,
    ub: SectionTable,
}

impl SectionDatabase {
    /// Pair a UC and a UB table
    pub fn new(uc: SectionTable, ub: SectionTable) -> Self {
        debug_assert_eq!(uc.section_type(), SectionType::UC);
        debug_assert_eq!(ub.section_type(), SectionType::UB);
        Self { uc, ub }
    }

    /// Select the table for a section type
    pub fn table(&self, section_type: SectionType) -> &SectionTable {
        match section_type {
            SectionType::UC => &self.uc,
            SectionType::UB => &self.ub,
        }
    }

    /// Total number of sections across both tables
    pub fn len(&self) -> usize {
        self.uc.len() + self.ub.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uc.is_empty() && self.ub.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(depth: u32, width: u32, mass: u32) -> SectionRow {
        let mut props = Map::new();
        props.insert("Mass per metre (kg/m)".to_string(), json!(mass as f64));
        SectionRow::new(DesignationKey::with_mass(depth, width, mass), props)
    }

    #[test]
    fn test_row_designation_first() {
        let r = row(356, 406, 634);
        let names: Vec<&String> = r.properties.keys().collect();
        assert_eq!(names[0], DESIGNATION_PROPERTY);
        assert_eq!(r.get(DESIGNATION_PROPERTY), Some(&json!("356x406x634")));
        assert_eq!(r.get_f64("Mass per metre (kg/m)"), Some(634.0));
        assert_eq!(r.mass(), Some(634));
    }

    #[test]
    fn test_table_order_and_search() {
        let mut table = SectionTable::new(SectionType::UC);
        table.push(row(356, 406, 634));
        table.push(row(356, 368, 202));
        table.push(row(305, 305, 283));

        assert_eq!(table.len(), 3);
        assert_eq!(table.designations(), vec!["356x406x634", "356x368x202", "305x305x283"]);

        let found = table.search("356x");
        assert_eq!(found.len(), 2);
        assert!(table.search("203").is_empty());
    }

    #[test]
    fn test_database_table_selection() {
        let mut uc = SectionTable::new(SectionType::UC);
        uc.push(row(305, 305, 283));
        let ub = SectionTable::new(SectionType::UB);

        let db = SectionDatabase::new(uc, ub);
        assert_eq!(db.table(SectionType::UC).len(), 1);
        assert!(db.table(SectionType::UB).is_empty());
        assert_eq!(db.len(), 1);
        assert!(!db.is_empty());
    }

    #[test]
    fn test_row_display() {
        let r = row(305, 305, 283);
        assert_eq!(r.to_string(), "305x305x283 (2 properties)");
    }
}
