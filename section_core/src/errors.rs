//! # Error Types
//!
//! Structured error types for section_core. Every error reaches the immediate
//! caller (function return, HTTP response or printed message) and carries
//! enough context to tell the user what to fix.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{SectionError, SectionResult};
//!
//! fn require_digits(input: &str) -> SectionResult<u32> {
//!     input
//!         .parse()
//!         .map_err(|_| SectionError::parse(input, "expected digits"))
//! }
//!
//! assert!(require_digits("356").is_ok());
//! assert_eq!(require_digits("abc").unwrap_err().error_code(), "PARSE_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::designation::{DesignationKey, SectionType};

/// Result type alias for section_core operations
pub type SectionResult<T> = Result<T, SectionError>;

/// Structured error type for section lookups.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SectionError {
    /// Input does not match the designation grammar
    #[error("Could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Input parsed, but no row in the selected table has that depth x width
    #[error("{section_type} section '{key}' not found")]
    NotFound {
        section_type: SectionType,
        key: DesignationKey,
    },

    /// A data file is missing, unreadable or not laid out as expected
    #[error("Failed to load '{path}': {reason}")]
    Load { path: String, reason: String },

    /// A configuration value is invalid
    #[error("Invalid config for '{field}': {value} - {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
}

impl SectionError {
    /// Create a Parse error
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(section_type: SectionType, key: DesignationKey) -> Self {
        SectionError::NotFound { section_type, key }
    }

    /// Create a Load error
    pub fn load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Errors caused by the request itself rather than by the server's data
    pub fn is_client_error(&self) -> bool {
        matches!(self, SectionError::Parse { .. } | SectionError::NotFound { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SectionError::Parse { .. } => "PARSE_ERROR",
            SectionError::NotFound { .. } => "NOT_FOUND",
            SectionError::Load { .. } => "LOAD_ERROR",
            SectionError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SectionError::not_found(SectionType::UC, DesignationKey::new(999, 999));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"NotFound\""));
        let roundtrip: SectionError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_messages() {
        let error = SectionError::not_found(SectionType::UB, DesignationKey::with_mass(914, 305, 576));
        assert_eq!(error.to_string(), "UB section '914x305x576' not found");

        let error = SectionError::parse("xyz 100x100", "unrecognized section type 'xyz'");
        assert!(error.to_string().contains("xyz 100x100"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SectionError::parse("x", "bad").error_code(), "PARSE_ERROR");
        assert_eq!(SectionError::load("UC.xlsx", "missing").error_code(), "LOAD_ERROR");
        assert!(SectionError::parse("x", "bad").is_client_error());
        assert!(!SectionError::load("UC.xlsx", "missing").is_client_error());
    }
}
