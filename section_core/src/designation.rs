//! Section Designations
//!
//! Parses free-form designation strings such as `"uc 356x406"`,
//! `"uc, 356x406x1299"` or `"ub,914x305x576"` into a [`SectionType`] and a
//! normalized [`DesignationKey`].
//!
//! ## Grammar
//!
//! ```text
//! input   := type sep? dims
//! type    := "uc" | "ub"                  (case-insensitive)
//! sep     := "," | whitespace | ("," whitespace)
//! dims    := depth "x" width (sep? "x" mass)?
//! ```
//!
//! Depth, width and mass are plain decimal integers. The mass is kept in the
//! key but the matcher only compares depth and width.
//!
//! ## Example
//!
//! ```rust
//! use section_core::designation::{parse_designation, SectionType};
//!
//! let designation = parse_designation("UC, 356x406x1299").unwrap();
//! assert_eq!(designation.section_type, SectionType::UC);
//! assert_eq!(designation.key.depth_width(), (356, 406));
//! assert_eq!(designation.key.mass, Some(1299));
//! assert_eq!(designation.to_string(), "UC 356x406x1299");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{SectionError, SectionResult};

/// Rolled section family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// Universal Column
    UC,
    /// Universal Beam
    UB,
}

impl SectionType {
    /// All section types for iteration
    pub const ALL: [SectionType; 2] = [SectionType::UC, SectionType::UB];

    /// Parse from an input tag ("uc", "UB", ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "uc" => Some(SectionType::UC),
            "ub" => Some(SectionType::UB),
            _ => None,
        }
    }

    /// Short code used in designations and responses
    pub fn code(&self) -> &'static str {
        match self {
            SectionType::UC => "UC",
            SectionType::UB => "UB",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionType::UC => "Universal Column",
            SectionType::UB => "Universal Beam",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Normalized depth x width (x mass) key
///
/// The canonical text form is `"356x406"` or `"356x406x1299"`; parsing the
/// canonical form and rendering it again returns the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignationKey {
    /// Serial depth (mm)
    pub depth: u32,
    /// Serial width (mm)
    pub width: u32,
    /// Mass per metre (kg/m), when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<u32>,
}

impl DesignationKey {
    /// Two-part key (depth x width)
    pub fn new(depth: u32, width: u32) -> Self {
        Self {
            depth,
            width,
            mass: None,
        }
    }

    /// Three-part key (depth x width x mass)
    pub fn with_mass(depth: u32, width: u32, mass: u32) -> Self {
        Self {
            depth,
            width,
            mass: Some(mass),
        }
    }

    /// The (depth, width) pair the matcher compares on
    pub fn depth_width(&self) -> (u32, u32) {
        (self.depth, self.width)
    }

    /// Check whether two keys name the same serial size, ignoring mass
    pub fn same_size(&self, other: &DesignationKey) -> bool {
        self.depth_width() == other.depth_width()
    }

    /// Copy of this key with the mass dropped
    pub fn without_mass(&self) -> Self {
        Self::new(self.depth, self.width)
    }

    /// Normalize a designation as printed in a data table
    ///
    /// Tables spell designations loosely (`"356 x 406 x 1299"`,
    /// `"UKC 356x406"` + `"x 1299"`), so this pulls out the numeric runs
    /// instead of applying the strict input grammar. Depth and width must be
    /// whole numbers; a fractional third number leaves the mass unset.
    pub fn from_table_text(text: &str) -> Option<Self> {
        let numbers: Vec<f64> = numeric_runs(text)
            .filter_map(|run| run.parse::<f64>().ok())
            .collect();
        if numbers.len() < 2 {
            return None;
        }

        let depth = whole_number(numbers[0])?;
        let width = whole_number(numbers[1])?;
        let mass = numbers.get(2).copied().and_then(whole_number);
        Some(Self { depth, width, mass })
    }
}

impl std::fmt::Display for DesignationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mass {
            Some(mass) => write!(f, "{}x{}x{}", self.depth, self.width, mass),
            None => write!(f, "{}x{}", self.depth, self.width),
        }
    }
}

impl FromStr for DesignationKey {
    type Err = SectionError;

    /// Parse the dimension group alone (`"356x406"`, `"356x406x1299"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dims(s.trim()).map_err(|reason| SectionError::parse(s, reason))
    }
}

/// A section type together with its dimension key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Designation {
    pub section_type: SectionType,
    pub key: DesignationKey,
}

impl Designation {
    pub fn new(section_type: SectionType, key: DesignationKey) -> Self {
        Self { section_type, key }
    }
}

impl std::fmt::Display for Designation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.section_type, self.key)
    }
}

impl FromStr for Designation {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_designation(s)
    }
}

/// Parse a free-form designation such as `"uc 356x406"` or `"ub,914x305x576"`
///
/// Fails with [`SectionError::Parse`] echoing the original input when the
/// type tag is missing or unknown, the `x` separator is missing, or a
/// dimension is not a whole number.
pub fn parse_designation(input: &str) -> SectionResult<Designation> {
    let trimmed = input.trim();
    let (tag, rest) = split_tag(trimmed);

    if tag.is_empty() {
        return Err(SectionError::parse(
            input,
            "missing section type tag; expected 'uc' or 'ub' before the dimensions",
        ));
    }

    let section_type = SectionType::from_tag(tag).ok_or_else(|| {
        SectionError::parse(
            input,
            format!("unrecognized section type '{}'; expected 'uc' or 'ub'", tag),
        )
    })?;

    let key = parse_dims(skip_type_separator(rest)).map_err(|reason| SectionError::parse(input, reason))?;

    Ok(Designation::new(section_type, key))
}

/// Split the leading run of ASCII letters off the input
pub(crate) fn split_tag(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Skip the optional `","` / whitespace / `", "` between tag and dimensions
fn skip_type_separator(rest: &str) -> &str {
    let rest = rest.trim_start();
    rest.strip_prefix(',').unwrap_or(rest).trim_start()
}

/// Parse `depth "x" width (sep? "x" mass)?`
fn parse_dims(dims: &str) -> Result<DesignationKey, String> {
    let mut scanner = Scanner::new(dims);

    let depth = scanner.number("depth")?;

    scanner.skip_whitespace();
    if !scanner.eat_x() {
        return Err(match scanner.peek() {
            Some(c) => format!("expected 'x' between depth and width, found '{}'", c),
            None => "expected 'x' between depth and width".to_string(),
        });
    }
    scanner.skip_whitespace();

    let width = scanner.number("width")?;

    if scanner.is_empty() {
        return Ok(DesignationKey::new(depth, width));
    }

    // Width and mass are joined by at most one comma and one "x", with
    // optional whitespace around each ("x1299", ", x1299", " 1299").
    let before = scanner.remaining();
    scanner.skip_whitespace();
    scanner.eat_comma();
    scanner.skip_whitespace();
    scanner.eat_x();
    scanner.skip_whitespace();
    if scanner.remaining() == before {
        return Err(format!("unexpected '{}' after width", before));
    }

    let mass = scanner.number("mass")?;

    scanner.skip_whitespace();
    if !scanner.is_empty() {
        return Err(format!("unexpected trailing '{}'", scanner.remaining()));
    }

    Ok(DesignationKey::with_mass(depth, width, mass))
}

/// Minimal forward-only reader over the dimension group
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn remaining(&self) -> &'a str {
        self.rest
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat_comma(&mut self) -> bool {
        match self.rest.strip_prefix(',') {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn eat_x(&mut self) -> bool {
        match self.peek() {
            Some('x') | Some('X') => {
                self.rest = &self.rest[1..];
                true
            }
            _ => false,
        }
    }

    fn number(&mut self, what: &str) -> Result<u32, String> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);

        if digits.is_empty() {
            return Err(match self.peek() {
                Some(c) => format!("expected {} digits, found '{}'", what, c),
                None => format!("expected {} digits", what),
            });
        }

        let value = digits
            .parse::<u32>()
            .map_err(|_| format!("{} '{}' is too large", what, digits))?;
        self.rest = rest;
        Ok(value)
    }
}

/// Iterate over `\d+(\.\d+)?` runs in free text
pub(crate) fn numeric_runs(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    std::iter::from_fn(move || {
        while pos < bytes.len() && !bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }

        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos + 1 < bytes.len() && bytes[pos] == b'.' && bytes[pos + 1].is_ascii_digit() {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
        Some(&text[start..pos])
    })
}

fn whole_number(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
