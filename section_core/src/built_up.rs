//! Built-up H Sections
//!
//! Welded symmetric I/H sections described by their plate sizes rather than
//! looked up in a table: `"h D x B x T x t"` (overall depth, flange width,
//! flange thickness, web thickness, all in mm).
//!
//! ## Section properties
//!
//! - A = 2·B·T + t·(D − 2T)
//! - Ixx = Σ (I_own + A·y²) over both flanges and the web (parallel axis
//!   theorem), which equals (B·D³ − (B − t)·(D − 2T)³) / 12
//!
//! ## Example
//!
//! ```rust
//! use section_core::built_up::HSection;
//!
//! let h = HSection::parse("h 300x150x20x10").unwrap();
//! assert_eq!(h.area_mm2(), 8600.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::designation::split_tag;
use crate::errors::{SectionError, SectionResult};

/// Input tag for built-up H sections
pub const H_SECTION_TAG: &str = "h";

/// Result kind reported for built-up sections
pub const H_SECTION_KIND: &str = "H-BuiltUp";

pub const AREA_PROPERTY: &str = "Area (A) (mm^2)";
pub const IXX_PROPERTY: &str = "Second moment of area (Ixx) (mm^4)";

/// Symmetric welded I/H section (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HSection {
    /// Overall depth D
    pub depth: f64,
    /// Flange width B
    pub flange_width: f64,
    /// Flange thickness T
    pub flange_thickness: f64,
    /// Web thickness t
    pub web_thickness: f64,
}

/// Check whether an input names a built-up H section
pub fn is_h_section_query(input: &str) -> bool {
    split_tag(input.trim()).0.eq_ignore_ascii_case(H_SECTION_TAG)
}

impl HSection {
    /// Parse `"h D x B x T x t"`
    ///
    /// Dimensions may be separated by `x`, `×`, whitespace or commas.
    pub fn parse(input: &str) -> SectionResult<Self> {
        let (tag, rest) = split_tag(input.trim());
        if !tag.eq_ignore_ascii_case(H_SECTION_TAG) {
            return Err(SectionError::parse(input, "H-section input must start with 'h'"));
        }

        let parts: Vec<&str> = rest
            .split(|c: char| c == 'x' || c == 'X' || c == '×' || c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 4 {
            return Err(SectionError::parse(
                input,
                "H-section requires 4 dimensions: D x B x T x t (e.g. 'h 300x150x20x10')",
            ));
        }

        let mut dims = [0.0; 4];
        for (slot, part) in dims.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| SectionError::parse(input, format!("'{}' is not a positive dimension", part)))?;
        }

        let [depth, flange_width, flange_thickness, web_thickness] = dims;
        if 2.0 * flange_thickness >= depth {
            return Err(SectionError::parse(input, "flanges (2T) must be thinner than the overall depth D"));
        }
        if web_thickness > flange_width {
            return Err(SectionError::parse(input, "web thickness t cannot exceed flange width B"));
        }

        Ok(Self {
            depth,
            flange_width,
            flange_thickness,
            web_thickness,
        })
    }

    /// Clear depth of the web between flanges (D − 2T)
    pub fn web_depth(&self) -> f64 {
        self.depth - 2.0 * self.flange_thickness
    }

    /// Cross-sectional area (mm²)
    pub fn area_mm2(&self) -> f64 {
        2.0 * self.flange_width * self.flange_thickness + self.web_thickness * self.web_depth()
    }

    /// Second moment of area about the major axis (mm⁴)
    pub fn ixx_mm4(&self) -> f64 {
        let flange_area = self.flange_width * self.flange_thickness;
        let flange_own = self.flange_width * self.flange_thickness.powi(3) / 12.0;
        let y = self.depth / 2.0 - self.flange_thickness / 2.0;
        let web_own = self.web_thickness * self.web_depth().powi(3) / 12.0;

        2.0 * (flange_own + flange_area * y * y) + web_own
    }

    /// Canonical label (e.g. "h 300x150x20x10")
    pub fn label(&self) -> String {
        format!(
            "{} {}x{}x{}x{}",
            H_SECTION_TAG, self.depth, self.flange_width, self.flange_thickness, self.web_thickness
        )
    }

    /// Property map in the same shape as table rows
    pub fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        for (name, value) in [(AREA_PROPERTY, self.area_mm2()), (IXX_PROPERTY, self.ixx_mm4())] {
            if let Some(number) = Number::from_f64(value) {
                props.insert(name.to_string(), Value::Number(number));
            }
        }
        props
    }
}

impl std::fmt::Display for HSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (A={:.0} mm², Ixx={:.0} mm⁴)", self.label(), self.area_mm2(), self.ixx_mm4())
    }
}
