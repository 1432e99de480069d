//! Table Loader
//!
//! Reads the published UC and UB property sheets into [`SectionTable`]s.
//!
//! ## Sheet layout
//!
//! The sheets carry a few title rows, then a row whose first non-empty cell
//! reads `"Section designation"`. That cell's column is the designation
//! column and property columns are counted from it. The row after it is the
//! header row; data rows follow. Grouped sizes print the serial size
//! (`"356x406"`) only on the first row of a group, with the mass suffix
//! (`"x 1299"`) in the next column, so the serial size is forward-filled.
//!
//! Many header cells are blank or merged; their columns are renamed through the
//! fixed [`COLUMN_NAMES`] table, keyed by source column index.
//!
//! ## Supported formats
//!
//! - Excel (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) via calamine
//! - CSV (`.csv`) with the same row layout

use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Number, Value};

use crate::designation::{numeric_runs, DesignationKey, SectionType};
use crate::errors::{SectionError, SectionResult};
use crate::table::{SectionDatabase, SectionRow, SectionTable, DESIGNATION_PROPERTY};

/// Published UC dataset file name
pub const UC_FILE_NAME: &str = "UC-secpropsdimsprops-EC3UKNA-UK-1-31-2026.xlsx";

/// Published UB dataset file name
pub const UB_FILE_NAME: &str = "UB-secpropsdimsprops-EC3UKNA-UK-1-31-2026.xlsx";

/// Leading cell text of the row preceding the header row
pub const HEADER_MARKER: &str = "Section designation";

/// Columns 0..3 hold the designation and its suffix pieces
const DESIGNATION_COLUMNS: usize = 3;

/// Property names by source column index
///
/// Downstream consumers key off these names; extend by appending pairs.
pub const COLUMN_NAMES: &[(usize, &str)] = &[
    // Dimensions
    (3, "Mass per metre (kg/m)"),
    (4, "Depth of section (h)"),
    (5, "Width of section (b)"),
    (6, "Web thickness (tw)"),
    (7, "Flange thickness (tf)"),
    (8, "Root radius (r)"),
    (9, "Depth between fillets (d)"),
    // Ratios for local buckling
    (10, "cw/tw (web slenderness)"),
    (11, "cf/tf (flange slenderness)"),
    // Dimensions for detailing
    (12, "End clearance (C)"),
    (13, "Notch (N)"),
    (14, "Notch (n)"),
    // Surface area
    (15, "Surface area per metre (m2)"),
    (16, "Surface area per tonne (m2)"),
    // Second moment of area
    (17, "Iyy (cm4)"),
    (18, "Izz (cm4)"),
    // Radius of gyration
    (19, "iy (cm)"),
    (20, "iz (cm)"),
    // Elastic modulus
    (21, "Wel,y (cm3)"),
    (22, "Wel,z (cm3)"),
    // Plastic modulus
    (23, "Wpl,y (cm3)"),
    (24, "Wpl,z (cm3)"),
    // Buckling and torsion
    (25, "Buckling parameter (U)"),
    (26, "Torsional index (X)"),
    (27, "Warping constant Iw (dm6)"),
    (28, "Torsional constant IT (cm4)"),
    (29, "Area of section (A) (cm2)"),
];

/// Look up the fixed property name for a source column
pub fn column_name(index: usize) -> Option<&'static str> {
    COLUMN_NAMES
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, name)| *name)
}

/// Load both tables; either file failing is fatal
pub fn load_database(uc_path: &Path, ub_path: &Path) -> SectionResult<SectionDatabase> {
    let uc = load_table(SectionType::UC, uc_path)?;
    let ub = load_table(SectionType::UB, ub_path)?;
    Ok(SectionDatabase::new(uc, ub))
}

/// Load one table from an Excel or CSV file
pub fn load_table(section_type: SectionType, path: &Path) -> SectionResult<SectionTable> {
    let source = path.display().to_string();

    if !path.exists() {
        return Err(SectionError::load(&source, "file not found"));
    }

    let grid = read_grid(path)?;
    let mut table = build_table(section_type, &grid, &source)?;
    table.source = Some(source.clone());

    tracing::info!(
        section_type = %section_type,
        sections = table.len(),
        path = %source,
        "loaded section table"
    );
    Ok(table)
}

/// Read the first worksheet (or the CSV file) into a grid of cells
///
/// Excel ranges are padded on the left so that grid column indices match
/// sheet column indices.
pub fn read_grid(path: &Path) -> SectionResult<Vec<Vec<Data>>> {
    let display = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv_grid(path),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook_grid(path),
        _ => Err(SectionError::load(
            display,
            format!("unsupported file extension '{}'", ext),
        )),
    }
}

fn read_workbook_grid(path: &Path) -> SectionResult<Vec<Vec<Data>>> {
    let display = path.display().to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SectionError::load(&display, format!("failed to open workbook: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SectionError::load(&display, "workbook has no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SectionError::load(&display, format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    Ok(range
        .rows()
        .map(|cells| {
            let mut row = vec![Data::Empty; start_col];
            row.extend(cells.iter().cloned());
            row
        })
        .collect())
}

fn read_csv_grid(path: &Path) -> SectionResult<Vec<Vec<Data>>> {
    let display = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SectionError::load(&display, format!("failed to open CSV: {}", e)))?;

    let mut grid = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| SectionError::load(&display, format!("failed to read line {}: {}", line + 1, e)))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Data::Empty
                    } else {
                        Data::String(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

/// Turn a raw grid into a table (see the module docs for the layout)
pub fn build_table(section_type: SectionType, grid: &[Vec<Data>], source: &str) -> SectionResult<SectionTable> {
    let (marker_idx, first_col) = find_marker(grid)
        .ok_or_else(|| SectionError::load(source, format!("no '{}' row found", HEADER_MARKER)))?;

    // Column indices below are relative to the designation column
    let rows: Vec<&[Data]> = grid[marker_idx + 1..]
        .iter()
        .map(|row| row.get(first_col..).unwrap_or(&[]))
        .collect();
    let (header, data_rows) = rows
        .split_first()
        .ok_or_else(|| SectionError::load(source, "sheet ends before the header row"))?;

    let width = data_rows
        .iter()
        .map(|row| row.len())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let names = header_names(header, width);

    let mut table = SectionTable::new(section_type);
    let mut seen = HashSet::new();
    let mut current_size: Option<String> = None;
    let mut skipped = 0usize;

    for row in data_rows {
        let first = row.first().map(cell_text).unwrap_or_default();
        let size = if first.is_empty() {
            // Grouped rows inherit the serial size only; their own suffix
            // carries the mass
            match current_size.as_deref() {
                Some(size) => size.to_string(),
                None => continue,
            }
        } else {
            current_size = Some(serial_size(&first));
            first
        };

        let suffix: Vec<String> = row
            .iter()
            .take(DESIGNATION_COLUMNS)
            .skip(1)
            .map(cell_text)
            .filter(|t| !t.is_empty())
            .collect();
        let text = std::iter::once(size).chain(suffix).collect::<Vec<_>>().join(" ");

        let Some(key) = DesignationKey::from_table_text(&text) else {
            skipped += 1;
            continue;
        };

        let mut properties = Map::new();
        for (idx, cell) in row.iter().enumerate().skip(DESIGNATION_COLUMNS) {
            if let Some(value) = cell_value(cell) {
                properties.insert(names[idx].clone(), value);
            }
        }
        if properties.is_empty() {
            continue;
        }

        let designation = normalized_designation(&text);
        if !seen.insert(designation.clone()) {
            tracing::warn!(
                section_type = %section_type,
                designation = %designation,
                source,
                "duplicate section designation; first occurrence wins lookups"
            );
        }

        table.push(SectionRow::with_designation(designation, key, properties));
    }

    if skipped > 0 {
        tracing::debug!(section_type = %section_type, skipped, source, "skipped rows without a designation");
    }

    Ok(table)
}

/// Property names for every column of the sheet
/// Row index and column of the marker cell, which must be the first
/// non-empty cell of its row
fn find_marker(grid: &[Vec<Data>]) -> Option<(usize, usize)> {
    grid.iter().enumerate().find_map(|(row_idx, row)| {
        let col = row.iter().position(|cell| !cell_text(cell).is_empty())?;
        cell_text(&row[col]).contains(HEADER_MARKER).then_some((row_idx, col))
    })
}

fn header_names(header: &[Data], width: usize) -> Vec<String> {
    (0..width)
        .map(|idx| {
            if idx == 0 {
                return DESIGNATION_PROPERTY.to_string();
            }
            if let Some(name) = column_name(idx) {
                return name.to_string();
            }
            let text = header.get(idx).map(cell_text).unwrap_or_default();
            if text.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                text
            }
        })
        .collect()
}

/// Depth x width part of a designation (`"1016 x 305 x 584"` -> `"1016x305"`)
fn serial_size(text: &str) -> String {
    numeric_runs(text).take(2).collect::<Vec<_>>().join("x")
}

/// Compact `"356 x 406" + "x 1299"` into `"356x406x1299"`
fn normalized_designation(text: &str) -> String {
    numeric_runs(text).take(3).collect::<Vec<_>>().join("x")
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Convert a cell to a property value; empty cells yield `None`
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::String(s) => text_value(s),
        other => text_value(&other.to_string()),
    }
}

fn text_value(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    match parse_optional_f64(trimmed).and_then(Number::from_f64) {
        Some(number) => Some(Value::Number(number)),
        None => Some(Value::String(trimmed.to_string())),
    }
}

/// Parse an optional f64 from a text cell
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    /// Title rows, marker row, header row, then two grouped sizes
    fn sheet() -> Vec<Vec<Data>> {
        let mut header = vec![Data::Empty; 19];
        header[3] = s("Mass per metre");
        header[4] = s("Depth of section");

        let mut rows = vec![
            vec![s("UKC Universal Columns")],
            vec![],
            vec![s("Section designation"), Data::Empty, Data::Empty, s("kg/m")],
            header,
        ];

        let group = [
            ("356x406", "x 1299", 1299.0, 140.0, 250000.0),
            ("", "x 634", 633.9, 77.0, 98125.0),
            ("305x305", "x 283", 282.9, 44.1, 24635.0),
        ];
        for (size, suffix, mass, tf, izz) in group {
            let mut row = vec![Data::Empty; 19];
            if !size.is_empty() {
                row[0] = s(size);
            }
            row[1] = s(suffix);
            row[3] = Data::Float(mass);
            row[7] = Data::Float(tf);
            row[18] = Data::Float(izz);
            // Column 10 has no fixed name and no header text
            row[10] = Data::Int(7);
            rows.push(row);
        }

        // Spacer and footnote rows
        rows.push(vec![Data::Empty; 19]);
        rows.push(vec![s("Note: values per EN 10365")]);
        rows
    }

    #[test]
    fn test_build_table_layout() {
        let table = build_table(SectionType::UC, &sheet(), "test").unwrap();
        assert_eq!(table.designations(), vec!["356x406x1299", "356x406x634", "305x305x283"]);

        let first = &table.rows()[0];
        assert_eq!(first.key, DesignationKey::with_mass(356, 406, 1299));
        assert_eq!(first.get_f64("Flange thickness (tf)"), Some(140.0));
        assert_eq!(first.get_f64("Izz (cm4)"), Some(250000.0));
        assert_eq!(first.get_f64("Mass per metre (kg/m)"), Some(1299.0));
        assert_eq!(first.get("cw/tw (web slenderness)"), Some(&Value::from(7)));
        assert_eq!(first.get(DESIGNATION_PROPERTY), Some(&Value::from("356x406x1299")));
    }

    #[test]
    fn test_forward_fill_grouped_rows() {
        let table = build_table(SectionType::UC, &sheet(), "test").unwrap();
        let second = &table.rows()[1];
        assert_eq!(second.key, DesignationKey::with_mass(356, 406, 634));
        assert_eq!(second.get_f64("Flange thickness (tf)"), Some(77.0));
    }

    #[test]
    fn test_designation_column_offset() {
        let shifted: Vec<Vec<Data>> = sheet()
            .into_iter()
            .map(|row| std::iter::once(Data::Empty).chain(row).collect())
            .collect();

        let table = build_table(SectionType::UC, &shifted, "test").unwrap();
        assert_eq!(table.designations(), vec!["356x406x1299", "356x406x634", "305x305x283"]);
        assert_eq!(table.rows()[0].get_f64("Flange thickness (tf)"), Some(140.0));
        assert_eq!(table.rows()[0].get_f64("Izz (cm4)"), Some(250000.0));
    }

    #[test]
    fn test_forward_fill_after_full_designation() {
        // First row of the group spells out the mass in column 0
        let mut rows = vec![
            vec![s("Section designation")],
            vec![Data::Empty, Data::Empty, Data::Empty, s("Mass per metre")],
        ];
        let mut full = vec![Data::Empty; 4];
        full[0] = s("1016x305x584");
        full[3] = Data::Float(584.0);
        let mut grouped = vec![Data::Empty; 4];
        grouped[1] = s("x 487");
        grouped[3] = Data::Float(486.7);
        rows.push(full);
        rows.push(grouped);

        let table = build_table(SectionType::UB, &rows, "test").unwrap();
        assert_eq!(table.designations(), vec!["1016x305x584", "1016x305x487"]);
        assert_eq!(table.rows()[1].key, DesignationKey::with_mass(1016, 305, 487));

        let db = SectionDatabase::new(SectionTable::new(SectionType::UC), table);
        let key = DesignationKey::with_mass(1016, 305, 487);
        let row = crate::matcher::find_section(&db, SectionType::UB, &key, crate::matcher::MatchPolicy::PreferMass)
            .unwrap();
        assert_eq!(row.get_f64("Mass per metre (kg/m)"), Some(486.7));
    }

    #[test]
    fn test_empty_cells_omitted() {
        let table = build_table(SectionType::UC, &sheet(), "test").unwrap();
        let first = &table.rows()[0];
        assert!(first.get("Depth of section (h)").is_none());
        assert!(first.properties.keys().all(|k| !k.starts_with("Unnamed")));
    }

    #[test]
    fn test_property_order_follows_columns() {
        let table = build_table(SectionType::UC, &sheet(), "test").unwrap();
        let names: Vec<&str> = table.rows()[0].properties.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                DESIGNATION_PROPERTY,
                "Mass per metre (kg/m)",
                "Flange thickness (tf)",
                "cw/tw (web slenderness)",
                "Izz (cm4)",
            ]
        );
    }

    #[test]
    fn test_header_names() {
        let header = vec![s("Designation"), Data::Empty, Data::Empty, s("Mass"), Data::Empty];
        let names = header_names(&header, 32);
        assert_eq!(names[0], DESIGNATION_PROPERTY);
        assert_eq!(names[1], "Unnamed: 1");
        assert_eq!(names[3], "Mass per metre (kg/m)");
        assert_eq!(names[7], "Flange thickness (tf)");
        assert_eq!(names[18], "Izz (cm4)");
        assert_eq!(names[31], "Unnamed: 31");
    }

    #[test]
    fn test_missing_marker_row() {
        let grid = vec![vec![s("Mass per metre")], vec![s("356x406"), s("x 1299")]];
        let err = build_table(SectionType::UC, &grid, "UC.xlsx").unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
        assert!(err.to_string().contains("Section designation"));
    }

    #[test]
    fn test_column_name_table() {
        assert_eq!(column_name(7), Some("Flange thickness (tf)"));
        assert_eq!(column_name(18), Some("Izz (cm4)"));
        assert_eq!(column_name(0), None);
        let mut indices: Vec<usize> = COLUMN_NAMES.iter().map(|(i, _)| *i).collect();
        indices.dedup();
        assert_eq!(indices.len(), COLUMN_NAMES.len());
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(cell_value(&s("  ")), None);
        assert_eq!(cell_value(&s("-")), None);
        assert_eq!(cell_value(&s("—")), None);
        assert_eq!(cell_value(&s("12.5")), Some(Value::from(12.5)));
        assert_eq!(cell_value(&s("N/A")), Some(Value::from("N/A")));
        assert_eq!(cell_value(&Data::Float(f64::NAN)), None);
        assert_eq!(cell_value(&Data::Bool(true)), Some(Value::Bool(true)));
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("123.45"), Some(123.45));
        assert_eq!(parse_optional_f64("  456  "), Some(456.0));
        assert_eq!(parse_optional_f64(""), None);
        assert_eq!(parse_optional_f64("-"), None);
        assert_eq!(parse_optional_f64("not a number"), None);
        assert_eq!(parse_optional_f64("inf"), None);
    }

    #[test]
    fn test_load_csv_table() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "UKB Universal Beams,,,,,,,,").unwrap();
        writeln!(file, "Section designation,,,Mass per metre,,,,,").unwrap();
        writeln!(file, ",,,kg/m,h,b,tw,tf,r").unwrap();
        writeln!(file, "1016x305,x 584,,584,1056,314,36,64,30").unwrap();
        writeln!(file, ",x 487,,486.7,1036.3,308.5,30,54.1,30").unwrap();
        writeln!(file, "914x305,x 576,,576,993,322,36.1,65,19.1").unwrap();
        file.flush().unwrap();

        let table = load_table(SectionType::UB, file.path()).unwrap();
        assert_eq!(table.section_type(), SectionType::UB);
        assert_eq!(table.designations(), vec!["1016x305x584", "1016x305x487", "914x305x576"]);
        assert_eq!(table.rows()[1].get_f64("Flange thickness (tf)"), Some(54.1));
        assert_eq!(table.rows()[2].get_f64("Depth of section (h)"), Some(993.0));
        assert!(table.source.is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(SectionType::UC, Path::new("definitely-missing-UC.xlsx")).unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_database_requires_both_tables() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Section designation").unwrap();
        writeln!(file, ",,,kg/m").unwrap();
        writeln!(file, "203x203,x 46,,46.1").unwrap();
        file.flush().unwrap();

        let err = load_database(file.path(), Path::new("missing-UB.csv")).unwrap_err();
        assert!(err.to_string().contains("missing-UB.csv"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let err = load_table(SectionType::UC, file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }
}
