//! Built-in sample sections (for use without the xlsx files)
//!
//! A small subset of UK column and beam sizes with an abbreviated property
//! set, named exactly as the loader names them. Used by tests and demos.

use serde_json::{Map, Value};

use crate::designation::{DesignationKey, SectionType};
use crate::loader::column_name;
use crate::table::{SectionDatabase, SectionRow, SectionTable};

// Source column indices of the properties carried by the sample rows
const SAMPLE_COLUMNS: [usize; 10] = [3, 4, 5, 6, 7, 8, 9, 17, 18, 29];

type SampleRow = (u32, u32, u32, [f64; 10]);

// (depth, width, mass, [mass/m, h, b, tw, tf, r, d, Iyy, Izz, A])
const SAMPLE_COLUMNS_UC: [SampleRow; 6] = [
    (356, 406, 1299, [1299.0, 600.0, 476.0, 100.0, 140.0, 15.2, 290.2, 600_000.0, 250_000.0, 1655.0]),
    (356, 406, 634, [633.9, 474.6, 424.0, 47.6, 77.0, 15.2, 290.2, 274_845.0, 98_125.0, 808.0]),
    (356, 406, 551, [551.0, 455.6, 418.5, 42.1, 67.5, 15.2, 290.2, 226_938.0, 82_671.0, 702.0]),
    (305, 305, 283, [282.9, 365.3, 322.2, 26.8, 44.1, 15.2, 246.7, 78_872.0, 24_635.0, 360.0]),
    (305, 305, 97, [96.9, 307.9, 305.3, 9.9, 15.4, 15.2, 246.7, 22_249.0, 7_308.0, 123.0]),
    (203, 203, 46, [46.1, 203.2, 203.6, 7.2, 11.0, 10.2, 160.8, 4_568.0, 1_548.0, 58.7]),
];

const SAMPLE_BEAMS_UB: [SampleRow; 5] = [
    (1016, 305, 584, [584.0, 1056.0, 314.0, 36.0, 64.0, 30.0, 868.1, 1_246_000.0, 33_400.0, 744.0]),
    (1016, 305, 487, [486.7, 1036.3, 308.5, 30.0, 54.1, 30.0, 868.1, 1_022_000.0, 26_700.0, 620.0]),
    (914, 305, 576, [576.0, 993.0, 322.0, 36.1, 65.0, 19.1, 824.5, 1_030_000.0, 36_300.0, 734.0]),
    (533, 210, 92, [92.1, 533.1, 209.3, 10.1, 15.6, 12.7, 476.5, 55_230.0, 2_389.0, 117.0]),
    (305, 165, 40, [40.3, 303.4, 165.0, 6.0, 10.2, 8.9, 265.2, 8_503.0, 764.0, 51.3]),
];

/// Get a database with a few common UC and UB sizes pre-loaded
pub fn sample_database() -> SectionDatabase {
    SectionDatabase::new(
        sample_table(SectionType::UC, &SAMPLE_COLUMNS_UC),
        sample_table(SectionType::UB, &SAMPLE_BEAMS_UB),
    )
}

fn sample_table(section_type: SectionType, rows: &[SampleRow]) -> SectionTable {
    let mut table = SectionTable::new(section_type);

    for (depth, width, mass, values) in rows {
        let mut properties = Map::new();
        for (index, value) in SAMPLE_COLUMNS.iter().zip(values) {
            if let (Some(name), Some(number)) = (column_name(*index), serde_json::Number::from_f64(*value)) {
                properties.insert(name.to_string(), Value::Number(number));
            }
        }
        table.push(SectionRow::new(
            DesignationKey::with_mass(*depth, *width, *mass),
            properties,
        ));
    }

    table.source = Some("builtin-sample".to_string());
    table
}
