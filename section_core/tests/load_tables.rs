// End-to-end lookups against CSV exports laid out like the published tables

use std::path::PathBuf;

use section_core::loader::load_table;
use section_core::{LookupConfig, MatchPolicy, SectionError, SectionLookup, SectionType};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn config(policy: MatchPolicy) -> LookupConfig {
    LookupConfig {
        data_dir: fixtures(),
        uc_file: "uc_sections.csv".into(),
        ub_file: "ub_sections.csv".into(),
        match_policy: policy,
    }
}

#[test]
fn test_fixture_tables_load() {
    let uc = load_table(SectionType::UC, &fixtures().join("uc_sections.csv")).unwrap();
    assert_eq!(uc.designations(), vec!["356x406x1299", "356x406x634", "305x305x283"]);

    let ub = load_table(SectionType::UB, &fixtures().join("ub_sections.csv")).unwrap();
    assert_eq!(ub.designations(), vec!["914x305x576", "533x210x92"]);

    // Every numbered column from 3 through 29 is named
    let row = &uc.rows()[0];
    assert_eq!(row.properties.len(), 28);
    assert!(row.properties.keys().all(|k| !k.starts_with("Unnamed")));
}

#[test]
fn test_workbook_with_offset_range() {
    // Used range starts at column B
    let uc = load_table(SectionType::UC, &fixtures().join("uc_sections.xlsx")).unwrap();
    assert_eq!(uc.designations(), vec!["356x406x1299", "356x406x634", "305x305x283"]);

    let first = &uc.rows()[0];
    assert_eq!(first.get_f64("Flange thickness (tf)"), Some(140.0));
    assert_eq!(first.get_f64("Izz (cm4)"), Some(250_000.0));
    assert_eq!(first.get_f64("Area of section (A) (cm2)"), Some(1655.0));
    assert_eq!(first.properties.len(), 28);

    // Same content as the CSV export
    let csv = load_table(SectionType::UC, &fixtures().join("uc_sections.csv")).unwrap();
    for (from_xlsx, from_csv) in uc.rows().iter().zip(csv.rows()) {
        assert_eq!(from_xlsx.key, from_csv.key);
        assert_eq!(from_xlsx.get_f64("Iyy (cm4)"), from_csv.get_f64("Iyy (cm4)"));
    }
}

#[test]
fn test_lookup_from_files() {
    let lookup = SectionLookup::from_config(&config(MatchPolicy::FirstMatch)).unwrap();

    let column = lookup.lookup("uc 356x406").unwrap();
    assert_eq!(column.section, "356x406x1299");
    assert_eq!(column.properties["Flange thickness (tf)"], 140.0);
    assert_eq!(column.properties["Izz (cm4)"], 250_000.0);
    assert_eq!(column.variants, vec!["356x406x1299", "356x406x634"]);

    // Mass is not consulted under the default policy
    let with_mass = lookup.lookup("uc, 356x406x634").unwrap();
    assert_eq!(with_mass.section, "356x406x1299");

    let beam = lookup.lookup("ub,914x305x576").unwrap();
    assert_eq!(beam.properties["Depth of section (h)"], 993.0);
    assert_eq!(beam.properties["Area of section (A) (cm2)"], 734.0);
}

#[test]
fn test_prefer_mass_from_files() {
    let lookup = SectionLookup::from_config(&config(MatchPolicy::PreferMass)).unwrap();
    let outcome = lookup.lookup("uc 356x406x634").unwrap();
    assert_eq!(outcome.section, "356x406x634");
    assert_eq!(outcome.properties["Mass per metre (kg/m)"], 633.9);
}

#[test]
fn test_grouped_row_inherits_size() {
    let lookup = SectionLookup::from_config(&config(MatchPolicy::PreferMass)).unwrap();
    let row = &lookup.database().table(SectionType::UC).rows()[1];
    assert_eq!(row.key.depth_width(), (356, 406));
    assert_eq!(row.key.mass, Some(634));
}

#[test]
fn test_missing_beam_table_is_fatal() {
    let config = LookupConfig {
        ub_file: "missing.csv".into(),
        ..config(MatchPolicy::FirstMatch)
    };
    let err = SectionLookup::from_config(&config).unwrap_err();
    assert!(matches!(err, SectionError::Load { .. }));
    assert!(err.to_string().contains("missing.csv"));
}
