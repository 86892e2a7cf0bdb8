//! Property-based checks of portfolio edits and report export.

use std::path::{Component, Path};
use std::sync::Arc;

use proptest::prelude::*;
use roofsync::{Portfolio, report_file_name, write_report};
use roofsync_core::NewProperty;
use roofsync_core::rules::{MAX_ROOF_SIZE, MIN_ROOF_SIZE, is_valid_roof_size};
use roofsync_store::{FileStore, LocalStore, MemoryStore};

fn survey(address: String, roof_area: f64) -> NewProperty {
    NewProperty {
        address,
        zip: "02134".to_string(),
        roof_area,
        email: "survey@example.com".to_string(),
        phone: "617-555-0100".to_string(),
    }
}

fn roof_area() -> impl Strategy<Value = f64> {
    prop_oneof![
        MIN_ROOF_SIZE..=MAX_ROOF_SIZE,
        0.0..MIN_ROOF_SIZE,
        (MAX_ROOF_SIZE + 1.0)..5.0e6,
    ]
}

proptest! {
    #[test]
    fn test_only_valid_surveys_are_stored(areas in prop::collection::vec(roof_area(), 0..12)) {
        let portfolio = Portfolio::new(Arc::new(LocalStore::new(MemoryStore::new())));

        let mut accepted = 0;
        for (i, area) in areas.iter().enumerate() {
            let result = portfolio.add(survey(format!("{i} Survey Rd"), *area));
            prop_assert_eq!(result.is_ok(), is_valid_roof_size(*area));
            if result.is_ok() {
                accepted += 1;
            }
        }

        let summary = portfolio.summary();
        prop_assert_eq!(summary.properties, accepted);
        prop_assert!(portfolio.list().iter().all(|p| p.has_valid_roof_size()));
    }

    #[test]
    fn test_report_file_name_has_no_whitespace(address in "[A-Za-z0-9]{1,8}([ \t]{1,3}[A-Za-z0-9]{1,8}){0,4}") {
        let portfolio = Portfolio::new(Arc::new(LocalStore::new(MemoryStore::new())));
        let property = portfolio.add(survey(address, 5_000.0)).unwrap();

        let name = report_file_name(&property);
        prop_assert!(name.starts_with("Solar_Report_"));
        prop_assert!(name.ends_with(".csv"));
        prop_assert!(!name.contains(char::is_whitespace));
        prop_assert!(!name.contains("__"));
    }

    #[test]
    fn test_report_file_name_is_a_single_path_component(
        address in "(\\.\\./|/|\\\\|\\.{1,2}|[ \t:]|[A-Za-z0-9]{1,6}){0,10}[A-Za-z0-9]{1,4}"
    ) {
        let portfolio = Portfolio::new(Arc::new(LocalStore::new(MemoryStore::new())));
        let property = portfolio.add(survey(address, 5_000.0)).unwrap();

        let name = report_file_name(&property);
        prop_assert!(name.starts_with("Solar_Report_"));
        prop_assert!(name.ends_with(".csv"));
        prop_assert!(!name.contains(['/', '\\']));
        prop_assert!(!name.contains(char::is_whitespace));

        let components: Vec<Component<'_>> = Path::new(&name).components().collect();
        prop_assert_eq!(components, vec![Component::Normal(name.as_ref())]);
    }
}

#[test]
fn test_file_backed_portfolio_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();

    let first = Portfolio::new(Arc::new(LocalStore::new(FileStore::new(dir.path()))));
    let property = first.add(survey("88 River Rd".to_string(), 12_500.0)).unwrap();

    let reopened = Portfolio::new(Arc::new(LocalStore::new(FileStore::new(dir.path()))));
    assert_eq!(reopened.get(property.id()), Some(property.clone()));

    let mut report = Vec::new();
    write_report(&property, &mut report).unwrap();
    let text = String::from_utf8(report).unwrap();
    assert!(text.contains("\"88 River Rd\""));
    assert!(text.contains("\"200.00\""));
}
