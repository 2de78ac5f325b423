use pretty_assertions::assert_eq;
use swinv_inventory::render::{write_console, write_csv_file, CSV_HEADER};
use swinv_inventory::{
    collect_installed_software, InventoryError, MemoryRegistry, PublisherFilter, SoftwareRecord,
    UNINSTALL_PATH,
};

fn entry(registry: &mut MemoryRegistry, key: &str, values: &[(&str, &str)]) {
    let path = format!("{UNINSTALL_PATH}\\{key}");
    registry.insert_key(&path);
    for (name, data) in values {
        registry.insert_value(&path, name, data);
    }
}

fn sample_registry() -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    entry(
        &mut registry,
        "{A}",
        &[
            ("DisplayName", "Widget"),
            ("Publisher", "Acme Inc"),
            ("DisplayVersion", "1.2"),
        ],
    );
    entry(&mut registry, "{B}", &[("Publisher", "Acme Inc")]);
    entry(
        &mut registry,
        "Globex.Suite",
        &[
            ("DisplayName", "Globex Suite"),
            ("Publisher", "GLOBEX Corporation"),
            ("DisplayVersion", "10.0.1"),
            ("Description", "Office tools, \"deluxe\" edition"),
        ],
    );
    entry(&mut registry, "NoPublisher", &[("DisplayName", "Portable Thing")]);
    registry
}

fn names(records: &[SoftwareRecord]) -> Vec<&str> {
    records.iter().map(SoftwareRecord::name).collect()
}

#[test]
fn unfiltered_run_keeps_every_named_entry() {
    let registry = sample_registry();
    let records = collect_installed_software(&registry, &PublisherFilter::All).unwrap();

    assert_eq!(names(&records), vec!["Widget", "Globex Suite", "Portable Thing"]);
}

#[test]
fn filter_and_exclude_on_publisher() {
    let registry = sample_registry();

    let acme = PublisherFilter::from_keywords(Some("acme".into()), None).unwrap();
    let records = collect_installed_software(&registry, &acme).unwrap();
    assert_eq!(names(&records), vec!["Widget"]);

    let not_globex = PublisherFilter::from_keywords(None, Some("globex".into())).unwrap();
    let records = collect_installed_software(&registry, &not_globex).unwrap();
    assert_eq!(names(&records), vec!["Widget", "Portable Thing"]);

    let not_acme = PublisherFilter::from_keywords(None, Some("acme".into())).unwrap();
    let records = collect_installed_software(&registry, &not_acme).unwrap();
    assert_eq!(names(&records), vec!["Globex Suite", "Portable Thing"]);
}

#[test]
fn filtered_records_satisfy_the_keyword() {
    let registry = sample_registry();
    let all = collect_installed_software(&registry, &PublisherFilter::All).unwrap();

    let include = PublisherFilter::Include("Acme".into());
    let kept = collect_installed_software(&registry, &include).unwrap();
    for record in &all {
        let matches = record
            .publisher()
            .is_some_and(|p| p.to_lowercase().contains("acme"));
        assert_eq!(kept.contains(record), matches, "{}", record.name());
    }

    let exclude = PublisherFilter::Exclude("Acme".into());
    let kept = collect_installed_software(&registry, &exclude).unwrap();
    for record in &all {
        let matches = record
            .publisher()
            .is_some_and(|p| p.to_lowercase().contains("acme"));
        assert_eq!(kept.contains(record), !matches, "{}", record.name());
    }
}

#[test]
fn conflicting_keywords_fail_before_touching_the_registry() {
    let registry = sample_registry();

    let result = PublisherFilter::from_keywords(Some("Acme".into()), Some("Globex".into()))
        .and_then(|filter| collect_installed_software(&registry, &filter));

    let err = result.unwrap_err();
    assert!(matches!(err, InventoryError::ConflictingFilters));
    assert_eq!(
        err.to_string(),
        "You cannot use both filter and exclude options at the same time."
    );
    assert_eq!(registry.operations(), 0);
}

#[test]
fn repeated_runs_are_identical() {
    let registry = sample_registry();
    let first = collect_installed_software(&registry, &PublisherFilter::All).unwrap();
    let second = collect_installed_software(&registry, &PublisherFilter::All).unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.open_handles(), 0);
}

#[test]
fn optional_values_default_to_absent() {
    let registry = sample_registry();
    let records = collect_installed_software(&registry, &PublisherFilter::All).unwrap();

    let portable = records
        .iter()
        .find(|r| r.name() == "Portable Thing")
        .unwrap();
    assert_eq!(portable.version(), None);
    assert_eq!(portable.publisher(), None);
    assert_eq!(portable.description(), None);
}

#[test]
fn csv_file_reads_back_to_the_same_records() {
    let registry = sample_registry();
    let records = collect_installed_software(&registry, &PublisherFilter::All).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("software.csv");
    write_csv_file(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(CSV_HEADER.to_vec()));

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|row| row.unwrap().iter().map(String::from).collect())
        .collect();
    let expected: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            [
                r.name(),
                r.version().unwrap_or_default(),
                r.publisher().unwrap_or_default(),
                r.description().unwrap_or_default(),
            ]
            .map(String::from)
            .to_vec()
        })
        .collect();
    assert_eq!(rows, expected);
}

#[test]
fn no_matches_still_writes_the_header() {
    let registry = sample_registry();
    let filter = PublisherFilter::Include("Initech".into());
    let records = collect_installed_software(&registry, &filter).unwrap();
    assert!(records.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    write_csv_file(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 4);
    assert_eq!(reader.records().count(), 0);

    let mut console = Vec::new();
    write_console(&records, &mut console).unwrap();
    assert!(console.is_empty());
}
