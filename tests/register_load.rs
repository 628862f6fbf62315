use std::io::Write;

use bevstat::io::register_csv::load_register;
use bevstat::model::record::CountField;
use bevstat::BevError;

/// A miniature register extract in the real layout: three preamble lines,
/// one (untrustworthy, duplicated) header line, data rows, nine footer
/// lines. Encoded as ISO-8859-1 like the published files.
fn fixture() -> String {
    let mut s = String::new();
    s.push_str("12411-03-03\n");
    s.push_str("Bevölkerung: Bremen, Stichtag, Geschlecht, Nationalität, Altersgruppen\n");
    s.push_str(";;;;Deutsche;;;Ausländer;;;;;\n");
    s.push_str(";;;;Insgesamt;männlich;weiblich;zusammen;männlich;weiblich;zusammen;männlich;weiblich\n");
    s.push_str("04011;Stadt Bremen;31.12.2023;unter 3;100;52;48;80;42;38;20;10;10\n");
    s.push_str("04011;Stadt Bremen;31.12.2023;3 - 6;90;45;45;70;35;35;20;10;10\n");
    s.push_str("04011;Stadt Bremen;31.12.2023;Insgesamt;190;97;93;150;77;73;40;20;20\n");
    s.push_str("04012;Östliche Vorstadt (Ortsteil);31.12.2023;unter 3;5;x;x;5;x;x;x;x;x\n");
    s.push_str("04013;Vegesack (Stadtteil);31.12.2023;6 - 10;abc;1;1;2;1;1;0;0;0\n");
    for _ in 0..8 {
        s.push_str("_____\n");
    }
    s.push_str("© Statistisches Landesamt Bremen\n");
    s
}

fn write_fixture() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("12411-03-03-2023.csv");
    let text = fixture();
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(&text);
    let mut f = std::fs::File::create(&path).expect("create fixture");
    f.write_all(&bytes).expect("write fixture");
    (dir, path.to_string_lossy().into_owned())
}

#[test]
fn loads_records_and_skips_preamble_and_footer() {
    let (_dir, path) = write_fixture();
    let outcome = load_register(&path).expect("load");

    // 4 good rows survive, the "abc" row is rejected
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.rejects.len(), 1);

    let first = &outcome.records[0];
    assert_eq!(first.territorial_unit, "Stadt Bremen");
    assert_eq!(first.date, "31.12.2023");
    assert_eq!(first.count(CountField::PopulationTotal), 100);
    assert_eq!(first.count(CountField::ForeignerFemale), 10);
}

#[test]
fn irregular_age_labels_are_normalized_on_load() {
    let (_dir, path) = write_fixture();
    let outcome = load_register(&path).expect("load");

    assert_eq!(outcome.records[0].age_group.label(), "00 - 03");
    assert_eq!(outcome.records[1].age_group.label(), "03 - 06");
    assert!(outcome.records[2].age_group.is_aggregate());
}

#[test]
fn latin1_unit_names_decode() {
    let (_dir, path) = write_fixture();
    let outcome = load_register(&path).expect("load");

    assert_eq!(outcome.records[3].territorial_unit, "Östliche Vorstadt (Ortsteil)");
}

#[test]
fn suppressed_cells_become_zero() {
    let (_dir, path) = write_fixture();
    let outcome = load_register(&path).expect("load");

    let suppressed = &outcome.records[3];
    assert_eq!(suppressed.count(CountField::PopulationTotal), 5);
    assert_eq!(suppressed.count(CountField::PopulationMale), 0);
    assert_eq!(suppressed.count(CountField::ForeignerTotal), 0);
    // the zeroed cells break component sums; that is reported, not fatal
    assert!(!suppressed.consistency_violations().is_empty());
}

#[test]
fn malformed_count_rejects_only_that_row() {
    let (_dir, path) = write_fixture();
    let outcome = load_register(&path).expect("load");

    match &outcome.rejects[0] {
        BevError::MalformedRecord { line, column, value } => {
            assert_eq!(*line, 9);
            assert_eq!(*column, "population_total");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
