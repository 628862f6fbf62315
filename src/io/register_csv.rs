use anyhow::Context;
use encoding_rs::WINDOWS_1252;

use crate::error::BevError;
use crate::model::age_group::AgeGroup;
use crate::model::record::{CountField, RawRecord};

/// Lines of boilerplate before the first data row.
const PREAMBLE_LINES: usize = 3;
/// Source/licence footer lines after the last data row.
const FOOTER_LINES: usize = 9;

/// Value the register uses for counts suppressed for privacy. Mapped to 0
/// before integer coercion.
const SUPPRESSED: &str = "x";

/// Positional layout of a data row. The file's own header line is unreliable
/// (duplicated German labels across nationality blocks), so the column
/// positions are authoritative, never header names. Columns past the last
/// mapped one are ignored.
const META_COLUMNS: [&str; 4] = ["territory_key", "territorial_unit", "date", "age_group"];
const COUNT_OFFSET: usize = META_COLUMNS.len();
const ROW_WIDTH: usize = COUNT_OFFSET + CountField::ALL.len();

/// Result of loading one register extract. Rejected rows do not abort the
/// load; the surviving table is still usable alongside the per-row errors.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<RawRecord>,
    pub rejects: Vec<BevError>,
}

/// Load a yearly register extract (ISO-8859-1, ';'-separated) from disk.
pub fn load_register(path: &str) -> anyhow::Result<LoadOutcome> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to open register extract: {}", path))?;
    parse_register(&bytes)
}

/// Parse a register extract from raw bytes.
pub fn parse_register(bytes: &[u8]) -> anyhow::Result<LoadOutcome> {
    let (text, _, _) = WINDOWS_1252.decode(bytes);

    let lines: Vec<&str> = text.lines().collect();
    anyhow::ensure!(
        lines.len() > PREAMBLE_LINES + FOOTER_LINES,
        "register extract too short: {} lines",
        lines.len()
    );
    let body = &lines[PREAMBLE_LINES..lines.len() - FOOTER_LINES];

    let mut records = Vec::with_capacity(body.len());
    let mut rejects = Vec::new();

    // The body's first line is the column header; the reader consumes it but
    // its names are never consulted (positions are authoritative).
    let body_bytes = body.join("\n").into_bytes();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(body_bytes.as_slice());

    for (idx, result) in rdr.records().enumerate() {
        // 1-based line number in the original file
        let line = PREAMBLE_LINES + idx + 2;
        // a reader-level record error is rejected like any other bad row;
        // the rest of the extract stays loadable
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let err = BevError::UnreadableRow { line, source: e };
                log::warn!("rejected row: {}", err);
                rejects.push(err);
                continue;
            }
        };
        match parse_row(&row, line) {
            Ok(record) => {
                for violation in record.consistency_violations() {
                    log::warn!(
                        "inconsistent counts at line {} ({}, {}): {}",
                        line,
                        record.territorial_unit,
                        record.age_group,
                        violation
                    );
                }
                records.push(record);
            }
            Err(e) => {
                log::warn!("rejected row: {}", e);
                rejects.push(e);
            }
        }
    }

    log::debug!(
        "register load: {} records, {} rejected",
        records.len(),
        rejects.len()
    );
    Ok(LoadOutcome { records, rejects })
}

fn parse_row(row: &csv::StringRecord, line: usize) -> Result<RawRecord, BevError> {
    if row.len() < ROW_WIDTH {
        let missing = row.len();
        let column = if missing < COUNT_OFFSET {
            META_COLUMNS[missing]
        } else {
            CountField::ALL[missing - COUNT_OFFSET].name()
        };
        return Err(BevError::MalformedRecord {
            line,
            column,
            value: String::new(),
        });
    }

    let mut counts = [0u64; 9];
    for field in CountField::ALL {
        let cell = row[COUNT_OFFSET + field.index()].trim();
        let cell = if cell == SUPPRESSED { "0" } else { cell };
        counts[field.index()] = cell.parse().map_err(|_| BevError::MalformedRecord {
            line,
            column: field.name(),
            value: cell.to_string(),
        })?;
    }

    Ok(RawRecord {
        territory_key: row[0].trim().to_string(),
        territorial_unit: row[1].trim().to_string(),
        date: row[2].trim().to_string(),
        age_group: AgeGroup::parse(&row[3]),
        counts,
    })
}
