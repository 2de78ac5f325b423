//! Output of collected records: CSV files, console lines, or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::{InventoryError, SoftwareRecord};

pub const CSV_HEADER: [&str; 4] = ["Software Name", "Version", "Publisher", "Description"];

const CONSOLE_SEPARATOR: &str = " | ";

/// Writes the header row followed by one row per record. The header is
/// written even when `records` is empty.
pub fn write_csv<W: Write>(records: &[SoftwareRecord], writer: W) -> Result<(), InventoryError> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `records` to it as CSV.
pub fn write_csv_file(records: &[SoftwareRecord], path: &Path) -> Result<(), InventoryError> {
    let file = File::create(path).map_err(|source| InventoryError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    write_csv(records, BufWriter::new(file)).map_err(|e| match e {
        InventoryError::Csv(err) => InventoryError::Write {
            path: path.to_path_buf(),
            source: io::Error::from(err),
        },
        other => other,
    })
}

/// One line per record: name, version, publisher, description.
pub fn write_console<W: Write>(records: &[SoftwareRecord], mut out: W) -> io::Result<()> {
    for record in records {
        let fields = [
            record.name(),
            record.version().unwrap_or_default(),
            record.publisher().unwrap_or_default(),
            record.description().unwrap_or_default(),
        ];
        writeln!(out, "{}", fields.join(CONSOLE_SEPARATOR))?;
    }
    out.flush()
}

pub fn write_json<W: Write>(
    records: &[SoftwareRecord],
    mut out: W,
    pretty: bool,
) -> Result<(), InventoryError> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, records)?;
    } else {
        serde_json::to_writer(&mut out, records)?;
    }
    writeln!(out).map_err(serde_json::Error::io)?;
    out.flush().map_err(serde_json::Error::io)?;
    Ok(())
}
