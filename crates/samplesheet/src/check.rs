//! End-to-end samplesheet validation.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::{Result, SamplesheetError};
use crate::row::{Row, RowChecker};
use crate::sniff::sniff_format;

/// Column headers every samplesheet must contain.
pub const REQUIRED_COLUMNS: &[&str] = &["SAMPLE_ID", "RCC_FILE"];

/// Validate `file_in` and write the normalized samplesheet to `file_out`.
///
/// The input format (CSV, TSV, ...) is auto-detected; the output is always
/// comma-delimited with minimal quoting. Validation is all-or-nothing: the
/// output file is only opened after every row has passed the per-row checks
/// and the uniqueness pass, so a failed run never leaves a partial file
/// behind.
pub fn check_samplesheet(file_in: impl AsRef<Path>, file_out: impl AsRef<Path>) -> Result<()> {
    let file_in = file_in.as_ref();

    // The whole sheet is buffered; samplesheets are small.
    let mut contents = Vec::new();
    File::open(file_in)
        .and_then(|mut f| f.read_to_end(&mut contents))
        .map_err(|e| SamplesheetError::Io {
            path: file_in.to_path_buf(),
            source: e,
        })?;

    let mut handle = Cursor::new(contents);
    let dialect = sniff_format(&mut handle)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .from_reader(handle);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if !REQUIRED_COLUMNS
        .iter()
        .all(|required| headers.iter().any(|h| h == required))
    {
        return Err(SamplesheetError::MissingRequiredColumns(
            REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
        ));
    }

    let mut checker = RowChecker::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        // Line numbers are 1-based and count the header line.
        checker
            .validate_and_transform(row)
            .map_err(|source| SamplesheetError::Row {
                line: idx + 2,
                source,
            })?;
    }
    checker.validate_unique_samples()?;

    let mut header_out = headers;
    let name_col = &checker.config().rcc_file_name_col;
    if !header_out.iter().any(|h| h == name_col) {
        header_out.push(name_col.clone());
    }

    write_samplesheet(file_out.as_ref(), &header_out, checker.rows())
}

/// Write the accepted rows as CSV, cells looked up by header name.
fn write_samplesheet(path: &Path, header: &[String], rows: &[Row]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(
            header
                .iter()
                .map(|col| row.get(col).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush()?;
    Ok(())
}
