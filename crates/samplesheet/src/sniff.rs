//! Tabular dialect detection.
//!
//! Samplesheets arrive as CSV, TSV, or the occasional semicolon- or
//! pipe-delimited export. The sniffer samples the leading lines of the
//! input, scores each candidate delimiter, and rewinds the stream so the
//! caller can parse from the start with the detected dialect.

use std::io::{BufRead, Seek, SeekFrom};

use crate::error::{Result, SamplesheetError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Number of leading lines sampled for detection.
pub const SAMPLE_LINES: usize = 10;

/// A detected tabular dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

/// Detect the tabular dialect of a samplesheet.
///
/// Reads up to [`SAMPLE_LINES`] leading lines from `handle`, which must be
/// positioned at the start of the input, and seeks back to offset 0 before
/// returning so the stream can be parsed in full afterwards.
///
/// Fails with [`SamplesheetError::FormatDetection`] when the input is empty
/// or no candidate delimiter appears in the sample.
pub fn sniff_format<R: BufRead + Seek>(handle: &mut R) -> Result<Dialect> {
    let mut sample = Vec::new();
    for line in handle.by_ref().lines().take(SAMPLE_LINES) {
        sample.push(line?);
    }
    handle.seek(SeekFrom::Start(0))?;

    let delimiter = detect_delimiter(&sample)?;
    Ok(Dialect {
        delimiter,
        quote: b'"',
    })
}

/// Detect the delimiter by analyzing the sampled lines.
fn detect_delimiter(sample: &[String]) -> Result<u8> {
    let lines: Vec<&str> = sample
        .iter()
        .map(String::as_str)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SamplesheetError::FormatDetection(
            "no lines to sample".to_string(),
        ));
    }

    let mut best_delimiter = None;
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // A delimiter that appears the same number of times in every line
        // is almost certainly the field separator. Tab gets a slight bonus
        // as it is less common inside actual cell data.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = Some(delim);
        }
    }

    best_delimiter.ok_or_else(|| {
        SamplesheetError::FormatDetection("could not determine the field delimiter".to_string())
    })
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
