//! Validate and transform tabular sequencing samplesheets.
//!
//! A samplesheet maps sample identifiers to NanoString RCC data files plus
//! free-form metadata columns. This crate checks that a sheet has the
//! structure downstream pipelines expect and emits a normalized CSV:
//!
//! - the tabular dialect (CSV, TSV, ...) is auto-detected;
//! - required columns must be present, other columns pass through;
//! - each row is validated fail-fast (non-empty sample, `.RCC` extension)
//!   and lightly sanitized (spaces to underscores, basename derivation);
//! - recurring samples are disambiguated with a `_T<n>` suffix;
//! - the output is only written once the whole sheet validates.
//!
//! # Example
//!
//! ```no_run
//! samplesheet::check_samplesheet("samplesheet.csv", "samplesheet.valid.csv").unwrap();
//! ```

pub mod check;
pub mod error;
pub mod row;
pub mod sniff;

pub use check::{REQUIRED_COLUMNS, check_samplesheet};
pub use error::{Result, RowError, SamplesheetError};
pub use row::{Row, RowChecker, RowCheckerConfig, VALID_FORMATS};
pub use sniff::{Dialect, sniff_format};
