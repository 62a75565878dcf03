//! Per-row validation and transformation.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, RowError, SamplesheetError};

/// A single samplesheet row: column name mapped to cell value.
///
/// Columns are driven by the input header; an [`IndexMap`] keeps them in
/// header order so pass-through columns and any appended column come out in
/// a stable order.
pub type Row = IndexMap<String, String>;

/// File extensions accepted for the RCC file reference (case-sensitive,
/// suffix match).
pub const VALID_FORMATS: &[&str] = &[".RCC"];

/// Column names the checker operates on.
///
/// These are configuration only: the three pass-through names (time,
/// treatment, include) and the free-form metadata column are never validated
/// against row contents.
#[derive(Debug, Clone)]
pub struct RowCheckerConfig {
    /// Column holding the sample identifier.
    pub sample_col: String,
    /// Column holding the RCC file path.
    pub rcc_file_col: String,
    /// Column holding the RCC file basename; derived when absent or empty.
    pub rcc_file_name_col: String,
    pub time_col: String,
    pub treatment_col: String,
    pub include_col: String,
    pub other_col: String,
}

impl Default for RowCheckerConfig {
    fn default() -> Self {
        Self {
            sample_col: "SAMPLE_ID".to_string(),
            rcc_file_col: "RCC_FILE".to_string(),
            rcc_file_name_col: "RCC_FILE_NAME".to_string(),
            time_col: "TIME".to_string(),
            treatment_col: "TREATMENT".to_string(),
            include_col: "INCLUDE".to_string(),
            other_col: "OTHER_METADATA".to_string(),
        }
    }
}

/// Validates and transforms samplesheet rows one at a time.
///
/// Rows are offered in input order via [`RowChecker::validate_and_transform`];
/// accepted rows are kept in that order. After the last row,
/// [`RowChecker::validate_unique_samples`] must run exactly once to enforce
/// triple uniqueness and apply the `_T<n>` disambiguation rename.
pub struct RowChecker {
    config: RowCheckerConfig,
    seen: HashSet<(String, String, String)>,
    modified: Vec<Row>,
}

impl RowChecker {
    /// Create a checker with the default column names.
    pub fn new() -> Self {
        Self::with_config(RowCheckerConfig::default())
    }

    /// Create a checker with custom column names.
    pub fn with_config(config: RowCheckerConfig) -> Self {
        Self {
            config,
            seen: HashSet::new(),
            modified: Vec::new(),
        }
    }

    /// The column configuration in use.
    pub fn config(&self) -> &RowCheckerConfig {
        &self.config
    }

    /// The rows accepted so far, in input order.
    pub fn rows(&self) -> &[Row] {
        &self.modified
    }

    /// Validate a single row, transform it in place, and record it.
    ///
    /// Checks run fail-fast: the first violated rule rejects the row and
    /// nothing is recorded. The row's header-derived keys must already be
    /// populated by the caller.
    pub fn validate_and_transform(&mut self, mut row: Row) -> std::result::Result<(), RowError> {
        self.validate_sample(&mut row)?;
        self.validate_rcc_file(&mut row)?;

        let triple = (
            self.cell(&row, &self.config.sample_col),
            self.cell(&row, &self.config.rcc_file_col),
            self.cell(&row, &self.config.rcc_file_name_col),
        );
        self.seen.insert(triple);
        self.modified.push(row);
        Ok(())
    }

    /// Check that every (sample, RCC file, RCC file name) triple is unique,
    /// then rename recurring samples.
    ///
    /// Every accepted row's sample identifier is rewritten to `<id>_T<n>`,
    /// where `n` is the 1-based count of rows carrying that identifier so
    /// far, in input order. The uniqueness check keys on the full triple
    /// while the rename keys on the bare identifier, so distinct originals
    /// can in principle collide after renaming; that asymmetry is kept
    /// as-is.
    pub fn validate_unique_samples(&mut self) -> Result<()> {
        if self.seen.len() < self.modified.len() {
            return Err(SamplesheetError::DuplicateRow);
        }

        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for row in &mut self.modified {
            let Some(sample) = row.get(&self.config.sample_col).cloned() else {
                continue;
            };
            let n = occurrences.entry(sample.clone()).or_insert(0);
            *n += 1;
            row.insert(self.config.sample_col.clone(), format!("{sample}_T{n}"));
        }
        Ok(())
    }

    /// Reject an empty sample identifier and replace spaces with underscores.
    fn validate_sample(&self, row: &mut Row) -> std::result::Result<(), RowError> {
        let sample = row
            .get(&self.config.sample_col)
            .map(String::as_str)
            .unwrap_or("");
        if sample.is_empty() {
            return Err(RowError::EmptyField {
                field: "Sample input".to_string(),
            });
        }

        let sanitized = sample.replace(' ', "_");
        row.insert(self.config.sample_col.clone(), sanitized);
        Ok(())
    }

    /// Reject an empty or misnamed RCC file reference and derive the
    /// basename column when it is absent or blank.
    fn validate_rcc_file(&self, row: &mut Row) -> std::result::Result<(), RowError> {
        let rcc_file = row
            .get(&self.config.rcc_file_col)
            .cloned()
            .unwrap_or_default();
        if rcc_file.is_empty() {
            return Err(RowError::EmptyField {
                field: "RCC file".to_string(),
            });
        }
        self.validate_rcc_format(&rcc_file)?;

        let needs_basename = row
            .get(&self.config.rcc_file_name_col)
            .is_none_or(|name| name.is_empty());
        if needs_basename {
            row.insert(self.config.rcc_file_name_col.clone(), basename(&rcc_file));
        }
        Ok(())
    }

    /// Check that a file reference ends in one of the allowed extensions.
    fn validate_rcc_format(&self, filename: &str) -> std::result::Result<(), RowError> {
        if !VALID_FORMATS.iter().any(|ext| filename.ends_with(ext)) {
            return Err(RowError::UnrecognizedExtension {
                file: filename.to_string(),
                allowed: VALID_FORMATS.iter().map(|s| s.to_string()).collect(),
            });
        }
        Ok(())
    }

    fn cell(&self, row: &Row, col: &str) -> String {
        row.get(col).cloned().unwrap_or_default()
    }
}

impl Default for RowChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path component of a file reference.
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_spaces_replaced_with_underscores() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[("SAMPLE_ID", "Sample A 1"), ("RCC_FILE", "run1.RCC")]))
            .unwrap();

        assert_eq!(checker.rows()[0]["SAMPLE_ID"], "Sample_A_1");
    }

    #[test]
    fn test_empty_sample_rejected() {
        let mut checker = RowChecker::new();
        let err = checker
            .validate_and_transform(row(&[("SAMPLE_ID", ""), ("RCC_FILE", "run1.RCC")]))
            .unwrap_err();

        assert!(matches!(err, RowError::EmptyField { .. }));
        assert_eq!(err.to_string(), "Sample input is required.");
        assert!(checker.rows().is_empty());
    }

    #[test]
    fn test_empty_rcc_file_rejected() {
        let mut checker = RowChecker::new();
        let err = checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "")]))
            .unwrap_err();

        assert_eq!(err.to_string(), "RCC file is required.");
    }

    #[test]
    fn test_unrecognized_extension_rejected() {
        let mut checker = RowChecker::new();
        let err = checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "data.txt")]))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("unrecognized extension: data.txt"));
        assert!(message.contains(".RCC"));
    }

    #[test]
    fn test_extension_check_is_case_sensitive() {
        let mut checker = RowChecker::new();
        let err = checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "run1.rcc")]))
            .unwrap_err();

        assert!(matches!(err, RowError::UnrecognizedExtension { .. }));
    }

    #[test]
    fn test_basename_derived_when_column_absent() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[
                ("SAMPLE_ID", "S1"),
                ("RCC_FILE", "runs/batch1/run1.RCC"),
            ]))
            .unwrap();

        assert_eq!(checker.rows()[0]["RCC_FILE_NAME"], "run1.RCC");
    }

    #[test]
    fn test_basename_derived_when_column_empty() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[
                ("SAMPLE_ID", "S1"),
                ("RCC_FILE", "runs/run1.RCC"),
                ("RCC_FILE_NAME", ""),
            ]))
            .unwrap();

        assert_eq!(checker.rows()[0]["RCC_FILE_NAME"], "run1.RCC");
    }

    #[test]
    fn test_basename_passthrough_when_present() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[
                ("SAMPLE_ID", "S1"),
                ("RCC_FILE", "runs/run1.RCC"),
                ("RCC_FILE_NAME", "custom_name.RCC"),
            ]))
            .unwrap();

        assert_eq!(checker.rows()[0]["RCC_FILE_NAME"], "custom_name.RCC");
    }

    #[test]
    fn test_duplicate_triple_rejected() {
        let mut checker = RowChecker::new();
        let dup = row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "run1.RCC")]);
        checker.validate_and_transform(dup.clone()).unwrap();
        checker.validate_and_transform(dup).unwrap();

        let err = checker.validate_unique_samples().unwrap_err();
        assert!(matches!(err, SamplesheetError::DuplicateRow));
    }

    #[test]
    fn test_same_sample_different_files_renamed_in_order() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "run1.RCC")]))
            .unwrap();
        checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "run2.RCC")]))
            .unwrap();
        checker.validate_unique_samples().unwrap();

        assert_eq!(checker.rows()[0]["SAMPLE_ID"], "S1_T1");
        assert_eq!(checker.rows()[1]["SAMPLE_ID"], "S1_T2");
    }

    #[test]
    fn test_single_occurrence_still_renamed() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[("SAMPLE_ID", "S1"), ("RCC_FILE", "run1.RCC")]))
            .unwrap();
        checker.validate_unique_samples().unwrap();

        assert_eq!(checker.rows()[0]["SAMPLE_ID"], "S1_T1");
    }

    #[test]
    fn test_custom_column_names() {
        let config = RowCheckerConfig {
            sample_col: "sample".to_string(),
            rcc_file_col: "file".to_string(),
            rcc_file_name_col: "file_name".to_string(),
            ..RowCheckerConfig::default()
        };
        let mut checker = RowChecker::with_config(config);
        checker
            .validate_and_transform(row(&[("sample", "A B"), ("file", "x/y.RCC")]))
            .unwrap();

        assert_eq!(checker.rows()[0]["sample"], "A_B");
        assert_eq!(checker.rows()[0]["file_name"], "y.RCC");
    }

    #[test]
    fn test_passthrough_columns_untouched() {
        let mut checker = RowChecker::new();
        checker
            .validate_and_transform(row(&[
                ("SAMPLE_ID", "S1"),
                ("RCC_FILE", "run1.RCC"),
                ("TIME", "baseline"),
                ("TREATMENT", "DSS colitis"),
                ("INCLUDE", "1"),
                ("OTHER_METADATA", "NA"),
            ]))
            .unwrap();

        let accepted = &checker.rows()[0];
        assert_eq!(accepted["TIME"], "baseline");
        assert_eq!(accepted["TREATMENT"], "DSS colitis");
        assert_eq!(accepted["INCLUDE"], "1");
        assert_eq!(accepted["OTHER_METADATA"], "NA");
    }
}
