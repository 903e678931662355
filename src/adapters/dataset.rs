//! CSV dataset adapter: Loads the bundled training table.
//!
//! The file carries a header row, eleven numerically pre-encoded feature
//! columns and the binary `HeartDisease` label. Extra columns are ignored.
//! Rows with a `Cholesterol` of 0 are invalid measurements and are skipped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use linfa::Dataset;
use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::domain::{feature_columns, FEATURE_COUNT};

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: {column} is not a finite number")]
    NonFinite { line: usize, column: &'static str },

    #[error("Line {line}: HeartDisease label {value} must be 0 or 1")]
    InvalidLabel { line: usize, value: i64 },

    #[error("Dataset contains no usable rows")]
    Empty,

    #[error("Dataset shape error: {0}")]
    Shape(String),
}

/// One CSV row, by header name.
#[derive(Debug, Deserialize)]
struct HeartRow {
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "Sex")]
    sex: f64,
    #[serde(rename = "ChestPainType")]
    chest_pain: f64,
    #[serde(rename = "RestingBP")]
    resting_bp: f64,
    #[serde(rename = "Cholesterol")]
    cholesterol: f64,
    #[serde(rename = "FastingBS")]
    fasting_bs: f64,
    #[serde(rename = "RestingECG")]
    resting_ecg: f64,
    #[serde(rename = "MaxHR")]
    max_hr: f64,
    #[serde(rename = "ExerciseAngina")]
    exercise_angina: f64,
    #[serde(rename = "Oldpeak")]
    oldpeak: f64,
    #[serde(rename = "ST_Slope")]
    st_slope: f64,
    #[serde(rename = "HeartDisease")]
    heart_disease: i64,
}

impl HeartRow {
    fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.sex,
            self.chest_pain,
            self.resting_bp,
            self.cholesterol,
            self.fasting_bs,
            self.resting_ecg,
            self.max_hr,
            self.exercise_angina,
            self.oldpeak,
            self.st_slope,
        ]
    }
}

/// In-memory training table: one feature row per patient plus its label.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    records: Array2<f64>,
    targets: Array1<usize>,
    skipped: usize,
}

impl TrainingTable {
    /// Number of usable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &Array2<f64> {
        &self.records
    }

    #[must_use]
    pub fn targets(&self) -> &Array1<usize> {
        &self.targets
    }

    /// Rows dropped because their cholesterol reading was 0.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }

    /// Count of rows per label, as `(label 0, label 1)`.
    #[must_use]
    pub fn class_counts(&self) -> (usize, usize) {
        let ones = self.targets.iter().filter(|&&t| t == 1).count();
        (self.len() - ones, ones)
    }

    /// Copy the table into a linfa dataset with named feature columns.
    #[must_use]
    pub fn to_dataset(&self) -> Dataset<f64, usize, ndarray::Ix1> {
        Dataset::new(self.records.clone(), self.targets.clone())
            .with_feature_names(feature_columns().to_vec())
    }
}

/// Load the training table from a CSV file.
///
/// # Errors
/// Returns `DatasetError` if the file is missing or any row is malformed.
pub fn load_training_table(path: &Path) -> Result<TrainingTable, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_training_table(file)?;

    tracing::info!(
        "Loaded {} training rows from {:?} ({} skipped)",
        table.len(),
        path,
        table.skipped_rows()
    );
    Ok(table)
}

/// Parse a training table from any CSV reader.
///
/// # Errors
/// Returns `DatasetError` if the header is missing a column or any row is malformed.
pub fn read_training_table<R: Read>(reader: R) -> Result<TrainingTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = feature_columns();
    let mut values = Vec::new();
    let mut targets = Vec::new();
    let mut skipped = 0;

    for (i, row) in csv_reader.deserialize::<HeartRow>().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = i + 2;

        let features = row.features();
        if let Some(col) = features.iter().position(|v| !v.is_finite()) {
            return Err(DatasetError::NonFinite {
                line,
                column: columns[col],
            });
        }

        let label = match row.heart_disease {
            0 => 0,
            1 => 1,
            value => return Err(DatasetError::InvalidLabel { line, value }),
        };

        if row.cholesterol == 0.0 {
            skipped += 1;
            continue;
        }

        values.extend_from_slice(&features);
        targets.push(label);
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows with a cholesterol reading of 0", skipped);
    }
    if targets.is_empty() {
        return Err(DatasetError::Empty);
    }

    let records = Array2::from_shape_vec((targets.len(), FEATURE_COUNT), values)
        .map_err(|e| DatasetError::Shape(e.to_string()))?;

    Ok(TrainingTable {
        records,
        targets: Array1::from(targets),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Age,Sex,ChestPainType,RestingBP,Cholesterol,FastingBS,RestingECG,MaxHR,ExerciseAngina,Oldpeak,ST_Slope,HeartDisease";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_read_valid_table() {
        let data = csv(&[
            "40,0,1,140,289,0,0,172,0,0,1,1",
            "49,1,2,160,180,0,0,156,0,1.0,0,0",
            "37,0,1,130,283,0,1,98,0,0,1,1",
        ]);
        let table = read_training_table(data.as_bytes()).expect("Should parse");

        assert_eq!(table.len(), 3);
        assert_eq!(table.records().dim(), (3, FEATURE_COUNT));
        assert_eq!(table.targets().to_vec(), vec![1, 0, 1]);
        assert!((table.records()[[1, 9]] - 1.0).abs() < f64::EPSILON);
        assert_eq!(table.class_counts(), (1, 2));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let data = "Id,Age,Sex,ChestPainType,RestingBP,Cholesterol,FastingBS,RestingECG,MaxHR,ExerciseAngina,Oldpeak,ST_Slope,HeartDisease\n\
                    7,54,0,2,150,195,0,0,122,0,0,1,1\n";
        let table = read_training_table(data.as_bytes()).expect("Should parse");
        assert_eq!(table.len(), 1);
        assert!((table.records()[[0, 0]] - 54.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_cholesterol_rows_are_skipped() {
        let data = csv(&[
            "65,0,3,115,0,0,0,93,1,0,0,0",
            "48,1,1,120,284,0,0,120,0,0,1,1",
        ]);
        let table = read_training_table(data.as_bytes()).expect("Should parse");
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped_rows(), 1);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let data = "Age,Sex,HeartDisease\n40,0,1\n";
        let err = read_training_table(data.as_bytes()).expect_err("Should fail");
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let data = csv(&["40,M,1,140,289,0,0,172,0,0,1,1"]);
        let err = read_training_table(data.as_bytes()).expect_err("Should fail");
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_non_binary_label_is_malformed() {
        let data = csv(&["40,0,1,140,289,0,0,172,0,0,1,2"]);
        match read_training_table(data.as_bytes()) {
            Err(DatasetError::InvalidLabel { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, 2);
            }
            other => panic!("expected invalid label, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table() {
        let data = csv(&[]);
        let err = read_training_table(data.as_bytes()).expect_err("Should fail");
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        write!(file, "{}", csv(&["40,0,1,140,289,0,0,172,0,0,1,1"])).expect("write");

        let table = load_training_table(file.path()).expect("Should load");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_training_table(Path::new("/nonexistent/heart.csv")).expect_err("Should fail");
        assert!(matches!(err, DatasetError::Open { .. }));
    }

    #[test]
    fn test_to_dataset_carries_feature_names() {
        let data = csv(&["40,0,1,140,289,0,0,172,0,0,1,1"]);
        let table = read_training_table(data.as_bytes()).expect("Should parse");
        let dataset = table.to_dataset();
        assert_eq!(dataset.feature_names().len(), FEATURE_COUNT);
        assert_eq!(dataset.feature_names()[10], "ST_Slope");
    }
}
