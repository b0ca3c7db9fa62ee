//! Headered CSV training tables with a single binary label column.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset has no header row")]
    Empty,
    #[error("label column `{0}` not found in header")]
    MissingLabelColumn(String),
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: column `{column}` has non-numeric value `{value}`")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}: label must be 0 or 1, found `{value}`")]
    InvalidLabel { line: usize, value: String },
}

/// Feature matrix plus labels, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<bool>,
}

impl Dataset {
    /// Parse CSV text, dropping `label_column` from the features.
    pub fn from_csv_str(text: &str, label_column: &str) -> Result<Self, DatasetError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines.next().ok_or(DatasetError::Empty)?;
        let columns: Vec<String> = header
            .split(',')
            .map(|c| c.trim().trim_matches('"').to_string())
            .collect();
        let label_idx = columns
            .iter()
            .position(|c| c == label_column)
            .ok_or_else(|| DatasetError::MissingLabelColumn(label_column.to_string()))?;

        let feature_names: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, c)| c.clone())
            .collect();

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (line, raw) in lines {
            let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
            if fields.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    line,
                    expected: columns.len(),
                    found: fields.len(),
                });
            }

            let mut row = Vec::with_capacity(feature_names.len());
            for (i, field) in fields.iter().enumerate() {
                if i == label_idx {
                    labels.push(parse_label(line, field)?);
                    continue;
                }
                let value = field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DatasetError::InvalidValue {
                        line,
                        column: columns[i].clone(),
                        value: field.to_string(),
                    })?;
                row.push(value);
            }
            rows.push(row);
        }

        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    pub fn from_csv_path(path: impl AsRef<Path>, label_column: &str) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_str(&text, label_column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Subset of rows by index, keeping the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

fn parse_label(line: usize, field: &str) -> Result<bool, DatasetError> {
    match field.parse::<f64>() {
        Ok(v) if v == 0.0 => Ok(false),
        Ok(v) if v == 1.0 => Ok(true),
        _ => Err(DatasetError::InvalidLabel {
            line,
            value: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a,b,Outcome\n1,2.5,0\n\n3,4,1\n";

    #[test]
    fn label_column_is_dropped() {
        let ds = Dataset::from_csv_str(SAMPLE, "Outcome").unwrap();
        assert_eq!(ds.feature_names, vec!["a", "b"]);
        assert_eq!(ds.rows, vec![vec![1.0, 2.5], vec![3.0, 4.0]]);
        assert_eq!(ds.labels, vec![false, true]);
        assert_eq!(ds.n_features(), 2);
    }

    #[test]
    fn label_column_may_sit_anywhere() {
        let ds = Dataset::from_csv_str("target,x\n1,7\n0,8\n", "target").unwrap();
        assert_eq!(ds.feature_names, vec!["x"]);
        assert_eq!(ds.rows, vec![vec![7.0], vec![8.0]]);
        assert_eq!(ds.labels, vec![true, false]);
    }

    #[test]
    fn missing_label_column() {
        let err = Dataset::from_csv_str(SAMPLE, "target").unwrap_err();
        assert!(matches!(err, DatasetError::MissingLabelColumn(c) if c == "target"));
    }

    #[test]
    fn bad_cell_reports_line_and_column() {
        let err = Dataset::from_csv_str("a,b,Outcome\n1,2,0\n1,x,1\n", "Outcome").unwrap_err();
        match err {
            DatasetError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "b");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_and_bad_labels() {
        assert!(matches!(
            Dataset::from_csv_str("a,Outcome\n1,0,3\n", "Outcome"),
            Err(DatasetError::RaggedRow { line: 2, expected: 2, found: 3 })
        ));
        assert!(matches!(
            Dataset::from_csv_str("a,Outcome\n1,2\n", "Outcome"),
            Err(DatasetError::InvalidLabel { line: 2, .. })
        ));
        assert!(matches!(
            Dataset::from_csv_str("\n\n", "Outcome"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn select_keeps_order() {
        let ds = Dataset::from_csv_str(SAMPLE, "Outcome").unwrap();
        let sub = ds.select(&[1, 0]);
        assert_eq!(sub.labels, vec![true, false]);
        assert_eq!(sub.rows[0], vec![3.0, 4.0]);
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("train.csv");
        std::fs::write(&path, SAMPLE).expect("write");
        let ds = Dataset::from_csv_path(&path, "Outcome").expect("load");
        assert_eq!(ds.len(), 2);

        let missing = Dataset::from_csv_path(tmp.path().join("nope.csv"), "Outcome");
        assert!(matches!(missing, Err(DatasetError::Io { .. })));
    }
}
