use std::io::Read;
use std::path::Path;

use ndarray::Array2;

/// Player-name column of the reference dataset.
pub const NAME_COLUMN: &str = "Name";
/// Label column of the reference dataset.
pub const TARGET_COLUMN: &str = "TARGET_5Yrs";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid number {value:?} at row {row}, column {column:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("missing column {0:?}")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Uploaded table: every column is a feature, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl Dataset {
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut cells = Vec::new();
        let mut rows = 0;
        for record in reader.records() {
            let record = record?;
            for (j, raw) in record.iter().enumerate() {
                let value = raw.trim().parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
                    row: rows,
                    column: columns.get(j).cloned().unwrap_or_default(),
                    value: raw.to_string(),
                })?;
                cells.push(value);
            }
            rows += 1;
        }

        let values = Array2::from_shape_vec((rows, columns.len()), cells)?;

        Ok(Self { columns, values })
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        Self::from_csv_reader(bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn len(&self) -> usize {
        self.values.nrows()
    }
}

/// Static population used for name lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    pub names: Vec<String>,
    pub feature_columns: Vec<String>,
    pub features: Array2<f64>,
}

impl ReferenceDataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    /// Drops the name and label columns; missing values become 0.0.
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, DatasetError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let headers = reader.headers()?.clone();

        let name_idx = headers
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .ok_or(DatasetError::MissingColumn(NAME_COLUMN))?;
        let target_idx = headers
            .iter()
            .position(|h| h.trim() == TARGET_COLUMN)
            .ok_or(DatasetError::MissingColumn(TARGET_COLUMN))?;

        let feature_idx: Vec<usize> = (0..headers.len())
            .filter(|i| *i != name_idx && *i != target_idx)
            .collect();
        let feature_columns: Vec<String> = feature_idx
            .iter()
            .map(|i| headers[*i].to_string())
            .collect();

        let mut names = Vec::new();
        let mut cells = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            names.push(record[name_idx].to_string());
            for &j in &feature_idx {
                cells.push(parse_or_zero(&record[j]).ok_or_else(|| {
                    DatasetError::InvalidNumber {
                        row,
                        column: headers[j].to_string(),
                        value: record[j].to_string(),
                    }
                })?);
            }
        }

        let features = Array2::from_shape_vec((names.len(), feature_idx.len()), cells)?;

        Ok(Self {
            names,
            feature_columns,
            features,
        })
    }

    /// Index of the first row whose name matches exactly.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

fn parse_or_zero(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Some(0.0),
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_keeps_all_columns_in_order() {
        let csv_data = "\
a,b,c
1,2,3
4.5,-1,0
";
        let ds = Dataset::from_csv_bytes(csv_data.as_bytes()).unwrap();
        assert_eq!(ds.columns, vec!["a", "b", "c"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.values[[1, 0]], 4.5);
        assert_eq!(ds.values[[1, 1]], -1.0);
    }

    #[test]
    fn test_upload_header_only_is_empty() {
        let ds = Dataset::from_csv_bytes(b"a,b,c\n").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_upload_blank_body_is_empty() {
        let ds = Dataset::from_csv_bytes(b"").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_upload_rejects_text_cell() {
        let err = Dataset::from_csv_bytes(b"Name,GP\nJohn,12\n").unwrap_err();
        match err {
            DatasetError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, "Name");
                assert_eq!(value, "John");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_upload_rejects_ragged_rows() {
        let err = Dataset::from_csv_bytes(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_reference_drops_name_and_target_and_fills_missing() {
        let csv_data = "\
Name,GP,3P%,TARGET_5Yrs,TOV
Alpha,36,,1.0,1.5
Bravo,80,NaN,0.0,2.0
";
        let reference = ReferenceDataset::from_csv_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(reference.names, vec!["Alpha", "Bravo"]);
        assert_eq!(reference.feature_columns, vec!["GP", "3P%", "TOV"]);
        assert_eq!(reference.features.shape(), &[2, 3]);
        assert_eq!(reference.features[[0, 1]], 0.0);
        assert_eq!(reference.features[[1, 1]], 0.0);
        assert_eq!(reference.features[[1, 2]], 2.0);
    }

    #[test]
    fn test_reference_lookup_is_exact_and_first_match() {
        let csv_data = "\
Name,GP,TARGET_5Yrs
Alpha,1,0
alpha,2,0
Alpha,3,1
";
        let reference = ReferenceDataset::from_csv_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(reference.position("Alpha"), Some(0));
        assert_eq!(reference.position("alpha"), Some(1));
        assert_eq!(reference.position("ALPHA"), None);
    }

    #[test]
    fn test_reference_requires_name_column() {
        let err = ReferenceDataset::from_csv_reader("GP,TARGET_5Yrs\n1,0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(NAME_COLUMN)));
    }
}
