// File: crates/chart-core/src/dataset.rs
// Summary: Column-oriented dataset model (columns + type/color/name tables) and JSON loading.
// Notes:
// - Columns are trusted input. Mismatched lengths or a missing axis column are not
//   rejected here; the engine renders whatever the columns describe.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("column {index} is empty; expected a leading string key")]
    EmptyColumn { index: usize },
    #[error("column {index} does not start with a string key")]
    MissingKey { index: usize },
    #[error("column '{key}' holds a non-numeric sample at position {position}")]
    NonNumeric { key: String, position: usize },
}

/// Role of a column. Any tag other than `line` marks the shared X axis.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ColumnType {
    Line,
    Axis(String),
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        if tag == "line" { ColumnType::Line } else { ColumnType::Axis(tag) }
    }
}

impl ColumnType {
    pub fn is_line(&self) -> bool { matches!(self, ColumnType::Line) }
}

/// One named sample column. For the axis column the samples are
/// millisecond timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub key: String,
    pub samples: Vec<f64>,
}

impl Column {
    pub fn new(key: impl Into<String>, samples: Vec<f64>) -> Self {
        Self { key: key.into(), samples }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub types: HashMap<String, ColumnType>,
    pub colors: HashMap<String, String>,
    pub names: HashMap<String, String>,
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<Vec<Value>>,
    #[serde(default)]
    types: HashMap<String, ColumnType>,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    names: HashMap<String, String>,
}

impl Dataset {
    pub fn new() -> Self { Self::default() }

    /// Parse the `{columns, types, colors, names}` JSON shape where each column
    /// is `[key, sample, sample, ...]`.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let mut columns = Vec::with_capacity(raw.columns.len());
        for (index, column) in raw.columns.into_iter().enumerate() {
            let mut values = column.into_iter();
            let key = match values.next() {
                None => return Err(DatasetError::EmptyColumn { index }),
                Some(Value::String(key)) => key,
                Some(_) => return Err(DatasetError::MissingKey { index }),
            };
            let samples = values
                .enumerate()
                .map(|(position, v)| {
                    v.as_f64().ok_or_else(|| DatasetError::NonNumeric { key: key.clone(), position })
                })
                .collect::<Result<Vec<_>, _>>()?;
            columns.push(Column { key, samples });
        }
        Ok(Self { columns, types: raw.types, colors: raw.colors, names: raw.names })
    }

    /// Add the X axis column (timestamps in milliseconds).
    pub fn with_axis(mut self, key: impl Into<String>, timestamps: Vec<f64>) -> Self {
        let key = key.into();
        self.types.insert(key.clone(), ColumnType::Axis("x".into()));
        self.columns.push(Column { key, samples: timestamps });
        self
    }

    /// Add a line series with its color and display name.
    pub fn with_line(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        samples: Vec<f64>,
    ) -> Self {
        let key = key.into();
        self.types.insert(key.clone(), ColumnType::Line);
        self.colors.insert(key.clone(), color.into());
        self.names.insert(key.clone(), name.into());
        self.columns.push(Column { key, samples });
        self
    }

    pub fn is_line(&self, key: &str) -> bool {
        self.types.get(key).is_some_and(ColumnType::is_line)
    }

    /// Columns tagged `line`, in dataset order.
    pub fn line_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| self.is_line(&c.key))
    }

    /// First column not tagged `line`.
    pub fn axis_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| !self.is_line(&c.key))
    }

    /// Sample count of the first column, which drives the horizontal scale.
    pub fn sample_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.samples.len())
    }

    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Display name, falling back to the column key.
    pub fn name<'a>(&'a self, key: &'a str) -> &'a str {
        self.names.get(key).map_or(key, String::as_str)
    }
}
