//! Launch Dataset Loader
//! Reads the launch records CSV with Polars and validates the schema.

use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Categorical launch-site identifier.
pub const SITE: &str = "Launch Site";
/// Numeric payload mass in kilograms.
pub const PAYLOAD: &str = "Payload Mass (kg)";
/// Outcome flag: 1 = success, 0 = failure.
pub const CLASS: &str = "class";
/// Categorical booster version.
pub const BOOSTER: &str = "Booster Version Category";
/// Zero-based position of the record in the source file.
pub const ROW: &str = "index";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Column '{column}' has an invalid value type: {source}")]
    InvalidColumn {
        column: &'static str,
        source: PolarsError,
    },
    #[error("Column '{column}' has an empty value at row {row}")]
    NullValue { column: &'static str, row: usize },
    #[error("Outcome flag must be 0 or 1, found {value} at row {row}")]
    InvalidOutcome { value: f64, row: usize },
    #[error("Dataset has no launch records")]
    EmptyDataset,
}

/// The launch record table plus the aggregates the dashboard is seeded with.
///
/// Immutable after construction; every handler receives it by reference.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    df: DataFrame,
    payload_min: f64,
    payload_max: f64,
    sites: Vec<String>,
}

impl LaunchDataset {
    /// Load and validate a launch records CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let dataset = Self::from_frame(&raw)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            sites = dataset.sites.len(),
            payload_min = dataset.payload_min,
            payload_max = dataset.payload_max,
            "Loaded launch records"
        );
        Ok(dataset)
    }

    /// Build a dataset from an already parsed frame.
    ///
    /// Only the four required columns are kept; they are strictly cast to
    /// their types and must not contain nulls.
    pub fn from_frame(raw: &DataFrame) -> Result<Self, LoaderError> {
        let sites = string_values(raw, SITE)?;
        let payloads = float_values(raw, PAYLOAD)?;
        let outcomes = outcome_values(raw)?;
        let boosters = string_values(raw, BOOSTER)?;

        if sites.is_empty() {
            return Err(LoaderError::EmptyDataset);
        }

        let payload_min = payloads.iter().copied().fold(f64::INFINITY, f64::min);
        let payload_max = payloads.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Distinct sites in first-seen order
        let mut seen = HashSet::new();
        let distinct_sites: Vec<String> = sites
            .iter()
            .filter(|site| seen.insert(site.as_str()))
            .cloned()
            .collect();

        let rows: Vec<u64> = (0..sites.len() as u64).collect();
        let df = DataFrame::new(vec![
            Column::new(ROW.into(), rows),
            Column::new(SITE.into(), sites),
            Column::new(PAYLOAD.into(), payloads),
            Column::new(CLASS.into(), outcomes),
            Column::new(BOOSTER.into(), boosters),
        ])?;

        Ok(Self {
            df,
            payload_min,
            payload_max,
            sites: distinct_sites,
        })
    }

    /// The normalized table: row index, site, payload, class, booster.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Distinct launch sites in the order they first appear.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}

fn required_series(df: &DataFrame, column: &'static str, dtype: DataType) -> Result<Series, LoaderError> {
    let col = df
        .column(column)
        .map_err(|_| LoaderError::MissingColumn(column))?;
    col.as_materialized_series()
        .strict_cast(&dtype)
        .map_err(|source| LoaderError::InvalidColumn { column, source })
}

fn string_values(df: &DataFrame, column: &'static str) -> Result<Vec<String>, LoaderError> {
    let series = required_series(df, column, DataType::String)?;
    series
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(|s| s.to_string())
                .ok_or(LoaderError::NullValue { column, row })
        })
        .collect()
}

fn float_values(df: &DataFrame, column: &'static str) -> Result<Vec<f64>, LoaderError> {
    let series = required_series(df, column, DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.filter(|x| !x.is_nan())
                .ok_or(LoaderError::NullValue { column, row })
        })
        .collect()
}

fn outcome_values(df: &DataFrame) -> Result<Vec<i64>, LoaderError> {
    // Read as float so fractional flags are seen before narrowing
    let series = required_series(df, CLASS, DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            Some(value) if value == 0.0 => Ok(0),
            Some(value) if value == 1.0 => Ok(1),
            Some(value) if value.is_nan() => Err(LoaderError::NullValue { column: CLASS, row }),
            Some(value) => Err(LoaderError::InvalidOutcome { value, row }),
            None => Err(LoaderError::NullValue { column: CLASS, row }),
        })
        .collect()
}
