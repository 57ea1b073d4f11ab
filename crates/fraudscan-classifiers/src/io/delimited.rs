//! CSV/TSV reader for labeled feature tables and a TSV writer for test predictions.
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;

use crate::data_handling::Dataset;
use crate::math::{Array1, Array2};
use crate::report::EvaluationReport;

/// Configuration for reading labeled CSV/TSV files.
#[derive(Debug, Clone)]
pub struct DelimitedReaderConfig {
    /// Field delimiter. When `None`, `.tsv` files use tabs and everything else commas.
    pub delimiter: Option<u8>,
    pub has_headers: bool,
    /// Column holding 0/1 labels. Requires headers; when `None` the last
    /// column is used.
    pub label_column: Option<String>,
}

impl Default for DelimitedReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_headers: true,
            label_column: None,
        }
    }
}

fn infer_delimiter(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

fn parse_label(field: &str) -> Result<u8> {
    let value: f64 = field
        .trim()
        .parse()
        .with_context(|| format!("Label '{}' is not numeric", field))?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        bail!("Label '{}' must be 0 or 1", field)
    }
}

/// Read a labeled feature table. Every column except the label column is
/// parsed as a floating point feature.
pub fn read_labeled_delimited<P: AsRef<Path>>(
    path: P,
    config: &DelimitedReaderConfig,
) -> Result<Dataset> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter.unwrap_or_else(|| infer_delimiter(path)))
        .has_headers(config.has_headers)
        .from_path(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let headers = if config.has_headers {
        Some(
            reader
                .headers()
                .context("Failed to read header row")?
                .clone(),
        )
    } else {
        None
    };

    let label_idx = match (&config.label_column, &headers) {
        (Some(name), Some(headers)) => Some(
            find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing label column '{}'", name))?,
        ),
        (Some(name), None) => bail!(
            "Label column '{}' was requested but the file is read without headers",
            name
        ),
        (None, _) => None,
    };

    let mut data = Vec::new();
    let mut labels = Vec::new();
    let mut n_cols = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row + 1))?;
        if record.len() < 2 {
            bail!(
                "Row {} has {} columns; expected at least one feature and a label",
                row + 1,
                record.len()
            );
        }
        n_cols = record.len();
        let label_idx = label_idx.unwrap_or(record.len() - 1);

        for (col, field) in record.iter().enumerate() {
            if col == label_idx {
                labels.push(
                    parse_label(field).with_context(|| format!("Invalid label in row {}", row + 1))?,
                );
            } else {
                let value: f64 = field.trim().parse().with_context(|| {
                    format!("Invalid feature '{}' in row {}, column {}", field, row + 1, col + 1)
                })?;
                if !value.is_finite() {
                    bail!(
                        "Feature '{}' in row {}, column {} is not a finite number",
                        field,
                        row + 1,
                        col + 1
                    );
                }
                data.push(value);
            }
        }
    }

    let n_samples = labels.len();
    let n_features = n_cols.saturating_sub(1);
    let x = Array2::from_shape_vec((n_samples, n_features), data)?;
    let dataset = Dataset::new(x, Array1::from_vec(labels))
        .with_context(|| format!("Invalid dataset in {}", path.display()))?;

    log::info!(
        "Loaded {} samples with {} features from {}",
        dataset.len(),
        dataset.n_features(),
        path.display()
    );

    Ok(dataset)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Write per-sample test outcomes as TSV with a header row.
pub fn write_predictions<P: AsRef<Path>>(path: P, report: &EvaluationReport) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to create predictions file: {}", path.display()))?;

    for outcome in &report.outcomes {
        writer
            .serialize(outcome)
            .with_context(|| format!("Failed to write outcome {}", outcome.index))?;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} predictions to {}",
        report.outcomes.len(),
        path.display()
    );
    Ok(())
}
