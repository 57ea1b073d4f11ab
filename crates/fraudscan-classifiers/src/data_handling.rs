//! Labeled datasets and their validation.
//!
//! A `Dataset` is only ever built through a validating constructor, so code
//! holding one can rely on: at least one sample, one label per sample, finite
//! feature values, and every label in `{0, 1}`.
use crate::error::PerceptronError;
use crate::math::{Array1, Array2};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<u8>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<u8>) -> Result<Self, PerceptronError> {
        validate_training_input(&x, y.as_slice())?;
        let dataset = Dataset { x, y };
        if dataset.positives() == 0 || dataset.positives() == dataset.len() {
            log::warn!(
                "Dataset of {} samples contains a single class",
                dataset.len()
            );
        }
        Ok(dataset)
    }

    /// Build a dataset from row vectors, rejecting ragged rows.
    pub fn from_rows(rows: &[Vec<f64>], labels: &[u8]) -> Result<Self, PerceptronError> {
        if rows.is_empty() {
            return Err(PerceptronError::EmptyDataset);
        }
        let x = Array2::from_rows(rows)?;
        Dataset::new(x, Array1::from_vec(labels.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of samples labeled as fraud.
    pub fn positives(&self) -> usize {
        self.y.iter().filter(|&&label| label == 1).count()
    }

    /// Split into a training prefix and a test suffix by index, without shuffling.
    ///
    /// The prefix holds `floor(train_fraction * len)` samples. Both parts must
    /// end up non-empty.
    pub fn split(&self, train_fraction: f64) -> Result<(Dataset, Dataset), PerceptronError> {
        if !(train_fraction > 0.0 && train_fraction < 1.0) {
            return Err(PerceptronError::InvalidHyperparameter(format!(
                "train_fraction must be in (0, 1), got {}",
                train_fraction
            )));
        }

        let n = self.len();
        let train_len = (train_fraction * n as f64) as usize;
        if train_len == 0 || train_len == n {
            return Err(PerceptronError::InvalidHyperparameter(format!(
                "splitting {} samples at {} leaves an empty partition",
                n, train_fraction
            )));
        }

        let train = Dataset {
            x: self.x.slice_rows(0..train_len),
            y: Array1::from_vec(self.y.as_slice()[..train_len].to_vec()),
        };
        let test = Dataset {
            x: self.x.slice_rows(train_len..n),
            y: Array1::from_vec(self.y.as_slice()[train_len..].to_vec()),
        };

        log::debug!(
            "Split {} samples into {} training and {} test samples",
            n,
            train.len(),
            test.len()
        );

        Ok((train, test))
    }

    pub fn log_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!(
            "{} fraud and {} legitimate samples",
            self.positives(),
            self.len() - self.positives()
        );
        log::info!("{} features per sample", self.n_features());
        for col in 0..self.n_features() {
            if let Some(mean) = self.x.column(col).mean() {
                log::trace!("feature {}: mean {:.4}", col, mean);
            }
        }
        log::info!("-------------------------------");
    }
}

/// Check a feature matrix and its labels before any training state changes.
pub(crate) fn validate_training_input(x: &Array2<f64>, y: &[u8]) -> Result<(), PerceptronError> {
    if x.nrows() == 0 {
        return Err(PerceptronError::EmptyDataset);
    }
    if x.nrows() != y.len() {
        return Err(PerceptronError::LabelCountMismatch {
            samples: x.nrows(),
            labels: y.len(),
        });
    }
    if let Some((index, &value)) = y.iter().enumerate().find(|(_, label)| **label > 1) {
        return Err(PerceptronError::InvalidLabel { index, value });
    }
    for (row, values) in x.rows().enumerate() {
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(PerceptronError::NonFiniteFeature { row, column });
        }
    }
    Ok(())
}
