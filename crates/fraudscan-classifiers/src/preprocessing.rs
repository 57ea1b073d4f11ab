//! Feature standardization.
//!
//! The perceptron trains with a fixed learning rate on raw inputs, so features
//! measured in the hundreds or thousands blow the weights up within a few
//! epochs. A `Scaler` fit on the training rows maps every column to zero mean
//! and unit variance; the same scaler is then applied to held-out rows.

use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::PerceptronError;
use crate::math::Array2;

/// Per-column mean/std standardizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Floor for the column std so constant columns map to zero instead of NaN.
    const MIN_STD: f64 = 1e-6;

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize every row of `x`.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, PerceptronError> {
        if x.ncols() != self.n_features() {
            return Err(PerceptronError::FeatureCountMismatch {
                expected: self.n_features(),
                found: x.ncols(),
            });
        }

        let mut out = Vec::with_capacity(x.nrows() * x.ncols());
        for row in x.rows() {
            out.extend(
                row.iter()
                    .zip(self.mean.iter().zip(&self.std))
                    .map(|(&v, (&mean, &std))| (v - mean) / std),
            );
        }
        Ok(Array2::from_shape_vec(x.shape(), out)?)
    }

    /// Standardized copy of `dataset`; labels are carried over unchanged.
    pub fn transform_dataset(&self, dataset: &Dataset) -> Result<Dataset, PerceptronError> {
        Ok(Dataset {
            x: self.transform(&dataset.x)?,
            y: dataset.y.clone(),
        })
    }
}

/// Fit a `Scaler` on `x`, where rows are samples and columns are features.
pub fn fit_scaler(x: &Array2<f64>) -> Result<Scaler, PerceptronError> {
    let (nrows, ncols) = x.shape();
    if nrows == 0 {
        return Err(PerceptronError::EmptyDataset);
    }

    let mut mean = vec![0.0f64; ncols];
    for row in x.rows() {
        for (m, &v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    let nrows_f = nrows as f64;
    for m in mean.iter_mut() {
        *m /= nrows_f;
    }

    let mut std = vec![0.0f64; ncols];
    for row in x.rows() {
        for ((s, &v), &m) in std.iter_mut().zip(row).zip(&mean) {
            let d = v - m;
            *s += d * d;
        }
    }
    for s in std.iter_mut() {
        *s = (*s / nrows_f).sqrt().max(Scaler::MIN_STD);
    }

    Ok(Scaler { mean, std })
}

/// Fit a scaler on the training split and apply it to both splits.
pub fn standardize_split(
    train: &Dataset,
    test: &Dataset,
) -> Result<(Dataset, Dataset, Scaler), PerceptronError> {
    let scaler = fit_scaler(&train.x)?;
    let train = scaler.transform_dataset(train)?;
    let test = scaler.transform_dataset(test)?;
    log::debug!(
        "Standardized {} features (means: {:?}, stds: {:?})",
        scaler.n_features(),
        scaler.mean,
        scaler.std
    );
    Ok((train, test, scaler))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Array2<f64> {
        Array2::from_shape_vec((3, 2), vec![100.0, 5.0, 200.0, 5.0, 300.0, 5.0]).unwrap()
    }

    #[test]
    fn test_fit_scaler_mean_and_std() {
        let scaler = fit_scaler(&matrix()).unwrap();
        assert_eq!(scaler.mean, vec![200.0, 5.0]);
        assert!((scaler.std[0] - (20000.0f64 / 3.0).sqrt()).abs() < 1e-9);
        assert_eq!(scaler.std[1], Scaler::MIN_STD);
    }

    #[test]
    fn test_transform_centers_columns() {
        let x = matrix();
        let scaled = fit_scaler(&x).unwrap().transform(&x).unwrap();
        assert_eq!(scaled.shape(), (3, 2));
        assert_eq!(scaled[(1, 0)], 0.0);
        assert!(scaled[(0, 0)] < 0.0 && scaled[(2, 0)] > 0.0);
        assert_eq!(scaled.column(1).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_rejects_other_width() {
        let scaler = fit_scaler(&matrix()).unwrap();
        let narrow = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
        assert_eq!(
            scaler.transform(&narrow).unwrap_err(),
            PerceptronError::FeatureCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_fit_scaler_rejects_empty() {
        let empty = Array2::from_shape_vec((0, 2), Vec::new()).unwrap();
        assert_eq!(fit_scaler(&empty), Err(PerceptronError::EmptyDataset));
    }
}
