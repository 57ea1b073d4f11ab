//! Synthetic fraud records for demos and tests.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::PerceptronError;
use crate::math::{Array1, Array2};

/// A record is labeled fraud when the mean of its features exceeds this value.
pub const FRAUD_MEAN_THRESHOLD: f64 = 0.55;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SyntheticConfig {
    pub n_samples: usize,
    pub n_features: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            n_features: 5,
            seed: None,
        }
    }
}

impl SyntheticConfig {
    pub fn generate(&self) -> Result<Dataset, PerceptronError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate_fraud_data(self.n_samples, self.n_features, &mut rng)
    }
}

/// Draw `n_samples` records whose features are uniform in `[0, 1)`.
pub fn generate_fraud_data<R: Rng + ?Sized>(
    n_samples: usize,
    n_features: usize,
    rng: &mut R,
) -> Result<Dataset, PerceptronError> {
    if n_features == 0 {
        return Err(PerceptronError::InvalidHyperparameter(
            "n_features must be greater than 0".to_string(),
        ));
    }

    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut labels = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let mut sum = 0.0;
        for _ in 0..n_features {
            let value: f64 = rng.gen();
            sum += value;
            data.push(value);
        }
        let mean = sum / n_features as f64;
        labels.push(u8::from(mean > FRAUD_MEAN_THRESHOLD));
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)?;
    Dataset::new(x, Array1::from_vec(labels))
}
