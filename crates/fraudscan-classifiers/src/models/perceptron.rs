//! Single-layer perceptron with a leaky-ReLU activation, trained online.
//!
//! Each sample updates the weights immediately, so the next sample in the
//! same epoch already sees the modified weights. Weight decay is applied
//! after every sample update; the bias is never decayed.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PerceptronConfig;
use crate::data_handling::{validate_training_input, Dataset};
use crate::error::PerceptronError;
use crate::math::{dot, Array1, Array2};
use crate::models::activation::{leaky_relu, leaky_relu_derivative};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::training::{EpochReport, TrainingHistory, TrainingObserver};
use crate::report::LogObserver;

/// Weights and bias are drawn uniformly from `[-INIT_RANGE, INIT_RANGE)`.
pub const INIT_RANGE: f64 = 0.2;

/// Activated outputs strictly above this value are classified as fraud.
pub const DECISION_THRESHOLD: f64 = 0.5;

pub struct LeakyReluPerceptron {
    config: PerceptronConfig,
    weights: Option<Array1<f64>>,
    bias: Option<f64>,
    rng: StdRng,
}

impl LeakyReluPerceptron {
    /// Create an untrained model whose initialization is seeded from OS entropy.
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        Self::from_config(PerceptronConfig::new(learning_rate, epochs))
    }

    /// Create an untrained model with reproducible initialization.
    pub fn with_seed(learning_rate: f64, epochs: usize, seed: u64) -> Self {
        Self::from_config(PerceptronConfig::new(learning_rate, epochs).with_seed(seed))
    }

    pub fn from_config(config: PerceptronConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create an untrained model drawing its initial weights from `rng`.
    /// `config.seed` is ignored.
    pub fn with_rng(config: PerceptronConfig, rng: StdRng) -> Self {
        LeakyReluPerceptron {
            config,
            weights: None,
            bias: None,
            rng,
        }
    }

    pub fn config(&self) -> &PerceptronConfig {
        &self.config
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_ref().map(Array1::as_slice)
    }

    pub fn bias(&self) -> Option<f64> {
        self.bias
    }

    /// Feature count fixed by the last successful training run.
    pub fn n_features(&self) -> Option<usize> {
        self.weights.as_ref().map(Array1::len)
    }

    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Train on row vectors. Ragged rows are rejected with
    /// `FeatureCountMismatch` before anything is initialized.
    pub fn train(
        &mut self,
        samples: &[Vec<f64>],
        labels: &[u8],
    ) -> Result<TrainingHistory, PerceptronError> {
        let dataset = Dataset::from_rows(samples, labels)?;
        self.fit(&dataset.x, dataset.y.as_slice())
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<TrainingHistory, PerceptronError> {
        self.fit_with_observer(x, y, &mut LogObserver)
    }

    /// Train from scratch on `x`/`y`.
    ///
    /// Weights are re-initialized on every call. On error the model keeps
    /// whatever state it had before the call.
    pub fn fit_with_observer(
        &mut self,
        x: &Array2<f64>,
        y: &[u8],
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainingHistory, PerceptronError> {
        self.config.validate()?;
        validate_training_input(x, y)?;

        let n_features = x.ncols();
        let mut weights: Array1<f64> = (0..n_features)
            .map(|_| self.rng.gen_range(-INIT_RANGE..INIT_RANGE))
            .collect();
        let mut bias = self.rng.gen_range(-INIT_RANGE..INIT_RANGE);
        log::trace!("Initial weights: {}, bias: {:.6}", weights, bias);

        let epochs = self.config.epochs;
        let early_stop_epoch = self.config.early_stop_epoch();
        let mut history = TrainingHistory::default();

        log::debug!(
            "Training on {} samples with {} features for up to {} epochs",
            x.nrows(),
            n_features,
            epochs
        );

        for epoch in 0..epochs {
            let report = run_epoch(
                epoch,
                x,
                y,
                weights.as_mut_slice(),
                &mut bias,
                self.config.learning_rate,
                self.config.weight_decay,
            );

            if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                log::warn!(
                    "Weights diverged in epoch {} (total error: {})",
                    epoch,
                    report.total_error
                );
                return Err(PerceptronError::Diverged { epoch });
            }

            if epoch % self.config.report_every == 0 || epoch + 1 == epochs {
                observer.on_epoch(&report);
            }
            history.push(report);

            if epoch as i64 >= early_stop_epoch
                && report.accuracy > self.config.early_stop.min_accuracy
            {
                observer.on_early_stop(&report);
                history.early_stop = Some(epoch);
                break;
            }
        }

        self.weights = Some(weights);
        self.bias = Some(bias);

        Ok(history)
    }

    /// Hard 0/1 predictions. An empty matrix yields an empty vector.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PerceptronError> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(classify)
            .collect())
    }

    pub fn predict_rows(&self, samples: &[Vec<f64>]) -> Result<Vec<u8>, PerceptronError> {
        if samples.is_empty() {
            self.parameters()?;
            return Ok(Vec::new());
        }
        self.predict(&Array2::from_rows(samples)?)
    }

    /// Activated outputs `leaky_relu(w·x + b)` for every row.
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Vec<f64>, PerceptronError> {
        Ok(self
            .linear_outputs(x)?
            .into_iter()
            .map(leaky_relu)
            .collect())
    }

    /// Pre-activation outputs `w·x + b` for every row.
    pub fn linear_outputs(&self, x: &Array2<f64>) -> Result<Vec<f64>, PerceptronError> {
        let (weights, bias) = self.parameters()?;
        if x.nrows() > 0 && x.ncols() != weights.len() {
            return Err(PerceptronError::FeatureCountMismatch {
                expected: weights.len(),
                found: x.ncols(),
            });
        }
        Ok(x.rows().map(|row| linear_output(row, weights, bias)).collect())
    }

    fn parameters(&self) -> Result<(&[f64], f64), PerceptronError> {
        match (&self.weights, self.bias) {
            (Some(weights), Some(bias)) => Ok((weights.as_slice(), bias)),
            _ => Err(PerceptronError::NotTrained),
        }
    }
}

impl ClassifierModel for LeakyReluPerceptron {
    fn fit_with_observer(
        &mut self,
        x: &Array2<f64>,
        y: &[u8],
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainingHistory, PerceptronError> {
        LeakyReluPerceptron::fit_with_observer(self, x, y, observer)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PerceptronError> {
        LeakyReluPerceptron::predict(self, x)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>, PerceptronError> {
        Ok(self
            .decision_function(x)?
            .into_iter()
            .map(|output| output.clamp(0.0, 1.0))
            .collect())
    }

    fn name(&self) -> &str {
        "leaky_relu_perceptron"
    }
}

#[inline]
fn linear_output(sample: &[f64], weights: &[f64], bias: f64) -> f64 {
    dot(sample, weights) + bias
}

#[inline]
fn classify(output: f64) -> u8 {
    u8::from(output > DECISION_THRESHOLD)
}

/// Result of a single online update.
struct SampleStep {
    abs_error: f64,
    correct: bool,
}

/// Forward pass plus in-place update for one sample.
fn update_on_sample(
    sample: &[f64],
    label: u8,
    weights: &mut [f64],
    bias: &mut f64,
    learning_rate: f64,
    weight_decay: f64,
) -> SampleStep {
    let linear = linear_output(sample, weights, *bias);
    let output = leaky_relu(linear);
    let error = f64::from(label) - output;
    let delta = error * leaky_relu_derivative(linear);

    for (weight, feature) in weights.iter_mut().zip(sample) {
        *weight = (*weight + learning_rate * delta * feature) * weight_decay;
    }
    *bias += learning_rate * delta;

    SampleStep {
        abs_error: error.abs(),
        correct: classify(output) == label,
    }
}

/// One pass over the dataset in row order.
fn run_epoch(
    epoch: usize,
    x: &Array2<f64>,
    y: &[u8],
    weights: &mut [f64],
    bias: &mut f64,
    learning_rate: f64,
    weight_decay: f64,
) -> EpochReport {
    let mut total_error = 0.0;
    let mut correct = 0;

    for (sample, &label) in x.rows().zip(y) {
        let step = update_on_sample(sample, label, weights, bias, learning_rate, weight_decay);
        total_error += step.abs_error;
        if step.correct {
            correct += 1;
        }
    }

    EpochReport::new(epoch, total_error, correct, x.nrows())
}
