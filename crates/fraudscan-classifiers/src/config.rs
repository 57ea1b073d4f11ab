use serde::{Deserialize, Serialize};

use crate::error::PerceptronError;

/// Hyper-parameters of the leaky-ReLU perceptron.
///
/// Values are stored as given; `validate` is called at the start of every
/// training run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PerceptronConfig {
    pub learning_rate: f64,
    /// Epoch budget. Training may end earlier through `early_stop`.
    pub epochs: usize,
    /// Seed for weight initialization. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Multiplicative shrinkage applied to every weight after each sample update.
    pub weight_decay: f64,
    /// Progress is reported on epoch 0, every `report_every` epochs, and on the last budgeted epoch.
    pub report_every: usize,
    pub early_stop: EarlyStopConfig,
}

/// Stop once `epoch >= epochs - window` and the epoch accuracy exceeds `min_accuracy` percent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EarlyStopConfig {
    pub window: usize,
    pub min_accuracy: f64,
}

impl Default for EarlyStopConfig {
    fn default() -> Self {
        Self {
            window: 10,
            min_accuracy: 90.0,
        }
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.015,
            epochs: 200,
            seed: None,
            weight_decay: 0.999,
            report_every: 20,
            early_stop: EarlyStopConfig::default(),
        }
    }
}

impl PerceptronConfig {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        Self {
            learning_rate,
            epochs,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// First epoch at which early stopping may trigger. Negative when the
    /// budget is smaller than the window, in which case it may trigger from epoch 0.
    pub fn early_stop_epoch(&self) -> i64 {
        self.epochs as i64 - self.early_stop.window as i64
    }

    pub fn validate(&self) -> Result<(), PerceptronError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(PerceptronError::InvalidHyperparameter(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(PerceptronError::InvalidHyperparameter(
                "epochs must be greater than 0".to_string(),
            ));
        }
        if !(self.weight_decay > 0.0 && self.weight_decay <= 1.0) {
            return Err(PerceptronError::InvalidHyperparameter(format!(
                "weight_decay must be in (0, 1], got {}",
                self.weight_decay
            )));
        }
        if self.report_every == 0 {
            return Err(PerceptronError::InvalidHyperparameter(
                "report_every must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.early_stop.min_accuracy) {
            return Err(PerceptronError::InvalidHyperparameter(format!(
                "early_stop.min_accuracy must be a percentage in [0, 100], got {}",
                self.early_stop.min_accuracy
            )));
        }
        Ok(())
    }
}
