use crate::error::PerceptronError;
use crate::math::Array2;
use crate::models::training::{TrainingHistory, TrainingObserver};
use crate::report::LogObserver;

/// Contract between classifier models and the code that drives them.
///
/// Labels use the crate convention: `1` for fraud, `0` for legitimate.
pub trait ClassifierModel {
    /// Fit the model, handing per-epoch progress to `observer`.
    fn fit_with_observer(
        &mut self,
        x: &Array2<f64>,
        y: &[u8],
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainingHistory, PerceptronError>;

    /// Fit the model, reporting progress through the `log` facade.
    fn fit(&mut self, x: &Array2<f64>, y: &[u8]) -> Result<TrainingHistory, PerceptronError> {
        self.fit_with_observer(x, y, &mut LogObserver)
    }

    /// Predict hard 0/1 labels.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PerceptronError>;

    /// Predict scores in `[0, 1]`. Implementations that only produce margins
    /// should convert appropriately.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>, PerceptronError>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
