use std::error::Error;
use std::fmt;

use crate::math::ShapeError;

/// Errors raised while validating inputs or querying the perceptron.
///
/// Every check runs before the model is touched, so a failed call never
/// leaves a partially trained model behind.
#[derive(Debug, Clone, PartialEq)]
pub enum PerceptronError {
    /// Training was requested on zero samples.
    EmptyDataset,
    /// Rows of differing length, or a predict call whose column count differs
    /// from the trained weight vector.
    FeatureCountMismatch { expected: usize, found: usize },
    /// Number of labels differs from the number of samples.
    LabelCountMismatch { samples: usize, labels: usize },
    /// A label outside `{0, 1}`.
    InvalidLabel { index: usize, value: u8 },
    /// A NaN or infinite feature value.
    NonFiniteFeature { row: usize, column: usize },
    InvalidHyperparameter(String),
    /// Inference was requested before a successful `fit`.
    NotTrained,
    /// Weights or bias stopped being finite during the given epoch.
    Diverged { epoch: usize },
    Shape(ShapeError),
}

impl fmt::Display for PerceptronError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PerceptronError::EmptyDataset => write!(f, "Dataset contains no samples"),
            PerceptronError::FeatureCountMismatch { expected, found } => write!(
                f,
                "Feature count mismatch: expected {} features, found {}",
                expected, found
            ),
            PerceptronError::LabelCountMismatch { samples, labels } => write!(
                f,
                "Samples and labels must have equal length ({} samples, {} labels)",
                samples, labels
            ),
            PerceptronError::InvalidLabel { index, value } => write!(
                f,
                "Label {} at index {} is not a binary label (expected 0 or 1)",
                value, index
            ),
            PerceptronError::NonFiniteFeature { row, column } => write!(
                f,
                "Feature at row {}, column {} is not a finite number",
                row, column
            ),
            PerceptronError::InvalidHyperparameter(msg) => {
                write!(f, "Invalid hyperparameter: {}", msg)
            }
            PerceptronError::NotTrained => write!(f, "Model has not been trained"),
            PerceptronError::Diverged { epoch } => write!(
                f,
                "Training diverged in epoch {}: weights are no longer finite (try scaling features or lowering the learning rate)",
                epoch
            ),
            PerceptronError::Shape(e) => write!(f, "Invalid feature matrix: {}", e),
        }
    }
}

impl Error for PerceptronError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PerceptronError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for PerceptronError {
    fn from(e: ShapeError) -> Self {
        match e {
            ShapeError::RaggedRow {
                expected, found, ..
            } => PerceptronError::FeatureCountMismatch { expected, found },
            other => PerceptronError::Shape(other),
        }
    }
}
