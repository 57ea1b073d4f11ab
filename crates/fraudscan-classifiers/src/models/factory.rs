use crate::config::PerceptronConfig;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::perceptron::LeakyReluPerceptron;

/// Build a boxed classifier model from a `PerceptronConfig`.
/// The config's `seed` decides whether initialization is reproducible.
pub fn build_model(config: PerceptronConfig) -> Box<dyn ClassifierModel> {
    log::debug!(
        "Building leaky-ReLU perceptron (learning_rate={}, epochs={}, seed={:?})",
        config.learning_rate,
        config.epochs,
        config.seed
    );
    Box::new(LeakyReluPerceptron::from_config(config))
}
