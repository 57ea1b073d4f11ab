pub mod activation;
pub mod classifier_trait;
pub mod factory;
pub mod perceptron;
pub mod training;
