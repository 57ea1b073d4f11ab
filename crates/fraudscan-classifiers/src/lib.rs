//! fraudscan-classifiers: a leaky-ReLU perceptron for flagging fraud.
//!
//! The crate centers on `models::perceptron::LeakyReluPerceptron`, a
//! single-layer perceptron trained online with per-sample weight decay and an
//! accuracy-based early stop. Around it sit the pieces needed to feed and
//! inspect it: validated datasets, a synthetic fraud generator, CSV/TSV
//! loading, feature standardization, small array containers, and reporting
//! helpers.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod report;
pub mod stats;
pub mod synthetic;
