use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use fraudscan_classifiers::config::PerceptronConfig;
use fraudscan_classifiers::synthetic::SyntheticConfig;

use crate::util::validate_tsv_or_csv_file;

/// Everything needed for one train/evaluate run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub model: PerceptronConfig,
    /// Used when `data` is `None`.
    pub synthetic: SyntheticConfig,
    /// Labeled CSV/TSV input.
    pub data: Option<String>,
    pub label_column: Option<String>,
    pub train_fraction: f64,
    /// Standardize features with a scaler fit on the training split.
    /// `None` enables it for file input and leaves synthetic data as is.
    pub standardize: Option<bool>,
    pub predictions_output: Option<String>,
    /// Print per-epoch progress lines to stdout.
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            model: PerceptronConfig::default(),
            synthetic: SyntheticConfig::default(),
            data: None,
            label_column: None,
            train_fraction: 0.8,
            standardize: None,
            predictions_output: None,
            progress: true,
        }
    }
}

/// Load a run configuration from a JSON file. Missing fields take defaults.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    Ok(config)
}

impl RunConfig {
    pub fn standardize_features(&self) -> bool {
        self.standardize.unwrap_or(self.data.is_some())
    }

    /// Start from the config file (or defaults) and apply CLI overrides.
    pub fn from_arguments(config_path: Option<&Path>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_run_config(path)?,
            None => RunConfig::default(),
        };

        if let Some(data) = matches.get_one::<String>("data") {
            config.data = Some(data.clone());
        }
        if let Some(data) = &config.data {
            validate_tsv_or_csv_file(data)?;
        }

        if let Some(label_column) = matches.get_one::<String>("label_column") {
            config.label_column = Some(label_column.clone());
        }

        if let Some(&learning_rate) = matches.get_one::<f64>("learning_rate") {
            config.model.learning_rate = learning_rate;
        }

        if let Some(&epochs) = matches.get_one::<usize>("epochs") {
            config.model.epochs = epochs;
        }

        if let Some(&seed) = matches.get_one::<u64>("seed") {
            config.model.seed = Some(seed);
            config.synthetic.seed = Some(seed);
        }

        if let Some(&samples) = matches.get_one::<usize>("samples") {
            config.synthetic.n_samples = samples;
        }

        if let Some(&features) = matches.get_one::<usize>("features") {
            config.synthetic.n_features = features;
        }

        if let Some(&train_fraction) = matches.get_one::<f64>("train_fraction") {
            config.train_fraction = train_fraction;
        }

        if matches.get_flag("no_standardize") {
            config.standardize = Some(false);
        }

        if let Some(predictions) = matches.get_one::<String>("predictions") {
            config.predictions_output = Some(predictions.clone());
        }

        if matches.get_flag("quiet") {
            config.progress = false;
        }

        Ok(config)
    }
}
