use std::io::{self, Write};

use anyhow::{Context, Result};

use fraudscan_classifiers::data_handling::Dataset;
use fraudscan_classifiers::io::{read_labeled_delimited, write_predictions, DelimitedReaderConfig};
use fraudscan_classifiers::models::factory::build_model;
use fraudscan_classifiers::models::training::{SilentObserver, TrainingHistory, TrainingObserver};
use fraudscan_classifiers::preprocessing::{standardize_split, Scaler};
use fraudscan_classifiers::report::{evaluate, ConsoleObserver, EvaluationReport};

use super::input::RunConfig;

/// Outputs of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub history: TrainingHistory,
    pub evaluation: EvaluationReport,
    /// Present when features were standardized before training.
    pub scaler: Option<Scaler>,
    pub n_train: usize,
    pub n_test: usize,
}

fn load_dataset(config: &RunConfig) -> Result<Dataset> {
    match &config.data {
        Some(path) => {
            let reader_config = DelimitedReaderConfig {
                label_column: config.label_column.clone(),
                ..Default::default()
            };
            read_labeled_delimited(path, &reader_config)
        }
        None => {
            log::info!(
                "Generating {} synthetic samples with {} features",
                config.synthetic.n_samples,
                config.synthetic.n_features
            );
            config
                .synthetic
                .generate()
                .context("Failed to generate synthetic dataset")
        }
    }
}

/// Load or generate data, split it, train, and evaluate on the held-out part.
/// Progress and the evaluation are written to `out`.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let dataset = load_dataset(config)?;
    dataset.log_summary();

    let (train, test) = dataset
        .split(config.train_fraction)
        .context("Failed to split dataset")?;
    log::info!(
        "Training on {} samples, testing on {}",
        train.len(),
        test.len()
    );

    let (train, test, scaler) = if config.standardize_features() {
        let (train, test, scaler) =
            standardize_split(&train, &test).context("Failed to standardize features")?;
        (train, test, Some(scaler))
    } else {
        (train, test, None)
    };

    writeln!(
        out,
        "Leaky-ReLU perceptron | learning rate: {} | epochs: {}",
        config.model.learning_rate, config.model.epochs
    )?;

    let mut model = build_model(config.model.clone());
    let start_time = std::time::Instant::now();
    let history = {
        let mut console;
        let mut silent = SilentObserver;
        let observer: &mut dyn TrainingObserver = if config.progress {
            console = ConsoleObserver::new(&mut *out);
            &mut console
        } else {
            &mut silent
        };
        model
            .fit_with_observer(&train.x, train.y.as_slice(), observer)
            .context("Training failed")?
    };
    log::info!(
        "Training completed in {:?} after {} epochs",
        start_time.elapsed(),
        history.epochs_run()
    );

    let predictions = model
        .predict(&test.x)
        .context("Prediction on test set failed")?;
    let evaluation =
        evaluate(test.y.as_slice(), &predictions).context("Failed to evaluate predictions")?;

    writeln!(out)?;
    evaluation.render(out)?;

    if let Some(path) = &config.predictions_output {
        write_predictions(path, &evaluation)?;
    }

    Ok(RunSummary {
        history,
        evaluation,
        scaler,
        n_train: train.len(),
        n_test: test.len(),
    })
}

/// `run` writing to stdout.
pub fn run_to_stdout(config: &RunConfig) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(config, &mut handle)
}
