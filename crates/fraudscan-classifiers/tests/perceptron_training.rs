//! Integration tests for training and inference of the leaky-ReLU perceptron.

use fraudscan_classifiers::config::PerceptronConfig;
use fraudscan_classifiers::error::PerceptronError;
use fraudscan_classifiers::math::Array2;
use fraudscan_classifiers::models::factory;
use fraudscan_classifiers::models::perceptron::LeakyReluPerceptron;
use fraudscan_classifiers::models::training::{EpochReport, SilentObserver, TrainingObserver};
use fraudscan_classifiers::preprocessing::fit_scaler;
use fraudscan_classifiers::synthetic::SyntheticConfig;

/// Records which epochs were reported.
#[derive(Default)]
struct RecordingObserver {
    epochs: Vec<usize>,
    early_stops: Vec<usize>,
}

impl TrainingObserver for RecordingObserver {
    fn on_epoch(&mut self, report: &EpochReport) {
        self.epochs.push(report.epoch);
    }

    fn on_early_stop(&mut self, report: &EpochReport) {
        self.early_stops.push(report.epoch);
    }
}

fn and_samples() -> (Vec<Vec<f64>>, Vec<u8>) {
    (
        vec![
            vec![1.0, 1.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ],
        vec![1, 0, 0, 0],
    )
}

/// Small features, all legitimate: every initial model already classifies it perfectly.
fn easy_negatives() -> (Array2<f64>, Vec<u8>) {
    let x = Array2::from_shape_vec(
        (4, 2),
        vec![
            0.1, 0.0, //
            0.0, 0.1, //
            0.05, 0.05, //
            0.1, 0.1,
        ],
    )
    .unwrap();
    (x, vec![0, 0, 0, 0])
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[test]
fn learns_logical_and() {
    let (samples, labels) = and_samples();
    let mut model = LeakyReluPerceptron::with_seed(0.1, 50, 1234);
    model.train(&samples, &labels).unwrap();

    let predictions = model.predict_rows(&samples).unwrap();
    let correct = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(p, l)| p == l)
        .count();
    assert!(
        correct * 100 >= 75 * labels.len(),
        "predictions {:?} vs labels {:?}",
        predictions,
        labels
    );
}

// ---------------------------------------------------------------------------
// Dimensionality
// ---------------------------------------------------------------------------

#[test]
fn weights_match_training_feature_count() {
    let dataset = SyntheticConfig {
        n_samples: 40,
        n_features: 5,
        seed: Some(5),
    }
    .generate()
    .unwrap();

    let mut model = LeakyReluPerceptron::with_seed(0.015, 20, 5);
    assert_eq!(model.n_features(), None);
    model.fit(&dataset.x, dataset.y.as_slice()).unwrap();

    assert_eq!(model.weights().unwrap().len(), 5);
    assert_eq!(model.n_features(), Some(5));
}

#[test]
fn predict_rejects_other_feature_count() {
    let (samples, labels) = and_samples();
    let mut model = LeakyReluPerceptron::with_seed(0.1, 10, 1);
    model.train(&samples, &labels).unwrap();

    let err = model.predict_rows(&[vec![1.0, 0.0, 1.0]]).unwrap_err();
    assert_eq!(
        err,
        PerceptronError::FeatureCountMismatch {
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn predict_before_training_errors() {
    let model = LeakyReluPerceptron::with_seed(0.1, 10, 1);
    let x = Array2::from_shape_vec((1, 2), vec![1.0, 1.0]).unwrap();
    assert_eq!(model.predict(&x), Err(PerceptronError::NotTrained));
    assert_eq!(model.linear_outputs(&x), Err(PerceptronError::NotTrained));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn fixed_seed_is_bit_identical() {
    let dataset = SyntheticConfig {
        n_samples: 60,
        n_features: 4,
        seed: Some(99),
    }
    .generate()
    .unwrap();

    let run = || {
        let mut model = LeakyReluPerceptron::with_seed(0.02, 80, 17);
        let history = model
            .fit_with_observer(&dataset.x, dataset.y.as_slice(), &mut SilentObserver)
            .unwrap();
        let predictions = model.predict(&dataset.x).unwrap();
        (
            model.weights().unwrap().to_vec(),
            model.bias().unwrap(),
            predictions,
            history,
        )
    };

    let (w1, b1, p1, h1) = run();
    let (w2, b2, p2, h2) = run();

    let bits = |w: &[f64]| w.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&w1), bits(&w2));
    assert_eq!(b1.to_bits(), b2.to_bits());
    assert_eq!(p1, p2);
    assert_eq!(h1, h2);
}

#[test]
fn different_seeds_initialize_differently() {
    let (samples, labels) = and_samples();
    let mut a = LeakyReluPerceptron::with_seed(0.1, 1, 1);
    let mut b = LeakyReluPerceptron::with_seed(0.1, 1, 2);
    a.train(&samples, &labels).unwrap();
    b.train(&samples, &labels).unwrap();
    assert_ne!(a.weights(), b.weights());
}

// ---------------------------------------------------------------------------
// Early stopping and reporting cadence
// ---------------------------------------------------------------------------

#[test]
fn early_stop_honored_at_epoch_zero() {
    let (x, y) = easy_negatives();

    let mut model = LeakyReluPerceptron::with_seed(0.1, 10, 77);
    let mut observer = RecordingObserver::default();
    let history = model.fit_with_observer(&x, &y, &mut observer).unwrap();

    assert_eq!(history.epochs_run(), 1);
    assert_eq!(history.early_stop, Some(0));
    assert_eq!(history.epochs[0].accuracy, 100.0);
    assert_eq!(observer.epochs, vec![0]);
    assert_eq!(observer.early_stops, vec![0]);

    // Same seed, single-epoch budget: identical parameters means no
    // updates happened after epoch 0.
    let mut single = LeakyReluPerceptron::with_seed(0.1, 1, 77);
    single.fit_with_observer(&x, &y, &mut SilentObserver).unwrap();
    assert_eq!(model.weights(), single.weights());
    assert_eq!(model.bias(), single.bias());
}

#[test]
fn early_stop_waits_for_window() {
    let (x, y) = easy_negatives();

    let mut model = LeakyReluPerceptron::with_seed(0.1, 25, 77);
    let history = model.fit_with_observer(&x, &y, &mut SilentObserver).unwrap();

    // First eligible epoch is 25 - 10 = 15.
    assert_eq!(history.early_stop, Some(15));
    assert_eq!(history.epochs_run(), 16);
}

#[test]
fn huge_epoch_budget_does_not_preallocate_history() {
    let (x, y) = easy_negatives();

    let mut config = PerceptronConfig::new(0.1, usize::MAX / 2).with_seed(77);
    config.early_stop.window = usize::MAX / 2;
    let mut model = LeakyReluPerceptron::from_config(config);
    let history = model.fit_with_observer(&x, &y, &mut SilentObserver).unwrap();

    assert_eq!(history.early_stop, Some(0));
    assert_eq!(history.epochs_run(), 1);
}

#[test]
fn progress_reported_every_twenty_epochs_and_last() {
    let (samples, labels) = and_samples();
    let x = Array2::from_rows(&samples).unwrap();

    let mut config = PerceptronConfig::new(0.1, 45).with_seed(3);
    config.early_stop.min_accuracy = 100.0;
    let mut model = LeakyReluPerceptron::from_config(config);
    let mut observer = RecordingObserver::default();
    let history = model.fit_with_observer(&x, &labels, &mut observer).unwrap();

    assert_eq!(history.epochs_run(), 45);
    assert!(!history.stopped_early());
    assert_eq!(observer.epochs, vec![0, 20, 40, 44]);
    assert!(observer.early_stops.is_empty());
}

// ---------------------------------------------------------------------------
// Accuracy bound
// ---------------------------------------------------------------------------

#[test]
fn accuracy_is_bounded_every_epoch() {
    let dataset = SyntheticConfig {
        n_samples: 80,
        n_features: 5,
        seed: Some(21),
    }
    .generate()
    .unwrap();

    let mut model = LeakyReluPerceptron::with_seed(0.015, 200, 21);
    let history = model
        .fit_with_observer(&dataset.x, dataset.y.as_slice(), &mut SilentObserver)
        .unwrap();

    assert!(history.epochs_run() >= 1 && history.epochs_run() <= 200);
    for report in &history.epochs {
        assert_eq!(report.samples, 80);
        assert!(report.correct <= report.samples);
        assert!((0.0..=100.0).contains(&report.accuracy));
        assert!(report.total_error >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn empty_dataset_rejected_and_model_untrained() {
    let mut model = LeakyReluPerceptron::with_seed(0.1, 10, 1);
    assert_eq!(model.train(&[], &[]), Err(PerceptronError::EmptyDataset));
    assert!(!model.is_trained());
    assert_eq!(model.weights(), None);
    assert_eq!(model.bias(), None);

    let x = Array2::<f64>::from_shape_vec((0, 3), vec![]).unwrap();
    assert_eq!(model.fit(&x, &[]), Err(PerceptronError::EmptyDataset));
    assert!(!model.is_trained());
}

#[test]
fn ragged_rows_rejected() {
    let mut model = LeakyReluPerceptron::with_seed(0.1, 10, 1);
    let err = model
        .train(&[vec![1.0, 2.0], vec![1.0]], &[0, 1])
        .unwrap_err();
    assert_eq!(
        err,
        PerceptronError::FeatureCountMismatch {
            expected: 2,
            found: 1
        }
    );
    assert!(!model.is_trained());
}

#[test]
fn label_problems_rejected() {
    let (samples, _) = and_samples();
    let mut model = LeakyReluPerceptron::with_seed(0.1, 10, 1);

    assert_eq!(
        model.train(&samples, &[1, 0]),
        Err(PerceptronError::LabelCountMismatch {
            samples: 4,
            labels: 2
        })
    );
    assert_eq!(
        model.train(&samples, &[1, 0, 2, 0]),
        Err(PerceptronError::InvalidLabel { index: 2, value: 2 })
    );
    assert!(!model.is_trained());
}

#[test]
fn invalid_hyperparameters_rejected_before_training() {
    let (samples, labels) = and_samples();

    let mut model = LeakyReluPerceptron::with_seed(-0.1, 10, 1);
    assert!(matches!(
        model.train(&samples, &labels),
        Err(PerceptronError::InvalidHyperparameter(_))
    ));
    assert!(!model.is_trained());

    let mut model = LeakyReluPerceptron::with_seed(0.1, 0, 1);
    assert!(matches!(
        model.train(&samples, &labels),
        Err(PerceptronError::InvalidHyperparameter(_))
    ));
}

#[test]
fn failed_retrain_keeps_previous_parameters() {
    let (samples, labels) = and_samples();
    let mut model = LeakyReluPerceptron::with_seed(0.1, 20, 8);
    model.train(&samples, &labels).unwrap();
    let weights = model.weights().unwrap().to_vec();
    let bias = model.bias();

    assert!(model.train(&[vec![1.0, 2.0, 3.0]], &[1, 0]).is_err());
    assert_eq!(model.weights().unwrap(), weights.as_slice());
    assert_eq!(model.bias(), bias);
}

// ---------------------------------------------------------------------------
// Feature scale
// ---------------------------------------------------------------------------

/// Transaction amounts in the hundreds to thousands and customer ages;
/// fraud whenever the amount exceeds 1000.
fn raw_scale_transactions() -> (Array2<f64>, Vec<u8>) {
    let rows: Vec<Vec<f64>> = (0..40)
        .map(|i| vec![100.0 + 50.0 * i as f64, 20.0 + i as f64])
        .collect();
    let labels = rows.iter().map(|r| u8::from(r[0] > 1000.0)).collect();
    (Array2::from_rows(&rows).unwrap(), labels)
}

#[test]
fn raw_scale_features_report_divergence() {
    let (x, y) = raw_scale_transactions();

    let mut model = LeakyReluPerceptron::with_seed(0.015, 200, 1);
    let err = model.fit_with_observer(&x, &y, &mut SilentObserver).unwrap_err();

    assert!(matches!(err, PerceptronError::Diverged { .. }));
    assert!(!model.is_trained());
}

#[test]
fn standardized_features_train_to_finite_weights() {
    let (x, y) = raw_scale_transactions();
    let scaled = fit_scaler(&x).unwrap().transform(&x).unwrap();

    let mut model = LeakyReluPerceptron::with_seed(0.015, 200, 1);
    let history = model
        .fit_with_observer(&scaled, &y, &mut SilentObserver)
        .unwrap();

    assert!(model.weights().unwrap().iter().all(|w| w.is_finite()));
    assert!(model.bias().unwrap().is_finite());
    assert!(history.last().unwrap().accuracy > 90.0);
}

// ---------------------------------------------------------------------------
// Factory / trait object
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_and_predicts() {
    let (samples, labels) = and_samples();
    let x = Array2::from_rows(&samples).unwrap();

    let mut model = factory::build_model(PerceptronConfig::new(0.1, 50).with_seed(4));
    assert_eq!(model.name(), "leaky_relu_perceptron");
    model.fit(&x, &labels).unwrap();

    let predictions = model.predict(&x).unwrap();
    assert_eq!(predictions.len(), x.nrows());
    assert!(predictions.iter().all(|&p| p <= 1));

    let probs = model.predict_proba(&x).unwrap();
    assert_eq!(probs.len(), x.nrows());
}
