//! Per-epoch bookkeeping produced by a training run.
use serde::Serialize;

use crate::stats::accuracy_percent;

/// Metrics for one completed epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochReport {
    pub epoch: usize,
    /// Sum of absolute errors `|label - output|` over the epoch.
    pub total_error: f64,
    /// Percentage of samples classified correctly, in `[0, 100]`.
    pub accuracy: f64,
    pub correct: usize,
    pub samples: usize,
}

impl EpochReport {
    pub fn new(epoch: usize, total_error: f64, correct: usize, samples: usize) -> Self {
        Self {
            epoch,
            total_error,
            accuracy: accuracy_percent(correct, samples),
            correct,
            samples,
        }
    }
}

/// Every epoch that ran, in order, plus the epoch training stopped at early (if any).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochReport>,
    pub early_stop: Option<usize>,
}

impl TrainingHistory {
    pub fn push(&mut self, report: EpochReport) {
        self.epochs.push(report);
    }

    pub fn epochs_run(&self) -> usize {
        self.epochs.len()
    }

    pub fn last(&self) -> Option<&EpochReport> {
        self.epochs.last()
    }

    pub fn stopped_early(&self) -> bool {
        self.early_stop.is_some()
    }
}

/// Receives progress while a model trains.
pub trait TrainingObserver {
    /// Called for epoch 0, every `report_every` epochs and the last budgeted epoch.
    fn on_epoch(&mut self, report: &EpochReport);

    /// Called once when the early-stop condition ends training.
    fn on_early_stop(&mut self, report: &EpochReport);
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl TrainingObserver for SilentObserver {
    fn on_epoch(&mut self, _report: &EpochReport) {}

    fn on_early_stop(&mut self, _report: &EpochReport) {}
}
