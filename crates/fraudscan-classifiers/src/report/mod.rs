//! Reporting helpers: training observers and test-set evaluation.
//!
//! Observers turn `EpochReport`s into log records or console lines. The
//! evaluation module compares predictions against held-out labels and
//! renders the outcome as text.
pub mod evaluation;

use std::io::Write;

use crate::models::training::{EpochReport, TrainingObserver};

pub use evaluation::{evaluate, EvaluationReport, TestOutcome};

/// Format one progress line, e.g. `Epoch  20 | Error: 12.3456 | Accuracy: 87.5%`.
pub fn format_epoch(report: &EpochReport) -> String {
    format!(
        "Epoch {:>3} | Error: {:.4} | Accuracy: {:.1}%",
        report.epoch, report.total_error, report.accuracy
    )
}

pub fn format_early_stop(report: &EpochReport) -> String {
    format!(
        "Early stop at epoch {} (accuracy {:.1}%)",
        report.epoch, report.accuracy
    )
}

/// Sends training progress to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TrainingObserver for LogObserver {
    fn on_epoch(&mut self, report: &EpochReport) {
        log::info!("{}", format_epoch(report));
    }

    fn on_early_stop(&mut self, report: &EpochReport) {
        log::info!("{}", format_early_stop(report));
    }
}

/// Writes training progress lines to any `Write` sink (stdout in the CLI).
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::warn!("Failed to write training progress: {}", e);
        }
    }
}

impl<W: Write> TrainingObserver for ConsoleObserver<W> {
    fn on_epoch(&mut self, report: &EpochReport) {
        self.write_line(&format_epoch(report));
    }

    fn on_early_stop(&mut self, report: &EpochReport) {
        self.write_line(&format_early_stop(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_observer_formats_lines() {
        let mut observer = ConsoleObserver::new(Vec::new());
        let report = EpochReport::new(20, 12.345_67, 7, 8);
        observer.on_epoch(&report);
        observer.on_early_stop(&report);

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Epoch  20 | Error: 12.3457 | Accuracy: 87.5%");
        assert_eq!(lines[1], "Early stop at epoch 20 (accuracy 87.5%)");
    }
}
