use std::io::{self, Write};

use serde::Serialize;

use crate::error::PerceptronError;
use crate::stats::{accuracy_percent, ConfusionMatrix};

/// Outcome for one held-out sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub index: usize,
    pub expected: u8,
    pub predicted: u8,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub outcomes: Vec<TestOutcome>,
    /// Percentage of matched outcomes, in `[0, 100]`.
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
}

/// Compare predictions with the expected labels, index by index.
pub fn evaluate(expected: &[u8], predicted: &[u8]) -> Result<EvaluationReport, PerceptronError> {
    if expected.len() != predicted.len() {
        return Err(PerceptronError::LabelCountMismatch {
            samples: predicted.len(),
            labels: expected.len(),
        });
    }

    let outcomes: Vec<TestOutcome> = expected
        .iter()
        .zip(predicted)
        .enumerate()
        .map(|(index, (&expected, &predicted))| TestOutcome {
            index,
            expected,
            predicted,
            matched: expected == predicted,
        })
        .collect();
    let correct = outcomes.iter().filter(|o| o.matched).count();

    Ok(EvaluationReport {
        accuracy: accuracy_percent(correct, outcomes.len()),
        confusion: ConfusionMatrix::from_labels(expected, predicted),
        outcomes,
    })
}

impl EvaluationReport {
    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.matched).count()
    }

    /// Text rendering: one line per sample (1-based), then the summary.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Test results")?;
        writeln!(out, "======================")?;
        for outcome in &self.outcomes {
            let status = if outcome.matched { "ok  " } else { "MISS" };
            writeln!(
                out,
                "[{}] Sample {}: expected={}, predicted={}",
                status,
                outcome.index + 1,
                outcome.expected,
                outcome.predicted
            )?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Test accuracy: {:.1}% ({}/{})",
            self.accuracy,
            self.correct(),
            self.outcomes.len()
        )?;

        let fmt_ratio = |value: Option<f64>| match value {
            Some(v) => format!("{:.3}", v),
            None => "n/a".to_string(),
        };
        writeln!(
            out,
            "Precision: {} | Recall: {}",
            fmt_ratio(self.confusion.precision()),
            fmt_ratio(self.confusion.recall())
        )?;
        Ok(())
    }
}
