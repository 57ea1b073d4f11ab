use serde::Serialize;

/// Percentage of `correct` over `total`. Zero when `total` is zero.
pub fn accuracy_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

/// Binary confusion matrix with fraud (`1`) as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally paired labels. Extra elements of the longer slice are ignored.
    pub fn from_labels(expected: &[u8], predicted: &[u8]) -> Self {
        let mut matrix = ConfusionMatrix::default();
        for (&truth, &guess) in expected.iter().zip(predicted) {
            match (truth == 1, guess == 1) {
                (true, true) => matrix.true_positives += 1,
                (false, false) => matrix.true_negatives += 1,
                (false, true) => matrix.false_positives += 1,
                (true, false) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        accuracy_percent(self.true_positives + self.true_negatives, self.total())
    }

    /// `None` when nothing was predicted positive.
    pub fn precision(&self) -> Option<f64> {
        let predicted_positive = self.true_positives + self.false_positives;
        (predicted_positive > 0).then(|| self.true_positives as f64 / predicted_positive as f64)
    }

    /// `None` when there are no positive samples.
    pub fn recall(&self) -> Option<f64> {
        let actual_positive = self.true_positives + self.false_negatives;
        (actual_positive > 0).then(|| self.true_positives as f64 / actual_positive as f64)
    }
}
