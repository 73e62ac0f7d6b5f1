use crate::error::Result;
use crate::random_forest::confusion::GeneralConfusionMatrix;
use crate::random_forest::forest::RandomForest;

/// Buffers live inputs until there is one per expected label, then scores
/// the batch and starts over.
#[derive(Debug, Clone)]
pub struct AccuracyEvaluation {
    expected: Vec<i32>,
    pending_inputs: Vec<Vec<f64>>,
}

impl AccuracyEvaluation {
    pub fn new(expected: Vec<i32>) -> Self {
        Self {
            expected,
            pending_inputs: Vec::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending_inputs.len()
    }

    /// Returns the confusion matrix on the input that completes a batch.
    pub fn record(
        &mut self,
        forest: &RandomForest,
        input: &[f64],
    ) -> Result<Option<GeneralConfusionMatrix>> {
        if self.expected.is_empty() {
            return Ok(None);
        }

        self.pending_inputs.push(input.to_vec());
        if self.pending_inputs.len() < self.expected.len() {
            return Ok(None);
        }

        let inputs = std::mem::take(&mut self.pending_inputs);
        GeneralConfusionMatrix::estimate(forest, &inputs, &self.expected).map(Some)
    }
}
