use crate::error::{GestureError, Result};
use crate::random_forest::forest::RandomForest;
use std::fmt;

/// Expected × predicted counts over every label seen on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralConfusionMatrix {
    classes: Vec<i32>,
    /// `matrix[expected][predicted]`, indexed like `classes`.
    matrix: Vec<Vec<usize>>,
    total: usize,
}

impl GeneralConfusionMatrix {
    pub fn new(expected: &[i32], predicted: &[i32]) -> Result<Self> {
        if expected.len() != predicted.len() {
            return Err(GestureError::DimensionMismatch {
                expected: expected.len(),
                actual: predicted.len(),
            });
        }

        let mut classes: Vec<i32> = expected.iter().chain(predicted).copied().collect();
        classes.sort_unstable();
        classes.dedup();

        let mut matrix = vec![vec![0; classes.len()]; classes.len()];
        for (e, p) in expected.iter().zip(predicted) {
            let row = classes.binary_search(e).unwrap_or_default();
            let column = classes.binary_search(p).unwrap_or_default();
            matrix[row][column] += 1;
        }

        Ok(Self {
            classes,
            matrix,
            total: expected.len(),
        })
    }

    /// Runs the forest over `inputs` and compares against `expected`.
    pub fn estimate(forest: &RandomForest, inputs: &[Vec<f64>], expected: &[i32]) -> Result<Self> {
        let predicted = inputs
            .iter()
            .map(|input| forest.decide(input))
            .collect::<Result<Vec<i32>>>()?;
        Self::new(expected, &predicted)
    }

    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, expected: i32, predicted: i32) -> usize {
        match (
            self.classes.binary_search(&expected),
            self.classes.binary_search(&predicted),
        ) {
            (Ok(row), Ok(column)) => self.matrix[row][column],
            _ => 0,
        }
    }

    pub fn hits(&self) -> usize {
        (0..self.classes.len()).map(|i| self.matrix[i][i]).sum()
    }

    /// Fraction of correct predictions; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.hits() as f64 / self.total as f64
    }

    pub fn error(&self) -> f64 {
        1.0 - self.accuracy()
    }
}

impl fmt::Display for GeneralConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected\\predicted")?;
        for class in &self.classes {
            write!(f, "\t{}", class)?;
        }
        writeln!(f)?;
        for (class, row) in self.classes.iter().zip(&self.matrix) {
            write!(f, "{}", class)?;
            for count in row {
                write!(f, "\t{}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_accuracy() {
        let expected = [0, 0, 1, 1, 2];
        let predicted = [0, 1, 1, 1, 0];
        let cm = GeneralConfusionMatrix::new(&expected, &predicted).unwrap();

        assert_eq!(cm.classes(), &[0, 1, 2]);
        assert_eq!(cm.count(0, 0), 1);
        assert_eq!(cm.count(0, 1), 1);
        assert_eq!(cm.count(2, 0), 1);
        assert_eq!(cm.hits(), 3);
        assert!((cm.accuracy() - 0.6).abs() < 1e-12);
        assert!((cm.error() - (1.0 - cm.accuracy())).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_stays_in_unit_range() {
        let cases: [(&[i32], &[i32]); 3] = [
            (&[1, 1, 1], &[1, 1, 1]),
            (&[1, 2, 3], &[3, 1, 2]),
            (&[5], &[9]),
        ];
        for (expected, predicted) in cases {
            let cm = GeneralConfusionMatrix::new(expected, predicted).unwrap();
            assert!((0.0..=1.0).contains(&cm.accuracy()));
            assert_eq!(cm.error(), 1.0 - cm.accuracy());
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert!(GeneralConfusionMatrix::new(&[1, 2], &[1]).is_err());
    }
}
