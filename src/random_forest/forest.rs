use crate::error::{GestureError, Result};
use crate::random_forest::tree::{DecisionTree, TreeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    pub number_of_trees: usize,
    /// Bootstrap sample size as a fraction of the training set.
    pub sample_ratio: f64,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Features tried per split; `None` means the square root of the input
    /// dimension.
    pub max_features: Option<usize>,
    /// Fixed seed for reproducible forests.
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            number_of_trees: 50,
            sample_ratio: 1.0,
            max_depth: 32,
            min_samples_split: 2,
            max_features: None,
            seed: None,
        }
    }
}

/// Bagged decision trees voting on an integer class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    number_of_inputs: usize,
    classes: Vec<i32>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Grows `number_of_trees` trees, each on its own bootstrap sample.
    /// Training on a single class is allowed and yields a forest that always
    /// answers that class.
    pub fn learn(inputs: &[Vec<f64>], outputs: &[i32], config: &ForestConfig) -> Result<Self> {
        if inputs.is_empty() {
            return Err(GestureError::Training("no training samples".to_string()));
        }
        if inputs.len() != outputs.len() {
            return Err(GestureError::Training(format!(
                "{} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        if config.number_of_trees == 0 {
            return Err(GestureError::Training(
                "forest needs at least one tree".to_string(),
            ));
        }

        let number_of_inputs = inputs[0].len();
        if number_of_inputs == 0 {
            return Err(GestureError::Training("samples have no features".to_string()));
        }
        if let Some((row, input)) = inputs
            .iter()
            .enumerate()
            .find(|(_, input)| input.len() != number_of_inputs)
        {
            return Err(GestureError::Training(format!(
                "sample {} has {} features, expected {}",
                row,
                input.len(),
                number_of_inputs
            )));
        }
        if inputs.iter().flatten().any(|value| !value.is_finite()) {
            return Err(GestureError::Training(
                "samples contain non-finite values".to_string(),
            ));
        }

        let mut classes = outputs.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let targets: Vec<usize> = outputs
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let tree_config = TreeConfig {
            max_depth: config.max_depth.max(1),
            min_samples_split: config.min_samples_split.max(2),
            max_features: config
                .max_features
                .unwrap_or_else(|| (number_of_inputs as f64).sqrt().ceil() as usize)
                .clamp(1, number_of_inputs),
        };

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let sample_size = ((inputs.len() as f64 * config.sample_ratio).ceil() as usize).max(1);

        let trees = (0..config.number_of_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..sample_size)
                    .map(|_| rng.random_range(0..inputs.len()))
                    .collect();
                DecisionTree::fit(inputs, &targets, &classes, sample, &tree_config, &mut rng)
            })
            .collect();

        Ok(Self {
            number_of_inputs,
            classes,
            trees,
        })
    }

    /// Checks a forest that came from outside `learn`, such as one read back
    /// from disk.
    pub fn validate(&self) -> Result<()> {
        if self.number_of_inputs == 0 {
            return Err(GestureError::InvalidModel(
                "forest takes no inputs".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(GestureError::InvalidModel("forest has no trees".to_string()));
        }
        for tree in &self.trees {
            tree.validate()?;
        }
        Ok(())
    }

    pub fn number_of_inputs(&self) -> usize {
        self.number_of_inputs
    }

    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Majority vote of the trees; ties go to the smaller label.
    pub fn decide(&self, input: &[f64]) -> Result<i32> {
        let votes = self.votes(input)?;
        let mut winner: Option<(i32, usize)> = None;
        for (label, count) in votes {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((label, count));
            }
        }
        winner
            .map(|(label, _)| label)
            .ok_or_else(|| GestureError::Training("forest has no trees".to_string()))
    }

    /// Fraction of trees voting for each label, ascending by label.
    pub fn scores(&self, input: &[f64]) -> Result<Vec<(i32, f64)>> {
        let total = self.trees.len().max(1) as f64;
        Ok(self
            .votes(input)?
            .into_iter()
            .map(|(label, count)| (label, count as f64 / total))
            .collect())
    }

    fn votes(&self, input: &[f64]) -> Result<BTreeMap<i32, usize>> {
        if input.len() != self.number_of_inputs {
            return Err(GestureError::DimensionMismatch {
                expected: self.number_of_inputs,
                actual: input.len(),
            });
        }
        let mut votes = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.decide(input)).or_insert(0) += 1;
        }
        Ok(votes)
    }
}
