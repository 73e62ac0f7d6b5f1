use crate::error::{GestureError, Result};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        class_label: i32,
    },
    /// Samples with `input[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Candidate features drawn at each split.
    pub max_features: usize,
}

/// A CART tree over Gini impurity. Nodes live in one vector; the root is
/// index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

/// Training rows seen through class indices instead of raw labels.
struct TrainingSet<'a> {
    inputs: &'a [Vec<f64>],
    targets: &'a [usize],
    classes: &'a [i32],
}

struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// `targets[i]` indexes into `classes`; `sample` lists the rows (with
    /// repeats, for a bootstrap sample) the tree is grown from.
    pub fn fit<R: Rng + ?Sized>(
        inputs: &[Vec<f64>],
        targets: &[usize],
        classes: &[i32],
        sample: Vec<usize>,
        config: &TreeConfig,
        rng: &mut R,
    ) -> DecisionTree {
        let data = TrainingSet {
            inputs,
            targets,
            classes,
        };
        let mut tree = DecisionTree { nodes: Vec::new() };
        tree.grow(&data, sample, 0, config, rng);
        tree
    }

    pub fn decide(&self, input: &[f64]) -> i32 {
        let mut current = 0;
        loop {
            match &self.nodes[current] {
                Node::Leaf { class_label } => return *class_label,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = input.get(*feature).copied().unwrap_or(f64::NAN);
                    current = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Checks that the tree has a root and that every split points forward
    /// to nodes that exist, so `decide` always reaches a leaf.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(GestureError::InvalidModel("tree has no nodes".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if let Node::Split { left, right, .. } = node {
                for child in [*left, *right] {
                    if child <= index || child >= self.nodes.len() {
                        return Err(GestureError::InvalidModel(format!(
                            "node {} points to node {} of {}",
                            index,
                            child,
                            self.nodes.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn depth_from(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => {
                    1 + depth_from(nodes, *left).max(depth_from(nodes, *right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            depth_from(&self.nodes, 0)
        }
    }

    fn grow<R: Rng + ?Sized>(
        &mut self,
        data: &TrainingSet,
        sample: Vec<usize>,
        depth: usize,
        config: &TreeConfig,
        rng: &mut R,
    ) -> usize {
        let index = self.nodes.len();
        let counts = class_counts(data, &sample);
        let majority = majority_class(&counts);
        self.nodes.push(Node::Leaf {
            class_label: data.classes[majority],
        });

        let is_pure = counts.iter().filter(|&&count| count > 0).count() <= 1;
        if is_pure || depth + 1 >= config.max_depth || sample.len() < config.min_samples_split {
            return index;
        }

        let Some(split) = best_split(data, &sample, &counts, config.max_features, rng) else {
            return index;
        };

        let (left_sample, right_sample): (Vec<usize>, Vec<usize>) = sample
            .into_iter()
            .partition(|&row| data.inputs[row][split.feature] <= split.threshold);

        let left = self.grow(data, left_sample, depth + 1, config, rng);
        let right = self.grow(data, right_sample, depth + 1, config, rng);

        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }
}

fn class_counts(data: &TrainingSet, sample: &[usize]) -> Vec<usize> {
    let mut counts = vec![0; data.classes.len()];
    for &row in sample {
        counts[data.targets[row]] += 1;
    }
    counts
}

/// Most frequent class; ties go to the lower class index.
fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

/// Gini impurity scaled by sample count, so children can be summed.
fn weighted_gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let sum_of_squares: f64 = counts.iter().map(|&c| (c as f64) * (c as f64)).sum();
    total - sum_of_squares / total
}

/// Searches a random subset of features first and falls back to the rest
/// when none of them can separate the sample.
fn best_split<R: Rng + ?Sized>(
    data: &TrainingSet,
    sample: &[usize],
    counts: &[usize],
    max_features: usize,
    rng: &mut R,
) -> Option<Split> {
    let feature_count = data.inputs[sample[0]].len();
    let amount = max_features.clamp(1, feature_count);
    let candidates = index::sample(rng, feature_count, amount).into_vec();

    let parent = weighted_gini(counts, sample.len());
    let search = |features: &[usize]| {
        features
            .iter()
            .filter_map(|&feature| best_threshold(data, sample, counts, feature))
            .filter(|split| split.impurity < parent - 1e-12)
            .min_by(|a, b| a.impurity.total_cmp(&b.impurity))
    };

    search(&candidates).or_else(|| {
        let rest: Vec<usize> = (0..feature_count)
            .filter(|feature| !candidates.contains(feature))
            .collect();
        search(&rest)
    })
}

fn best_threshold(
    data: &TrainingSet,
    sample: &[usize],
    counts: &[usize],
    feature: usize,
) -> Option<Split> {
    let mut rows: Vec<(f64, usize)> = sample
        .iter()
        .map(|&row| (data.inputs[row][feature], data.targets[row]))
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = rows.len();
    if total < 2 {
        return None;
    }
    let mut left = vec![0; counts.len()];
    let mut right = counts.to_vec();
    let mut best: Option<Split> = None;

    for i in 0..total - 1 {
        let (value, class) = rows[i];
        left[class] += 1;
        right[class] -= 1;

        let next_value = rows[i + 1].0;
        if next_value <= value {
            continue;
        }

        let impurity = weighted_gini(&left, i + 1) + weighted_gini(&right, total - i - 1);
        if best.as_ref().map_or(true, |b| impurity < b.impurity) {
            best = Some(Split {
                feature,
                threshold: value + (next_value - value) / 2.0,
                impurity,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> TreeConfig {
        TreeConfig {
            max_depth: 16,
            min_samples_split: 2,
            max_features: 2,
        }
    }

    #[test]
    fn test_single_class_is_a_leaf() {
        let inputs = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
        let targets = vec![0, 0];
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::fit(&inputs, &targets, &[4], vec![0, 1], &config(), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.decide(&[9.0, 9.0]), 4);
    }

    #[test]
    fn test_separates_on_informative_feature() {
        let inputs = vec![
            vec![5.0, 0.1],
            vec![5.0, 0.2],
            vec![5.0, 0.9],
            vec![5.0, 0.8],
        ];
        let targets = vec![0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::fit(
            &inputs,
            &targets,
            &[10, 20],
            vec![0, 1, 2, 3],
            &config(),
            &mut rng,
        );

        assert_eq!(tree.decide(&[5.0, 0.15]), 10);
        assert_eq!(tree.decide(&[5.0, 0.85]), 20);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_identical_inputs_with_mixed_labels_fall_back_to_majority() {
        let inputs = vec![vec![1.0], vec![1.0], vec![1.0]];
        let targets = vec![1, 0, 1];
        let mut rng = StdRng::seed_from_u64(1);

        let tree = DecisionTree::fit(
            &inputs,
            &targets,
            &[3, 8],
            vec![0, 1, 2],
            &config(),
            &mut rng,
        );

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.decide(&[1.0]), 8);
    }

    #[test]
    fn test_validate_rejects_dangling_and_backward_children() {
        let dangling = DecisionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 99,
                right: 99,
            }],
        };
        let cycle = DecisionTree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 2,
                },
                Node::Leaf { class_label: 1 },
            ],
        };
        let empty = DecisionTree { nodes: Vec::new() };

        for tree in [dangling, cycle, empty] {
            assert!(matches!(tree.validate(), Err(GestureError::InvalidModel(_))));
        }
    }

    #[test]
    fn test_fitted_tree_validates() {
        let inputs = vec![vec![0.1], vec![0.2], vec![0.9], vec![0.8]];
        let targets = vec![0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(3);

        let tree = DecisionTree::fit(
            &inputs,
            &targets,
            &[0, 1],
            vec![0, 1, 2, 3],
            &config(),
            &mut rng,
        );

        assert!(tree.validate().is_ok());
    }
}
