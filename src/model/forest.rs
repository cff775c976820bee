//! Bagged ensemble of CART trees
//!
//! Each tree is grown on a bootstrap sample drawn with its own RNG, seeded
//! from a master RNG, so a fixed seed always yields the same forest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::errors::{ModelError, ModelResult};
use super::tree::{DecisionTree, TreeParams};

/// How many features each split may consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    /// floor(sqrt(n_features)), at least 1
    Sqrt,
    /// floor(log2(n_features)), at least 1
    Log2,
    /// Every feature
    All,
}

impl MaxFeatures {
    /// Resolves the setting against a feature count
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = n_features as f64;
        let k = match self {
            MaxFeatures::Sqrt => n.sqrt().floor() as usize,
            MaxFeatures::Log2 => n.log2().floor() as usize,
            MaxFeatures::All => n_features,
        };
        k.max(1)
    }
}

/// Forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_trees == 0 {
            return Err(ModelError::InvalidConfig("n_trees must be at least 1".into()));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidConfig("min_samples_split must be at least 2".into()));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidConfig("min_samples_leaf must be at least 1".into()));
        }
        Ok(())
    }
}

/// A fitted forest
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    importances: Vec<f64>,
    oob_accuracy: Option<f64>,
}

impl RandomForest {
    /// Fits a forest on `x` (rows × features) and binary `y`.
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` when `x` has no rows
    /// - `ShapeMismatch` when row and label counts differ
    /// - `RaggedMatrix` / `NonFiniteFeature` on malformed rows
    /// - `InvalidConfig` when `config` fails validation
    pub fn fit(x: &[Vec<f64>], y: &[bool], config: &ForestConfig) -> ModelResult<Self> {
        config.validate()?;
        let n_features = validate_matrix(x, y)?;
        let n_samples = x.len();

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
            max_features: config.max_features.resolve(n_features),
        };

        let mut master = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        let mut per_tree_importances = Vec::with_capacity(config.n_trees);
        // in_bag[t][i]: sample i was drawn for tree t
        let mut in_bag = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let mut rng = StdRng::seed_from_u64(master.gen());
            let samples: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();

            let mut drawn = vec![false; n_samples];
            for &i in &samples {
                drawn[i] = true;
            }

            let (tree, importances) = DecisionTree::fit(x, y, samples, params, &mut rng);
            trees.push(tree);
            per_tree_importances.push(importances);
            in_bag.push(drawn);
        }

        let oob_accuracy = oob_accuracy(&trees, &in_bag, x, y);
        let importances = average_importances(&per_tree_importances, n_features);

        Ok(Self {
            trees,
            n_features,
            importances,
            oob_accuracy,
        })
    }

    /// Mean positive-class fraction over all trees.
    pub fn predict_proba(&self, row: &[f64]) -> ModelResult<f64> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        if let Some(column) = row.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row: 0, column });
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Normalized importances in feature order; they sum to 1.
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    /// Out-of-bag accuracy, `None` if no sample was ever left out
    pub fn oob_accuracy(&self) -> Option<f64> {
        self.oob_accuracy
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Checks shape and finiteness; returns the feature count.
fn validate_matrix(x: &[Vec<f64>], y: &[bool]) -> ModelResult<usize> {
    if x.is_empty() {
        return Err(ModelError::EmptyDataset);
    }
    if x.len() != y.len() {
        return Err(ModelError::ShapeMismatch {
            rows: x.len(),
            labels: y.len(),
        });
    }

    let width = x[0].len();
    for (row, values) in x.iter().enumerate() {
        if values.len() != width {
            return Err(ModelError::RaggedMatrix {
                row,
                expected: width,
                actual: values.len(),
            });
        }
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row, column });
        }
    }
    Ok(width)
}

fn oob_accuracy(trees: &[DecisionTree], in_bag: &[Vec<bool>], x: &[Vec<f64>], y: &[bool]) -> Option<f64> {
    let mut scored = 0usize;
    let mut correct = 0usize;

    for (i, row) in x.iter().enumerate() {
        let mut sum = 0.0;
        let mut votes = 0usize;
        for (tree, drawn) in trees.iter().zip(in_bag) {
            if !drawn[i] {
                sum += tree.predict(row);
                votes += 1;
            }
        }
        if votes == 0 {
            continue;
        }
        scored += 1;
        if (sum / votes as f64 > 0.5) == y[i] {
            correct += 1;
        }
    }

    if scored == 0 {
        None
    } else {
        Some(correct as f64 / scored as f64)
    }
}

fn average_importances(per_tree: &[Vec<f64>], n_features: usize) -> Vec<f64> {
    let mut total = vec![0.0; n_features];
    for importances in per_tree {
        let sum: f64 = importances.iter().sum();
        if sum <= 0.0 {
            continue;
        }
        for (acc, value) in total.iter_mut().zip(importances) {
            *acc += value / sum;
        }
    }

    let sum: f64 = total.iter().sum();
    if sum <= 0.0 {
        // No tree ever split
        let uniform = if n_features == 0 { 0.0 } else { 1.0 / n_features as f64 };
        return vec![uniform; n_features];
    }
    total.into_iter().map(|v| v / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> (Vec<Vec<f64>>, Vec<bool>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..40 {
            let signal = i as f64;
            let noise = ((i * 7) % 5) as f64;
            x.push(vec![signal, noise]);
            y.push(i >= 20);
        }
        (x, y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        }
    }

    #[test]
    fn test_max_features_resolve() {
        assert_eq!(MaxFeatures::Sqrt.resolve(8), 2);
        assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
        assert_eq!(MaxFeatures::Log2.resolve(8), 3);
        assert_eq!(MaxFeatures::All.resolve(8), 8);
    }

    #[test]
    fn test_config_validation() {
        assert!(ForestConfig::default().validate().is_ok());
        let zero = ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ModelError::InvalidConfig(_))));
        let split = ForestConfig {
            min_samples_split: 1,
            ..ForestConfig::default()
        };
        assert!(split.validate().is_err());
    }

    #[test]
    fn test_learns_threshold() {
        let (x, y) = dataset();
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert!(forest.predict_proba(&[35.0, 1.0]).unwrap() > 0.5);
        assert!(forest.predict_proba(&[3.0, 1.0]).unwrap() < 0.5);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = dataset();
        let a = RandomForest::fit(&x, &y, &small_config()).unwrap();
        let b = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_importances_sum_to_one() {
        let (x, y) = dataset();
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        let sum: f64 = forest.importances().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(forest.importances()[0] > forest.importances()[1]);
    }

    #[test]
    fn test_single_class_uniform_importance() {
        let x = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let y = vec![true, true];
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert_eq!(forest.importances(), &[0.5, 0.5]);
        assert_eq!(forest.predict_proba(&[0.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            RandomForest::fit(&[], &[], &small_config()).unwrap_err(),
            ModelError::EmptyDataset
        );
        assert_eq!(
            RandomForest::fit(&[vec![1.0]], &[true, false], &small_config()).unwrap_err(),
            ModelError::ShapeMismatch { rows: 1, labels: 2 }
        );
        assert!(matches!(
            RandomForest::fit(&[vec![1.0], vec![1.0, 2.0]], &[true, false], &small_config()),
            Err(ModelError::RaggedMatrix { row: 1, .. })
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![f64::NAN]], &[true], &small_config()),
            Err(ModelError::NonFiniteFeature { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_predict_width_checked() {
        let (x, y) = dataset();
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert_eq!(
            forest.predict_proba(&[1.0]).unwrap_err(),
            ModelError::FeatureCountMismatch { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_oob_accuracy_reported() {
        let (x, y) = dataset();
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        let oob = forest.oob_accuracy().unwrap();
        assert!((0.0..=1.0).contains(&oob));
        assert!(oob > 0.8);
    }

    #[test]
    fn test_adjacent_and_extreme_values_train() {
        let a = 1.0 + f64::EPSILON;
        let b = 1.0 + 2.0 * f64::EPSILON;
        let x = vec![vec![a], vec![b], vec![a], vec![b]];
        let y = vec![false, true, false, true];
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert!((0.0..=1.0).contains(&forest.predict_proba(&[b]).unwrap()));

        let x = vec![vec![f64::MAX / 2.0], vec![f64::MAX], vec![f64::MAX / 2.0], vec![f64::MAX]];
        let forest = RandomForest::fit(&x, &y, &small_config()).unwrap();
        assert!((0.0..=1.0).contains(&forest.predict_proba(&[f64::MAX]).unwrap()));
    }
}
