//! CART decision tree over binary labels
//!
//! Splits minimize weighted Gini impurity. Each split considers a random
//! subset of the features. Leaves store the fraction of positive samples
//! that reached them.

use rand::rngs::StdRng;
use rand::seq::index::sample;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted tree
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecisionTree {
    root: Node,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    decrease: f64,
}

/// Shared state while growing one tree
struct Grower<'a> {
    x: &'a [Vec<f64>],
    y: &'a [bool],
    params: TreeParams,
    n_features: usize,
    rng: &'a mut StdRng,
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Grows a tree on the rows listed in `samples` (duplicates allowed).
    ///
    /// Returns the tree and its unnormalized per-feature Gini decrease.
    pub(crate) fn fit(
        x: &[Vec<f64>],
        y: &[bool],
        samples: Vec<usize>,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> (Self, Vec<f64>) {
        let n_features = x.first().map_or(0, Vec::len);
        let mut grower = Grower {
            x,
            y,
            params,
            n_features,
            rng,
            importances: vec![0.0; n_features],
        };
        let root = grower.grow(samples, 0);
        (Self { root }, grower.importances)
    }

    /// Positive-class fraction of the leaf `row` falls into
    pub(crate) fn predict(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Number of leaves
    #[cfg(test)]
    pub(crate) fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}

impl Grower<'_> {
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> Node {
        let n = samples.len();
        let positives = samples.iter().filter(|&&i| self.y[i]).count();
        let value = if n == 0 { 0.0 } else { positives as f64 / n as f64 };

        let depth_reached = self.params.max_depth.map_or(false, |max| depth >= max);
        if depth_reached || n < self.params.min_samples_split || positives == 0 || positives == n {
            return Node::Leaf { value };
        }

        let best = match self.best_split(&samples, positives) {
            Some(best) => best,
            None => return Node::Leaf { value },
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.x[i][best.feature] <= best.threshold);
        if left.is_empty() || right.is_empty() {
            return Node::Leaf { value };
        }
        self.importances[best.feature] += best.decrease;

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.grow(left, depth + 1)),
            right: Box::new(self.grow(right, depth + 1)),
        }
    }

    fn best_split(&mut self, samples: &[usize], positives: usize) -> Option<BestSplit> {
        if self.n_features == 0 {
            return None;
        }
        let n = samples.len();
        let parent = n as f64 * gini(positives, n);
        let min_leaf = self.params.min_samples_leaf.max(1);
        let k = self.params.max_features.clamp(1, self.n_features);

        let mut best: Option<BestSplit> = None;
        // Features constant within this node do not count towards `k`
        let order = sample(&mut *self.rng, self.n_features, self.n_features);
        let mut visited = 0;

        for feature in order.iter() {
            if visited == k {
                break;
            }
            let mut column: Vec<(f64, bool)> = samples.iter().map(|&i| (self.x[i][feature], self.y[i])).collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));
            if column[0].0 == column[n - 1].0 {
                continue;
            }
            visited += 1;

            let mut left_pos = 0;
            for split in 1..n {
                if column[split - 1].1 {
                    left_pos += 1;
                }
                // Only split between distinct values
                if column[split - 1].0 == column[split].0 {
                    continue;
                }
                if split < min_leaf || n - split < min_leaf {
                    continue;
                }

                let right_pos = positives - left_pos;
                let children =
                    split as f64 * gini(left_pos, split) + (n - split) as f64 * gini(right_pos, n - split);
                let decrease = parent - children;

                if decrease > 1e-12 && best.as_ref().map_or(true, |b| decrease > b.decrease) {
                    best = Some(BestSplit {
                        feature,
                        threshold: midpoint(column[split - 1].0, column[split].0),
                        decrease,
                    });
                }
            }
        }

        best
    }
}

/// Threshold between two distinct sorted values `a < b`.
///
/// Always `>= a` and `< b`, so `<= threshold` separates them. Adjacent
/// floats, whose midpoint rounds to `b`, fall back to `a`.
fn midpoint(a: f64, b: f64) -> f64 {
    let mid = a + (b - a) / 2.0;
    if mid < b && mid >= a {
        mid
    } else {
        a
    }
}

/// Gini impurity of a binary node
fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}
