use serde::{Deserialize, Serialize};

use crate::ml::{PredictError, Regressor, check_rows};

/// Node of a regression tree; children are indices into the same tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    /// Internal node routing on one feature.
    Split {
        /// Feature index used for the split.
        feature: usize,
        /// Threshold in feature units.
        threshold: f64,
        /// Node taken when `feature <= threshold`.
        left: usize,
        /// Node taken when `feature > threshold`.
        right: usize,
    },
    /// Terminal node carrying the tree output.
    Leaf { value: f64 },
}

/// Single regression tree; node `0` is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk from the root to a leaf for one feature row.
    ///
    /// Assumes a validated tree: children always point forward, so the walk
    /// terminates.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    fn validate(&self, tree_idx: usize, feature_len: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("Tree {tree_idx} has no nodes"));
        }
        for (node_idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_len {
                        return Err(format!(
                            "Tree {tree_idx} node {node_idx} splits on feature {feature} \
                             but the model has {feature_len} features"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!(
                            "Tree {tree_idx} node {node_idx} has a non-finite threshold"
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= node_idx || child >= self.nodes.len() {
                            return Err(format!(
                                "Tree {tree_idx} node {node_idx} has invalid child {child}"
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!(
                            "Tree {tree_idx} node {node_idx} has a non-finite leaf value"
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Gradient-boosted tree ensemble for scalar regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbdtRegressor {
    /// Model format version.
    pub model_version: i64,
    /// Optional feature names, in input order.
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Number of values per feature row.
    pub feature_len: usize,
    /// Shrinkage applied to each tree output.
    pub learning_rate: f64,
    /// Prediction before any tree is added.
    pub init_value: f64,
    pub trees: Vec<RegressionTree>,
}

impl GbdtRegressor {
    /// Validate structural invariants of the model.
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_len == 0 {
            return Err("Model must declare at least one feature".to_string());
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.feature_len {
            return Err(format!(
                "feature_names has {} entries but feature_len is {}",
                self.feature_names.len(),
                self.feature_len
            ));
        }
        if !self.learning_rate.is_finite() || !self.init_value.is_finite() {
            return Err("learning_rate and init_value must be finite".to_string());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_idx, self.feature_len)?;
        }
        Ok(())
    }

    /// Predict the regression output for one feature row.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.trees.iter().fold(self.init_value, |acc, tree| {
            acc + self.learning_rate * tree.predict(features)
        })
    }
}

impl Regressor for GbdtRegressor {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictError> {
        check_rows(rows, self.feature_len)?;
        Ok(rows.iter().map(|row| self.predict_row(row)).collect())
    }

    fn describe(&self) -> String {
        format!(
            "gbdt v{} ({} trees, {} features, lr={})",
            self.model_version,
            self.trees.len(),
            self.feature_len,
            self.learning_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    fn model() -> GbdtRegressor {
        GbdtRegressor {
            model_version: 1,
            feature_names: Vec::new(),
            feature_len: 6,
            learning_rate: 0.5,
            init_value: 50.0,
            trees: vec![stump(0, 300.0, 10.0, -10.0), stump(5, 7.0, 4.0, -4.0)],
        }
    }

    #[test]
    fn tree_routes_threshold_to_left() {
        let tree = stump(0, 0.5, -1.0, 2.0);
        assert_eq!(tree.predict(&[0.0]), -1.0);
        assert_eq!(tree.predict(&[0.5]), -1.0);
        assert_eq!(tree.predict(&[0.6]), 2.0);
    }

    #[test]
    fn ensemble_adds_shrunk_tree_outputs() {
        let model = model();
        let low = [298.0, 50.0, 10.0, 0.5, 60.0, 7.0];
        let high = [310.0, 50.0, 10.0, 0.5, 60.0, 9.0];
        assert_eq!(model.predict_row(&low), 50.0 + 0.5 * 10.0 + 0.5 * 4.0);
        assert_eq!(model.predict_row(&high), 50.0 - 0.5 * 10.0 - 0.5 * 4.0);
    }

    #[test]
    fn regressor_rejects_wrong_row_width() {
        let model = model();
        let err = model.predict(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, PredictError::FeatureCount { actual: 2, .. }));
    }

    #[test]
    fn validation_catches_backward_children_and_bad_features() {
        let mut cyclic = model();
        cyclic.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 1.0,
            left: 0,
            right: 2,
        };
        assert!(cyclic.validate().is_err());

        let mut out_of_range = model();
        out_of_range.trees[1] = stump(6, 1.0, 0.0, 0.0);
        assert!(out_of_range.validate().is_err());

        assert!(model().validate().is_ok());
    }

    #[test]
    fn json_uses_tagged_nodes() {
        let json = r#"{"kind":"split","feature":2,"threshold":1.5,"left":1,"right":2}"#;
        let node: TreeNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            node,
            TreeNode::Split {
                feature: 2,
                threshold: 1.5,
                left: 1,
                right: 2
            }
        );
    }
}
