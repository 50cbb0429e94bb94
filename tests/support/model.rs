use std::path::Path;

use mbpredict::ml::gbdt::{GbdtRegressor, RegressionTree, TreeNode};

/// Small ensemble: more oxidant and a longer reaction raise degradation,
/// alkaline pH lowers it.
pub fn fixture_model() -> GbdtRegressor {
    GbdtRegressor {
        model_version: 1,
        feature_names: vec![
            "temp_k".into(),
            "mb_conc".into(),
            "oxidant_conc".into(),
            "catalyst_dos".into(),
            "react_time".into(),
            "ph".into(),
        ],
        feature_len: 6,
        learning_rate: 0.5,
        init_value: 62.5,
        trees: vec![
            RegressionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 2,
                        threshold: 5.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: -20.0 },
                    TreeNode::Split {
                        feature: 4,
                        threshold: 30.0,
                        left: 3,
                        right: 4,
                    },
                    TreeNode::Leaf { value: 5.0 },
                    TreeNode::Leaf { value: 35.0 },
                ],
            },
            RegressionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 5,
                        threshold: 9.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 0.5 },
                    TreeNode::Leaf { value: -15.0 },
                ],
            },
        ],
    }
}

/// Serialize the fixture model to `path` as the app expects it on disk.
pub fn write_fixture_model(path: &Path) {
    let json = serde_json::to_vec_pretty(&fixture_model()).expect("serialize model");
    std::fs::write(path, json).expect("write model");
}
