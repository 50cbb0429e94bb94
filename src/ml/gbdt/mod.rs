//! Gradient-boosted regression trees.
//!
//! The artifact stores the additive ensemble exported by the training
//! pipeline:
//! - A constant initial estimate.
//! - A shrinkage (learning rate) applied to every tree.
//! - Trees as flat node arrays, `feature <= threshold` descending left.

mod model;

pub use model::{GbdtRegressor, RegressionTree, TreeNode};
