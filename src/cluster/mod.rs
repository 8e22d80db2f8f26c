//! Hierarchical clustering of 2-D feature points.
//!
//! ## Single linkage
//!
//! Agglomerative clustering starts with every point in its own cluster and
//! repeatedly merges the two closest clusters. Under **single linkage** the
//! distance between clusters is the distance between their closest members:
//!
//! ```text
//! d(A, B) = min_{p ∈ A, q ∈ B} ||p - q||
//! ```
//!
//! Single linkage follows chains of nearby points, so elongated groups stay
//! together. It is also sensitive to a single bridging point between two
//! otherwise separate groups.
//!
//! The output is a [`LinkageTree`]: one [`LinkageRecord`] per merge, in merge
//! order, with leaves numbered `0..m` and merged clusters `m..2m-1`. A tree can
//! be [cut](LinkageTree::cut) into a flat labelling with any number of
//! clusters.
//!
//! ## Undefined points
//!
//! Inputs are `Option<Point>`. `None` entries are dropped before clustering
//! and take no leaf id; [`LinkageTree::leaf_sources`] maps leaf ids back to
//! input positions.
//!
//! ## Usage
//!
//! ```rust
//! use outbreak::cluster::{Clustering, Point, SingleLinkage};
//!
//! let features = vec![
//!     Some(Point::new(0.0, 0.0)),
//!     None,
//!     Some(Point::new(1.0, 1.0)),
//!     Some(Point::new(10.0, 10.0)),
//! ];
//!
//! let tree = SingleLinkage::new().fit(&features).unwrap();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.records()[0].cluster_a, 0);
//! assert_eq!(tree.records()[0].cluster_b, 1);
//! assert_eq!(tree.records()[1].size, 3);
//!
//! // Flat labels via the `Clustering` trait.
//! let points = vec![Point::new(0.0, 0.0), Point::new(0.1, 0.1), Point::new(9.0, 9.0)];
//! let labels = SingleLinkage::new().with_n_clusters(2).fit_predict(&points).unwrap();
//! assert_eq!(labels, vec![0, 0, 1]);
//! ```

mod linkage;
mod point;
mod traits;
mod util;

pub use linkage::{LinkageRecord, LinkageTree, SingleLinkage};
pub use point::{leaves, Leaf, Point};
pub use traits::Clustering;
