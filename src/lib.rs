//! Outbreak-curve clustering.
//!
//! `outbreak` groups regions by the shape of their cumulative case curves.
//!
//! - [`feature`] reads a case-count table and reduces each region to a 2-D
//!   point: days since the count was a tenth, and a hundredth, of its latest
//!   value.
//! - [`cluster`] runs single-linkage agglomerative clustering over those
//!   points and returns the merge history as a linkage tree.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod feature;

pub use cluster::{Clustering, Leaf, LinkageRecord, LinkageTree, Point, SingleLinkage};
pub use error::{Error, Result};
pub use feature::{CaseTable, FeatureExtractor, Region};
