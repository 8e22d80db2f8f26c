//! Single-linkage agglomerative clustering.
//!
//! # Algorithm
//!
//! Every defined input point starts as its own cluster. At each step the two
//! live clusters with the smallest single-linkage distance
//!
//! ```text
//! d(A, B) = min_{p ∈ A, q ∈ B} ||p - q||
//! ```
//!
//! are merged, and the merge is recorded. After `m - 1` merges a single
//! cluster holds every point.
//!
//! The distance is always recomputed from the full member lists of both
//! clusters. There is no distance matrix and no centroid.
//!
//! ## Determinism
//!
//! Live clusters are kept in an ordered list. Candidate pairs are scanned with
//! the outer index ascending and the inner index starting just after it, and
//! a pair only replaces the current best if it is strictly closer. Merged
//! clusters leave the list in place and the new cluster is appended at the
//! end, so the scan order (and with it every tie-break) is a pure function of
//! the input order.
//!
//! ## Ids
//!
//! Leaves keep ids `0..m`. The merge at index `x` creates id `m + x`, which
//! is the usual linkage-matrix encoding.
//!
//! ## Complexity
//!
//! Each step scans every live pair and every member pair within it, so a run
//! is `O(m^4)` point comparisons in the worst case. Fine for a few hundred
//! regions; not meant for large point sets.

use super::point::{self, Leaf, Point};
use super::traits::Clustering;
use super::util::{self, UnionFind};
use crate::error::{Error, Result};

/// One merge: the two cluster ids joined, at what distance, and the new size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkageRecord {
    /// Cluster found first in the scan.
    pub cluster_a: usize,
    /// Cluster found second in the scan.
    pub cluster_b: usize,
    /// Single-linkage distance between the two at merge time.
    pub distance: f64,
    /// Leaves under the merged cluster.
    pub size: usize,
}

impl LinkageRecord {
    /// The record as a linkage-matrix row `[a, b, distance, size]`.
    pub fn to_row(&self) -> [f64; 4] {
        [
            self.cluster_a as f64,
            self.cluster_b as f64,
            self.distance,
            self.size as f64,
        ]
    }
}

/// Result of a single-linkage run: merge records in merge order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkageTree {
    records: Vec<LinkageRecord>,
    leaf_sources: Vec<usize>,
}

impl LinkageTree {
    /// Merge records, earliest first.
    pub fn records(&self) -> &[LinkageRecord] {
        &self.records
    }

    /// Number of leaves (defined input points).
    pub fn n_leaves(&self) -> usize {
        self.leaf_sources.len()
    }

    /// Input position of each leaf, indexed by leaf id.
    pub fn leaf_sources(&self) -> &[usize] {
        &self.leaf_sources
    }

    /// Number of merge records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No merges happened (fewer than two leaves).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id of the cluster holding every leaf, if there are any leaves.
    pub fn root(&self) -> Option<usize> {
        match self.n_leaves() {
            0 => None,
            m => Some(2 * m - 2),
        }
    }

    /// Records as linkage-matrix rows.
    pub fn to_matrix(&self) -> Vec<[f64; 4]> {
        self.records.iter().map(LinkageRecord::to_row).collect()
    }

    /// Cut the tree into `k` flat clusters by replaying the first `m - k` merges.
    ///
    /// Returns one label per leaf. Labels are numbered in order of first
    /// appearance by leaf id, so leaf 0 always has label 0.
    pub fn cut(&self, k: usize) -> Result<Vec<usize>> {
        let m = self.n_leaves();
        if m == 0 {
            return Err(Error::EmptyInput);
        }
        if k == 0 || k > m {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: m,
            });
        }

        let mut uf = UnionFind::new(m);
        // Node id -> any leaf under that node.
        let mut representative: Vec<usize> = (0..m).collect();
        for record in &self.records[..m - k] {
            let ra = representative[record.cluster_a];
            let rb = representative[record.cluster_b];
            uf.union(ra, rb);
            representative.push(ra);
        }

        let mut label_of_root = vec![usize::MAX; m];
        let mut next_label = 0usize;
        let mut labels = Vec::with_capacity(m);
        for leaf in 0..m {
            let root = uf.find(leaf);
            if label_of_root[root] == usize::MAX {
                label_of_root[root] = next_label;
                next_label += 1;
            }
            labels.push(label_of_root[root]);
        }
        Ok(labels)
    }
}

/// Single-linkage hierarchical agglomerative clustering.
#[derive(Debug, Clone)]
pub struct SingleLinkage {
    /// Flat cluster count used by [`Clustering::fit_predict`].
    n_clusters: usize,
}

impl SingleLinkage {
    /// Create a clusterer. The flat cluster count defaults to 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of flat clusters [`Clustering::fit_predict`] cuts to.
    pub fn with_n_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    /// Build the full linkage tree.
    ///
    /// `None` entries are undefined points: they are skipped and take no leaf id.
    pub fn fit(&self, features: &[Option<Point>]) -> Result<LinkageTree> {
        self.fit_with_cancel(features, || false)
    }

    /// Like [`fit`](Self::fit), but asks `should_stop` before every merge.
    ///
    /// A `true` answer discards the run and returns [`Error::Cancelled`].
    pub fn fit_with_cancel(
        &self,
        features: &[Option<Point>],
        mut should_stop: impl FnMut() -> bool,
    ) -> Result<LinkageTree> {
        let leaves = point::leaves(features)?;
        log::debug!(
            "single linkage: {} leaves ({} undefined inputs dropped)",
            leaves.len(),
            features.len() - leaves.len()
        );

        let records = agglomerate(&leaves, &mut should_stop)?;
        if let Some(last) = records.last() {
            log::debug!(
                "single linkage: {} merges, final distance {:.4}",
                records.len(),
                last.distance
            );
        }

        Ok(LinkageTree {
            records,
            leaf_sources: leaves.iter().map(|l| l.source).collect(),
        })
    }
}

impl Default for SingleLinkage {
    fn default() -> Self {
        Self { n_clusters: 1 }
    }
}

impl Clustering for SingleLinkage {
    fn fit_predict(&self, data: &[Point]) -> Result<Vec<usize>> {
        let features: Vec<Option<Point>> = data.iter().copied().map(Some).collect();
        self.fit(&features)?.cut(self.n_clusters)
    }

    fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

/// A cluster as it exists during the merge loop.
#[derive(Debug)]
struct WorkingCluster {
    id: usize,
    size: usize,
    /// Flattened points of every leaf under this cluster.
    members: Vec<Point>,
}

fn agglomerate(
    leaves: &[Leaf],
    should_stop: &mut impl FnMut() -> bool,
) -> Result<Vec<LinkageRecord>> {
    let m = leaves.len();
    if m <= 1 {
        return Ok(Vec::new());
    }

    // Arena indexed by cluster id. Merged clusters stay in place with their
    // members moved out; liveness is tracked by `live` alone.
    let mut arena: Vec<WorkingCluster> = Vec::with_capacity(2 * m - 1);
    for leaf in leaves {
        arena.push(WorkingCluster {
            id: leaf.id,
            size: 1,
            members: vec![leaf.point],
        });
    }
    let mut live: Vec<usize> = (0..m).collect();
    let mut records = Vec::with_capacity(m - 1);

    for merge_index in 0..m - 1 {
        if should_stop() {
            log::debug!("single linkage: cancelled after {merge_index} merges");
            return Err(Error::Cancelled {
                merges_completed: merge_index,
            });
        }

        let (i, j, distance) = closest_pair(&arena, &live);
        let (a, b) = (live[i], live[j]);
        let size = arena[a].size + arena[b].size;

        let mut members = std::mem::take(&mut arena[a].members);
        members.append(&mut arena[b].members);

        let record = LinkageRecord {
            cluster_a: a,
            cluster_b: b,
            distance,
            size,
        };
        log::trace!("merge {merge_index}: {record:?}");
        records.push(record);

        // j > i, so removing j first keeps i valid.
        live.remove(j);
        live.remove(i);

        let id = m + merge_index;
        debug_assert_eq!(arena.len(), id);
        arena.push(WorkingCluster { id, size, members });
        live.push(id);
    }

    debug_assert_eq!(live.len(), 1);
    debug_assert_eq!(arena[live[0]].id, live[0]);
    debug_assert_eq!(arena[live[0]].members.len(), m);
    Ok(records)
}

/// Positions `(i, j)` in `live` of the closest pair, and their distance.
///
/// Ties keep the pair seen first. Requires at least two live clusters.
fn closest_pair(arena: &[WorkingCluster], live: &[usize]) -> (usize, usize, f64) {
    let mut best = (0, 1, f64::INFINITY);
    for (i, &a) in live.iter().enumerate() {
        let a = &arena[a].members;
        for (j, &b) in live.iter().enumerate().skip(i + 1) {
            let d = util::min_pairwise_distance(a, &arena[b].members);
            if d < best.2 {
                best = (i, j, d);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(points: &[(f64, f64)]) -> Vec<Option<Point>> {
        points.iter().map(|&p| Some(Point::from(p))).collect()
    }

    fn record(a: usize, b: usize, distance: f64, size: usize) -> LinkageRecord {
        LinkageRecord {
            cluster_a: a,
            cluster_b: b,
            distance,
            size,
        }
    }

    #[test]
    fn three_point_example() {
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (1.0, 1.0), (10.0, 10.0)]))
            .unwrap();

        assert_eq!(
            tree.records(),
            &[
                record(0, 1, 2.0f64.sqrt(), 2),
                record(2, 3, 162.0f64.sqrt(), 3),
            ]
        );
        assert_eq!(tree.root(), Some(4));
    }

    #[test]
    fn ties_keep_first_pair_in_scan_order() {
        // (0,1) and (2,3) are both at distance 1; (0,1) is scanned first.
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0), (6.0, 0.0)]))
            .unwrap();

        assert_eq!(
            tree.records(),
            &[
                record(0, 1, 1.0, 2),
                record(2, 3, 1.0, 2),
                record(4, 5, 4.0, 4),
            ]
        );
    }

    #[test]
    fn merged_cluster_is_appended_to_scan_order() {
        // After merging leaves 0 and 1 into cluster 5, the live order is
        // [2, 3, 4, 5]. Pairs (3, 4) and (4, 5) tie at 3.0; (3, 4) comes first.
        let tree = SingleLinkage::new()
            .fit(&defined(&[
                (0.0, 0.0),
                (0.0, 1.0),
                (100.0, 100.0),
                (6.0, 0.0),
                (3.0, 0.0),
            ]))
            .unwrap();

        assert_eq!(
            tree.records(),
            &[
                record(0, 1, 1.0, 2),
                record(3, 4, 3.0, 2),
                record(5, 6, 3.0, 4),
                record(2, 7, 18836.0f64.sqrt(), 5),
            ]
        );
    }

    #[test]
    fn undefined_points_are_renumbered_densely() {
        let features = vec![
            Some(Point::new(0.0, 0.0)),
            None,
            Some(Point::new(4.0, 0.0)),
            None,
            Some(Point::new(1.0, 0.0)),
        ];
        let tree = SingleLinkage::new().fit(&features).unwrap();

        assert_eq!(tree.n_leaves(), 3);
        assert_eq!(tree.leaf_sources(), &[0, 2, 4]);
        assert_eq!(
            tree.records(),
            &[record(0, 2, 1.0, 2), record(1, 3, 3.0, 3)]
        );
    }

    #[test]
    fn degenerate_inputs_yield_no_records() {
        let sl = SingleLinkage::new();

        let empty = sl.fit(&[]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.root(), None);

        let all_undefined = sl.fit(&[None, None, None]).unwrap();
        assert!(all_undefined.is_empty());
        assert_eq!(all_undefined.n_leaves(), 0);

        let single = sl.fit(&[None, Some(Point::new(2.0, 3.0))]).unwrap();
        assert!(single.is_empty());
        assert_eq!(single.root(), Some(0));
    }

    #[test]
    fn non_finite_point_aborts_run() {
        let features = vec![Some(Point::new(0.0, 0.0)), Some(Point::new(f64::NAN, 0.0))];
        let err = SingleLinkage::new().fit(&features).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinate { index: 1, .. }));
    }

    #[test]
    fn distance_uses_closest_members_not_centroids() {
        // Cluster {0, 1} spans x in [0, 1]. Leaf 2 is 2.0 from its nearest member,
        // leaf 3 is 2.5 from its nearest member.
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (-2.5, 0.0)]))
            .unwrap();

        assert_eq!(tree.records()[0], record(0, 1, 1.0, 2));
        assert_eq!(tree.records()[1], record(2, 4, 2.0, 3));
        assert_eq!(tree.records()[2], record(3, 5, 2.5, 4));
    }

    #[test]
    fn cancellation_discards_run() {
        let features = defined(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (7.0, 0.0)]);
        let mut calls = 0;
        let result = SingleLinkage::new().fit_with_cancel(&features, || {
            calls += 1;
            calls > 2
        });

        match result {
            Err(Error::Cancelled { merges_completed }) => assert_eq!(merges_completed, 2),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[test]
    fn never_stopping_matches_fit() {
        let features = defined(&[(0.0, 0.0), (2.0, 1.0), (3.0, 7.0), (7.0, 2.0)]);
        let sl = SingleLinkage::new();
        assert_eq!(
            sl.fit(&features).unwrap(),
            sl.fit_with_cancel(&features, || false).unwrap()
        );
    }

    #[test]
    fn cut_replays_merges() {
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (11.0, 0.0), (30.0, 0.0)]))
            .unwrap();

        assert_eq!(tree.cut(5).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(tree.cut(3).unwrap(), vec![0, 1, 0, 1, 2]);
        assert_eq!(tree.cut(2).unwrap(), vec![0, 0, 0, 0, 1]);
        assert_eq!(tree.cut(1).unwrap(), vec![0; 5]);
    }

    #[test]
    fn cut_rejects_bad_counts() {
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (1.0, 0.0)]))
            .unwrap();
        assert!(matches!(
            tree.cut(0),
            Err(Error::InvalidClusterCount { requested: 0, n_items: 2 })
        ));
        assert!(tree.cut(3).is_err());

        let empty = SingleLinkage::new().fit(&[]).unwrap();
        assert!(matches!(empty.cut(1), Err(Error::EmptyInput)));
    }

    #[test]
    fn fit_predict_cuts_to_configured_count() {
        let data = vec![
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(20.0, 20.0),
            Point::new(20.5, 20.0),
        ];
        let sl = SingleLinkage::new().with_n_clusters(2);
        assert_eq!(sl.n_clusters(), 2);
        assert_eq!(sl.fit_predict(&data).unwrap(), vec![0, 0, 1, 1]);

        assert!(sl.fit_predict(&[]).is_err());
    }

    #[test]
    fn matrix_rows_follow_records() {
        let tree = SingleLinkage::new()
            .fit(&defined(&[(0.0, 0.0), (0.0, 2.0)]))
            .unwrap();
        assert_eq!(tree.to_matrix(), vec![[0.0, 1.0, 2.0, 2.0]]);
    }
}
