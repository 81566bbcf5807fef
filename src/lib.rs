//! UPGMA (Unweighted Pair Group Method with Arithmetic Mean) hierarchical
//! clustering in Rust. Generic over floating point numeric types.
//!
//! UPGMA builds a rooted binary merge tree over a set of labeled leaves from
//! their pairwise distances. At every step the two closest clusters are
//! merged, and the distance from the new cluster to every remaining cluster
//! is recomputed as the size-weighted average of its children's distances.
//! Ties for the closest pair are broken lexicographically on the clusters'
//! sorted member labels, so the merge order is fully deterministic and does
//! not depend on container iteration order.
//!
//! The resulting [`MergeTree`] renders two ways: a bracket-notation string of
//! the clustering order, and a DOT graph description for visualization.
//!
//! # Examples
//! ```
//!use upgma::{DistanceMatrix, Upgma};
//!
//!let matrix = DistanceMatrix::parse("a b 4.0\na c 6.0\nb c 6.0").unwrap();
//!let tree = Upgma::new(&matrix).cluster().unwrap();
//!assert_eq!(tree.to_bracket(), "((a,b),c)");
//!assert_eq!(tree.merge_heights(), vec![4.0, 6.0]);
//! ```

use std::collections::HashMap;

use num_traits::Float;

use crate::matrix::pair_index;

pub use crate::error::UpgmaError;
pub use crate::matrix::DistanceMatrix;
pub use crate::tree::{MergeNode, MergeTree};

mod error;
mod matrix;
mod tree;

/// The UPGMA clustering engine. Generic over floating point numeric types.
pub struct Upgma<'a, T> {
    matrix: &'a DistanceMatrix<T>,
}

impl<'a, T: Float> Upgma<'a, T> {
    /// Creates an engine over the given distance matrix. The matrix is
    /// validated when [`cluster`](Self::cluster) is called.
    pub fn new(matrix: &'a DistanceMatrix<T>) -> Self {
        Upgma { matrix }
    }

    /// Runs the clustering to completion and returns the merge tree.
    ///
    /// Validation happens up front: the matrix must hold a finite,
    /// non-negative distance for every unordered pair of distinct leaves.
    /// Any violation fails before the first merge, so no partial tree is
    /// ever returned.
    ///
    /// # Examples
    /// ```
    ///use upgma::{DistanceMatrix, Upgma};
    ///
    ///let matrix = DistanceMatrix::parse("x y 5.0").unwrap();
    ///let tree = Upgma::new(&matrix).cluster().unwrap();
    ///assert_eq!(tree.to_bracket(), "(x,y)");
    /// ```
    pub fn cluster(&self) -> Result<MergeTree<T>, UpgmaError> {
        self.validate_distances()?;

        let n_leaves = self.matrix.n_leaves();
        let mut nodes: Vec<MergeNode<T>> = self
            .matrix
            .labels
            .iter()
            .map(|label| MergeNode::leaf(label.clone()))
            .collect();
        let mut distances = self.matrix.distances.clone();
        let mut active: Vec<usize> = (0..n_leaves).collect();

        while active.len() > 1 {
            let (left, right) = Self::find_closest_pair(&nodes, &active, &distances);
            let height = distances[&pair_index(left, right)];
            let new_id = nodes.len();

            for &other in &active {
                if other == left || other == right {
                    continue;
                }
                let recomputed = Self::weighted_average(
                    distances[&pair_index(left, other)],
                    distances[&pair_index(right, other)],
                    nodes[left].members.len(),
                    nodes[right].members.len(),
                );
                distances.insert(pair_index(new_id, other), recomputed);
            }
            distances.retain(|&(i, j), _| {
                i != left && i != right && j != left && j != right
            });
            active.retain(|&id| id != left && id != right);
            active.push(new_id);

            let mut members = nodes[left].members.clone();
            members.extend_from_slice(&nodes[right].members);
            members.sort();
            nodes.push(MergeNode {
                members,
                children: Some([left, right]),
                height,
            });
        }

        Ok(MergeTree::new(nodes, n_leaves))
    }

    fn validate_distances(&self) -> Result<(), UpgmaError> {
        let labels = &self.matrix.labels;
        if labels.is_empty() {
            return Err(UpgmaError::NoLeaves);
        }
        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                let distance = match self.matrix.distances.get(&pair_index(i, j)) {
                    Some(&d) => d,
                    None => {
                        return Err(UpgmaError::MissingDistance(format!(
                            "no distance recorded between `{}` and `{}`",
                            labels[i], labels[j]
                        )))
                    }
                };
                if !distance.is_finite() || distance < T::zero() {
                    return Err(UpgmaError::InvalidDistance(format!(
                        "distance between `{}` and `{}` must be finite and non-negative",
                        labels[i], labels[j]
                    )));
                }
            }
        }
        Ok(())
    }

    /// Scans all active pairs for the minimum distance. Ties are broken by
    /// comparing the pairs' canonical renderings, each pair ordered so its
    /// lexicographically smaller cluster comes first; the winning pair is
    /// returned in that order, which fixes the left/right child order.
    fn find_closest_pair(
        nodes: &[MergeNode<T>],
        active: &[usize],
        distances: &HashMap<(usize, usize), T>,
    ) -> (usize, usize) {
        let mut best: Option<((usize, usize), T)> = None;

        for (position, &i) in active.iter().enumerate() {
            for &j in &active[position + 1..] {
                let pair = Self::order_by_canonical(nodes, i, j);
                let distance = distances[&pair_index(i, j)];
                let replace = match &best {
                    None => true,
                    Some((best_pair, best_distance)) => {
                        if distance < *best_distance {
                            true
                        } else if distance > *best_distance {
                            false
                        } else {
                            Self::canonical_pair(nodes, pair)
                                < Self::canonical_pair(nodes, *best_pair)
                        }
                    }
                };
                if replace {
                    best = Some((pair, distance));
                }
            }
        }

        let ((left, right), _) = best.expect("at least two active clusters");
        (left, right)
    }

    fn order_by_canonical(nodes: &[MergeNode<T>], i: usize, j: usize) -> (usize, usize) {
        if nodes[i].canonical() <= nodes[j].canonical() {
            (i, j)
        } else {
            (j, i)
        }
    }

    fn canonical_pair(nodes: &[MergeNode<T>], (i, j): (usize, usize)) -> (String, String) {
        (nodes[i].canonical(), nodes[j].canonical())
    }

    fn weighted_average(dist_left: T, dist_right: T, size_left: usize, size_right: usize) -> T {
        let weight_left = T::from(size_left).unwrap_or(T::one());
        let weight_right = T::from(size_right).unwrap_or(T::one());
        (weight_left * dist_left + weight_right * dist_right) / (weight_left + weight_right)
    }
}
