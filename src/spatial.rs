//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around KD-tree for nearest-site queries
///
/// The nearest site to a position is the site whose Voronoi region contains
/// it, so this answers point location in O(log n) without touching the
/// diagram's edges.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

impl SpatialIndex {
    /// Build spatial index from site coordinates
    ///
    /// Returns `None` for an empty slice; there is nothing to look up.
    ///
    /// # Example
    ///
    /// ```
    /// use fortune_voronoi::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(10.0, 0.0),
    ///     DVec2::new(0.0, 10.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(8.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(sites: &[DVec2]) -> Option<Self> {
        if sites.is_empty() {
            return None;
        }

        // Convert DVec2 to [f64; 2] array format for kiddo
        let points: Vec<[f64; 2]> = sites.iter().map(|p| [p.x, p.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Find the index of the site nearest to a position
    ///
    /// # Arguments
    ///
    /// * `position` - Query position, inside or outside the diagram bounds
    ///
    /// # Returns
    ///
    /// Position of the nearest site in the slice the index was built from
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
