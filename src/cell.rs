//! Voronoi Cell Structure
//!
//! An owned snapshot of one site's region: its identifier, coordinate,
//! neighbours and clipped boundary polygon.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom;

/// A single Voronoi cell of a diagram
///
/// Each cell represents the part of the bounding rectangle closer to its site
/// than to any other:
/// - An ID matching the site's position in the caller's input
/// - The site coordinate
/// - Neighbor connectivity (sites whose regions share an edge)
/// - Vertices for rendering the clipped cell boundary
///
/// Cells are detached copies; they stay valid after the diagram is dropped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the site in the points the diagram was built from
    pub id: usize,

    /// Site coordinate
    pub center: DVec2,

    /// IDs of adjacent cells (neighbors in the Voronoi graph)
    ///
    /// Cells are neighbors if their sites share an edge of the diagram, even
    /// when that edge lies outside the bounding rectangle.
    pub neighbors: Vec<usize>,

    /// Vertices defining the cell's boundary polygon (for rendering)
    ///
    /// Ordered counter-clockwise; empty when no edge of the site reaches
    /// into the bounding rectangle.
    pub vertices: Vec<DVec2>,
}

impl VoronoiCell {
    /// Create a new Voronoi cell
    ///
    /// This is typically called by the diagram, not by user code.
    pub fn new(id: usize, center: DVec2, neighbors: Vec<usize>, vertices: Vec<DVec2>) -> Self {
        Self {
            id,
            center,
            neighbors,
            vertices,
        }
    }

    /// Get the number of neighboring cells
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this cell is a neighbor of another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.contains(&other_cell_id)
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Area of the clipped cell polygon
    pub fn area(&self) -> f64 {
        geom::area(&self.vertices)
    }

    /// Area-weighted centroid of the cell polygon, `None` when degenerate
    ///
    /// This is where Lloyd's relaxation moves the site.
    pub fn centroid(&self) -> Option<DVec2> {
        geom::centroid(&self.vertices)
    }

    /// Euclidean distance between the two cells' sites
    #[inline]
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.center.distance(other.center)
    }
}
