//! Planar Voronoi diagrams with Fortune's sweep
//!
//! A standalone library for building the Voronoi diagram and Delaunay
//! triangulation of a point set in the plane, clipped to a rectangle, with
//! counter-clockwise region polygons per site and Lloyd's relaxation.
//!
//! # Quick Start
//!
//! ```rust
//! use fortune_voronoi::*;
//!
//! let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let points = random_points(200, &bounds, 42);
//!
//! // Build the diagram, relaxing the points three times first
//! let config = DiagramConfigBuilder::new()
//!     .bounds(bounds).unwrap()
//!     .lloyd_iterations(3).unwrap()
//!     .build().unwrap();
//! let diagram = VoronoiDiagram::with_config(&points, config).unwrap();
//!
//! // Regions tile the bounds
//! let total: f64 = diagram.cells().iter().map(|c| c.area()).sum();
//! assert!((total - bounds.area()).abs() < 1.0);
//! println!("{} edges, {} vertices", diagram.edges().len(), diagram.vertices().len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-site lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, geometry and cells

// Modules
pub mod error;
pub mod geom;
pub mod site;
pub mod edge;
pub mod generation;
pub mod region;
pub mod config;
pub mod cell;
pub mod diagram;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use geom::{Rect, Winding, LineSegment, Circle};
pub use site::{Side, Site, SiteId, SiteList};
pub use edge::{Edge, EdgeId, Vertex, VertexId};
pub use region::{reorder_edges, Criterion, SiteRegion};
pub use config::{DiagramConfig, DiagramConfigBuilder, MAX_LLOYD_ITERATIONS};
pub use cell::VoronoiCell;
pub use diagram::VoronoiDiagram;
pub use generation::{lloyd_relaxation, lloyd_relaxation_with_options, random_points, LloydOptions, LloydStats};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
