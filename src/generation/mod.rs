//! Core Voronoi generation algorithm
//!
//! Builds the Voronoi edge graph with Fortune's sweep and relaxes point sets
//! with Lloyd's algorithm. The sweep's status structures (half-edges, beach
//! line, event queue) live here and never escape a single build.

mod beach_line;
mod event_queue;
mod halfedge;
mod lloyd;
mod points;
mod sweep;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions, LloydStats};
pub use points::random_points;

pub(crate) use sweep::fortunes_algorithm;
