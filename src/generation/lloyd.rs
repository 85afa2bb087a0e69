//! Lloyd's Relaxation for uniform point distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of a point set by
//! moving each point to the centroid of its clipped Voronoi region and
//! rebuilding the diagram from the moved points.

use std::time::Instant;

use glam::DVec2;
use tracing::{debug, info};

use crate::geom::{centroid, Rect};
use crate::region::compute_region;
use crate::site::SiteList;

use super::sweep::fortunes_algorithm;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold - stop when max displacement < this value
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.0,
        }
    }
}

/// What a relaxation run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LloydStats {
    /// Rounds actually run (at most `max_iterations`)
    pub iterations_run: usize,
    /// Largest distance any point moved, one entry per round
    pub max_displacements: Vec<f64>,
    /// Whether the run stopped early on the convergence threshold
    pub converged: bool,
}

/// Apply Lloyd's Relaxation to improve point distribution uniformity
///
/// # Algorithm
///
/// For each iteration:
/// 1. Build the Voronoi diagram of the current points
/// 2. Clip every region to `bounds`
/// 3. Move each point to its region's centroid (clamped into `bounds`)
///
/// Points whose region is degenerate stay where they are.
///
/// # Arguments
///
/// * `points` - Initial point distribution
/// * `bounds` - Rectangle the regions are clipped to
/// * `iterations` - Number of relaxation iterations
///
/// # Returns
///
/// Relaxed points, in the same order as the input
pub fn lloyd_relaxation(points: Vec<DVec2>, bounds: &Rect, iterations: usize) -> Vec<DVec2> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, bounds, options).0
}

/// Apply Lloyd's Relaxation with custom options
///
/// This variant allows fine-tuned control over convergence detection and
/// maximum iterations, and reports what the run did.
///
/// # Arguments
///
/// * `points` - Initial point distribution
/// * `bounds` - Rectangle the regions are clipped to
/// * `options` - Relaxation options (max iterations, convergence threshold)
///
/// # Returns
///
/// Relaxed points in input order, and statistics for the run
pub fn lloyd_relaxation_with_options(
    mut points: Vec<DVec2>,
    bounds: &Rect,
    options: LloydOptions,
) -> (Vec<DVec2>, LloydStats) {
    let total_start = Instant::now();
    let mut stats = LloydStats::default();

    if options.max_iterations == 0 || points.is_empty() {
        return (points, stats);
    }

    info!(
        points = points.len(),
        max_iterations = options.max_iterations,
        threshold = options.convergence_threshold,
        "lloyd relaxation starting"
    );

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let (new_points, max_displacement) = compute_new_points(&points, bounds);
        points = new_points;
        stats.iterations_run = iteration + 1;
        stats.max_displacements.push(max_displacement);

        debug!(
            iteration = iteration + 1,
            max_displacement,
            elapsed = ?iter_start.elapsed(),
            "lloyd iteration"
        );

        // Early exit if converged
        if options.convergence_threshold > 0.0 && max_displacement < options.convergence_threshold
        {
            stats.converged = true;
            debug!(
                iteration = iteration + 1,
                max_displacement,
                threshold = options.convergence_threshold,
                "lloyd converged"
            );
            break;
        }
    }

    info!(
        iterations = stats.iterations_run,
        max_iterations = options.max_iterations,
        converged = stats.converged,
        elapsed = ?total_start.elapsed(),
        "lloyd relaxation finished"
    );

    (points, stats)
}

/// One relaxation round: region centroids of `points`, in input order, and
/// the largest distance any point moved
fn compute_new_points(points: &[DVec2], bounds: &Rect) -> (Vec<DVec2>, f64) {
    let mut sites = SiteList::from_points(points);
    let output = fortunes_algorithm(&mut sites, bounds);

    let mut new_points = points.to_vec();
    let mut max_displacement: f64 = 0.0;

    for site in sites.sites() {
        let region = compute_region(site, &output.edges, bounds);
        let polygon = region.polygon();
        if polygon.len() < 3 {
            continue;
        }
        let Some(center) = centroid(polygon) else {
            continue;
        };

        let new_point = bounds.clamp(center);
        max_displacement = max_displacement.max(new_point.distance(site.coord()));
        new_points[site.input_index()] = new_point;
    }

    (new_points, max_displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::random_points;

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_lloyd_relaxation() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let points = random_points(100, &bounds, 42);
        let relaxed = lloyd_relaxation(points, &bounds, 3);

        assert_eq!(relaxed.len(), 100);
        assert!(relaxed.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_lloyd_moves_to_centroids() {
        let points = vec![DVec2::new(3.0, 5.0), DVec2::new(2.0, 5.0)];
        let relaxed = lloyd_relaxation(points, &square(), 1);

        // Split at x = 2.5; input order is kept
        assert!((relaxed[0] - DVec2::new(6.25, 5.0)).length() < 1e-9);
        assert!((relaxed[1] - DVec2::new(1.25, 5.0)).length() < 1e-9);
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        let relaxed1 = lloyd_relaxation(random_points(50, &bounds, 12345), &bounds, 2);
        let relaxed2 = lloyd_relaxation(random_points(50, &bounds, 12345), &bounds, 2);

        // Same input should produce identical output
        assert_eq!(relaxed1, relaxed2);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        let points = random_points(20, &bounds, 9);
        let options = LloydOptions {
            max_iterations: 0,
            convergence_threshold: 0.0,
        };
        let (relaxed, stats) = lloyd_relaxation_with_options(points.clone(), &bounds, options);

        assert_eq!(relaxed, points);
        assert_eq!(stats.iterations_run, 0);
        assert!(stats.max_displacements.is_empty());
    }

    #[test]
    fn test_lloyd_no_convergence_threshold() {
        // Test with convergence disabled (threshold = 0)
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        let options = LloydOptions {
            max_iterations: 4,
            convergence_threshold: 0.0,
        };
        let (relaxed, stats) =
            lloyd_relaxation_with_options(random_points(30, &bounds, 42), &bounds, options);

        assert_eq!(relaxed.len(), 30);
        assert_eq!(stats.iterations_run, 4);
        assert_eq!(stats.max_displacements.len(), 4);
        assert!(!stats.converged);
    }

    #[test]
    fn test_lloyd_stops_when_converged() {
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        let options = LloydOptions {
            max_iterations: 10,
            convergence_threshold: 1.0e6,
        };
        let (_, stats) =
            lloyd_relaxation_with_options(random_points(30, &bounds, 42), &bounds, options);

        assert!(stats.converged);
        assert_eq!(stats.iterations_run, 1);
    }

    #[test]
    fn test_displacement_shrinks() {
        // Jittered 8x8 grid: well separated and away from the border
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let jitter = random_points(64, &Rect::new(-2.0, -2.0, 4.0, 4.0), 5);
        let points: Vec<DVec2> = jitter
            .iter()
            .enumerate()
            .map(|(i, j)| DVec2::new(6.25 + 12.5 * (i % 8) as f64, 6.25 + 12.5 * (i / 8) as f64) + *j)
            .collect();

        let options = LloydOptions {
            max_iterations: 8,
            convergence_threshold: 0.0,
        };
        let (_, stats) = lloyd_relaxation_with_options(points, &bounds, options);

        let d = &stats.max_displacements;
        assert_eq!(d.len(), 8);
        for pair in d.windows(2) {
            assert!(pair[1] <= pair[0] * 1.25 + 1e-9, "displacements {:?}", d);
        }
        assert!(d[7] < d[0]);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert_eq!(options.convergence_threshold, 0.0);
    }
}
