//! Seeded site generation
//!
//! Uniformly distributed points inside a rectangle, reproducible from a seed.
//! Used to feed the demo, the tests and Lloyd relaxation experiments.

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::geom::Rect;

/// Generate uniformly distributed points inside `bounds`
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `bounds` - Rectangle the points are drawn from
/// * `seed` - Random seed; the same seed always yields the same points
///
/// # Returns
///
/// `count` points, each inside `bounds`
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::generation::random_points;
/// use fortune_voronoi::Rect;
///
/// let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
/// let points = random_points(200, &bounds, 42);
/// assert_eq!(points.len(), 200);
/// assert!(points.iter().all(|p| bounds.contains(*p)));
/// ```
pub fn random_points(count: usize, bounds: &Rect, seed: u64) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = bounds.min.x + rng.gen::<f64>() * bounds.width();
            let y = bounds.min.y + rng.gen::<f64>() * bounds.height();
            bounds.clamp(DVec2::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_points_count_and_bounds() {
        let bounds = Rect::new(-5.0, 10.0, 20.0, 3.0);
        let points = random_points(500, &bounds, 1);
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_random_points_determinism() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(random_points(50, &bounds, 12345), random_points(50, &bounds, 12345));
        assert_ne!(random_points(50, &bounds, 1), random_points(50, &bounds, 2));
    }

    #[test]
    fn test_random_points_zero() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(random_points(0, &bounds, 42).is_empty());
    }
}
