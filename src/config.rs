//! Diagram Configuration and Builder
//!
//! This module provides the configuration for building a Voronoi diagram:
//! the clipping rectangle and the optional Lloyd relaxation settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::DVec2;

use crate::error::{Result, VoronoiError};
use crate::generation::LloydOptions;
use crate::geom::Rect;

/// Upper bound on Lloyd iterations accepted by the builder
pub const MAX_LLOYD_ITERATIONS: usize = 100;

/// Configuration for building a Voronoi diagram
///
/// The same configuration and points always produce the identical diagram.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Rectangle every edge and region is clipped to
    ///
    /// Must have positive area and contain every input point.
    pub bounds: Rect,

    /// Number of Lloyd's Relaxation rounds run before the final build
    ///
    /// - 0: Diagram of the input points as given (default)
    /// - 2-3: Noticeably more uniform regions
    /// - 10+: Diminishing returns
    pub lloyd_iterations: usize,

    /// Convergence threshold for Lloyd's relaxation, in bounds units
    ///
    /// Relaxation stops early once no point moves further than this in a
    /// round. 0.0 disables early termination.
    pub lloyd_convergence: f64,
}

impl DiagramConfig {
    /// Relaxation options equivalent to this configuration
    #[inline]
    pub fn lloyd_options(&self) -> LloydOptions {
        LloydOptions {
            max_iterations: self.lloyd_iterations,
            convergence_threshold: self.lloyd_convergence,
        }
    }

    /// Check the invariants the builder enforces
    ///
    /// Fields are public, so a configuration assembled by hand is checked
    /// again before a diagram is built from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first violated constraint
    pub fn validate(&self) -> Result<()> {
        validate_bounds(&self.bounds)?;
        validate_iterations(self.lloyd_iterations)?;
        validate_convergence(self.lloyd_convergence)
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::from_corners(DVec2::ZERO, DVec2::ONE),
            lloyd_iterations: 0,
            lloyd_convergence: 0.0,
        }
    }
}

fn validate_bounds(bounds: &Rect) -> Result<()> {
    if !bounds.is_finite() {
        return Err(VoronoiError::InvalidConfig(format!(
            "Bounds must be finite (got {:?})",
            bounds
        )));
    }
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "Bounds must have positive area (got {} x {})",
            bounds.width(),
            bounds.height()
        )));
    }
    Ok(())
}

fn validate_iterations(iterations: usize) -> Result<()> {
    if iterations > MAX_LLOYD_ITERATIONS {
        return Err(VoronoiError::InvalidConfig(format!(
            "Lloyd iterations must be <= {} (got {})",
            MAX_LLOYD_ITERATIONS, iterations
        )));
    }
    Ok(())
}

fn validate_convergence(threshold: f64) -> Result<()> {
    if !(threshold >= 0.0) || !threshold.is_finite() {
        return Err(VoronoiError::InvalidConfig(format!(
            "Lloyd convergence threshold must be finite and >= 0 (got {})",
            threshold
        )));
    }
    Ok(())
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// // Use defaults (unit square, no relaxation)
/// let config = DiagramConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = DiagramConfigBuilder::new()
///     .bounds(Rect::new(-50.0, -50.0, 100.0, 100.0))
///     .unwrap()
///     .lloyd_iterations(5)
///     .unwrap()
///     .lloyd_convergence(0.01)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    bounds: Rect,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - bounds: the unit square
    /// - lloyd_iterations: 0 (no relaxation)
    /// - lloyd_convergence: 0.0 (run every requested iteration)
    pub fn new() -> Self {
        let defaults = DiagramConfig::default();
        Self {
            bounds: defaults.bounds,
            lloyd_iterations: defaults.lloyd_iterations,
            lloyd_convergence: defaults.lloyd_convergence,
        }
    }

    /// Set the clipping rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the rectangle is not finite or has no area
    pub fn bounds(mut self, bounds: Rect) -> Result<Self> {
        validate_bounds(&bounds)?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > [`MAX_LLOYD_ITERATIONS`]
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        validate_iterations(iterations)?;
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd's relaxation
    ///
    /// - 0.0: Disable early termination (run all iterations)
    /// - positive: stop once the largest displacement in a round is below it
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or not finite
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        validate_convergence(threshold)?;
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<DiagramConfig> {
        let config = DiagramConfig {
            bounds: self.bounds,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
