//! Per-site region polygons
//!
//! A site's edges are threaded into a cycle by [`reorder_edges`] and their
//! clipped ends are stitched into a closed polygon. Where consecutive visible
//! edges stop at different sides of the bounding rectangle, the rectangle's
//! corners are spliced in by walking its perimeter in the polygon's direction.
//! The result is always counter-clockwise.

pub mod reorder;

pub use reorder::{reorder_edges, Criterion};

use glam::DVec2;

use crate::edge::{Edge, EdgeId};
use crate::geom::{signed_double_area, Rect};
use crate::site::{Side, Site};

/// Points closer than this are treated as the same polygon point
const CLOSE_ENOUGH: f64 = 0.005;

/// A site's edges in cyclic order together with its clipped polygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteRegion {
    edges: Vec<EdgeId>,
    orientations: Vec<Side>,
    polygon: Vec<DVec2>,
}

impl SiteRegion {
    /// Bounding edges ordered around the site, invisible ones included
    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Which end of each edge attaches to its predecessor
    #[inline]
    pub fn orientations(&self) -> &[Side] {
        &self.orientations
    }

    /// Counter-clockwise polygon, empty when no edge of the site is visible
    #[inline]
    pub fn polygon(&self) -> &[DVec2] {
        &self.polygon
    }
}

/// Compute the region of `site` from the diagram's edges
///
/// A duplicate of an earlier site has an empty region. Any other site without
/// edges is alone in the diagram and owns the whole rectangle.
pub(crate) fn compute_region(site: &Site, edges: &[Edge], bounds: &Rect) -> SiteRegion {
    if site.is_duplicate() {
        return SiteRegion::default();
    }
    if site.edges().is_empty() {
        return SiteRegion {
            edges: Vec::new(),
            orientations: Vec::new(),
            polygon: bounds.corners().to_vec(),
        };
    }

    let (ordered, orientations) = reorder_edges(site.edges(), edges, Criterion::Vertex);
    let polygon = clip_to_bounds(site.coord(), &ordered, &orientations, edges, bounds);

    SiteRegion {
        edges: ordered,
        orientations,
        polygon,
    }
}

/// Direction of travel along the rectangle's perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    CounterClockwise,
    Clockwise,
}

impl Walk {
    /// Direction in which the polygon passes `from` then `to` around `center`
    fn around(center: DVec2, from: DVec2, to: DVec2) -> Option<Walk> {
        let cross = (from - center).perp_dot(to - center);
        if cross > 0.0 {
            Some(Walk::CounterClockwise)
        } else if cross < 0.0 {
            Some(Walk::Clockwise)
        } else {
            None
        }
    }

    fn reverse(self) -> Walk {
        match self {
            Walk::CounterClockwise => Walk::Clockwise,
            Walk::Clockwise => Walk::CounterClockwise,
        }
    }
}

fn close_enough(p: DVec2, q: DVec2) -> bool {
    p.distance(q) < CLOSE_ENOUGH
}

/// Stitch the clipped ends of ordered edges into a counter-clockwise polygon
fn clip_to_bounds(
    center: DVec2,
    ordered: &[EdgeId],
    orientations: &[Side],
    edges: &[Edge],
    bounds: &Rect,
) -> Vec<DVec2> {
    let visible: Vec<usize> = (0..ordered.len())
        .filter(|&i| edges[ordered[i]].is_visible())
        .collect();
    let Some(&first) = visible.first() else {
        return Vec::new();
    };

    let Some([near, far]) = oriented_ends(&edges[ordered[first]], orientations[first]) else {
        return Vec::new();
    };
    let mut points = vec![near, far];
    let walk = Walk::around(center, near, far);

    for &i in &visible[1..] {
        let edge = &edges[ordered[i]];
        let Some(ends) = near_and_far(edge, orientations[i], center, walk) else {
            continue;
        };
        connect(&mut points, ends, false, bounds, walk);
    }
    connect(&mut points, [near, far], true, bounds, walk);

    if signed_double_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

fn oriented_ends(edge: &Edge, orientation: Side) -> Option<[DVec2; 2]> {
    Some([
        edge.clipped_end(orientation)?,
        edge.clipped_end(orientation.other())?,
    ])
}

/// Clipped ends of an edge, the one attaching to the polygon so far first
///
/// An edge with no resolved vertex matched its neighbours only through its
/// unresolved ends, so its orientation carries no information; it is turned
/// to run around `center` in the polygon's direction instead.
fn near_and_far(
    edge: &Edge,
    orientation: Side,
    center: DVec2,
    walk: Option<Walk>,
) -> Option<[DVec2; 2]> {
    let [near, far] = oriented_ends(edge, orientation)?;
    let unresolved = edge.left_vertex().is_none() && edge.right_vertex().is_none();
    match (unresolved, walk) {
        (true, Some(walk)) if Walk::around(center, near, far) == Some(walk.reverse()) => {
            Some([far, near])
        }
        _ => Some([near, far]),
    }
}

/// Append an edge's ends to the polygon, bridging any gap with rectangle corners
///
/// When `closing_up`, the edge is the polygon's first edge whose ends are
/// already present, so only the bridging corners are added.
fn connect(
    points: &mut Vec<DVec2>,
    [near, far]: [DVec2; 2],
    closing_up: bool,
    bounds: &Rect,
    walk: Option<Walk>,
) {
    let Some(&last) = points.last() else {
        return;
    };

    if !close_enough(last, near) {
        points.extend(corners_between(last, near, bounds, walk));
        if closing_up {
            return;
        }
        points.push(near);
    }

    if !close_enough(points[0], far) {
        points.push(far);
    }
}

/// Rectangle corners passed when walking the perimeter from `from` to `to`
///
/// Both points must lie on the perimeter and on different sides, otherwise
/// no corner separates them. Without a known direction the shorter way round
/// is taken.
fn corners_between(from: DVec2, to: DVec2, bounds: &Rect, walk: Option<Walk>) -> Vec<DVec2> {
    let (Some(t_from), Some(t_to)) = (
        perimeter_position(from, bounds),
        perimeter_position(to, bounds),
    ) else {
        return Vec::new();
    };
    if sides_of(from, bounds) & sides_of(to, bounds) != 0 {
        return Vec::new();
    }

    let perimeter = 2.0 * (bounds.width() + bounds.height());
    // A region may run along more than half the perimeter, e.g. a site cut off
    // from the rest by a short edge across one corner; there the shorter way
    // round skips the corners it owns. The shorter way is only a fallback.
    let walk = walk.unwrap_or_else(|| {
        if (t_to - t_from).rem_euclid(perimeter) <= perimeter * 0.5 {
            Walk::CounterClockwise
        } else {
            Walk::Clockwise
        }
    });

    let offset = |t: f64| match walk {
        Walk::CounterClockwise => (t - t_from).rem_euclid(perimeter),
        Walk::Clockwise => (t_from - t).rem_euclid(perimeter),
    };
    let span = offset(t_to);

    let mut corners: Vec<(f64, DVec2)> = bounds
        .corners()
        .into_iter()
        .filter_map(|corner| {
            let t = perimeter_position(corner, bounds)?;
            let d = offset(t);
            (d > 0.0 && d < span).then_some((d, corner))
        })
        .collect();
    corners.sort_by(|a, b| a.0.total_cmp(&b.0));
    corners.into_iter().map(|(_, corner)| corner).collect()
}

const BOTTOM: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const LEFT: u8 = 8;

/// Rectangle sides a point lies on, by exact coordinate match
fn sides_of(p: DVec2, bounds: &Rect) -> u8 {
    let mut sides = 0;
    if p.y == bounds.min.y {
        sides |= BOTTOM;
    }
    if p.x == bounds.max.x {
        sides |= RIGHT;
    }
    if p.y == bounds.max.y {
        sides |= TOP;
    }
    if p.x == bounds.min.x {
        sides |= LEFT;
    }
    sides
}

/// Distance along the perimeter, counter-clockwise from `bounds.min`
fn perimeter_position(p: DVec2, bounds: &Rect) -> Option<f64> {
    let (w, h) = (bounds.width(), bounds.height());
    let sides = sides_of(p, bounds);
    if sides & BOTTOM != 0 {
        Some(p.x - bounds.min.x)
    } else if sides & RIGHT != 0 {
        Some(w + (p.y - bounds.min.y))
    } else if sides & TOP != 0 {
        Some(w + h + (bounds.max.x - p.x))
    } else if sides & LEFT != 0 {
        Some(2.0 * w + h + (bounds.max.y - p.y))
    } else {
        None
    }
}
