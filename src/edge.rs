//! Voronoi edges and vertices
//!
//! An [`Edge`] lies on the perpendicular bisector of exactly two sites and is
//! stored as the implicit line `a*x + b*y = c`, normalised so that either `a`
//! or `b` equals one. Its two ends are filled in by the sweep as circle events
//! resolve them; an end left unset extends to infinity until the edge is
//! clipped against the bounding rectangle.

use glam::DVec2;

use crate::geom::{LineSegment, Rect};
use crate::site::{Side, SiteId, SiteList};

/// Handle of an edge inside one diagram
pub type EdgeId = usize;

/// Handle of a vertex inside one diagram (its ordinal)
pub type VertexId = usize;

/// A point where Voronoi edges meet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    index: VertexId,
    coord: DVec2,
}

impl Vertex {
    pub(crate) fn new(index: VertexId, coord: DVec2) -> Self {
        Self { index, coord }
    }

    /// Ordinal assigned when the vertex became permanent
    #[inline]
    pub fn index(&self) -> VertexId {
        self.index
    }

    #[inline]
    pub fn coord(&self) -> DVec2 {
        self.coord
    }
}

/// A segment of the bisector between two sites
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) a: f64,
    pub(crate) b: f64,
    pub(crate) c: f64,
    sites: [SiteId; 2],
    vertices: [Option<VertexId>; 2],
    clipped: Option<[DVec2; 2]>,
}

impl Edge {
    /// The bisector between `left` and `right`
    ///
    /// The line passes through the midpoint of the two sites, perpendicular to
    /// the segment joining them. The two sites must be distinct.
    pub(crate) fn bisector(sites: &SiteList, left: SiteId, right: SiteId) -> Self {
        let p0 = sites.coord(left);
        let p1 = sites.coord(right);

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;

        let c = p0.x * dx + p0.y * dy + (dx * dx + dy * dy) * 0.5;
        let (a, b, c) = if dx.abs() > dy.abs() {
            (1.0, dy / dx, c / dx)
        } else {
            (dx / dy, 1.0, c / dy)
        };

        Self {
            a,
            b,
            c,
            sites: [left, right],
            vertices: [None, None],
            clipped: None,
        }
    }

    #[inline]
    pub fn left_site(&self) -> SiteId {
        self.sites[0]
    }

    #[inline]
    pub fn right_site(&self) -> SiteId {
        self.sites[1]
    }

    #[inline]
    pub fn site(&self, side: Side) -> SiteId {
        self.sites[side.index()]
    }

    /// The site across this edge from `site`, if `site` is one of its two sites
    pub fn other_site(&self, site: SiteId) -> Option<SiteId> {
        if site == self.sites[0] {
            Some(self.sites[1])
        } else if site == self.sites[1] {
            Some(self.sites[0])
        } else {
            None
        }
    }

    #[inline]
    pub fn left_vertex(&self) -> Option<VertexId> {
        self.vertices[0]
    }

    #[inline]
    pub fn right_vertex(&self) -> Option<VertexId> {
        self.vertices[1]
    }

    #[inline]
    pub fn vertex(&self, side: Side) -> Option<VertexId> {
        self.vertices[side.index()]
    }

    pub(crate) fn set_vertex(&mut self, side: Side, vertex: VertexId) {
        self.vertices[side.index()] = Some(vertex);
    }

    /// Coefficients `(a, b, c)` of the line `a*x + b*y = c`
    #[inline]
    pub fn line(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// An edge with an unresolved end separates two sites on the convex hull
    #[inline]
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.vertices[0].is_none() || self.vertices[1].is_none()
    }

    /// Whether any part of the edge lies inside the bounding rectangle
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.clipped.is_some()
    }

    /// Both clipped ends, `[left, right]`, when the edge is visible
    #[inline]
    pub fn clipped_ends(&self) -> Option<[DVec2; 2]> {
        self.clipped
    }

    #[inline]
    pub fn clipped_end(&self, side: Side) -> Option<DVec2> {
        self.clipped.map(|ends| ends[side.index()])
    }

    /// Distance between the two sites this edge separates
    pub fn sites_distance(&self, sites: &SiteList) -> f64 {
        sites.coord(self.sites[0]).distance(sites.coord(self.sites[1]))
    }

    /// The Delaunay edge dual to this Voronoi edge
    pub fn delaunay_line(&self, sites: &SiteList) -> LineSegment {
        LineSegment::new(sites.coord(self.sites[0]), sites.coord(self.sites[1]))
    }

    /// The visible part of this edge, from its left end to its right end
    pub fn voronoi_segment(&self) -> Option<LineSegment> {
        self.clipped.map(|[l, r]| LineSegment::new(l, r))
    }

    /// Clip the edge against `bounds`, recording the visible ends
    ///
    /// Unresolved ends are treated as rays running off to infinity. The edge
    /// stays invisible when it misses the rectangle or collapses to a point.
    pub(crate) fn clip_vertices(&mut self, bounds: &Rect, vertices: &[Vertex]) {
        self.clipped = None;

        let (xmin, ymin) = (bounds.min.x, bounds.min.y);
        let (xmax, ymax) = (bounds.max.x, bounds.max.y);
        let (a, b, c) = (self.a, self.b, self.c);

        // Walk the line in increasing y (mostly vertical lines) or increasing x
        // (mostly horizontal lines); `start` is the end met first.
        let start_side = if a == 1.0 && b >= 0.0 {
            Side::Right
        } else {
            Side::Left
        };
        let start = self.vertices[start_side.index()].map(|v| vertices[v].coord());
        let end = self.vertices[start_side.other().index()].map(|v| vertices[v].coord());

        let (mut x0, mut y0, mut x1, mut y1);
        if a == 1.0 {
            y0 = match start {
                Some(v) if v.y > ymin => v.y,
                _ => ymin,
            };
            if y0 > ymax {
                return;
            }
            x0 = c - b * y0;

            y1 = match end {
                Some(v) if v.y < ymax => v.y,
                _ => ymax,
            };
            if y1 < ymin {
                return;
            }
            x1 = c - b * y1;

            if (x0 > xmax && x1 > xmax) || (x0 < xmin && x1 < xmin) {
                return;
            }

            if x0 > xmax {
                x0 = xmax;
                y0 = (c - x0) / b;
            } else if x0 < xmin {
                x0 = xmin;
                y0 = (c - x0) / b;
            }

            if x1 > xmax {
                x1 = xmax;
                y1 = (c - x1) / b;
            } else if x1 < xmin {
                x1 = xmin;
                y1 = (c - x1) / b;
            }
        } else {
            x0 = match start {
                Some(v) if v.x > xmin => v.x,
                _ => xmin,
            };
            if x0 > xmax {
                return;
            }
            y0 = c - a * x0;

            x1 = match end {
                Some(v) if v.x < xmax => v.x,
                _ => xmax,
            };
            if x1 < xmin {
                return;
            }
            y1 = c - a * x1;

            if (y0 > ymax && y1 > ymax) || (y0 < ymin && y1 < ymin) {
                return;
            }

            if y0 > ymax {
                y0 = ymax;
                x0 = (c - y0) / a;
            } else if y0 < ymin {
                y0 = ymin;
                x0 = (c - y0) / a;
            }

            if y1 > ymax {
                y1 = ymax;
                x1 = (c - y1) / a;
            } else if y1 < ymin {
                y1 = ymin;
                x1 = (c - y1) / a;
            }
        }

        let p0 = DVec2::new(x0, y0);
        let p1 = DVec2::new(x1, y1);
        if p0 == p1 || !p0.is_finite() || !p1.is_finite() {
            return;
        }

        self.clipped = Some(match start_side {
            Side::Left => [p0, p1],
            Side::Right => [p1, p0],
        });
    }
}
