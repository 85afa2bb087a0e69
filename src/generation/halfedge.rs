//! Transient half-edges of the sweep
//!
//! A half-edge is one side of a bisector as seen from the beach line. Half-edges
//! live in an arena owned by a single sweep and are linked by handle into the
//! beach line (`left`/`right`) and, while a circle event is pending, into one
//! bucket chain of the event queue (`next_in_queue`).

use glam::DVec2;

use crate::edge::{Edge, EdgeId};
use crate::site::{compare_by_y_then_x, Side, SiteList};

/// Handle of a half-edge inside one sweep
pub(crate) type HalfedgeId = usize;

/// Lines closer to parallel than this never intersect
const PARALLEL_EPSILON: f64 = 1.0e-10;

#[derive(Debug, Clone)]
pub(crate) struct Halfedge {
    /// `None` for the two beach-line sentinels
    pub edge: Option<EdgeId>,
    pub side: Side,
    /// Candidate vertex of the pending circle event
    pub vertex: Option<DVec2>,
    /// Sweep-line y at which the candidate's circle event fires
    pub ystar: f64,
    /// Beach-line neighbours; a node links to itself until it is spliced in
    pub left: HalfedgeId,
    pub right: HalfedgeId,
    pub next_in_queue: Option<HalfedgeId>,
    /// Set once spliced out of the beach line
    pub deleted: bool,
}

impl Halfedge {
    fn new(id: HalfedgeId, edge: Option<EdgeId>, side: Side) -> Self {
        Self {
            edge,
            side,
            vertex: None,
            ystar: 0.0,
            left: id,
            right: id,
            next_in_queue: None,
            deleted: false,
        }
    }
}

/// Arena of every half-edge allocated during one sweep
#[derive(Debug, Default)]
pub(crate) struct HalfedgeArena {
    nodes: Vec<Halfedge>,
}

impl HalfedgeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, edge: EdgeId, side: Side) -> HalfedgeId {
        let id = self.nodes.len();
        self.nodes.push(Halfedge::new(id, Some(edge), side));
        id
    }

    pub fn create_sentinel(&mut self) -> HalfedgeId {
        let id = self.nodes.len();
        self.nodes.push(Halfedge::new(id, None, Side::Left));
        id
    }

    #[inline]
    pub fn get(&self, id: HalfedgeId) -> &Halfedge {
        &self.nodes[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: HalfedgeId) -> &mut Halfedge {
        &mut self.nodes[id]
    }
}

/// Whether `p` lies to the left of the beach-line breakpoint traced by a
/// half-edge of `edge` with orientation `side`
///
/// The breakpoint is the intersection of the arcs of the edge's two sites at the
/// sweep position `p.y`; this avoids solving for it by testing which of the two
/// sites `p` is closer to relative to the parabola through the upper site.
pub(crate) fn is_left_of(edge: &Edge, side: Side, p: DVec2, sites: &SiteList) -> bool {
    let top_site = sites.coord(edge.right_site());
    let right_of_site = p.x > top_site.x;

    if right_of_site && side == Side::Left {
        return true;
    }
    if !right_of_site && side == Side::Right {
        return false;
    }

    let above = if edge.a == 1.0 {
        let dyp = p.y - top_site.y;
        let dxp = p.x - top_site.x;
        let mut fast = false;
        let mut above;
        if (!right_of_site && edge.b < 0.0) || (right_of_site && edge.b >= 0.0) {
            above = dyp >= edge.b * dxp;
            fast = above;
        } else {
            above = p.x + p.y * edge.b > edge.c;
            if edge.b < 0.0 {
                above = !above;
            }
            if !above {
                fast = true;
            }
        }
        if !fast {
            let dxs = top_site.x - sites.coord(edge.left_site()).x;
            above = edge.b * (dxp * dxp - dyp * dyp)
                < dxs * dyp * (1.0 + 2.0 * dxp / dxs + edge.b * edge.b);
            if edge.b < 0.0 {
                above = !above;
            }
        }
        above
    } else {
        let yl = edge.c - edge.a * p.x;
        let t1 = p.y - yl;
        let t2 = p.x - top_site.x;
        let t3 = yl - top_site.y;
        t1 * t1 > t2 * t2 + t3 * t3
    };

    match side {
        Side::Left => above,
        Side::Right => !above,
    }
}

/// Candidate vertex where the breakpoints of two adjacent half-edges meet
///
/// Returns `None` for sentinels, for edges sharing their upper site, for
/// (near-)parallel lines and when the intersection lies on the wrong side of
/// the upper site for the half-edge that reaches it, which would be a circle
/// event that never happens.
pub(crate) fn intersect(
    arena: &HalfedgeArena,
    edges: &[Edge],
    sites: &SiteList,
    he0: HalfedgeId,
    he1: HalfedgeId,
) -> Option<DVec2> {
    let h0 = arena.get(he0);
    let h1 = arena.get(he1);
    let edge0 = &edges[h0.edge?];
    let edge1 = &edges[h1.edge?];

    if edge0.right_site() == edge1.right_site() {
        return None;
    }

    let determinant = edge0.a * edge1.b - edge0.b * edge1.a;
    // NaN counts as parallel
    if !(determinant.abs() >= PARALLEL_EPSILON) {
        return None;
    }

    let x = (edge0.c * edge1.b - edge1.c * edge0.b) / determinant;
    let y = (edge1.c * edge0.a - edge0.c * edge1.a) / determinant;

    let (halfedge, edge) = if compare_by_y_then_x(
        sites.coord(edge0.right_site()),
        sites.coord(edge1.right_site()),
    )
    .is_lt()
    {
        (h0, edge0)
    } else {
        (h1, edge1)
    };

    let right_of_site = x >= sites.coord(edge.right_site()).x;
    if (right_of_site && halfedge.side == Side::Left)
        || (!right_of_site && halfedge.side == Side::Right)
    {
        return None;
    }

    Some(DVec2::new(x, y))
}
