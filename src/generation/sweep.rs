//! Fortune's sweep
//!
//! Sites and circle events are consumed in ascending `(y, x)` order. Each site
//! event splits the arc above the new site with a fresh bisector; each circle
//! event collapses an arc into a permanent vertex and joins the sites on either
//! side with a new bisector. Once both event sources are exhausted every edge
//! is clipped against the bounding rectangle.

use std::time::Instant;

use glam::DVec2;
use tracing::{debug, trace};

use crate::edge::{Edge, EdgeId, Vertex};
use crate::geom::Rect;
use crate::site::{compare_by_y_then_x, Side, SiteId, SiteList};

use super::beach_line::BeachLine;
use super::event_queue::EventQueue;
use super::halfedge::{intersect, HalfedgeArena, HalfedgeId};

/// The edge/vertex graph produced by one sweep
#[derive(Debug, Clone, Default)]
pub(crate) struct SweepOutput {
    pub edges: Vec<Edge>,
    /// Indexed by ordinal
    pub vertices: Vec<Vertex>,
    /// Sites of the Delaunay triangle dual to each vertex, same order
    pub triangles: Vec<[SiteId; 3]>,
}

/// Run the sweep over `sites` and clip the result to `bounds`
///
/// Sorts the catalog into sweep order first; edge handles are recorded on the
/// sites they separate. Sites repeating an earlier coordinate get no edges.
///
/// # Arguments
///
/// * `sites` - Site catalog, consumed through its cursor
/// * `bounds` - Rectangle the edges are clipped against
///
/// # Returns
///
/// Edges, vertices and the Delaunay triangles found at circle events
pub(crate) fn fortunes_algorithm(sites: &mut SiteList, bounds: &Rect) -> SweepOutput {
    let start = Instant::now();
    sites.sort_for_sweep();
    sites.reset();

    let Some(bottom_most) = sites.next() else {
        return SweepOutput::default();
    };

    let data_bounds = sites.bounds();
    let sqrt_sites = ((sites.len() + 4) as f64).sqrt() as usize;

    let mut arena = HalfedgeArena::new();
    let beach = BeachLine::new(
        &mut arena,
        data_bounds.min.x,
        data_bounds.width(),
        sqrt_sites,
    );
    let queue = EventQueue::new(data_bounds.min.y, data_bounds.height(), sqrt_sites);

    let mut sweep = Sweep {
        sites: &mut *sites,
        arena,
        beach,
        queue,
        bottom_most,
        output: SweepOutput::default(),
    };

    let mut new_site = sweep.next_site();
    loop {
        let min_event = if sweep.queue.is_empty() {
            None
        } else {
            sweep.queue.min(&sweep.arena)
        };

        match (new_site, min_event) {
            (Some(site), event)
                if event.map_or(true, |event| {
                    compare_by_y_then_x(sweep.sites.coord(site), event).is_lt()
                }) =>
            {
                sweep.site_event(site);
                new_site = sweep.next_site();
            }
            (_, Some(_)) => sweep.circle_event(),
            _ => break,
        }
    }

    let Sweep { mut output, .. } = sweep;
    for edge in &mut output.edges {
        edge.clip_vertices(bounds, &output.vertices);
    }

    debug!(
        sites = sites.len(),
        edges = output.edges.len(),
        vertices = output.vertices.len(),
        elapsed = ?start.elapsed(),
        "sweep finished"
    );

    output
}

struct Sweep<'a> {
    sites: &'a mut SiteList,
    arena: HalfedgeArena,
    beach: BeachLine,
    queue: EventQueue,
    /// Stands in for the missing site whenever a sentinel bounds an arc
    bottom_most: SiteId,
    output: SweepOutput,
}

impl Sweep<'_> {
    /// Next site in sweep order, passing over repeats of an earlier coordinate
    fn next_site(&mut self) -> Option<SiteId> {
        while let Some(site) = self.sites.next() {
            match self.sites.get(site).coincident_with() {
                Some(first) => trace!(site, first, "duplicate site skipped"),
                None => return Some(site),
            }
        }
        None
    }

    fn site_event(&mut self, site: SiteId) {
        let p = self.sites.coord(site);
        trace!(site, x = p.x, y = p.y, "site event");

        let lbnd = self
            .beach
            .left_neighbor(&self.arena, &self.output.edges, self.sites, p);
        let rbnd = self.arena.get(lbnd).right;
        let bottom = self.right_region(lbnd);

        let edge = self.create_edge(bottom, site);

        let bisector = self.arena.create(edge, Side::Left);
        self.beach.insert(&mut self.arena, lbnd, bisector);
        if let Some(v) = self.intersect(lbnd, bisector) {
            self.queue.remove(&mut self.arena, lbnd);
            self.schedule(lbnd, v, site);
        }

        let lbnd = bisector;
        let bisector = self.arena.create(edge, Side::Right);
        self.beach.insert(&mut self.arena, lbnd, bisector);
        if let Some(v) = self.intersect(bisector, rbnd) {
            self.schedule(bisector, v, site);
        }
    }

    fn circle_event(&mut self) {
        let Some(lbnd) = self.queue.extract_min(&mut self.arena) else {
            return;
        };
        let Some(coord) = self.arena.get(lbnd).vertex else {
            return;
        };

        let llbnd = self.arena.get(lbnd).left;
        let rbnd = self.arena.get(lbnd).right;
        let rrbnd = self.arena.get(rbnd).right;

        let mut bottom = self.left_region(lbnd);
        let mut top = self.right_region(rbnd);
        let middle = self.right_region(lbnd);
        self.output.triangles.push([bottom, middle, top]);

        let vertex = self.output.vertices.len();
        self.output.vertices.push(Vertex::new(vertex, coord));
        trace!(vertex, x = coord.x, y = coord.y, "circle event");

        for he in [lbnd, rbnd] {
            let node = self.arena.get(he);
            if let Some(edge) = node.edge {
                self.output.edges[edge].set_vertex(node.side, vertex);
            }
        }

        self.beach.remove(&mut self.arena, lbnd);
        self.queue.remove(&mut self.arena, rbnd);
        self.beach.remove(&mut self.arena, rbnd);

        let mut side = Side::Left;
        if self.sites.coord(bottom).y > self.sites.coord(top).y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }

        let edge = self.create_edge(bottom, top);
        let bisector = self.arena.create(edge, side);
        self.beach.insert(&mut self.arena, llbnd, bisector);
        self.output.edges[edge].set_vertex(side.other(), vertex);

        if let Some(v) = self.intersect(llbnd, bisector) {
            self.queue.remove(&mut self.arena, llbnd);
            self.schedule(llbnd, v, bottom);
        }
        if let Some(v) = self.intersect(bisector, rrbnd) {
            self.schedule(bisector, v, bottom);
        }
    }

    fn create_edge(&mut self, left: SiteId, right: SiteId) -> EdgeId {
        let id = self.output.edges.len();
        self.output.edges.push(Edge::bisector(self.sites, left, right));
        self.sites.add_edge(left, id);
        self.sites.add_edge(right, id);
        id
    }

    /// Queue the circle event of `he` at candidate vertex `v`
    ///
    /// The event fires once the sweep line reaches the bottom of the circle
    /// through `site` centred on `v`.
    fn schedule(&mut self, he: HalfedgeId, v: DVec2, site: SiteId) {
        let node = self.arena.get_mut(he);
        node.vertex = Some(v);
        node.ystar = v.y + self.sites.get(site).dist(v);
        self.queue.insert(&mut self.arena, he);
    }

    fn intersect(&self, he0: HalfedgeId, he1: HalfedgeId) -> Option<DVec2> {
        intersect(&self.arena, &self.output.edges, self.sites, he0, he1)
    }

    /// Site on the left side of a half-edge's breakpoint
    fn left_region(&self, he: HalfedgeId) -> SiteId {
        let node = self.arena.get(he);
        match node.edge {
            Some(edge) => self.output.edges[edge].site(node.side),
            None => self.bottom_most,
        }
    }

    /// Site on the right side of a half-edge's breakpoint
    fn right_region(&self, he: HalfedgeId) -> SiteId {
        let node = self.arena.get(he);
        match node.edge {
            Some(edge) => self.output.edges[edge].site(node.side.other()),
            None => self.bottom_most,
        }
    }
}
