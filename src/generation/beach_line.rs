//! Beach-line status
//!
//! A doubly linked list of half-edges ordered left to right along the sweep
//! line, bracketed by two sentinels. A bucket index over the sites' x range
//! remembers a recently visited half-edge per bucket so that neighbour lookup
//! starts its scan close to the answer.

use glam::DVec2;

use crate::edge::Edge;
use crate::site::SiteList;

use super::halfedge::{is_left_of, HalfedgeArena, HalfedgeId};

#[derive(Debug)]
pub(crate) struct BeachLine {
    xmin: f64,
    delta_x: f64,
    hash: Vec<Option<HalfedgeId>>,
    left_end: HalfedgeId,
    right_end: HalfedgeId,
}

impl BeachLine {
    /// Create an empty beach line holding only its two sentinels
    ///
    /// # Arguments
    /// * `arena` - Arena the sentinels are allocated in
    /// * `xmin`, `delta_x` - Horizontal extent of the sites
    /// * `sqrt_sites` - `sqrt(site_count + 4)`, sizes the bucket index
    pub fn new(arena: &mut HalfedgeArena, xmin: f64, delta_x: f64, sqrt_sites: usize) -> Self {
        let hash_size = (2 * sqrt_sites).max(2);

        let left_end = arena.create_sentinel();
        let right_end = arena.create_sentinel();
        arena.get_mut(left_end).right = right_end;
        arena.get_mut(right_end).left = left_end;

        let mut hash = vec![None; hash_size];
        hash[0] = Some(left_end);
        hash[hash_size - 1] = Some(right_end);

        Self {
            xmin,
            delta_x,
            hash,
            left_end,
            right_end,
        }
    }

    #[inline]
    pub fn left_end(&self) -> HalfedgeId {
        self.left_end
    }

    #[inline]
    pub fn right_end(&self) -> HalfedgeId {
        self.right_end
    }

    /// Splice `new` in immediately to the right of `lb`
    pub fn insert(&self, arena: &mut HalfedgeArena, lb: HalfedgeId, new: HalfedgeId) {
        let rb = arena.get(lb).right;
        {
            let node = arena.get_mut(new);
            node.left = lb;
            node.right = rb;
        }
        arena.get_mut(rb).left = new;
        arena.get_mut(lb).right = new;
    }

    /// Splice `he` out and mark it deleted so stale buckets drop it lazily
    pub fn remove(&self, arena: &mut HalfedgeArena, he: HalfedgeId) {
        let (left, right) = {
            let node = arena.get(he);
            (node.left, node.right)
        };
        arena.get_mut(left).right = right;
        arena.get_mut(right).left = left;

        arena.get_mut(he).deleted = true;
    }

    /// The half-edge immediately to the left of `p` on the beach line
    ///
    /// The returned half-edge's right region is the arc `p` falls under; it is
    /// the left sentinel when `p` lies left of every breakpoint.
    pub fn left_neighbor(
        &mut self,
        arena: &HalfedgeArena,
        edges: &[Edge],
        sites: &SiteList,
        p: DVec2,
    ) -> HalfedgeId {
        let size = self.hash.len();
        let bucket = self.bucket_of(p.x);

        let mut he = match self.get_hash(arena, bucket) {
            Some(he) => he,
            None => self.search_outward(arena, bucket),
        };

        let left_of = |he: HalfedgeId| {
            let node = arena.get(he);
            match node.edge {
                Some(edge) => is_left_of(&edges[edge], node.side, p, sites),
                None => false,
            }
        };

        if he == self.left_end || (he != self.right_end && left_of(he)) {
            loop {
                he = arena.get(he).right;
                if he == self.right_end || !left_of(he) {
                    break;
                }
            }
            he = arena.get(he).left;
        } else {
            loop {
                he = arena.get(he).left;
                if he == self.left_end || left_of(he) {
                    break;
                }
            }
        }

        if bucket > 0 && (bucket as usize) < size - 1 {
            self.hash[bucket as usize] = Some(he);
        }
        he
    }

    fn bucket_of(&self, x: f64) -> isize {
        let size = self.hash.len();
        if !(self.delta_x > 0.0) {
            return 0;
        }
        let bucket = ((x - self.xmin) / self.delta_x * size as f64) as isize;
        bucket.clamp(0, size as isize - 1)
    }

    /// Nearest populated bucket, searching alternately below and above
    ///
    /// Terminates because the two end buckets always hold the sentinels.
    fn search_outward(&mut self, arena: &HalfedgeArena, bucket: isize) -> HalfedgeId {
        let mut offset = 1;
        loop {
            if let Some(he) = self.get_hash(arena, bucket - offset) {
                return he;
            }
            if let Some(he) = self.get_hash(arena, bucket + offset) {
                return he;
            }
            offset += 1;
        }
    }

    fn get_hash(&mut self, arena: &HalfedgeArena, bucket: isize) -> Option<HalfedgeId> {
        if bucket < 0 || bucket as usize >= self.hash.len() {
            return None;
        }
        let he = self.hash[bucket as usize]?;
        if arena.get(he).deleted {
            self.hash[bucket as usize] = None;
            return None;
        }
        Some(he)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Side;

    fn setup() -> (SiteList, Vec<Edge>, HalfedgeArena, BeachLine, [HalfedgeId; 2]) {
        let mut sites = SiteList::from_points(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)]);
        sites.sort_for_sweep();
        let edges = vec![Edge::bisector(&sites, 0, 1)];

        let mut arena = HalfedgeArena::new();
        let beach = BeachLine::new(&mut arena, 0.0, 10.0, 2);
        let left = arena.create(0, Side::Left);
        let right = arena.create(0, Side::Right);
        beach.insert(&mut arena, beach.left_end(), left);
        beach.insert(&mut arena, left, right);

        (sites, edges, arena, beach, [left, right])
    }

    fn walk(arena: &HalfedgeArena, beach: &BeachLine) -> Vec<HalfedgeId> {
        let mut order = vec![beach.left_end()];
        let mut he = beach.left_end();
        while he != beach.right_end() {
            he = arena.get(he).right;
            order.push(he);
        }
        order
    }

    #[test]
    fn test_empty_beach_line_links_sentinels() {
        let mut arena = HalfedgeArena::new();
        let beach = BeachLine::new(&mut arena, 0.0, 1.0, 2);
        assert_eq!(arena.get(beach.left_end()).right, beach.right_end());
        assert_eq!(arena.get(beach.right_end()).left, beach.left_end());
    }

    #[test]
    fn test_insert_and_remove_keep_order() {
        let (_, _, mut arena, beach, [left, right]) = setup();
        assert_eq!(
            walk(&arena, &beach),
            vec![beach.left_end(), left, right, beach.right_end()]
        );

        beach.remove(&mut arena, left);
        assert!(arena.get(left).deleted);
        assert_eq!(
            walk(&arena, &beach),
            vec![beach.left_end(), right, beach.right_end()]
        );
    }

    #[test]
    fn test_left_neighbor_locates_arc() {
        let (sites, edges, arena, mut beach, [left, _]) = setup();

        // Left of the bisector x = 5: under the bottom site's arc
        let he = beach.left_neighbor(&arena, &edges, &sites, DVec2::new(2.0, 5.0));
        assert_eq!(he, beach.left_end());

        // Right of it: under the arc of the upper site, bounded by the left half-edge
        let he = beach.left_neighbor(&arena, &edges, &sites, DVec2::new(8.0, 5.0));
        assert_eq!(he, left);
    }

    #[test]
    fn test_deleted_bucket_entries_are_dropped() {
        let (sites, edges, mut arena, mut beach, [left, right]) = setup();

        // Seed an interior bucket, then delete the half-edge it points to
        let he = beach.left_neighbor(&arena, &edges, &sites, DVec2::new(5.5, 5.0));
        assert_eq!(he, left);
        beach.remove(&mut arena, right);
        beach.remove(&mut arena, left);

        let he = beach.left_neighbor(&arena, &edges, &sites, DVec2::new(5.5, 5.0));
        assert_eq!(he, beach.left_end());
    }
}
