//! Circle-event queue
//!
//! Pending half-edges are kept in buckets over the sites' y range, each bucket
//! an ascending singly linked chain threaded through `next_in_queue`. The
//! queue tracks the lowest bucket that may hold an event, which makes the
//! minimum cheap to find, and any pending event can be unlinked in place when
//! its arc disappears before it fires.

use glam::DVec2;

use super::halfedge::{HalfedgeArena, HalfedgeId};

#[derive(Debug)]
pub(crate) struct EventQueue {
    ymin: f64,
    delta_y: f64,
    hash: Vec<Option<HalfedgeId>>,
    count: usize,
    min_bucket: usize,
}

impl EventQueue {
    /// # Arguments
    /// * `ymin`, `delta_y` - Vertical extent of the sites
    /// * `sqrt_sites` - `sqrt(site_count + 4)`, sizes the bucket array
    pub fn new(ymin: f64, delta_y: f64, sqrt_sites: usize) -> Self {
        let hash_size = (4 * sqrt_sites).max(1);
        Self {
            ymin,
            delta_y,
            hash: vec![None; hash_size],
            count: 0,
            min_bucket: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Queue a half-edge whose `vertex` and `ystar` are already set
    ///
    /// Events are ordered by `ystar`, ties broken by the vertex's x.
    pub fn insert(&mut self, arena: &mut HalfedgeArena, he: HalfedgeId) {
        let (ystar, vx) = {
            let node = arena.get(he);
            (node.ystar, node.vertex.map_or(0.0, |v| v.x))
        };
        let bucket = self.bucket_of(ystar);
        if bucket < self.min_bucket {
            self.min_bucket = bucket;
        }

        let mut prev: Option<HalfedgeId> = None;
        let mut next = self.hash[bucket];
        while let Some(candidate) = next {
            let node = arena.get(candidate);
            let next_x = node.vertex.map_or(0.0, |v| v.x);
            if ystar > node.ystar || (ystar == node.ystar && vx > next_x) {
                prev = Some(candidate);
                next = node.next_in_queue;
            } else {
                break;
            }
        }

        arena.get_mut(he).next_in_queue = next;
        match prev {
            Some(prev) => arena.get_mut(prev).next_in_queue = Some(he),
            None => self.hash[bucket] = Some(he),
        }
        self.count += 1;
    }

    /// Withdraw a pending event; half-edges without one are left alone
    pub fn remove(&mut self, arena: &mut HalfedgeArena, he: HalfedgeId) {
        if arena.get(he).vertex.is_none() {
            return;
        }
        let bucket = self.bucket_of(arena.get(he).ystar);

        let mut prev: Option<HalfedgeId> = None;
        let mut cursor = self.hash[bucket];
        while let Some(candidate) = cursor {
            if candidate == he {
                break;
            }
            prev = Some(candidate);
            cursor = arena.get(candidate).next_in_queue;
        }
        if cursor.is_none() {
            debug_assert!(false, "pending half-edge missing from its bucket");
            return;
        }

        let next = arena.get(he).next_in_queue;
        match prev {
            Some(prev) => arena.get_mut(prev).next_in_queue = next,
            None => self.hash[bucket] = next,
        }
        self.count -= 1;

        let node = arena.get_mut(he);
        node.vertex = None;
        node.next_in_queue = None;
    }

    /// Location of the earliest pending event as `(vertex x, ystar)`
    pub fn min(&mut self, arena: &HalfedgeArena) -> Option<DVec2> {
        self.adjust_min_bucket();
        let he = self.hash[self.min_bucket]?;
        let node = arena.get(he);
        Some(DVec2::new(node.vertex.map_or(0.0, |v| v.x), node.ystar))
    }

    /// Pop the earliest pending event
    ///
    /// The half-edge keeps its `vertex` so the caller can finalize it.
    pub fn extract_min(&mut self, arena: &mut HalfedgeArena) -> Option<HalfedgeId> {
        self.adjust_min_bucket();
        let he = self.hash[self.min_bucket]?;
        self.hash[self.min_bucket] = arena.get(he).next_in_queue;
        self.count -= 1;
        arena.get_mut(he).next_in_queue = None;
        Some(he)
    }

    fn adjust_min_bucket(&mut self) {
        while self.min_bucket < self.hash.len() - 1 && self.hash[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
    }

    fn bucket_of(&self, ystar: f64) -> usize {
        let size = self.hash.len();
        if !(self.delta_y > 0.0) {
            return 0;
        }
        let bucket = ((ystar - self.ymin) / self.delta_y * size as f64) as isize;
        bucket.clamp(0, size as isize - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Side;

    fn pending(arena: &mut HalfedgeArena, x: f64, ystar: f64) -> HalfedgeId {
        let he = arena.create(0, Side::Left);
        let node = arena.get_mut(he);
        node.vertex = Some(DVec2::new(x, ystar - 1.0));
        node.ystar = ystar;
        he
    }

    #[test]
    fn test_extracts_in_ystar_order() {
        let mut arena = HalfedgeArena::new();
        let mut queue = EventQueue::new(0.0, 10.0, 3);

        let c = pending(&mut arena, 0.0, 9.0);
        let a = pending(&mut arena, 0.0, 1.0);
        let d = pending(&mut arena, 5.0, 25.0);
        let b = pending(&mut arena, 4.0, 1.5);
        for he in [c, a, d, b] {
            queue.insert(&mut arena, he);
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.min(&arena), Some(DVec2::new(0.0, 1.0)));

        let mut order = Vec::new();
        while let Some(he) = queue.extract_min(&mut arena) {
            order.push(he);
        }
        assert_eq!(order, vec![a, b, c, d]);
        assert!(queue.is_empty());
        assert_eq!(queue.min(&arena), None);
    }

    #[test]
    fn test_ties_broken_by_x() {
        let mut arena = HalfedgeArena::new();
        let mut queue = EventQueue::new(0.0, 10.0, 3);

        let right = pending(&mut arena, 7.0, 4.0);
        let left = pending(&mut arena, 2.0, 4.0);
        queue.insert(&mut arena, right);
        queue.insert(&mut arena, left);

        assert_eq!(queue.extract_min(&mut arena), Some(left));
        assert_eq!(queue.extract_min(&mut arena), Some(right));
    }

    #[test]
    fn test_remove_arbitrary_event() {
        let mut arena = HalfedgeArena::new();
        let mut queue = EventQueue::new(0.0, 10.0, 3);

        let a = pending(&mut arena, 0.0, 2.0);
        let b = pending(&mut arena, 1.0, 2.0);
        let c = pending(&mut arena, 2.0, 2.0);
        for he in [a, b, c] {
            queue.insert(&mut arena, he);
        }

        queue.remove(&mut arena, b);
        assert_eq!(queue.len(), 2);
        assert!(arena.get(b).vertex.is_none());

        // Removing again is a no-op once the vertex is cleared
        queue.remove(&mut arena, b);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.extract_min(&mut arena), Some(a));
        assert_eq!(queue.extract_min(&mut arena), Some(c));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_min_bucket_moves_back_for_lower_events() {
        let mut arena = HalfedgeArena::new();
        let mut queue = EventQueue::new(0.0, 10.0, 3);

        let high = pending(&mut arena, 0.0, 9.5);
        queue.insert(&mut arena, high);
        assert_eq!(queue.min(&arena), Some(DVec2::new(0.0, 9.5)));

        let low = pending(&mut arena, 0.0, 0.5);
        queue.insert(&mut arena, low);
        assert_eq!(queue.extract_min(&mut arena), Some(low));
    }
}
