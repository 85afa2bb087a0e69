//! Sites and the site catalog
//!
//! A [`Site`] is an input point together with the edges bounding its region.
//! The [`SiteList`] owns every site of one diagram build and hands them to the
//! sweep in ascending `(y, x)` order.

use std::cell::OnceCell;
use std::cmp::Ordering;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edge::EdgeId;
use crate::geom::Rect;
use crate::region::SiteRegion;

/// Handle of a site inside one diagram (its position in sweep order)
pub type SiteId = usize;

/// Which side of a bisector, or which end of an edge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite tag
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Slot of this side in a two-element `[left, right]` array
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Order two points by ascending y, ties broken by ascending x
///
/// This is the global event order of the sweep.
pub fn compare_by_y_then_x(a: DVec2, b: DVec2) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// An input point and the Voronoi edges that bound its region
#[derive(Debug, Clone)]
pub struct Site {
    index: SiteId,
    input_index: usize,
    coord: DVec2,
    edges: Vec<EdgeId>,
    /// First site in sweep order at the same coordinate, if this one repeats it
    coincident_with: Option<SiteId>,
    /// Reordered edges and clipped polygon, computed on first request
    pub(crate) region: OnceCell<SiteRegion>,
}

impl Site {
    fn new(index: SiteId, input_index: usize, coord: DVec2) -> Self {
        Self {
            index,
            input_index,
            coord,
            edges: Vec::new(),
            coincident_with: None,
            region: OnceCell::new(),
        }
    }

    /// Position of this site in sweep order
    #[inline]
    pub fn index(&self) -> SiteId {
        self.index
    }

    /// Position of the point in the caller's input
    #[inline]
    pub fn input_index(&self) -> usize {
        self.input_index
    }

    #[inline]
    pub fn coord(&self) -> DVec2 {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coord.y
    }

    /// Edges bounding this site's region, in the order the sweep created them
    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// The earlier site this one duplicates
    ///
    /// A duplicate takes no part in the sweep: it has no edges and an empty
    /// region, and queries by coordinate resolve to the site returned here.
    #[inline]
    pub fn coincident_with(&self) -> Option<SiteId> {
        self.coincident_with
    }

    #[inline]
    pub fn is_duplicate(&self) -> bool {
        self.coincident_with.is_some()
    }

    #[inline]
    pub fn dist(&self, p: DVec2) -> f64 {
        self.coord.distance(p)
    }
}

/// The site catalog of one diagram build
///
/// Sites are appended with [`add`](SiteList::add), sorted once into sweep order
/// and then consumed through the [`next`](SiteList::next) cursor.
#[derive(Debug, Clone, Default)]
pub struct SiteList {
    sites: Vec<Site>,
    sorted: bool,
    cursor: usize,
}

impl SiteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from points, keeping their input positions
    pub fn from_points(points: &[DVec2]) -> Self {
        let mut list = Self::new();
        for &p in points {
            list.add(p);
        }
        list
    }

    /// Append a site and return its provisional index
    ///
    /// The index is the insertion position until [`sort_for_sweep`] runs, after
    /// which it is the sweep position.
    ///
    /// [`sort_for_sweep`]: SiteList::sort_for_sweep
    pub fn add(&mut self, coord: DVec2) -> SiteId {
        let index = self.sites.len();
        self.sites.push(Site::new(index, index, coord));
        self.sorted = false;
        index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sort sites by `(y, x)` and renumber them in that order
    ///
    /// The sort is stable, so coincident points keep their input order; every
    /// point after the first at a coordinate is marked as its duplicate.
    pub fn sort_for_sweep(&mut self) {
        if self.sorted {
            return;
        }
        self.sites
            .sort_by(|a, b| compare_by_y_then_x(a.coord, b.coord));

        let mut first_at = 0;
        for index in 0..self.sites.len() {
            self.sites[index].index = index;
            if index > 0 && self.sites[index].coord == self.sites[first_at].coord {
                self.sites[index].coincident_with = Some(first_at);
            } else {
                self.sites[index].coincident_with = None;
                first_at = index;
            }
        }
        self.sorted = true;
        self.cursor = 0;
    }

    /// Next site in sweep order, or `None` once every site has been handed out
    pub fn next(&mut self) -> Option<SiteId> {
        self.sort_for_sweep();
        if self.cursor < self.sites.len() {
            self.cursor += 1;
            Some(self.cursor - 1)
        } else {
            None
        }
    }

    /// Restart the cursor at the bottommost site
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Smallest rectangle containing every site (zero-sized when empty)
    pub fn bounds(&self) -> Rect {
        let mut iter = self.sites.iter().map(|s| s.coord);
        let Some(first) = iter.next() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Rect { min, max }
    }

    #[inline]
    pub fn get(&self, id: SiteId) -> &Site {
        &self.sites[id]
    }

    #[inline]
    pub fn coord(&self, id: SiteId) -> DVec2 {
        self.sites[id].coord
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub(crate) fn add_edge(&mut self, id: SiteId, edge: EdgeId) {
        self.sites[id].edges.push(edge);
    }

    /// Coordinates in sweep order
    pub fn coords(&self) -> Vec<DVec2> {
        self.sites.iter().map(|s| s.coord).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Left.other(), Side::Right);
        assert_eq!(Side::Right.other(), Side::Left);
        assert_eq!(Side::Left.index(), 0);
        assert_eq!(Side::Right.index(), 1);
    }

    #[test]
    fn test_compare_by_y_then_x() {
        let a = DVec2::new(5.0, 1.0);
        let b = DVec2::new(0.0, 2.0);
        let c = DVec2::new(1.0, 2.0);
        assert_eq!(compare_by_y_then_x(a, b), Ordering::Less);
        assert_eq!(compare_by_y_then_x(c, b), Ordering::Greater);
        assert_eq!(compare_by_y_then_x(b, b), Ordering::Equal);
    }

    #[test]
    fn test_sort_reassigns_indices() {
        let mut list = SiteList::from_points(&[
            DVec2::new(3.0, 3.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 3.0),
            DVec2::new(0.0, 0.0),
        ]);
        list.sort_for_sweep();

        let coords = list.coords();
        assert_eq!(
            coords,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(0.0, 3.0),
                DVec2::new(3.0, 3.0),
            ]
        );
        for (i, site) in list.sites().iter().enumerate() {
            assert_eq!(site.index(), i);
        }
        let inputs: Vec<usize> = list.sites().iter().map(|s| s.input_index()).collect();
        assert_eq!(inputs, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicates() {
        let mut list = SiteList::from_points(&[
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
        ]);
        list.sort_for_sweep();
        let inputs: Vec<usize> = list.sites().iter().map(|s| s.input_index()).collect();
        assert_eq!(inputs, vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_marks_duplicates() {
        let mut list = SiteList::from_points(&[
            DVec2::new(5.0, 5.0),
            DVec2::new(2.0, 5.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(-0.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 5.0),
        ]);
        list.sort_for_sweep();

        let marks: Vec<Option<SiteId>> = list.sites().iter().map(|s| s.coincident_with()).collect();
        assert_eq!(marks, vec![None, Some(0), None, None, Some(3), Some(3)]);
        assert!(!list.get(3).is_duplicate());
        assert_eq!(list.get(3).input_index(), 0);
        assert!(list.get(5).is_duplicate());
    }

    #[test]
    fn test_cursor_is_finite_and_restartable() {
        let mut list = SiteList::from_points(&[DVec2::new(0.0, 1.0), DVec2::new(0.0, 0.0)]);
        assert_eq!(list.next(), Some(0));
        assert_eq!(list.next(), Some(1));
        assert_eq!(list.next(), None);
        assert_eq!(list.next(), None);

        list.reset();
        assert_eq!(list.next(), Some(0));
        assert_eq!(list.coord(0), DVec2::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds() {
        let list = SiteList::from_points(&[
            DVec2::new(2.0, -1.0),
            DVec2::new(-3.0, 4.0),
            DVec2::new(0.0, 0.0),
        ]);
        let bounds = list.bounds();
        assert_eq!(bounds.min, DVec2::new(-3.0, -1.0));
        assert_eq!(bounds.max, DVec2::new(2.0, 4.0));

        assert_eq!(SiteList::new().bounds().area(), 0.0);
    }
}
