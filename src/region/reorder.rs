//! Edge reordering
//!
//! Threads an unordered bag of edges into one chain in which consecutive edges
//! share an endpoint, recording for each edge which end attaches to its
//! predecessor.

use std::collections::VecDeque;

use tracing::warn;

use crate::edge::{Edge, EdgeId};
use crate::site::Side;

/// What "sharing an endpoint" means for two edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Edges meet at a Voronoi vertex; unresolved ends match each other
    Vertex,
    /// Edges meet at a site, as consecutive Delaunay edges on the hull do
    Site,
}

fn endpoint(edge: &Edge, side: Side, criterion: Criterion) -> Option<usize> {
    match criterion {
        Criterion::Vertex => edge.vertex(side),
        Criterion::Site => Some(edge.site(side)),
    }
}

/// Order `ids` into a chain of edges sharing endpoints
///
/// The first edge keeps its position and [`Side::Left`] orientation; every
/// other edge is attached to whichever free end of the chain it matches. An
/// orientation of `Left` means the edge is walked from its left end to its
/// right end. Fragments that cannot be attached are appended in input order.
///
/// # Arguments
///
/// * `ids` - Edges to order
/// * `edges` - Edge arena the handles point into
/// * `criterion` - Whether edges meet at vertices or at sites
///
/// # Returns
///
/// The reordered handles and a parallel orientation per edge
pub fn reorder_edges(
    ids: &[EdgeId],
    edges: &[Edge],
    criterion: Criterion,
) -> (Vec<EdgeId>, Vec<Side>) {
    let n = ids.len();
    if n <= 1 {
        return (ids.to_vec(), vec![Side::Left; n]);
    }

    let mut done = vec![false; n];
    let mut chain: VecDeque<(EdgeId, Side)> = VecDeque::with_capacity(n);

    let head = &edges[ids[0]];
    chain.push_back((ids[0], Side::Left));
    done[0] = true;
    let mut first = endpoint(head, Side::Left, criterion);
    let mut last = endpoint(head, Side::Right, criterion);
    let mut remaining = n - 1;

    while remaining > 0 {
        let mut progressed = false;

        for i in 1..n {
            if done[i] {
                continue;
            }
            let edge = &edges[ids[i]];
            let left = endpoint(edge, Side::Left, criterion);
            let right = endpoint(edge, Side::Right, criterion);

            if left == last {
                chain.push_back((ids[i], Side::Left));
                last = right;
            } else if right == first {
                chain.push_front((ids[i], Side::Left));
                first = left;
            } else if left == first {
                chain.push_front((ids[i], Side::Right));
                first = right;
            } else if right == last {
                chain.push_back((ids[i], Side::Right));
                last = left;
            } else {
                continue;
            }

            done[i] = true;
            remaining -= 1;
            progressed = true;
        }

        if !progressed {
            // Disconnected fragment: restart the free end at the next edge
            let Some(i) = (1..n).find(|&i| !done[i]) else {
                break;
            };
            warn!(
                edge = ids[i],
                remaining, "edges do not form one chain, appending fragment"
            );
            chain.push_back((ids[i], Side::Left));
            last = endpoint(&edges[ids[i]], Side::Right, criterion);
            done[i] = true;
            remaining -= 1;
        }
    }

    chain.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteList;
    use glam::DVec2;

    fn sites() -> SiteList {
        SiteList::from_points(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(10.0, 10.0),
        ])
    }

    fn edge(sites: &SiteList, l: usize, r: usize, vl: Option<usize>, vr: Option<usize>) -> Edge {
        let mut edge = Edge::bisector(sites, l, r);
        if let Some(v) = vl {
            edge.set_vertex(Side::Left, v);
        }
        if let Some(v) = vr {
            edge.set_vertex(Side::Right, v);
        }
        edge
    }

    #[test]
    fn test_trivial_inputs_unchanged() {
        let list = sites();
        let edges = vec![edge(&list, 0, 1, Some(0), Some(1))];

        let (ids, sides) = reorder_edges(&[], &edges, Criterion::Vertex);
        assert!(ids.is_empty() && sides.is_empty());

        let (ids, sides) = reorder_edges(&[0], &edges, Criterion::Vertex);
        assert_eq!(ids, vec![0]);
        assert_eq!(sides, vec![Side::Left]);
    }

    #[test]
    fn test_closed_cycle_by_vertex() {
        let list = sites();
        let edges = vec![
            edge(&list, 0, 1, Some(0), Some(1)),
            edge(&list, 0, 2, Some(2), Some(0)),
            edge(&list, 0, 3, Some(2), Some(1)),
        ];

        let (ids, sides) = reorder_edges(&[0, 2, 1], &edges, Criterion::Vertex);
        assert_eq!(ids, vec![0, 2, 1]);
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);

        // Consecutive edges share the end they were oriented on
        for k in 0..ids.len() {
            let here = &edges[ids[k]];
            let next = &edges[ids[(k + 1) % ids.len()]];
            assert_eq!(
                here.vertex(sides[k].other()),
                next.vertex(sides[(k + 1) % ids.len()])
            );
        }
    }

    #[test]
    fn test_chain_grows_at_both_ends() {
        let list = sites();
        // 3 -[e0]- 4 with e1 attaching before and e2 after
        let edges = vec![
            edge(&list, 0, 1, Some(3), Some(4)),
            edge(&list, 0, 2, Some(3), Some(2)),
            edge(&list, 0, 3, Some(5), Some(4)),
        ];

        let (ids, sides) = reorder_edges(&[0, 1, 2], &edges, Criterion::Vertex);
        assert_eq!(ids, vec![1, 0, 2]);
        assert_eq!(sides, vec![Side::Right, Side::Left, Side::Right]);
    }

    #[test]
    fn test_hull_chain_by_site() {
        let list = sites();
        let edges = vec![
            edge(&list, 0, 1, None, Some(0)),
            edge(&list, 3, 2, None, Some(0)),
            edge(&list, 1, 3, None, Some(0)),
        ];

        let (ids, sides) = reorder_edges(&[0, 1, 2], &edges, Criterion::Site);
        assert_eq!(ids, vec![0, 2, 1]);
        assert_eq!(sides, vec![Side::Left, Side::Left, Side::Left]);
    }

    #[test]
    fn test_disconnected_fragments_are_appended() {
        let list = sites();
        let edges = vec![
            edge(&list, 0, 1, Some(0), Some(1)),
            edge(&list, 0, 2, Some(7), Some(8)),
            edge(&list, 0, 3, Some(8), Some(9)),
        ];

        let (ids, sides) = reorder_edges(&[0, 1, 2], &edges, Criterion::Vertex);
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(sides, vec![Side::Left, Side::Left, Side::Left]);
    }
}
