//! VoronoiDiagram main structure

use std::collections::HashMap;

use glam::DVec2;

use crate::cell::VoronoiCell;
use crate::config::{DiagramConfig, DiagramConfigBuilder};
use crate::edge::{Edge, EdgeId, Vertex};
use crate::error::{Result, VoronoiError};
use crate::generation::{fortunes_algorithm, lloyd_relaxation_with_options, LloydOptions, LloydStats};
use crate::geom::{Circle, LineSegment, Rect};
use crate::region::{compute_region, reorder_edges, Criterion, SiteRegion};
use crate::site::{Site, SiteId, SiteList};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Hashable identity of a coordinate; `-0.0` and `0.0` are the same key
type CoordKey = (u64, u64);

fn coord_key(p: DVec2) -> CoordKey {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// The Voronoi diagram of a point set, clipped to a rectangle
///
/// Owns the sites, edges and vertices produced by one sweep. Site handles
/// ([`SiteId`]) are positions in sweep order; [`Site::input_index`] maps them
/// back to the caller's points. Per-site regions are computed on first use
/// and cached.
///
/// # Examples
///
/// ```
/// use fortune_voronoi::*;
///
/// let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let points = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
/// let diagram = VoronoiDiagram::new(&points, bounds).unwrap();
///
/// let segments = diagram.voronoi_diagram();
/// assert_eq!(segments.len(), 1);
///
/// let left = diagram.region(DVec2::new(0.0, 0.0));
/// assert_eq!(left.len(), 4);
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram {
    /// Configuration used to build this diagram
    config: DiagramConfig,

    /// All sites, in sweep order
    sites: SiteList,

    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
    triangles: Vec<[SiteId; 3]>,

    /// Input index to site handle
    by_input: Vec<SiteId>,

    /// Site coordinate to site handle; duplicates resolve to the first input
    lookup: HashMap<CoordKey, SiteId>,

    /// What the relaxation before this build did
    lloyd_stats: LloydStats,

    /// Spatial index for fast position-to-site lookups (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl VoronoiDiagram {
    /// Build the diagram of `points` clipped to `bounds`
    ///
    /// # Arguments
    ///
    /// * `points` - Site coordinates; duplicates are allowed
    /// * `bounds` - Clipping rectangle, must contain every point
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a degenerate rectangle or a point outside it,
    /// `NonFiniteSite` for a point with a NaN or infinite coordinate
    ///
    /// # Example
    ///
    /// ```
    /// use fortune_voronoi::*;
    ///
    /// let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let points = random_points(50, &bounds, 42);
    /// let diagram = VoronoiDiagram::new(&points, bounds).unwrap();
    /// assert_eq!(diagram.site_count(), 50);
    /// ```
    pub fn new(points: &[DVec2], bounds: Rect) -> Result<Self> {
        let config = DiagramConfigBuilder::new().bounds(bounds)?.build()?;
        Self::with_config(points, config)
    }

    /// Build the diagram with a full configuration, relaxing the points first
    /// when `config.lloyd_iterations > 0`
    ///
    /// # Example
    ///
    /// ```
    /// use fortune_voronoi::*;
    ///
    /// let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let config = DiagramConfigBuilder::new()
    ///     .bounds(bounds)
    ///     .unwrap()
    ///     .lloyd_iterations(3)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let points = random_points(50, &bounds, 42);
    /// let diagram = VoronoiDiagram::with_config(&points, config).unwrap();
    /// assert_eq!(diagram.lloyd_stats().iterations_run, 3);
    /// ```
    pub fn with_config(points: &[DVec2], config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        validate_points(points, &config.bounds)?;

        let (points, lloyd_stats) = if config.lloyd_iterations > 0 {
            lloyd_relaxation_with_options(points.to_vec(), &config.bounds, config.lloyd_options())
        } else {
            (points.to_vec(), LloydStats::default())
        };

        Ok(Self::build(&points, config, lloyd_stats))
    }

    fn build(points: &[DVec2], config: DiagramConfig, lloyd_stats: LloydStats) -> Self {
        let mut sites = SiteList::from_points(points);
        let output = fortunes_algorithm(&mut sites, &config.bounds);

        let mut by_input = vec![0; sites.len()];
        let mut lookup = HashMap::with_capacity(sites.len());
        for site in sites.sites() {
            by_input[site.input_index()] = site.index();
            if !site.is_duplicate() {
                lookup.insert(coord_key(site.coord()), site.index());
            }
        }

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&sites.coords());

        Self {
            config,
            sites,
            edges: output.edges,
            vertices: output.vertices,
            triangles: output.triangles,
            by_input,
            lookup,
            lloyd_stats,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// A new diagram built from the region centroids of this one
    ///
    /// Runs Lloyd's relaxation starting at the current sites; the result keeps
    /// the input order of the points.
    pub fn relaxed(&self, options: LloydOptions) -> VoronoiDiagram {
        let (points, stats) =
            lloyd_relaxation_with_options(self.site_coords(), &self.config.bounds, options);
        Self::build(&points, self.config, stats)
    }

    /// Get the configuration used to build this diagram
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.config.bounds
    }

    /// Statistics of the relaxation run before this build (empty if none ran)
    #[inline]
    pub fn lloyd_stats(&self) -> &LloydStats {
        &self.lloyd_stats
    }

    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// All sites, in sweep order
    #[inline]
    pub fn sites(&self) -> &[Site] {
        self.sites.sites()
    }

    /// Returns `None` if the site ID is out of bounds
    #[inline]
    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.sites().get(id)
    }

    /// Handle of the site built from the `index`-th input point
    #[inline]
    pub fn site_for_input(&self, index: usize) -> Option<SiteId> {
        self.by_input.get(index).copied()
    }

    /// Handle of the site at exactly `coord`, if any
    #[inline]
    pub fn site_at(&self, coord: DVec2) -> Option<SiteId> {
        self.lookup.get(&coord_key(coord)).copied()
    }

    /// Site coordinates in the caller's input order
    pub fn site_coords(&self) -> Vec<DVec2> {
        self.by_input.iter().map(|&id| self.sites.coord(id)).collect()
    }

    /// Every edge, visible or not
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Every vertex, indexed by ordinal
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Ordered edges and clipped polygon of a site, computed on first use
    pub fn site_region(&self, id: SiteId) -> Option<&SiteRegion> {
        let site = self.site(id)?;
        Some(
            site.region
                .get_or_init(|| compute_region(site, &self.edges, &self.config.bounds)),
        )
    }

    /// Counter-clockwise region polygon of a site
    ///
    /// Returns empty slice if site ID is invalid or no edge of the site is
    /// visible.
    pub fn region_of(&self, id: SiteId) -> &[DVec2] {
        self.site_region(id)
            .map(|region| region.polygon())
            .unwrap_or(&[])
    }

    /// Region polygon of the site at `coord`; empty when there is none
    pub fn region(&self, coord: DVec2) -> Vec<DVec2> {
        self.site_at(coord)
            .map(|id| self.region_of(id).to_vec())
            .unwrap_or_default()
    }

    /// Region polygons of every site, in the caller's input order
    pub fn regions(&self) -> Vec<Vec<DVec2>> {
        self.by_input
            .iter()
            .map(|&id| self.region_of(id).to_vec())
            .collect()
    }

    /// Sites whose regions share an edge with `id`, in order around the site
    ///
    /// Returns empty vec if site ID is invalid.
    pub fn neighbor_sites(&self, id: SiteId) -> Vec<SiteId> {
        let Some(region) = self.site_region(id) else {
            return Vec::new();
        };
        region
            .edges()
            .iter()
            .filter_map(|&edge| self.edges[edge].other_site(id))
            .collect()
    }

    /// Coordinates of the neighbours of the site at `coord`
    pub fn neighbor_site_coords(&self, coord: DVec2) -> Vec<DVec2> {
        self.site_at(coord)
            .map(|id| {
                self.neighbor_sites(id)
                    .into_iter()
                    .map(|n| self.sites.coord(n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The edge of the site at `coord` whose two sites are closest together
    pub fn nearest_edge(&self, coord: DVec2) -> Option<EdgeId> {
        let id = self.site_at(coord)?;
        self.nearest_edge_of(id)
    }

    fn nearest_edge_of(&self, id: SiteId) -> Option<EdgeId> {
        self.sites
            .get(id)
            .edges()
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let da = self.edges[a].sites_distance(&self.sites);
                let db = self.edges[b].sites_distance(&self.sites);
                da.total_cmp(&db)
            })
    }

    /// The edge separating two sites, if their regions are adjacent
    pub fn edge_between(&self, a: SiteId, b: SiteId) -> Option<EdgeId> {
        self.site(a)?
            .edges()
            .iter()
            .copied()
            .find(|&edge| self.edges[edge].other_site(a) == Some(b))
    }

    /// Visible segments of the edges around the site at `coord`
    pub fn voronoi_boundary_for_site(&self, coord: DVec2) -> Vec<LineSegment> {
        let Some(id) = self.site_at(coord) else {
            return Vec::new();
        };
        self.sites
            .get(id)
            .edges()
            .iter()
            .filter_map(|&edge| self.edges[edge].voronoi_segment())
            .collect()
    }

    /// Visible segments of every edge
    pub fn voronoi_diagram(&self) -> Vec<LineSegment> {
        self.edges
            .iter()
            .filter_map(|edge| edge.voronoi_segment())
            .collect()
    }

    /// Delaunay edges: one segment between the two sites of every edge
    pub fn delaunay_lines(&self) -> Vec<LineSegment> {
        self.edges
            .iter()
            .map(|edge| edge.delaunay_line(&self.sites))
            .collect()
    }

    /// Delaunay triangles as site triples, one per vertex
    #[inline]
    pub fn delaunay_triangles(&self) -> &[[SiteId; 3]] {
        &self.triangles
    }

    /// Edges with an unresolved end; their sites lie on the convex hull
    pub fn hull_edges(&self) -> Vec<EdgeId> {
        (0..self.edges.len())
            .filter(|&id| self.edges[id].is_part_of_convex_hull())
            .collect()
    }

    /// Delaunay segments along the convex hull
    pub fn hull(&self) -> Vec<LineSegment> {
        self.hull_edges()
            .into_iter()
            .map(|id| self.edges[id].delaunay_line(&self.sites))
            .collect()
    }

    /// Convex hull sites, in order around the hull
    pub fn hull_points_in_order(&self) -> Vec<DVec2> {
        let (edges, orientations) = reorder_edges(&self.hull_edges(), &self.edges, Criterion::Site);
        edges
            .iter()
            .zip(&orientations)
            .map(|(&edge, &side)| self.sites.coord(self.edges[edge].site(side)))
            .collect()
    }

    /// Largest empty circle around each site, in sweep order
    ///
    /// The radius is half the distance to the nearest neighbouring site, or
    /// zero when that neighbour is across a hull edge.
    pub fn circles(&self) -> Vec<Circle> {
        self.sites
            .sites()
            .iter()
            .map(|site| {
                let radius = match self.nearest_edge_of(site.index()) {
                    Some(edge) if !self.edges[edge].is_part_of_convex_hull() => {
                        self.edges[edge].sites_distance(&self.sites) * 0.5
                    }
                    _ => 0.0,
                };
                Circle::new(site.coord(), radius)
            })
            .collect()
    }

    /// Owned snapshot of the cell built from the `id`-th input point
    ///
    /// Returns `None` if the cell ID is out of bounds.
    pub fn get_cell(&self, id: usize) -> Option<VoronoiCell> {
        let site = self.site_for_input(id)?;
        let mut neighbors: Vec<usize> = self
            .neighbor_sites(site)
            .into_iter()
            .map(|n| self.sites.get(n).input_index())
            .collect();
        neighbors.dedup();

        Some(VoronoiCell::new(
            id,
            self.sites.coord(site),
            neighbors,
            self.region_of(site).to_vec(),
        ))
    }

    /// Owned snapshots of every cell, indexed by input position
    pub fn cells(&self) -> Vec<VoronoiCell> {
        (0..self.by_input.len())
            .filter_map(|id| self.get_cell(id))
            .collect()
    }

    /// Find the site whose region contains a position (requires spatial-index feature)
    ///
    /// Uses KD-tree spatial index for O(log n) nearest-neighbor lookup.
    ///
    /// # Returns
    ///
    /// Handle of the nearest site, `None` for an empty diagram
    ///
    /// # Example
    ///
    /// ```
    /// # use fortune_voronoi::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// let points = vec![DVec2::new(2.0, 2.0), DVec2::new(8.0, 8.0)];
    /// let diagram = VoronoiDiagram::new(&points, bounds).unwrap();
    ///
    /// let id = diagram.find_site_at(DVec2::new(9.0, 6.0)).unwrap();
    /// assert_eq!(diagram.sites()[id].coord(), DVec2::new(8.0, 8.0));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_site_at(&self, position: DVec2) -> Option<SiteId> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
            .map(|id| self.sites.get(id).coincident_with().unwrap_or(id))
    }
}

fn validate_points(points: &[DVec2], bounds: &Rect) -> Result<()> {
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(VoronoiError::NonFiniteSite(i));
        }
        if !bounds.contains(*p) {
            return Err(VoronoiError::InvalidConfig(format!(
                "Site {} at ({}, {}) lies outside the bounds",
                i, p.x, p.y
            )));
        }
    }
    Ok(())
}
