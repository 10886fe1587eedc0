use serde::{Deserialize, Serialize};

/// A ring of (lon, lat) vertices. First ring of a polygon is the exterior;
/// any following rings are holes.
pub type Ring = Vec<(f64, f64)>;

/// Opaque vector shape. The core never interprets geometry beyond passing
/// rings through to the renderer and computing the collection bounding box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// One entry per polygon; multipolygons carry several.
    pub polygons: Vec<Vec<Ring>>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Iterate over every vertex of every ring.
    pub fn vertices(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.polygons
            .iter()
            .flat_map(|rings| rings.iter())
            .flat_map(|ring| ring.iter().copied())
    }
}

/// One geospatial record: a shape plus the categorical attribute driving
/// classification.
///
/// `category_raw` is the attribute as loaded (None when the source value is
/// missing or null). `category_label` is assigned by [`crate::reduce`] and
/// is either the raw value (if it ranked in the top-K) or `"*Other"`. The
/// two fields stay separate so that re-running the reducer recomputes from
/// the raw value and is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub category_raw: Option<String>,
    pub category_label: Option<String>,
}

impl Feature {
    pub fn new(geometry: Geometry, category_raw: Option<String>) -> Self {
        Self { geometry, category_raw, category_label: None }
    }
}

/// The loaded dataset. Loaded once, relabeled once by the reducer, then
/// read-only for aggregation and rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Lon/lat bounding box over all geometry vertices, as
    /// `(min_lon, max_lon, min_lat, max_lat)`. None if no feature carries
    /// any geometry.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (lon, lat) in self.features.iter().flat_map(|f| f.geometry.vertices()) {
            bounds = Some(match bounds {
                None => (lon, lon, lat, lat),
                Some((lo, hi, bo, to)) => (lo.min(lon), hi.max(lon), bo.min(lat), to.max(lat)),
            });
        }
        bounds
    }
}
