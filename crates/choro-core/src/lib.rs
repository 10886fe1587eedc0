//! Categorical choropleth pipeline core.
//!
//! Loads a GeoJSON feature collection, classifies features by a string
//! attribute reduced to the top-K most frequent values plus an `"*Other"`
//! overflow bucket, and aggregates per-label counts for chart rendering.
//!
//! Pipeline:
//!   load → reduce (top-K relabeling) → aggregate (ranked count table)
//!
//! The core is pure and synchronous: file I/O is confined to [`load`], and
//! PNG rendering lives in the `render` tool, not here.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod feature;
pub mod load;
pub mod pipeline;
pub mod reduce;

pub use aggregate::{aggregate, CategoryCount};
pub use config::{PipelineConfig, Rgb};
pub use error::PipelineError;
pub use feature::{Feature, FeatureCollection, Geometry};
pub use reduce::{reduce, Reduction, OTHER_LABEL};
