//! Explicit pipeline configuration. Every knob the run depends on lives
//! here and is validated up front, before any I/O happens.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// An sRGB color, stored as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Parse `"#rrggbb"` or `"rrggbb"`.
    pub fn from_hex(s: &str) -> Result<Self, PipelineError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PipelineError::InvalidArgument(format!(
                "bad color {s:?}: expected 6 hex digits"
            )));
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
        Ok(Rgb([byte(0), byte(2), byte(4)]))
    }
}

/// Default qualitative palette: ten category colors plus a neutral gray for
/// the `"*Other"` bucket, matching the default top-K of 10.
pub fn default_palette() -> Vec<Rgb> {
    [
        [0x1f, 0x77, 0xb4],
        [0xff, 0x7f, 0x0e],
        [0x2c, 0xa0, 0x2c],
        [0xd6, 0x27, 0x28],
        [0x94, 0x67, 0xbd],
        [0x8c, 0x56, 0x4b],
        [0xe3, 0x77, 0xc2],
        [0xbc, 0xbd, 0x22],
        [0x17, 0xbe, 0xcf],
        [0xaa, 0x40, 0x99],
        [0x7f, 0x7f, 0x7f], // *Other
    ]
    .into_iter()
    .map(Rgb)
    .collect()
}

/// All inputs of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// GeoJSON dataset to load.
    pub input_path: PathBuf,
    /// Name of the string attribute driving classification.
    pub field: String,
    /// Number of raw values kept before everything else folds into
    /// `"*Other"`.
    pub top_k: usize,
    /// Directory receiving `map.png` and `column.png` (overwritten).
    pub output_dir: PathBuf,
    /// Category colors in rank order; needs at least `top_k + 1` entries so
    /// the overflow bucket has its own color.
    pub palette: Vec<Rgb>,
}

impl PipelineConfig {
    /// Build a validated configuration. An empty palette selects the
    /// default one.
    pub fn new(
        input_path: impl Into<PathBuf>,
        field: impl Into<String>,
        top_k: usize,
        output_dir: impl Into<PathBuf>,
        palette: Vec<Rgb>,
    ) -> Result<Self, PipelineError> {
        let cfg = Self {
            input_path: input_path.into(),
            field: field.into(),
            top_k,
            output_dir: output_dir.into(),
            palette: if palette.is_empty() { default_palette() } else { palette },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.top_k == 0 {
            return Err(PipelineError::InvalidArgument("top-k must be at least 1".into()));
        }
        if self.field.is_empty() {
            return Err(PipelineError::InvalidArgument("attribute field name is empty".into()));
        }
        if self.palette.len() < self.top_k + 1 {
            return Err(PipelineError::InvalidArgument(format!(
                "palette has {} colors but top-k {} needs at least {}",
                self.palette.len(),
                self.top_k,
                self.top_k + 1
            )));
        }
        Ok(())
    }

    /// Color for the i-th ranked kept category; the last palette entry is
    /// reserved for `"*Other"`.
    pub fn category_color(&self, rank: usize) -> Rgb {
        self.palette[rank.min(self.palette.len() - 2)]
    }

    pub fn other_color(&self) -> Rgb {
        *self.palette.last().expect("validated palette is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_leading_hash() {
        assert_eq!(Rgb::from_hex("#1f77b4").unwrap(), Rgb([0x1f, 0x77, 0xb4]));
        assert_eq!(Rgb::from_hex("ffffff").unwrap(), Rgb([255, 255, 255]));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("zzzzzz").is_err());
    }

    #[test]
    fn default_palette_covers_default_top_k() {
        let cfg = PipelineConfig::new("in.geojson", "lang", 10, "out", Vec::new()).unwrap();
        assert_eq!(cfg.palette.len(), 11);
    }

    #[test]
    fn short_palette_is_rejected() {
        let palette = vec![Rgb([0, 0, 0]); 5];
        let err = PipelineConfig::new("in.geojson", "lang", 5, "out", palette).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    #[test]
    fn zero_k_and_empty_field_are_rejected() {
        assert!(PipelineConfig::new("in", "lang", 0, "out", Vec::new()).is_err());
        assert!(PipelineConfig::new("in", "", 3, "out", Vec::new()).is_err());
    }
}
