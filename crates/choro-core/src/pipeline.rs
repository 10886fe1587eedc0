//! Run orchestration: load → reduce → aggregate.
//!
//! Rendering stays in the `render` tool; this module produces everything
//! the charts consume, including the shared label → color assignment so
//! the map and the column chart always agree.

use crate::aggregate::{aggregate, CategoryCount};
use crate::config::{PipelineConfig, Rgb};
use crate::error::PipelineError;
use crate::feature::FeatureCollection;
use crate::load::load_features;
use crate::reduce::{reduce, Reduction, OTHER_LABEL};

/// Everything one run produces, ready for presentation.
#[derive(Debug)]
pub struct PipelineRun {
    pub features: FeatureCollection,
    pub reduction: Reduction,
    pub table: Vec<CategoryCount>,
}

/// Execute the full classification pipeline for a validated configuration.
pub fn run(config: &PipelineConfig) -> Result<PipelineRun, PipelineError> {
    let mut features = load_features(&config.input_path, &config.field)?;
    let reduction = reduce(&mut features.features, config.top_k)?;
    let table = aggregate(&features.features)?;
    Ok(PipelineRun { features, reduction, table })
}

/// Color for a label: kept categories take their rank's palette slot,
/// `"*Other"` (and anything unknown) takes the reserved last color.
pub fn color_for_label(config: &PipelineConfig, reduction: &Reduction, label: &str) -> Rgb {
    if label == OTHER_LABEL {
        return config.other_color();
    }
    match reduction.kept.iter().position(|kv| kv == label) {
        Some(rank) => config.category_color(rank),
        None => config.other_color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"lang": "EN"}, "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
            {"type": "Feature", "properties": {"lang": "EN"}, "geometry": {"type": "Polygon", "coordinates": [[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 0.0]]]}},
            {"type": "Feature", "properties": {"lang": "FR"}, "geometry": {"type": "Polygon", "coordinates": [[[4.0, 0.0], [5.0, 0.0], [5.0, 1.0], [4.0, 0.0]]]}},
            {"type": "Feature", "properties": {"lang": "ES"}, "geometry": {"type": "Polygon", "coordinates": [[[6.0, 0.0], [7.0, 0.0], [7.0, 1.0], [6.0, 0.0]]]}}
        ]
    }"#;

    #[test]
    fn run_end_to_end_on_disk_dataset() {
        let path = std::env::temp_dir().join("choro_pipeline_run_test.geojson");
        std::fs::write(&path, DATASET).unwrap();

        let cfg = PipelineConfig::new(&path, "lang", 1, "out", Vec::new()).unwrap();
        let out = run(&cfg).unwrap();

        assert_eq!(out.reduction.kept, vec!["EN"]);
        assert_eq!(out.table.len(), 2);
        assert_eq!(out.table.iter().map(|c| c.count).sum::<usize>(), out.features.len());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn colors_follow_kept_rank_and_reserve_other() {
        let cfg = PipelineConfig::new("in.geojson", "lang", 2, "out", Vec::new()).unwrap();
        let red = Reduction { kept: vec!["EN".into(), "FR".into()], other_count: 3 };
        assert_eq!(color_for_label(&cfg, &red, "EN"), cfg.category_color(0));
        assert_eq!(color_for_label(&cfg, &red, "FR"), cfg.category_color(1));
        assert_eq!(color_for_label(&cfg, &red, OTHER_LABEL), cfg.other_color());
        assert_eq!(color_for_label(&cfg, &red, "ZZ"), cfg.other_color());
    }
}
