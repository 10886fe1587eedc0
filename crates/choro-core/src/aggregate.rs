//! Per-label count table, ordered for the ranked column chart.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::feature::Feature;
use crate::reduce::rank_by_frequency;

/// One row of the aggregated table: a `category_label` value (possibly
/// `"*Other"`) and the number of features carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Group features by `category_label` and count members, returning rows
/// sorted by descending count with ties broken by first appearance, the
/// same rule the reducer uses for raw values.
///
/// The sum of all counts equals the input length. Any feature without a
/// label means the reducer was never run; that is rejected rather than
/// silently bucketed.
pub fn aggregate(features: &[Feature]) -> Result<Vec<CategoryCount>, PipelineError> {
    let mut labels = Vec::with_capacity(features.len());
    for feature in features {
        match feature.category_label.as_deref() {
            Some(label) => labels.push(label),
            None => {
                return Err(PipelineError::InvalidArgument(
                    "cannot aggregate unlabeled features; run reduce first".into(),
                ))
            }
        }
    }

    Ok(rank_by_frequency(labels.into_iter())
        .into_iter()
        .map(|(label, count)| CategoryCount { label: label.to_string(), count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Geometry;
    use crate::reduce::reduce;

    fn feat(raw: Option<&str>) -> Feature {
        Feature::new(Geometry::default(), raw.map(str::to_string))
    }

    #[test]
    fn worked_example_aggregates_in_rank_order() {
        let mut fs = vec![feat(Some("EN")), feat(Some("EN")), feat(Some("FR")), feat(Some("ES"))];
        reduce(&mut fs, 1).unwrap();
        let table = aggregate(&fs).unwrap();
        assert_eq!(
            table,
            vec![
                CategoryCount { label: "EN".into(), count: 2 },
                CategoryCount { label: "*Other".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn counts_sum_to_collection_size() {
        let mut fs = vec![
            feat(Some("EN")),
            feat(Some("FR")),
            feat(Some("FR")),
            feat(None),
            feat(Some("ES")),
        ];
        reduce(&mut fs, 2).unwrap();
        let table = aggregate(&fs).unwrap();
        assert_eq!(table.iter().map(|c| c.count).sum::<usize>(), fs.len());
    }

    #[test]
    fn at_most_k_plus_one_labels() {
        let mut fs: Vec<Feature> = (0..30)
            .map(|i| Feature::new(Geometry::default(), Some(format!("L{}", i % 13))))
            .collect();
        reduce(&mut fs, 5).unwrap();
        let table = aggregate(&fs).unwrap();
        assert!(table.len() <= 6);
    }

    #[test]
    fn empty_collection_aggregates_to_empty_table() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn unlabeled_features_are_rejected() {
        let fs = vec![feat(Some("EN"))];
        assert!(matches!(aggregate(&fs), Err(PipelineError::InvalidArgument(_))));
    }
}
