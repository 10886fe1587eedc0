//! Category reducer: maps the raw categorical attribute onto a bounded
//! label set of at most K kept values plus the `"*Other"` overflow bucket.
//!
//! Ranking is by descending frequency; ties break by first appearance in
//! the input collection. Missing/null raw values never participate in the
//! ranking and always map to `"*Other"`.

use std::collections::HashMap;

use crate::error::PipelineError;
use crate::feature::Feature;

/// Sentinel label for every feature whose raw value did not rank top-K.
pub const OTHER_LABEL: &str = "*Other";

/// Outcome of a reduction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    /// Kept raw values, most frequent first.
    pub kept: Vec<String>,
    /// Number of features relabeled to [`OTHER_LABEL`].
    pub other_count: usize,
}

/// Rank distinct non-null raw values by descending count, ties broken by
/// first-seen index. Shared with the aggregator so both stages order
/// identically.
pub(crate) fn rank_by_frequency<'a, I>(values: I) -> Vec<(&'a str, usize)>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.enumerate() {
        let entry = counts.entry(value).or_insert((0, idx));
        entry.0 += 1;
    }
    let mut ranked: Vec<(&str, usize, usize)> =
        counts.into_iter().map(|(v, (n, first))| (v, n, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().map(|(v, n, _)| (v, n)).collect()
}

/// Assign `category_label` to every feature: the raw value if it ranks in
/// the top `k` by frequency, otherwise [`OTHER_LABEL`].
///
/// Pure relabeling over the in-memory slice; recomputes from `category_raw`
/// each time, so re-running with the same `k` is a no-op. An empty slice is
/// not an error. `k == 0` is rejected before any mutation.
pub fn reduce(features: &mut [Feature], k: usize) -> Result<Reduction, PipelineError> {
    if k == 0 {
        return Err(PipelineError::InvalidArgument(
            "top-k must be at least 1".into(),
        ));
    }

    let ranked = rank_by_frequency(
        features
            .iter()
            .filter_map(|f| f.category_raw.as_deref()),
    );
    let kept: Vec<String> = ranked.into_iter().take(k).map(|(v, _)| v.to_string()).collect();

    let mut other_count = 0;
    for feature in features.iter_mut() {
        let label = match feature.category_raw.as_deref() {
            Some(raw) if kept.iter().any(|kv| kv == raw) => raw.to_string(),
            _ => {
                other_count += 1;
                OTHER_LABEL.to_string()
            }
        };
        feature.category_label = Some(label);
    }

    Ok(Reduction { kept, other_count })
}
