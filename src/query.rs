use std::collections::HashSet;

/// Returns all identifiers whose score is strictly below `threshold`
///
/// This is the usual way to derive a query set from per-identifier
/// p-values of an upstream test. `NaN` scores are never significant.
///
/// # Examples
///
/// ```
/// use setenrich::significant;
///
/// let scores = vec![
///     ("TP53".to_string(), 0.01),
///     ("BRCA1".to_string(), 0.05),
///     ("KRAS".to_string(), f64::NAN),
/// ];
/// let query = significant(scores, 0.05);
/// assert_eq!(query.len(), 1);
/// assert!(query.contains("TP53"));
/// ```
pub fn significant<I, S>(scores: I, threshold: f64) -> HashSet<String>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    scores
        .into_iter()
        .filter(|(_, score)| *score < threshold)
        .map(|(id, _)| id.into())
        .collect()
}
