//! Similarity ranking post-processing.
//!
//! The ranker's output originates from a text-generation call, so it is
//! treated as untrusted: indices are range-checked and deduplicated, and
//! every candidate the ranker left out is appended in its original
//! relative order. The output always contains exactly the input
//! candidates. A failed ranking call degrades to the original order.

use crate::traits::Ranker;
use crate::types::{ProductRecord, SimilarProduct};

/// Extract the first JSON array of integers from free-form model output.
///
/// Returns `None` when no well-formed array is present. Negative values
/// are dropped individually, like any other out-of-range index; they do
/// not make the array malformed.
pub fn parse_index_array(text: &str) -> Option<Vec<usize>> {
    let start = text.find('[')?;
    let end = text[start..].find(']')? + start;
    let candidate = &text[start..=end];

    let values: Vec<i64> = serde_json::from_str(candidate).ok()?;
    Some(
        values
            .into_iter()
            .filter_map(|v| usize::try_from(v).ok())
            .collect(),
    )
}

/// Reorder `candidates` by the given 1-based indices.
///
/// Out-of-range and duplicate indices are dropped. Candidates not
/// referenced by any surviving index are appended at the end in their
/// original relative order, so the output length always equals the
/// input length.
pub fn apply_ranking(candidates: Vec<SimilarProduct>, indices: &[usize]) -> Vec<SimilarProduct> {
    let n = candidates.len();
    let mut referenced = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for &index in indices {
        if index < 1 || index > n {
            tracing::debug!(index, candidates = n, "Dropping out-of-range rank index");
            continue;
        }
        let position = index - 1;
        if referenced[position] {
            tracing::debug!(index, "Dropping duplicate rank index");
            continue;
        }
        referenced[position] = true;
        order.push(position);
    }

    // Unreferenced candidates keep their original relative order.
    order.extend((0..n).filter(|&i| !referenced[i]));

    let mut slots: Vec<Option<SimilarProduct>> = candidates.into_iter().map(Some).collect();
    order
        .into_iter()
        .map(|i| slots[i].take().expect("each slot taken exactly once"))
        .collect()
}

/// Rank `candidates` against `anchor` with an optional ranker.
///
/// With no ranker configured, or when the ranking call fails, the
/// candidates come back in their original order.
pub async fn rank_candidates(
    ranker: Option<&dyn Ranker>,
    anchor: &ProductRecord,
    candidates: Vec<SimilarProduct>,
) -> Vec<SimilarProduct> {
    let Some(ranker) = ranker else {
        return candidates;
    };
    if candidates.is_empty() {
        return candidates;
    }

    match ranker.rank(anchor, &candidates).await {
        Ok(indices) => apply_ranking(candidates, &indices),
        Err(e) => {
            tracing::warn!(
                anchor = %anchor.name,
                error = %e,
                "Ranking failed, keeping extraction order"
            );
            candidates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(name: &str) -> SimilarProduct {
        SimilarProduct {
            product: ProductRecord {
                name: name.to_string(),
                brand: "Acme".to_string(),
                description: "d".to_string(),
                price: 10.0,
            },
            link: format!("https://example.com/{}", name),
            on_sale: false,
            sale_price: None,
        }
    }

    fn names(products: &[SimilarProduct]) -> Vec<&str> {
        products.iter().map(|p| p.product.name.as_str()).collect()
    }

    #[test]
    fn test_parse_index_array() {
        assert_eq!(parse_index_array("[3, 1, 2]"), Some(vec![3, 1, 2]));
        assert_eq!(
            parse_index_array("Ranked by similarity: [2,1]. Hope that helps!"),
            Some(vec![2, 1])
        );
        assert_eq!(parse_index_array("no array here"), None);
        assert_eq!(parse_index_array("[1, \"two\"]"), None);
        assert_eq!(parse_index_array("[]"), Some(vec![]));
    }

    #[test]
    fn test_negative_indices_dropped_individually() {
        // A negative value is just another out-of-range index: the
        // valid ones around it still apply.
        assert_eq!(parse_index_array("[-1, 2, 1]"), Some(vec![2, 1]));

        let input = vec![candidate("a"), candidate("b"), candidate("c")];
        let indices = parse_index_array("[-1, 2, 1]").unwrap();
        let output = apply_ranking(input, &indices);
        assert_eq!(names(&output), ["b", "a", "c"]);
    }

    #[test]
    fn test_full_permutation() {
        let input = vec![candidate("a"), candidate("b"), candidate("c")];
        let output = apply_ranking(input, &[3, 1, 2]);
        assert_eq!(names(&output), ["c", "a", "b"]);
    }

    #[test]
    fn test_partial_ranking_appends_rest() {
        // [3, 1] over [A, B, C]: C, A, then B appended unreferenced.
        let input = vec![candidate("a"), candidate("b"), candidate("c")];
        let output = apply_ranking(input, &[3, 1]);
        assert_eq!(names(&output), ["c", "a", "b"]);
    }

    #[test]
    fn test_out_of_range_dropped() {
        // [5, 1] over [A, B]: 5 invalid, A first, B appended.
        let input = vec![candidate("a"), candidate("b")];
        let output = apply_ranking(input, &[5, 1]);
        assert_eq!(names(&output), ["a", "b"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let input = vec![candidate("a"), candidate("b"), candidate("c")];
        let output = apply_ranking(input, &[2, 2, 2, 1]);
        assert_eq!(names(&output), ["b", "a", "c"]);
    }

    #[test]
    fn test_zero_index_dropped() {
        let input = vec![candidate("a"), candidate("b")];
        let output = apply_ranking(input, &[0, 2]);
        assert_eq!(names(&output), ["b", "a"]);
    }

    #[test]
    fn test_empty_candidates() {
        let output = apply_ranking(vec![], &[1, 2, 3]);
        assert!(output.is_empty());
    }

    proptest! {
        /// Completeness: for any candidate list and any ranker output,
        /// the reordered list is a permutation of the input.
        #[test]
        fn prop_ranking_completeness(
            n in 0usize..12,
            indices in proptest::collection::vec(0usize..20, 0..30),
        ) {
            let input: Vec<SimilarProduct> =
                (0..n).map(|i| candidate(&format!("p{}", i))).collect();

            let output = apply_ranking(input.clone(), &indices);

            prop_assert_eq!(output.len(), n);
            let mut in_names: Vec<_> = names(&input);
            let mut out_names: Vec<_> = names(&output);
            in_names.sort_unstable();
            out_names.sort_unstable();
            prop_assert_eq!(in_names, out_names);
        }
    }
}
