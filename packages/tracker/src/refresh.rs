//! Refresh workflow: re-derive similar products for every catalog entry.
//!
//! Entries refresh independently; one failing entry never aborts the
//! rest. Failed entries are carried forward byte-for-byte (including
//! their timestamp), so the rebuilt catalog always has the same key set
//! as the input. The caller persists the result in a single save.

use crate::pipeline::ProductPipeline;
use crate::types::{Catalog, CatalogEntry};

/// Outcome tally of a refresh run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RefreshSummary {
    /// Total entries processed.
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Refresh every entry of `catalog`.
///
/// Returns the rebuilt catalog (same keys, same cardinality) and the
/// success/failure tally. An empty catalog is a no-op with a zero
/// summary. Per-entry failures are the expected steady state and are
/// reported only in the tally; this function itself never fails.
pub async fn refresh_catalog(
    pipeline: &ProductPipeline,
    catalog: Catalog,
) -> (Catalog, RefreshSummary) {
    let mut refreshed = Catalog::with_capacity(catalog.len());
    let mut summary = RefreshSummary::default();

    for (key, entry) in catalog {
        match pipeline.discover_similar(&entry.original_product).await {
            Ok(similar) => {
                tracing::info!(
                    url = %key,
                    product = %entry.original_product.name,
                    similar = similar.len(),
                    "Entry refreshed"
                );
                refreshed.insert(key, CatalogEntry::new(entry.original_product, similar));
                summary.succeeded += 1;
            }
            Err(e) => {
                tracing::warn!(
                    url = %key,
                    product = %entry.original_product.name,
                    error = %e,
                    "Refresh failed, keeping previous entry"
                );
                refreshed.insert(key, entry);
                summary.failed += 1;
            }
        }
    }

    (refreshed, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExtractor;
    use crate::types::{ProductRecord, SimilarProduct};
    use std::sync::Arc;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            brand: "Acme".to_string(),
            description: "d".to_string(),
            price: 10.0,
        }
    }

    fn candidate(name: &str) -> SimilarProduct {
        SimilarProduct {
            product: product(name),
            link: format!("https://example.com/{}", name),
            on_sale: false,
            sale_price: None,
        }
    }

    fn entry(name: &str, similar: Vec<SimilarProduct>) -> CatalogEntry {
        CatalogEntry::new(product(name), similar)
    }

    #[tokio::test]
    async fn test_empty_catalog_is_noop() {
        let pipeline = ProductPipeline::new(Arc::new(MockExtractor::new()));
        let (catalog, summary) = refresh_catalog(&pipeline, Catalog::new()).await;

        assert!(catalog.is_empty());
        assert_eq!(summary, RefreshSummary::default());
    }

    #[tokio::test]
    async fn test_refresh_replaces_similar_lists() {
        let extractor = MockExtractor::new()
            .with_similar("One", vec![candidate("fresh-1")])
            .with_similar("Two", vec![candidate("fresh-2a"), candidate("fresh-2b")]);
        let pipeline = ProductPipeline::new(Arc::new(extractor));

        let mut catalog = Catalog::new();
        catalog.insert("https://a.com/1".into(), entry("One", vec![candidate("stale")]));
        catalog.insert("https://a.com/2".into(), entry("Two", vec![]));

        let (refreshed, summary) = refresh_catalog(&pipeline, catalog).await;

        assert_eq!(summary, RefreshSummary { succeeded: 2, failed: 0 });
        assert_eq!(
            refreshed["https://a.com/1"].similar_products[0].product.name,
            "fresh-1"
        );
        assert_eq!(refreshed["https://a.com/2"].similar_products.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_entry_carried_forward_unchanged() {
        // "Bad" is unknown to the mock, so its discovery call fails.
        let extractor = MockExtractor::new().with_similar("Good", vec![candidate("fresh")]);
        let pipeline = ProductPipeline::new(Arc::new(extractor));

        let stale = entry("Bad", vec![candidate("stale")]);
        let mut catalog = Catalog::new();
        catalog.insert("https://a.com/good".into(), entry("Good", vec![]));
        catalog.insert("https://a.com/bad".into(), stale.clone());

        let (refreshed, summary) = refresh_catalog(&pipeline, catalog).await;

        assert_eq!(summary, RefreshSummary { succeeded: 1, failed: 1 });
        assert_eq!(refreshed.len(), 2);
        // Byte-for-byte carry-forward: not even the timestamp moves.
        assert_eq!(refreshed["https://a.com/bad"], stale);
    }

    #[tokio::test]
    async fn test_cardinality_preserved_when_everything_fails() {
        let pipeline = ProductPipeline::new(Arc::new(MockExtractor::new()));

        let mut catalog = Catalog::new();
        for i in 0..4 {
            catalog.insert(format!("https://a.com/{}", i), entry(&format!("P{}", i), vec![]));
        }
        let keys: Vec<_> = catalog.keys().cloned().collect();

        let (refreshed, summary) = refresh_catalog(&pipeline, catalog).await;

        assert_eq!(summary, RefreshSummary { succeeded: 0, failed: 4 });
        let refreshed_keys: Vec<_> = refreshed.keys().cloned().collect();
        assert_eq!(refreshed_keys, keys);
    }

    #[tokio::test]
    async fn test_single_entry_catalog_failure_tally() {
        // Catalog with one entry whose remote call fails: catalog
        // unchanged at that key, failed = 1, succeeded = 0.
        let pipeline = ProductPipeline::new(Arc::new(MockExtractor::new()));

        let original = entry("X", vec![candidate("y"), candidate("z")]);
        let mut catalog = Catalog::new();
        catalog.insert("https://a.com/p1".into(), original.clone());

        let (refreshed, summary) = refresh_catalog(&pipeline, catalog).await;

        assert_eq!(summary, RefreshSummary { succeeded: 0, failed: 1 });
        assert_eq!(refreshed["https://a.com/p1"], original);
    }
}
