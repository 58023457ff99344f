//! Search pipeline: anchor extraction, candidate discovery, ranking.

use std::sync::Arc;

use crate::error::Result;
use crate::ranking::rank_candidates;
use crate::traits::{ProductExtractor, Ranker};
use crate::types::{CatalogEntry, ProductRecord, SimilarProduct};

/// Extractor plus optional ranker, wired once at startup.
///
/// Ranking availability is a capability of the pipeline, not a
/// credential check made per call: build with [`with_ranker`] when a
/// ranker is configured and the rest of the code stays branch-free.
///
/// [`with_ranker`]: ProductPipeline::with_ranker
pub struct ProductPipeline {
    extractor: Arc<dyn ProductExtractor>,
    ranker: Option<Arc<dyn Ranker>>,
}

impl ProductPipeline {
    /// Create a pipeline without ranking.
    pub fn new(extractor: Arc<dyn ProductExtractor>) -> Self {
        Self {
            extractor,
            ranker: None,
        }
    }

    /// Enable similarity ranking.
    pub fn with_ranker(mut self, ranker: Arc<dyn Ranker>) -> Self {
        self.ranker = Some(ranker);
        self
    }

    /// Whether ranking is enabled.
    pub fn ranking_enabled(&self) -> bool {
        self.ranker.is_some()
    }

    /// Run the full search flow for one product page URL.
    ///
    /// Extracts the anchor, discovers similar candidates, ranks them
    /// when a ranker is present, and returns a fresh entry. Ranking
    /// failures degrade to extraction order; extraction failures
    /// propagate.
    pub async fn search(&self, url: &str) -> Result<CatalogEntry> {
        let anchor = self.extractor.extract_product(url).await?;
        let similar = self.discover_similar(&anchor).await?;
        Ok(CatalogEntry::new(anchor, similar))
    }

    /// Re-derive the similar-product list for an existing anchor.
    ///
    /// The anchor itself is never re-fetched; only its derived list is
    /// refreshed. Used by both `search` and the refresh workflow.
    pub async fn discover_similar(
        &self,
        anchor: &ProductRecord,
    ) -> Result<Vec<SimilarProduct>> {
        let candidates = self.extractor.find_similar(anchor).await?;
        Ok(rank_candidates(self.ranker.as_deref(), anchor, candidates).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockExtractor, MockRanker};
    use crate::types::SimilarProduct;

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

    #[tokio::test]
    async fn test_search_builds_entry() {
        let extractor = MockExtractor::new()
            .with_product("https://a.com/p1", product("Anchor"))
            .with_similar("Anchor", vec![candidate("x"), candidate("y")]);

        let pipeline = ProductPipeline::new(Arc::new(extractor));
        let entry = pipeline.search("https://a.com/p1").await.unwrap();

        assert_eq!(entry.original_product.name, "Anchor");
        assert_eq!(entry.similar_products.len(), 2);
    }

    #[tokio::test]
    async fn test_search_applies_ranking() {
        let extractor = MockExtractor::new()
            .with_product("https://a.com/p1", product("Anchor"))
            .with_similar("Anchor", vec![candidate("x"), candidate("y"), candidate("z")]);

        let pipeline = ProductPipeline::new(Arc::new(extractor))
            .with_ranker(Arc::new(MockRanker::returning(vec![3, 1])));

        let entry = pipeline.search("https://a.com/p1").await.unwrap();
        let names: Vec<_> = entry
            .similar_products
            .iter()
            .map(|p| p.product.name.as_str())
            .collect();
        assert_eq!(names, ["z", "x", "y"]);
    }

    #[tokio::test]
    async fn test_ranking_failure_falls_back_to_extraction_order() {
        let extractor = MockExtractor::new()
            .with_product("https://a.com/p1", product("Anchor"))
            .with_similar("Anchor", vec![candidate("x"), candidate("y")]);

        let pipeline =
            ProductPipeline::new(Arc::new(extractor)).with_ranker(Arc::new(MockRanker::failing()));

        let entry = pipeline.search("https://a.com/p1").await.unwrap();
        let names: Vec<_> = entry
            .similar_products
            .iter()
            .map(|p| p.product.name.as_str())
            .collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates() {
        let extractor = MockExtractor::new(); // knows no URLs
        let pipeline = ProductPipeline::new(Arc::new(extractor));

        assert!(pipeline.search("https://a.com/unknown").await.is_err());
    }
}
