//! Collaborator traits.
//!
//! The extractor and ranker are remote services; these traits are the
//! seams that keep the catalog and refresh logic testable without
//! network calls.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProductRecord, SimilarProduct};

/// Extracts structured product data from retailer pages.
///
/// Implementations wrap a remote extraction service; crawling, captcha
/// solving and proxying are the service's concern.
#[async_trait]
pub trait ProductExtractor: Send + Sync {
    /// Extract the product a page is selling.
    ///
    /// The returned record has already passed validation; pages that do
    /// not yield a valid record are an error, never a partial record.
    async fn extract_product(&self, url: &str) -> Result<ProductRecord>;

    /// Discover products similar to the anchor.
    ///
    /// Candidates failing validation are dropped individually. An empty
    /// list is a valid outcome, not an error.
    async fn find_similar(&self, anchor: &ProductRecord) -> Result<Vec<SimilarProduct>>;
}

/// Orders candidates by similarity to an anchor product.
///
/// Implementations wrap a text-generation call; the returned indices are
/// untrusted (possibly incomplete, duplicated, or out of range) and must
/// be validated by the caller. Ranking is best-effort enrichment: it is
/// configured once at startup and absent when no credential is set.
#[async_trait]
pub trait Ranker: Send + Sync {
    /// Return 1-based candidate indices, most similar first.
    async fn rank(
        &self,
        anchor: &ProductRecord,
        candidates: &[SimilarProduct],
    ) -> Result<Vec<usize>>;
}
