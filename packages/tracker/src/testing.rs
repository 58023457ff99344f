//! Mock collaborators for testing.
//!
//! Useful for exercising the pipeline, refresh workflow, and CLI logic
//! without network calls. Mocks return scripted responses and fail on
//! anything they were not scripted for.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, TrackerError};
use crate::traits::{ProductExtractor, Ranker};
use crate::types::{ProductRecord, SimilarProduct};

/// A scripted extractor.
///
/// `extract_product` answers by URL, `find_similar` by anchor name;
/// unscripted inputs produce an extraction error, which is how tests
/// simulate remote failures.
#[derive(Default)]
pub struct MockExtractor {
    products: RwLock<HashMap<String, ProductRecord>>,
    similar: RwLock<HashMap<String, Vec<SimilarProduct>>>,
    calls: RwLock<Vec<MockExtractorCall>>,
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockExtractorCall {
    ExtractProduct { url: String },
    FindSimilar { anchor: String },
}

impl MockExtractor {
    /// Create a mock that fails every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the product returned for a URL.
    pub fn with_product(self, url: impl Into<String>, product: ProductRecord) -> Self {
        self.products.write().unwrap().insert(url.into(), product);
        self
    }

    /// Script the candidates returned for an anchor name.
    pub fn with_similar(
        self,
        anchor_name: impl Into<String>,
        candidates: Vec<SimilarProduct>,
    ) -> Self {
        self.similar
            .write()
            .unwrap()
            .insert(anchor_name.into(), candidates);
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<MockExtractorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ProductExtractor for MockExtractor {
    async fn extract_product(&self, url: &str) -> Result<ProductRecord> {
        self.calls
            .write()
            .unwrap()
            .push(MockExtractorCall::ExtractProduct { url: url.to_string() });

        self.products
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| {
                TrackerError::Extraction(format!("mock: no product for {}", url).into())
            })
    }

    async fn find_similar(&self, anchor: &ProductRecord) -> Result<Vec<SimilarProduct>> {
        self.calls.write().unwrap().push(MockExtractorCall::FindSimilar {
            anchor: anchor.name.clone(),
        });

        self.similar
            .read()
            .unwrap()
            .get(&anchor.name)
            .cloned()
            .ok_or_else(|| {
                TrackerError::Extraction(
                    format!("mock: no similar products for {}", anchor.name).into(),
                )
            })
    }
}

/// A scripted ranker: returns fixed indices, or always fails.
pub struct MockRanker {
    indices: Option<Vec<usize>>,
}

impl MockRanker {
    /// Ranker that always returns the given 1-based indices.
    pub fn returning(indices: Vec<usize>) -> Self {
        Self {
            indices: Some(indices),
        }
    }

    /// Ranker whose every call fails.
    pub fn failing() -> Self {
        Self { indices: None }
    }
}

#[async_trait]
impl Ranker for MockRanker {
    async fn rank(
        &self,
        _anchor: &ProductRecord,
        _candidates: &[SimilarProduct],
    ) -> Result<Vec<usize>> {
        self.indices
            .clone()
            .ok_or_else(|| TrackerError::Ranking("mock: ranking unavailable".into()))
    }
}
