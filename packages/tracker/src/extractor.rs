//! Hyperbrowser-backed product extractor.
//!
//! Two extract jobs back the trait: one against the product page for the
//! anchor record, one against a shopping-search page for similar
//! candidates. Schemas are generated from the target types; session
//! options (stealth, proxy, captcha solving) ride along on every job.

use async_trait::async_trait;
use hyperbrowser_client::{HyperbrowserClient, SessionOptions, StartExtractJobParams};
use url::Url;

use crate::error::{Result, TrackerError};
use crate::traits::ProductExtractor;
use crate::types::{ProductRecord, SimilarProduct, SimilarProductList};

const PRODUCT_PROMPT: &str = "Extract the product being sold on this page: its name, \
     brand, a one-paragraph description, and its price in USD.";

/// Extractor backed by the Hyperbrowser extract API.
pub struct HyperbrowserExtractor {
    client: HyperbrowserClient,
    session_options: SessionOptions,
    /// Cap on candidates requested per discovery call.
    max_candidates: usize,
}

impl HyperbrowserExtractor {
    /// Create an extractor with hardened session defaults.
    pub fn new(client: HyperbrowserClient) -> Self {
        Self {
            client,
            session_options: SessionOptions::default()
                .with_stealth()
                .with_proxy()
                .with_captcha_solving()
                .with_adblock(),
            max_candidates: 10,
        }
    }

    /// Override the session options.
    pub fn with_session_options(mut self, options: SessionOptions) -> Self {
        self.session_options = options;
        self
    }

    /// Override the candidate cap.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Shopping-search URL for discovering candidates similar to the anchor.
    fn search_url(anchor: &ProductRecord) -> String {
        let query = format!("{} {}", anchor.name, anchor.brand);
        Url::parse_with_params(
            "https://www.google.com/search",
            &[("tbm", "shop"), ("q", query.as_str())],
        )
        .map(String::from)
        // The base is a constant valid URL; parse_with_params cannot fail on it.
        .unwrap_or_else(|_| "https://www.google.com/search?tbm=shop".to_string())
    }

    fn similar_prompt(&self, anchor: &ProductRecord) -> String {
        format!(
            "This is a shopping search results page. Find up to {max} products most \
             similar to the following one and extract each candidate's name, brand, \
             description, price in USD, the absolute URL of its listing, whether it \
             is on sale, and its sale price if so.\n\nOriginal product: {anchor}",
            max = self.max_candidates,
            anchor = anchor.display_line(),
        )
    }
}

#[async_trait]
impl ProductExtractor for HyperbrowserExtractor {
    async fn extract_product(&self, url: &str) -> Result<ProductRecord> {
        let schema = serde_json::to_value(schemars::schema_for!(ProductRecord))?;
        let params = StartExtractJobParams::new(url)
            .with_prompt(PRODUCT_PROMPT)
            .with_schema(schema)
            .with_session_options(self.session_options.clone());

        let data = self
            .client
            .extract(&params)
            .await
            .map_err(|e| TrackerError::Extraction(Box::new(e)))?;

        let product: ProductRecord = serde_json::from_value(data)?;
        product
            .validate()
            .map_err(|reason| TrackerError::InvalidProduct {
                url: url.to_string(),
                reason,
            })?;

        tracing::info!(url = %url, product = %product.name, "Extracted anchor product");
        Ok(product)
    }

    async fn find_similar(&self, anchor: &ProductRecord) -> Result<Vec<SimilarProduct>> {
        let search_url = Self::search_url(anchor);
        let schema = serde_json::to_value(schemars::schema_for!(SimilarProductList))?;
        let params = StartExtractJobParams::new(&search_url)
            .with_prompt(self.similar_prompt(anchor))
            .with_schema(schema)
            .with_session_options(self.session_options.clone());

        let data = self
            .client
            .extract(&params)
            .await
            .map_err(|e| TrackerError::Extraction(Box::new(e)))?;

        let list: SimilarProductList = serde_json::from_value(data)?;

        let mut candidates = Vec::with_capacity(list.similar_products.len());
        for candidate in list.similar_products {
            match candidate.validate() {
                Ok(()) => candidates.push(candidate),
                Err(reason) => {
                    tracing::debug!(
                        candidate = %candidate.product.name,
                        reason = %reason,
                        "Dropping invalid similar-product candidate"
                    );
                }
            }
        }

        tracing::info!(
            anchor = %anchor.name,
            candidates = candidates.len(),
            "Discovered similar products"
        );
        Ok(candidates)
    }
}
