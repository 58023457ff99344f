//! Shared wiring for commands that talk to the remote services.

use std::sync::Arc;

use anyhow::{Context, Result};
use hyperbrowser_client::HyperbrowserClient;
use openai_client::OpenAIClient;
use tracker::{HyperbrowserExtractor, OpenAIRanker, ProductPipeline, DEFAULT_RANKING_MODEL};

/// Build the extraction/ranking pipeline from the environment.
///
/// `HYPERBROWSER_API_KEY` is required. `OPENAI_API_KEY` is optional:
/// when absent, ranking is disabled for the whole invocation and
/// similar products keep their extraction order.
pub fn build_pipeline() -> Result<ProductPipeline> {
    let client = HyperbrowserClient::from_env()
        .context("Hyperbrowser is required; set HYPERBROWSER_API_KEY")?;
    let mut pipeline = ProductPipeline::new(Arc::new(HyperbrowserExtractor::new(client)));

    match OpenAIClient::from_env() {
        Ok(client) => {
            let model = std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_RANKING_MODEL.to_string());
            tracing::debug!(model = %model, "Similarity ranking enabled");
            pipeline = pipeline.with_ranker(Arc::new(OpenAIRanker::new(client).with_model(model)));
        }
        Err(_) => {
            tracing::info!("OPENAI_API_KEY not set, similarity ranking disabled");
        }
    }

    Ok(pipeline)
}
