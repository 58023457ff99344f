//! OpenAI-backed similarity ranker.
//!
//! One chat-completion call per ranking: the prompt enumerates the
//! anchor and the 1-based candidates, and the reply is expected to
//! contain a JSON array of indices. The reply is untrusted; validation
//! happens in [`crate::ranking`].

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use crate::error::{Result, TrackerError};
use crate::ranking::parse_index_array;
use crate::traits::Ranker;
use crate::types::{ProductRecord, SimilarProduct};

const SYSTEM_PROMPT: &str = "You rank products by how similar they are to a reference \
     product, considering category, brand, features, and price. Respond with a JSON \
     array of the candidate numbers, most similar first, and nothing else.";

/// Default model for ranking calls.
pub const DEFAULT_RANKING_MODEL: &str = "gpt-4o-mini";

/// Ranker backed by the OpenAI chat completions API.
pub struct OpenAIRanker {
    client: OpenAIClient,
    model: String,
}

impl OpenAIRanker {
    /// Create a ranker using the default model.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_RANKING_MODEL.to_string(),
        }
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn ranking_prompt(anchor: &ProductRecord, candidates: &[SimilarProduct]) -> String {
        let mut prompt = format!("Reference product:\n{}\n\nCandidates:\n", anchor.display_line());
        for (i, candidate) in candidates.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, candidate.product.display_line()));
        }
        prompt
    }
}

#[async_trait]
impl Ranker for OpenAIRanker {
    async fn rank(
        &self,
        anchor: &ProductRecord,
        candidates: &[SimilarProduct],
    ) -> Result<Vec<usize>> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(Self::ranking_prompt(anchor, candidates)))
            .temperature(0.0);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(|e| TrackerError::Ranking(Box::new(e)))?;

        parse_index_array(&response.content).ok_or_else(|| {
            TrackerError::Ranking(
                format!("no index array in ranker reply: {:.120}", response.content).into(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            brand: "Acme".to_string(),
            description: "d".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn test_ranking_prompt_enumerates_from_one() {
        let candidates = vec![
            SimilarProduct {
                product: product("First"),
                link: "https://a.com/1".to_string(),
                on_sale: false,
                sale_price: None,
            },
            SimilarProduct {
                product: product("Second"),
                link: "https://a.com/2".to_string(),
                on_sale: false,
                sale_price: None,
            },
        ];

        let prompt = OpenAIRanker::ranking_prompt(&product("Anchor"), &candidates);
        assert!(prompt.contains("Reference product:\nAnchor by Acme"));
        assert!(prompt.contains("1. First by Acme"));
        assert!(prompt.contains("2. Second by Acme"));
    }
}
