//! Product catalog persistence and similar-product refresh workflow.
//!
//! Tracks products by source URL: each catalog entry pairs an anchor
//! product with a ranked list of similar products discovered through a
//! remote extraction service, persisted as a single JSON document. The
//! core transforms are pure (load → transform → save); I/O happens only
//! at the store boundary and at the collaborator seams.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tracker::{
//!     refresh_catalog, CatalogStore, HyperbrowserExtractor, ProductPipeline,
//! };
//!
//! let store = CatalogStore::default();
//! let pipeline = ProductPipeline::new(Arc::new(extractor)).with_ranker(Arc::new(ranker));
//!
//! // Search: create/overwrite one entry.
//! let catalog = store.load()?;
//! let entry = pipeline.search(url).await?;
//! store.save(&tracker::upsert(catalog, url, entry))?;
//!
//! // Refresh: re-derive every entry, one save at the end.
//! let (catalog, summary) = refresh_catalog(&pipeline, store.load()?).await;
//! store.save(&catalog)?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Catalog data model
//! - [`store`] - Catalog file persistence
//! - [`traits`] - Extractor/Ranker collaborator seams
//! - [`extractor`] / [`ranker`] - Hyperbrowser / OpenAI implementations
//! - [`ranking`] - Untrusted-rank validation and reordering
//! - [`pipeline`] / [`refresh`] - The search and refresh workflows
//! - [`testing`] - Scripted mocks

pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod ranker;
pub mod ranking;
pub mod refresh;
pub mod store;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{Result, TrackerError};
pub use extractor::HyperbrowserExtractor;
pub use pipeline::ProductPipeline;
pub use ranker::{OpenAIRanker, DEFAULT_RANKING_MODEL};
pub use ranking::{apply_ranking, parse_index_array, rank_candidates};
pub use refresh::{refresh_catalog, RefreshSummary};
pub use store::{CatalogStore, DEFAULT_CATALOG_FILE};
pub use traits::{ProductExtractor, Ranker};
pub use types::{upsert, Catalog, CatalogEntry, ProductRecord, SimilarProduct, SimilarProductList};
