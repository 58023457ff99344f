//! Catalog data model.
//!
//! Field names serialize as camelCase to match the on-disk catalog file
//! and the schemas sent to the extraction service. The file carries no
//! schema version, so deserialization stays permissive: unknown fields
//! are ignored and optional fields default.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One extracted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,

    pub brand: String,

    pub description: String,

    /// Price in USD.
    pub price: f64,
}

impl ProductRecord {
    /// Validate the extraction invariant: all text fields non-empty,
    /// price non-negative. Records failing this are discarded upstream,
    /// never stored.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("missing product name".into());
        }
        if self.brand.trim().is_empty() {
            return Err("missing brand".into());
        }
        if self.description.trim().is_empty() {
            return Err("missing description".into());
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(format!("invalid price: {}", self.price));
        }
        Ok(())
    }

    /// One-line description used when enumerating products for the ranker.
    pub fn display_line(&self) -> String {
        format!(
            "{} by {} (${:.2}): {}",
            self.name, self.brand, self.price, self.description
        )
    }
}

/// A candidate similar to some anchor product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProduct {
    #[serde(flatten)]
    pub product: ProductRecord,

    /// Absolute URL of the candidate's listing.
    pub link: String,

    pub on_sale: bool,

    /// Present only when `on_sale`; never exceeds `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}

impl SimilarProduct {
    /// Validate the candidate invariants on top of [`ProductRecord::validate`].
    pub fn validate(&self) -> Result<(), String> {
        self.product.validate()?;
        if self.link.trim().is_empty() {
            return Err("missing link".into());
        }
        match self.sale_price {
            Some(_) if !self.on_sale => Err("sale price on a product not on sale".into()),
            Some(sale) if sale > self.product.price => Err(format!(
                "sale price {} exceeds price {}",
                sale, self.product.price
            )),
            Some(sale) if sale < 0.0 || !sale.is_finite() => {
                Err(format!("invalid sale price: {}", sale))
            }
            _ => Ok(()),
        }
    }
}

/// Extraction target for the similar-product discovery call.
///
/// The remote extractor fills this wrapper; its generated JSON Schema is
/// sent along with the extract job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProductList {
    #[serde(default)]
    pub similar_products: Vec<SimilarProduct>,
}

/// One unit of persisted state: an anchor product, its discovered
/// similar products (ordered by ranked similarity when ranking is
/// enabled, extraction order otherwise), and the last write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub original_product: ProductRecord,

    #[serde(default)]
    pub similar_products: Vec<SimilarProduct>,

    pub last_updated: DateTime<Utc>,
}

impl CatalogEntry {
    /// Create an entry timestamped now.
    pub fn new(original_product: ProductRecord, similar_products: Vec<SimilarProduct>) -> Self {
        Self {
            original_product,
            similar_products,
            last_updated: Utc::now(),
        }
    }
}

/// The full persisted mapping of source URLs to catalog entries.
///
/// IndexMap keeps insertion order, so the file round-trips stably and
/// refresh processes entries in file order.
pub type Catalog = IndexMap<String, CatalogEntry>;

/// Insert-or-replace one entry, preserving every other key.
pub fn upsert(mut catalog: Catalog, key: impl Into<String>, entry: CatalogEntry) -> Catalog {
    catalog.insert(key.into(), entry);
    catalog
}
