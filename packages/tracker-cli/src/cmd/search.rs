//! `tracker search <url>`

use anyhow::{Context, Result};
use colored::Colorize;
use tracker::{upsert, CatalogEntry, CatalogStore, SimilarProduct};

use crate::context::build_pipeline;

pub async fn run(store: &CatalogStore, url: &str) -> Result<()> {
    let pipeline = build_pipeline()?;
    let catalog = store.load()?;

    println!("{} {}", "Extracting".bright_green().bold(), url);
    let entry = pipeline
        .search(url)
        .await
        .with_context(|| format!("search failed for {}", url))?;

    print_entry(url, &entry);

    let catalog = upsert(catalog, url, entry);
    store
        .save(&catalog)
        .context("failed to save the catalog")?;
    println!(
        "{} {} ({} tracked)",
        "Saved".bright_green().bold(),
        store.path().display(),
        catalog.len()
    );
    Ok(())
}

fn print_entry(url: &str, entry: &CatalogEntry) {
    let product = &entry.original_product;
    println!();
    println!(
        "{} {} by {} - ${:.2}",
        "Tracking".bright_cyan().bold(),
        product.name.bold(),
        product.brand,
        product.price
    );
    println!("  {}", url.dimmed());

    if entry.similar_products.is_empty() {
        println!("  {}", "No similar products found".yellow());
        return;
    }

    println!("  {} similar:", entry.similar_products.len());
    for similar in &entry.similar_products {
        let price = if similar.sale_price.is_some() {
            price_label(similar).bright_yellow().to_string()
        } else {
            price_label(similar)
        };
        println!(
            "   - {} by {} - {}",
            similar.product.name, similar.product.brand, price
        );
        println!("     {}", similar.link.dimmed());
    }
}

/// Plain price label: the sale price with the regular price in
/// parentheses when on sale, the regular price otherwise.
fn price_label(similar: &SimilarProduct) -> String {
    match similar.sale_price {
        Some(sale) => format!("${:.2} (was ${:.2})", sale, similar.product.price),
        None => format!("${:.2}", similar.product.price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::ProductRecord;

    fn similar(price: f64, sale_price: Option<f64>) -> SimilarProduct {
        SimilarProduct {
            product: ProductRecord {
                name: "Lamp".to_string(),
                brand: "Acme".to_string(),
                description: "d".to_string(),
                price,
            },
            link: "https://example.com/lamp".to_string(),
            on_sale: sale_price.is_some(),
            sale_price,
        }
    }

    #[test]
    fn test_price_label_is_plain_ascii() {
        let regular = price_label(&similar(30.0, None));
        assert_eq!(regular, "$30.00");

        let on_sale = price_label(&similar(30.0, Some(24.5)));
        assert_eq!(on_sale, "$24.50 (was $30.00)");

        assert!(regular.is_ascii());
        assert!(on_sale.is_ascii());
    }
}
