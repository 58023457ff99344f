//! `tracker list`

use anyhow::Result;
use colored::Colorize;
use tracker::CatalogStore;

pub fn run(store: &CatalogStore) -> Result<()> {
    let catalog = store.load()?;
    if catalog.is_empty() {
        println!("{}", "No tracked products".yellow());
        return Ok(());
    }

    println!("{} tracked products:\n", catalog.len());
    for (url, entry) in &catalog {
        let product = &entry.original_product;
        println!(
            "{} by {} - ${:.2}",
            product.name.bold(),
            product.brand,
            product.price
        );
        println!("  {}", url.dimmed());
        println!(
            "  {} similar, updated {}",
            entry.similar_products.len(),
            entry.last_updated.format("%Y-%m-%d %H:%M UTC")
        );
        println!();
    }
    Ok(())
}
