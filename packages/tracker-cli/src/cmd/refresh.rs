//! `tracker refresh`
//!
//! Partial failure is the expected steady state: the command reports a
//! tally and exits successfully as long as the final save goes through.

use anyhow::{Context, Result};
use colored::Colorize;
use tracker::{refresh_catalog, CatalogStore};

use crate::context::build_pipeline;

pub async fn run(store: &CatalogStore) -> Result<()> {
    let catalog = store.load()?;
    if catalog.is_empty() {
        println!(
            "{} nothing is tracked yet; run {} first",
            "Nothing to refresh:".yellow().bold(),
            "tracker search <url>".bold()
        );
        return Ok(());
    }

    let pipeline = build_pipeline()?;
    println!(
        "{} {} tracked products",
        "Refreshing".bright_green().bold(),
        catalog.len()
    );

    let (refreshed, summary) = refresh_catalog(&pipeline, catalog).await;
    store
        .save(&refreshed)
        .context("failed to save the refreshed catalog")?;

    println!(
        "{} processed {}, {} succeeded, {} failed",
        "Done:".bright_green().bold(),
        summary.processed(),
        summary.succeeded.to_string().green(),
        if summary.failed > 0 {
            summary.failed.to_string().red().to_string()
        } else {
            summary.failed.to_string()
        }
    );
    Ok(())
}
