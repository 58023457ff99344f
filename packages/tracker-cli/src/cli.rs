//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tracker",
    about = "Track products and monitor similar listings across the web",
    version
)]
pub struct Cli {
    /// Path of the catalog file
    #[arg(long, global = true, default_value = tracker::DEFAULT_CATALOG_FILE)]
    pub catalog: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract a product page and start tracking similar products
    Search {
        /// Product page URL (also the catalog key)
        url: String,
    },

    /// Re-derive similar products for every tracked entry
    Refresh,

    /// List tracked products
    List,

    /// Install a cron job that runs `tracker refresh` periodically
    Schedule {
        /// Refresh interval in hours
        #[arg(long, default_value_t = 24)]
        every: u32,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Remove the periodic refresh cron job
    Unschedule {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
