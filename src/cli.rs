use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse a movie/series catalog from the terminal
#[derive(Parser)]
#[command(name = "kinolex", version)]
#[command(about = "Query a catalog document and render cards and detail views", long_about = None)]
pub struct Cli {
    /// Config file (defaults to kinolex.toml in the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Product variant preset: kino, lgbtlex, movielex, seriallex
    #[arg(long, global = true)]
    pub variant: Option<String>,

    /// Catalog location (path or http(s) URL), overriding config
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Newest entries for each of the variant's categories
    Home,
    /// One page of a category listing
    List {
        /// Category to list (case-insensitive)
        category: String,
        /// Only entries whose name or description contains this text
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Detail view for a query string such as `?title=<id>`
    Detail {
        query: String,
        /// Print the structured view as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
    /// Card markup for a single entry
    Card {
        id: String,
    },
    /// Categories present in the catalog, with counts
    Categories,
}
