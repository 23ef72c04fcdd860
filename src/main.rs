mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use kinolex::config::{self, ConfigFile, EnvOverrides};
use kinolex::render::render_card;
use kinolex::site::DetailOutcome;
use kinolex::Kinolex;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("KINOLEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let file = ConfigFile::load(cli.config.as_deref())?;
    let variant = config::resolve(file, EnvOverrides::from_env(), cli.variant.as_deref(), cli.source.as_deref())?;
    tracing::debug!(variant = %variant.name, source = %variant.source, "resolved configuration");

    let app = Kinolex::open(variant).await?;

    match cli.command {
        Commands::Home => {
            for section in app.home() {
                println!("<!-- {} -->", section.category);
                for card in section.cards {
                    print!("{}", card);
                }
            }
        }
        Commands::List { category, search, page } => {
            let view = app.listing(&category, search.as_deref().unwrap_or(""), page);
            for card in &view.cards {
                print!("{}", card);
            }
            let pager: Vec<String> = view
                .buttons
                .iter()
                .map(|b| if b.active { format!("[{}]", b.number) } else { b.number.to_string() })
                .collect();
            eprintln!("page {}/{} ({} entries): {}", view.page, view.total_pages, view.total_items, pager.join(" "));
        }
        Commands::Detail { query, json } => match app.detail(&query) {
            DetailOutcome::Render(view) if json => {
                println!("{}", serde_json::to_string_pretty(&view).context("serializing detail view")?);
            }
            DetailOutcome::Render(view) => print!("{}", view.to_html()),
            DetailOutcome::Redirect(to) => println!("redirect: {}", to),
        },
        Commands::Card { id } => match app.get(&id) {
            Some(m) => print!("{}", render_card(m, &app.variant().detail_page)),
            None => anyhow::bail!("no catalog entry with id {:?}", id),
        },
        Commands::Categories => {
            for (category, count) in app.categories() {
                println!("{}\t{}", category, count);
            }
        }
    }
    Ok(())
}
