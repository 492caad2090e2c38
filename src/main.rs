use anyhow::Result;
use chasqui_router::config::RouterConfig;
use chasqui_router::dom::CONTENT_SELECTOR;
use chasqui_router::navigator::NavigateOptions;
use chasqui_router::site::Site;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chasqui-router")]
#[command(about = "Drive a static site's fragment router without a browser")]
struct Cli {
    /// Site directory or http(s) origin (overrides SITE_ROOT)
    #[arg(long, global = true)]
    site: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the route table
    Routes,
    /// Start a session, navigate through PAGES, and print where it ended up
    Visit {
        /// Pages to navigate to in order, each pushing a history entry
        pages: Vec<String>,

        /// Steps to go back through history afterwards
        #[arg(long, default_value_t = 0)]
        back: usize,

        /// Location to start at (overrides ENTRY_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chasqui_router=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RouterConfig::from_env();
    if let Some(site) = cli.site {
        config.site_root = site;
    }

    match cli.command {
        Command::Routes => {
            let site = Site::from_config(Arc::new(config)).await?;
            for (key, path) in site.routes().iter() {
                let key = if key.is_empty() { "(default)" } else { key };
                println!("{:<12} {}", key, path);
            }
        }
        Command::Visit { pages, back, url } => {
            if let Some(url) = url {
                config.entry_url = url;
            }
            let site = Site::from_config(Arc::new(config)).await?;

            site.init().await;
            for page in &pages {
                site.navigate(page, NavigateOptions::push()).await;
            }
            for _ in 0..back {
                if site.back().await.is_none() {
                    break;
                }
            }

            let history = site.history();
            println!("Location: {}", site.location());
            println!(
                "Route:    {}",
                site.navigator().current_route().unwrap_or_default()
            );
            println!("History:  {}/{}", history.index() + 1, history.len());
            println!();
            let content = site.with_document(|doc| {
                doc.inner_html(CONTENT_SELECTOR)
                    .unwrap_or_default()
                    .to_string()
            });
            println!("{}", content);
        }
    }

    Ok(())
}
