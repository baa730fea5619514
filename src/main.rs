//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content tools for a personal blog and portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the posts of a collection, newest first
    #[command(alias = "ls")]
    List {
        /// Collection to list
        #[arg(default_value = "blog")]
        collection: String,

        /// Print posts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post or note
    New {
        /// Title of the new document
        title: String,

        /// Collection to create it in
        #[arg(short, long, default_value = "blog")]
        collection: String,

        /// Slug (file name) to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Write sitemap.xml to the public folder
    Sitemap,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::List { collection, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &collection, json)?;
        }

        Commands::New {
            title,
            collection,
            slug,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new {} entry with title: {}", collection, title);
            let path =
                folio::commands::new::create_post(&folio, &title, &collection, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Sitemap => {
            let folio = folio::Folio::new(&base_dir)?;
            let path = folio::commands::sitemap::run(&folio)?;
            println!("Generated {:?}", path);
        }

        Commands::Clean => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio::commands::clean::run(&folio)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
