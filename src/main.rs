//! CLI entry point for nostos-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nostos-site")]
#[command(version)]
#[command(about = "Markdown blog content pipeline and API server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Start the API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (post, slug, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "nostos_site=debug,info"
    } else {
        "nostos_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New { title } => {
            let site = nostos_site::Site::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            nostos_site::commands::new::run(&site, &title)?;
        }

        Commands::Serve { port, ip } => {
            let site = nostos_site::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            nostos_site::server::start(&site, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = nostos_site::Site::new(&base_dir)?;
            nostos_site::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("nostos-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
