//! Catalog CLI - Command line client for the product catalog API.
//!
//! Commands:
//! - `catalog products` - List and search products
//! - `catalog families` - List product families
//! - `catalog code` - Generate the next product code
//! - `catalog create` - Create a product
//! - `catalog update` - Update a product
//! - `catalog images` - Search and persist product images
//! - `catalog browse` - Interactive catalog browser
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    BrowseArgs, ConfigArgs, CreateArgs, FamiliesArgs, ImagesArgs, ProductsArgs, UpdateArgs,
};

/// Catalog CLI - Browse and maintain the product catalog
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog API base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and search products
    Products(ProductsArgs),

    /// List product families
    Families(FamiliesArgs),

    /// Generate the next product code
    Code,

    /// Create a product
    Create(CreateArgs),

    /// Update a product
    Update(UpdateArgs),

    /// Search and persist product images
    Images(ImagesArgs),

    /// Browse the catalog interactively
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "catalog=debug" } else { "catalog=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Families(args) => commands::families::run(args, &ctx).await,
        Commands::Code => commands::code::run(&ctx).await,
        Commands::Create(args) => commands::create::run(args, &ctx).await,
        Commands::Update(args) => commands::update::run(args, &ctx).await,
        Commands::Images(args) => commands::images::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
