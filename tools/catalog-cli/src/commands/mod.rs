//! CLI command implementations.

pub mod browse;
pub mod code;
pub mod config;
pub mod create;
pub mod dialog;
pub mod families;
pub mod images;
pub mod products;
pub mod update;

use anyhow::{Context as _, Result};
use catalog_client::CatalogApi;
use catalog_core::catalog::{resolve_family, validate_image_within, FamilyProduct, LocalImage, Product};
use catalog_core::FamilyId;
use clap::{Args, Subcommand};

use crate::context::Context;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, optionally within one family.
    List {
        /// Family name or id.
        #[arg(short, long)]
        family: Option<String>,

        /// Page number.
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Products per page (default from config).
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,

        /// Filter fetched products by name on the client instead of the
        /// search endpoint.
        #[arg(long, value_name = "TERM")]
        local_filter: Option<String>,
    },
    /// Search products by name.
    Search {
        /// Search term.
        term: String,

        /// Family name or id.
        #[arg(short, long)]
        family: Option<String>,

        /// Page number.
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Products per page (default from config).
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
    },
}

/// Arguments for the families command.
#[derive(Args)]
pub struct FamiliesArgs {
    /// Only families whose name contains this text.
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Product code (generated when omitted).
    #[arg(long)]
    pub code: Option<String>,

    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Family name or id.
    #[arg(short, long)]
    pub family: Option<String>,

    /// Price, e.g. 12.50.
    #[arg(short, long)]
    pub price: Option<String>,

    /// Local image file to upload.
    #[arg(long, conflicts_with = "image_url")]
    pub image: Option<String>,

    /// Remote image URL to attach.
    #[arg(long)]
    pub image_url: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product id.
    pub id: i64,

    /// New name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// New family name or id.
    #[arg(short, long)]
    pub family: Option<String>,

    /// New price.
    #[arg(short, long)]
    pub price: Option<String>,

    /// New local image file.
    #[arg(long, conflicts_with = "image_url")]
    pub image: Option<String>,

    /// New remote image URL, persisted after the update.
    #[arg(long)]
    pub image_url: Option<String>,
}

/// Arguments for the images command.
#[derive(Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesCommand,
}

#[derive(Subcommand)]
pub enum ImagesCommand {
    /// Reverse image search.
    Search {
        /// Search term.
        term: String,

        /// Number of candidates.
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
    /// Persist a remote image for a product.
    Download {
        /// Image URL.
        url: String,

        /// Product id.
        #[arg(short, long)]
        product: i64,
    },
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Start with this search term.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Start within this family (name or id).
    #[arg(short, long)]
    pub family: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a configuration value.
    Get {
        /// Config key (e.g., api.base_url)
        key: String,
    },
    /// Set a configuration value in the config file.
    Set {
        /// Config key (e.g., api.page_size)
        key: String,
        /// Value to set
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the path of the config file in use.
    Path,
}

/// Load the family list.
pub async fn load_families<A: CatalogApi + ?Sized>(api: &A) -> Result<Vec<FamilyProduct>> {
    api.families().await.context("Failed to load families")
}

/// Resolve a family name or id against the API's family list.
pub async fn family_arg<A: CatalogApi + ?Sized>(api: &A, input: &str) -> Result<FamilyProduct> {
    let families = load_families(api).await?;
    Ok(resolve_family(&families, input)?.clone())
}

/// Fetch every page of the listing.
pub async fn fetch_all_products<A: CatalogApi + ?Sized>(
    api: &A,
    family_id: Option<FamilyId>,
    page_size: u32,
) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    let mut page = 1;
    loop {
        let batch = api
            .list_products(page, page_size, family_id)
            .await
            .context("Failed to load products")?;
        let done = batch.is_empty() || !batch.meta.has_next_page;
        products.extend(batch.data);
        if done {
            return Ok(products);
        }
        page += 1;
    }
}

/// Read and validate an image file for upload.
pub fn read_image(ctx: &Context, path: &str) -> Result<LocalImage> {
    let image = LocalImage::from_path(&ctx.resolve_path(path))?;
    validate_image_within(&image.mime, image.size(), ctx.config.images.upload_limit())?;
    Ok(image)
}
