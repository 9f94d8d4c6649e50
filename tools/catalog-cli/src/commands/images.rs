//! Image search and download commands.

use anyhow::{Context as _, Result};
use catalog_core::ProductId;

use super::{ImagesArgs, ImagesCommand};
use crate::context::Context;

/// Run the images command.
pub async fn run(args: ImagesArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ImagesCommand::Search { term, count } => search(&term, count, ctx).await,
        ImagesCommand::Download { url, product } => download(&url, product, ctx).await,
    }
}

async fn search(term: &str, count: Option<u32>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Searching images...");
    let result = catalog_client::search_images(&ctx.api(), term, count).await;
    spinner.finish_and_clear();
    let result = result.context("Image search failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    ctx.output
        .header(&format!("Images for \"{}\" ({})", result.search_term, result.count));
    if result.images.is_empty() {
        ctx.output.info("No images found.");
    }
    for (i, url) in result.images.iter().enumerate() {
        ctx.output.list_item(&format!("{}. {}", i + 1, url));
    }
    Ok(())
}

async fn download(url: &str, product: i64, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Downloading image...");
    let result = catalog_client::download_image(&ctx.api(), url, ProductId::new(product)).await;
    spinner.finish_and_clear();
    let result = result.context("Image download failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    ctx.output.success(&result.message);
    ctx.output.kv("filename", &result.filename);
    let media = ctx.media_policy();
    for (label, path) in [
        ("url", &result.url),
        ("thumbnail", &result.thumbnail_url),
        ("medium", &result.medium_url),
        ("original", &result.original_url),
    ] {
        let shown = media.resolve_photo_url(path).unwrap_or_else(|| path.clone());
        ctx.output.kv(label, &shown);
    }
    Ok(())
}
