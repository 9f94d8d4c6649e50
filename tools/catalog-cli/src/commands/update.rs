//! Product update command.

use anyhow::{bail, Result};
use catalog_client::submit_update;
use catalog_core::catalog::resolve_family;
use catalog_core::form::UpdateProductForm;
use catalog_core::{CatalogError, ProductId};

use super::dialog::{fill_update_form, is_interactive};
use super::{fetch_all_products, load_families, read_image, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let families = load_families(&api).await?;

    let spinner = ctx.output.spinner("Looking up product...");
    let products = fetch_all_products(&api, None, ctx.config.api.page_size).await;
    spinner.finish_and_clear();

    let id = ProductId::new(args.id);
    let product = products?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(CatalogError::ProductNotFound(args.id))?;

    let mut form = UpdateProductForm::open(&product, &families);
    let mut any_flag = false;
    if let Some(name) = args.name {
        form.name = name;
        any_flag = true;
    }
    if let Some(input) = &args.family {
        form.select_family(resolve_family(&families, input)?.clone());
        any_flag = true;
    }
    if let Some(price) = args.price {
        form.price = price;
        any_flag = true;
    }
    if let Some(path) = &args.image {
        form.image.select_file(read_image(ctx, path)?)?;
        any_flag = true;
    }
    if let Some(url) = args.image_url {
        form.image.select_remote_url(url);
        any_flag = true;
    }

    if !any_flag {
        if !is_interactive() {
            bail!("Nothing to update: pass --name, --family, --price, --image or --image-url");
        }
        fill_update_form(&mut form, &families, &api, ctx).await?;
    }

    let spinner = ctx.output.spinner("Updating product...");
    let outcome = submit_update(&api, &form).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": outcome.product_id,
            "updated": outcome.updated,
            "image": outcome.image,
        }));
        return Ok(());
    }

    ctx.output.success(&format!("Product {} updated", outcome.product_id));
    if let Some(image) = &outcome.image {
        ctx.output.kv("image", &image.filename);
        if let Some(url) = ctx.media_policy().displayable(&image.medium_url) {
            ctx.output.kv("preview", &url);
        }
    }
    Ok(())
}
