//! Product creation command.

use anyhow::{bail, Context as _, Result};
use catalog_client::{submit_create, CatalogApi};
use catalog_core::catalog::resolve_family;
use catalog_core::form::CreateProductForm;
use dialoguer::Confirm;

use super::dialog::{fill_create_form, is_interactive};
use super::{load_families, read_image, CreateArgs};
use crate::context::Context;

/// Run the create command.
pub async fn run(args: CreateArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let families = load_families(&api).await?;

    let code = match args.code {
        Some(code) => code,
        None => {
            api.generate_code()
                .await
                .context("Failed to generate product code")?
                .code
        }
    };

    let mut form = CreateProductForm::new(code);
    if let Some(name) = &args.name {
        form.set_name(name.clone());
    }
    if let Some(input) = &args.family {
        form.select_family(resolve_family(&families, input)?.clone());
    }
    if let Some(price) = &args.price {
        form.price = price.clone();
    }
    if let Some(path) = &args.image {
        form.image.select_file(read_image(ctx, path)?)?;
    }
    if let Some(url) = &args.image_url {
        form.image.select_remote_url(url.clone());
    }

    let complete = args.name.is_some() && args.family.is_some() && args.price.is_some();
    let interactive = is_interactive();
    if !complete {
        if !interactive {
            bail!("--name, --family and --price are required outside a terminal");
        }
        fill_create_form(&mut form, &families, &api, ctx).await?;
    }

    let dto = form.to_dto()?;
    ctx.output.header("Product");
    ctx.output.kv("code", &dto.code);
    ctx.output.kv("name", &dto.name);
    if let Some(family) = &form.family {
        ctx.output.kv("family", &family.name);
    }
    ctx.output.kv("price", &format!("{:.2}", dto.price));

    if !args.yes && interactive {
        let confirmed = Confirm::new()
            .with_prompt("Create this product?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Creation cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Creating product...");
    let response = submit_create(&api, &form).await;
    spinner.finish_and_clear();
    let response = response?;

    if ctx.output.is_json() {
        ctx.output.json(&response);
        return Ok(());
    }
    ctx.output.success(&format!(
        "{} ({} #{})",
        response.message, response.product.code, response.product.id
    ));
    if let Some(photo) = response.product.photo_medium.as_deref() {
        if let Some(url) = ctx.media_policy().displayable(photo) {
            ctx.output.kv("photo", &url);
        }
    }
    Ok(())
}
