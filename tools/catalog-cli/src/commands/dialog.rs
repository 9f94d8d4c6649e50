//! Interactive create/update dialogs.

use anyhow::Result;
use catalog_client::{run_selector_search, CatalogApi};
use catalog_core::catalog::FamilyProduct;
use catalog_core::form::{CreateProductForm, ImageSourceSelector, PendingImage, UpdateProductForm};
use console::Term;
use dialoguer::{Input, Select};

use super::read_image;
use crate::context::Context;
use crate::output::format_bytes;

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    Term::stdout().is_term() && Term::stderr().is_term()
}

/// Prompt for a line of text, prefilled with `initial`.
pub fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Pick one of `candidates`. `None` when there is nothing to pick or the
/// picker was dismissed.
pub fn choose_family(
    candidates: &[FamilyProduct],
    current: Option<&FamilyProduct>,
    ctx: &Context,
) -> Result<Option<FamilyProduct>> {
    if candidates.is_empty() {
        ctx.output.warn("No family matches.");
        return Ok(None);
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|f| match current {
            Some(c) if c.id == f.id => format!("{} (selected)", f.name),
            _ => f.name.clone(),
        })
        .collect();
    let default = current
        .and_then(|c| candidates.iter().position(|f| f.id == c.id))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Family")
        .items(&items)
        .default(default)
        .interact_opt()?;
    Ok(selection.map(|i| candidates[i].clone()))
}

/// Let the user pick an image from search results, a local file or a URL.
pub async fn pick_image<A: CatalogApi + ?Sized>(
    selector: &mut ImageSourceSelector,
    api: &A,
    ctx: &Context,
) -> Result<()> {
    const ITEMS: [&str; 5] = [
        "Keep as is",
        "Search images",
        "Local file",
        "Image URL",
        "Remove selected image",
    ];

    selector.set_result_count(ctx.config.images.search_results);
    loop {
        describe_pending(selector.pending(), ctx);
        let choice = Select::new()
            .with_prompt("Image")
            .items(&ITEMS)
            .default(0)
            .interact_opt()?;

        match choice {
            None | Some(0) => return Ok(()),
            Some(1) => {
                let term = prompt_text("Search term", selector.search_term())?;
                selector.set_search_term(term);
                let spinner = ctx.output.spinner("Searching images...");
                let searched = run_selector_search(api, selector).await;
                spinner.finish_and_clear();
                match searched {
                    Ok(false) => ctx.output.warn("Enter a search term first."),
                    Ok(true) if selector.results().is_empty() => {
                        ctx.output.warn("No images found.")
                    }
                    Ok(true) => {
                        let mut items: Vec<String> = selector.results().to_vec();
                        items.push("Cancel".to_string());
                        let picked = Select::new()
                            .with_prompt("Pick an image")
                            .items(&items)
                            .default(0)
                            .interact_opt()?;
                        if let Some(index) = picked {
                            selector.select_result(index);
                        }
                    }
                    Err(e) => ctx.output.error(&format!("Image search failed: {}", e)),
                }
            }
            Some(2) => {
                let path = prompt_text("Image file path", "")?;
                if path.trim().is_empty() {
                    continue;
                }
                let selected = read_image(ctx, path.trim())
                    .and_then(|image| selector.select_file(image).map_err(Into::into));
                if let Err(e) = selected {
                    ctx.output.error(&format!("{:#}", e));
                }
            }
            Some(3) => {
                let url = prompt_text("Image URL", "")?;
                if !url.trim().is_empty() {
                    selector.select_remote_url(url.trim());
                }
            }
            Some(_) => selector.clear(),
        }
    }
}

fn describe_pending(pending: &PendingImage, ctx: &Context) {
    match pending {
        PendingImage::None => ctx.output.kv("image", "none"),
        PendingImage::Remote(url) => ctx.output.kv("image", url),
        PendingImage::Local(file) => ctx.output.kv(
            "image",
            &format!("{} ({})", file.file_name, format_bytes(file.size())),
        ),
    }
}

/// Prompt for every create field, prefilled with what the form holds.
pub async fn fill_create_form<A: CatalogApi + ?Sized>(
    form: &mut CreateProductForm,
    families: &[FamilyProduct],
    api: &A,
    ctx: &Context,
) -> Result<()> {
    ctx.output.header("New product");
    ctx.output.kv("code", &form.code);

    let name = prompt_text("Name", &form.name)?;
    form.set_name(name);

    form.family_search = prompt_text("Filter families (empty for all)", "")?;
    let candidates: Vec<FamilyProduct> =
        form.visible_families(families).into_iter().cloned().collect();
    if let Some(family) = choose_family(&candidates, form.family.as_ref(), ctx)? {
        form.select_family(family);
    }

    form.price = prompt_text("Price", &form.price)?;
    pick_image(&mut form.image, api, ctx).await
}

/// Prompt for every update field, prefilled with the current values.
pub async fn fill_update_form<A: CatalogApi + ?Sized>(
    form: &mut UpdateProductForm,
    families: &[FamilyProduct],
    api: &A,
    ctx: &Context,
) -> Result<()> {
    ctx.output.header(&format!("Edit product {}", form.product().id));

    form.name = prompt_text("Name", &form.name)?;

    form.family_search = prompt_text("Filter families (empty for all)", "")?;
    let candidates: Vec<FamilyProduct> =
        form.visible_families(families).into_iter().cloned().collect();
    if let Some(family) = choose_family(&candidates, form.family.as_ref(), ctx)? {
        form.select_family(family);
    }

    form.price = prompt_text("Price", &form.price)?;
    pick_image(&mut form.image, api, ctx).await
}
