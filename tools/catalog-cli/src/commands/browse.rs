//! Interactive catalog browser.
//!
//! One session holds a single query coordinator. Every action changes the
//! query state or mutates the catalog, and the listing is re-fetched from the
//! resulting state. Errors are reported and the session continues.

use anyhow::{bail, Result};
use catalog_client::{create_product, update_product, CatalogApi, HttpCatalogApi, QueryCoordinator};
use catalog_core::catalog::{filter_families, resolve_family, FamilyProduct};
use catalog_core::form::{CreateProductForm, UpdateProductForm};
use catalog_core::search::QueryState;
use dialoguer::{Input, Select};

use super::dialog::{choose_family, fill_create_form, fill_update_form, is_interactive, prompt_text};
use super::products::print_view;
use super::{load_families, BrowseArgs};
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Page(u32),
    GoToPage,
    Search,
    ClearSearch,
    Family,
    NewProduct,
    EditProduct,
    Refresh,
    Quit,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if !is_interactive() {
        bail!("browse needs an interactive terminal; use `catalog products` instead");
    }

    let mut coordinator = ctx.coordinator();
    let families = match load_families(coordinator.api()).await {
        Ok(families) => families,
        Err(e) => {
            ctx.output.warn(&format!("{:#}", e));
            Vec::new()
        }
    };

    let mut state = QueryState::new();
    if let Some(term) = args.search {
        state = state.with_search(term);
    }
    if let Some(input) = &args.family {
        state = state.toggle_family(resolve_family(&families, input)?.id);
    }
    coordinator = coordinator.with_state(state);
    load(&mut coordinator, ctx).await;

    loop {
        print_view(coordinator.view(), ctx);
        describe_filters(coordinator.state(), &families, ctx);

        let actions = menu(&coordinator);
        let labels: Vec<String> = actions.iter().map(|(_, label)| label.clone()).collect();
        let Some(choice) = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        let action = actions[choice].0;
        if action == Action::Quit {
            return Ok(());
        }
        if let Err(e) = perform(action, &mut coordinator, &families, ctx).await {
            ctx.output.error(&format!("{:#}", e));
        }
    }
}

async fn load(coordinator: &mut QueryCoordinator<HttpCatalogApi>, ctx: &Context) {
    let spinner = ctx.output.spinner("Loading products...");
    coordinator.dispatch().await;
    spinner.finish_and_clear();
}

fn describe_filters(state: &QueryState, families: &[FamilyProduct], ctx: &Context) {
    if let Some(term) = state.term() {
        ctx.output.kv("search", term);
    }
    if let Some(id) = state.family_id {
        let name = families
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| id.to_string());
        ctx.output.kv("family", &name);
    }
}

fn menu(coordinator: &QueryCoordinator<HttpCatalogApi>) -> Vec<(Action, String)> {
    let mut actions = Vec::new();
    let view = coordinator.view();

    if let Some(control) = view.pagination() {
        let nav = control.nav;
        if let Some(page) = nav.next {
            actions.push((Action::Page(page), format!("Next page ({})", page)));
        }
        if let Some(page) = nav.previous {
            actions.push((Action::Page(page), format!("Previous page ({})", page)));
        }
        if let Some(page) = nav.first {
            actions.push((Action::Page(page), "First page".to_string()));
        }
        if let Some(page) = nav.last {
            actions.push((Action::Page(page), format!("Last page ({})", page)));
        }
        actions.push((Action::GoToPage, "Go to page...".to_string()));
    }

    actions.push((Action::Search, "Search...".to_string()));
    if coordinator.state().term().is_some() {
        actions.push((Action::ClearSearch, "Clear search".to_string()));
    }
    let family_label = if coordinator.state().family_id.is_some() {
        "Change or clear family..."
    } else {
        "Filter by family..."
    };
    actions.push((Action::Family, family_label.to_string()));
    actions.push((Action::NewProduct, "New product".to_string()));
    if !view.is_empty() {
        actions.push((Action::EditProduct, "Edit product...".to_string()));
    }
    actions.push((Action::Refresh, "Refresh".to_string()));
    actions.push((Action::Quit, "Quit".to_string()));
    actions
}

async fn perform(
    action: Action,
    coordinator: &mut QueryCoordinator<HttpCatalogApi>,
    families: &[FamilyProduct],
    ctx: &Context,
) -> Result<()> {
    match action {
        Action::Page(page) => {
            coordinator.go_to_page(page).await;
        }
        Action::GoToPage => {
            let total = coordinator
                .view()
                .meta
                .as_ref()
                .map(|m| m.total_pages)
                .unwrap_or(1);
            let page: u32 = Input::new()
                .with_prompt(format!("Page (1-{})", total))
                .validate_with(|p: &u32| -> Result<(), String> {
                    if (1..=total).contains(p) {
                        Ok(())
                    } else {
                        Err(format!("Enter a page between 1 and {}", total))
                    }
                })
                .interact_text()?;
            coordinator.go_to_page(page).await;
        }
        Action::Search => {
            let current = coordinator.state().search_term.clone();
            let term = prompt_text("Search", &current)?;
            coordinator.set_search_term(term).await;
        }
        Action::ClearSearch => {
            coordinator.clear_search().await;
        }
        Action::Family => pick_family(coordinator, families, ctx).await?,
        Action::NewProduct => new_product(coordinator, families, ctx).await?,
        Action::EditProduct => edit_product(coordinator, families, ctx).await?,
        Action::Refresh => load(coordinator, ctx).await,
        Action::Quit => {}
    }
    Ok(())
}

/// Choosing the active family clears it; choosing another switches to it.
async fn pick_family(
    coordinator: &mut QueryCoordinator<HttpCatalogApi>,
    families: &[FamilyProduct],
    ctx: &Context,
) -> Result<()> {
    if families.is_empty() {
        bail!("No families available");
    }
    let needle = prompt_text("Filter families (empty for all)", "")?;
    let candidates: Vec<FamilyProduct> = filter_families(families, &needle)
        .into_iter()
        .cloned()
        .collect();
    let current = coordinator
        .state()
        .family_id
        .and_then(|id| families.iter().find(|f| f.id == id));

    if let Some(family) = choose_family(&candidates, current, ctx)? {
        coordinator.toggle_family(family.id).await;
    }
    Ok(())
}

async fn new_product(
    coordinator: &mut QueryCoordinator<HttpCatalogApi>,
    families: &[FamilyProduct],
    ctx: &Context,
) -> Result<()> {
    let code = coordinator.api().generate_code().await?.code;
    let mut form = CreateProductForm::new(code);
    fill_create_form(&mut form, families, coordinator.api(), ctx).await?;

    let spinner = ctx.output.spinner("Creating product...");
    let result = create_product(coordinator, &form).await;
    spinner.finish_and_clear();

    let response = result?;
    ctx.output.success(&response.message);
    Ok(())
}

async fn edit_product(
    coordinator: &mut QueryCoordinator<HttpCatalogApi>,
    families: &[FamilyProduct],
    ctx: &Context,
) -> Result<()> {
    let products = coordinator.view().products.clone();
    let items: Vec<String> = products
        .iter()
        .map(|p| format!("#{} {} ({})", p.id, p.name, p.family_name))
        .collect();
    let Some(index) = Select::new()
        .with_prompt("Product")
        .items(&items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    let mut form = UpdateProductForm::open(&products[index], families);
    fill_update_form(&mut form, families, coordinator.api(), ctx).await?;

    let spinner = ctx.output.spinner("Updating product...");
    let result = update_product(coordinator, &form).await;
    spinner.finish_and_clear();

    let outcome = result?;
    ctx.output
        .success(&format!("Product {} updated", outcome.product_id));
    Ok(())
}
