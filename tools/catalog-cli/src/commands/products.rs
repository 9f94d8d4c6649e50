//! Product listing and search commands.

use anyhow::Result;
use catalog_client::ListingView;
use catalog_core::search::{filter_locally, PaginationControl, QueryState};

use super::{family_arg, fetch_all_products, ProductsArgs, ProductsCommand};
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List {
            family,
            page,
            limit,
            local_filter: Some(term),
        } => local_filter(&term, family.as_deref(), page, limit, ctx).await,
        ProductsCommand::List {
            family,
            page,
            limit,
            local_filter: None,
        } => listing(None, family.as_deref(), page, limit, ctx).await,
        ProductsCommand::Search {
            term,
            family,
            page,
            limit,
        } => listing(Some(term), family.as_deref(), page, limit, ctx).await,
    }
}

async fn listing(
    term: Option<String>,
    family: Option<&str>,
    page: u32,
    limit: Option<u32>,
    ctx: &Context,
) -> Result<()> {
    let api = ctx.api();
    let mut state = QueryState::new();
    if let Some(term) = term {
        state = state.with_search(term);
    }
    if let Some(input) = family {
        let family = family_arg(&api, input).await?;
        state = state.toggle_family(family.id);
    }
    let state = state.with_page(page);

    let limit = limit.unwrap_or(ctx.config.api.page_size);
    let mut coordinator = catalog_client::QueryCoordinator::new(api, limit).with_state(state);

    let spinner = ctx.output.spinner("Loading products...");
    let view = coordinator.dispatch().await;
    spinner.finish_and_clear();

    print_view(view, ctx);
    Ok(())
}

async fn local_filter(
    term: &str,
    family: Option<&str>,
    page: u32,
    limit: Option<u32>,
    ctx: &Context,
) -> Result<()> {
    let api = ctx.api();
    let family_id = match family {
        Some(input) => Some(family_arg(&api, input).await?.id),
        None => None,
    };
    let limit = limit.unwrap_or(ctx.config.api.page_size);

    let spinner = ctx.output.spinner("Loading products...");
    let products = fetch_all_products(&api, family_id, limit).await;
    spinner.finish_and_clear();

    let result = filter_locally(&products?, term, page, limit);
    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    ctx.output.header(&format!("Products matching \"{}\"", term.trim()));
    ctx.output.products(&result.data, &ctx.media_policy());
    if let Some(control) = PaginationControl::from_meta(&result.meta) {
        ctx.output.pagination(&control);
    }
    Ok(())
}

/// Print a listing view, or its JSON form.
pub fn print_view(view: &ListingView, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&view_json(view));
        return;
    }

    let title = match view.last_request.as_ref() {
        Some(request) => match request.term() {
            Some(term) => format!("Search: \"{}\"", term),
            None => "Products".to_string(),
        },
        None => "Products".to_string(),
    };
    ctx.output.header(&title);

    if let Some(notice) = failure_notice(view, ctx.output.is_verbose()) {
        ctx.output.warn(notice);
    }
    ctx.output.products(&view.products, &ctx.media_policy());
    if let Some(control) = view.pagination() {
        ctx.output.pagination(&control);
    }
}

/// The `{data, meta}` envelope of a listing; `meta` is null after a failed retrieval.
fn view_json(view: &ListingView) -> serde_json::Value {
    serde_json::json!({
        "data": view.products,
        "meta": view.meta,
    })
}

fn failure_notice(view: &ListingView, verbose: bool) -> Option<&'static str> {
    if view.meta.is_some() {
        return None;
    }
    Some(if verbose {
        "Could not load products."
    } else {
        "Could not load products. Run with --verbose for details."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::search::PaginationMeta;

    fn failed_view() -> ListingView {
        ListingView {
            products: Vec::new(),
            meta: None,
            current_page: 1,
            loading: false,
            last_request: Some(QueryState::new().with_search("cafe").resolve(12)),
        }
    }

    #[test]
    fn test_failed_listing_renders_empty_envelope() {
        let view = failed_view();
        assert!(view.is_empty());
        assert!(view.pagination().is_none());
        assert_eq!(view_json(&view), serde_json::json!({"data": [], "meta": null}));
        assert_eq!(
            failure_notice(&view, false),
            Some("Could not load products. Run with --verbose for details.")
        );
        assert_eq!(failure_notice(&view, true), Some("Could not load products."));
    }

    #[test]
    fn test_loaded_listing_has_no_failure_notice() {
        let mut view = failed_view();
        view.meta = Some(PaginationMeta::new(1, 12, 0));
        assert_eq!(failure_notice(&view, false), None);
        assert_eq!(view_json(&view)["meta"]["total"], 0);
    }
}
