//! Image search and download helpers.

use catalog_core::catalog::{
    ImageDownloadRequest, ImageDownloadResult, ImageSearchRequest, ImageSearchResult,
    DEFAULT_IMAGE_RESULTS,
};
use catalog_core::form::ImageSourceSelector;
use catalog_core::ProductId;

use crate::api::CatalogApi;
use crate::error::ApiResult;

/// Reverse image search. `num_results` defaults to 5.
pub async fn search_images<A: CatalogApi + ?Sized>(
    api: &A,
    term: &str,
    num_results: Option<u32>,
) -> ApiResult<ImageSearchResult> {
    let request = ImageSearchRequest {
        term: term.trim().to_string(),
        num_results: num_results.unwrap_or(DEFAULT_IMAGE_RESULTS),
    };
    api.search_images(&request).await
}

/// Persist a remote image for a product.
pub async fn download_image<A: CatalogApi + ?Sized>(
    api: &A,
    image_url: impl Into<String>,
    product_id: ProductId,
) -> ApiResult<ImageDownloadResult> {
    let request = ImageDownloadRequest {
        image_url: image_url.into(),
        product_id,
    };
    api.download_image(&request).await
}

/// Run the selector's search. Returns `Ok(false)` when the selector declined
/// to search (blank term or a search already running).
pub async fn run_selector_search<A: CatalogApi + ?Sized>(
    api: &A,
    selector: &mut ImageSourceSelector,
) -> ApiResult<bool> {
    let Some(request) = selector.begin_search() else {
        return Ok(false);
    };
    match api.search_images(&request).await {
        Ok(result) => {
            tracing::debug!(term = %request.term, count = result.images.len(), "image search done");
            selector.finish_search(result);
            Ok(true)
        }
        Err(e) => {
            tracing::error!(term = %request.term, error = %e, "image search failed");
            selector.fail_search();
            Err(e)
        }
    }
}
