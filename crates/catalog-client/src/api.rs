//! Catalog API service interface.

use async_trait::async_trait;
use catalog_core::catalog::{
    CreateProductDto, CreateProductResponse, FamilyProduct, GeneratedCode, ImageDownloadRequest,
    ImageDownloadResult, ImageSearchRequest, ImageSearchResult, Product, UpdateProductDto,
};
use catalog_core::search::{Paginated, RetrievalRequest};
use catalog_core::{FamilyId, ProductId};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiResult;

/// Typed operations of the remote catalog API.
///
/// Implementations are thin: one call, one request. No retry, no caching.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /catalog/products`
    async fn list_products(
        &self,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>>;

    /// `GET /catalog/products/search`
    async fn search_products(
        &self,
        term: &str,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>>;

    /// `GET /catalog/families`
    async fn families(&self) -> ApiResult<Vec<FamilyProduct>>;

    /// `GET /catalog/generate-code`
    async fn generate_code(&self) -> ApiResult<GeneratedCode>;

    /// `POST /catalog/product`
    async fn create_product(&self, dto: &CreateProductDto) -> ApiResult<CreateProductResponse>;

    /// `PATCH /catalog/product/:id`. The response shape is owned by the
    /// server and returned untyped.
    async fn update_product(&self, id: ProductId, dto: &UpdateProductDto) -> ApiResult<Value>;

    /// `POST /catalog/search-image`
    async fn search_images(&self, request: &ImageSearchRequest) -> ApiResult<ImageSearchResult>;

    /// `POST /catalog/download-image`
    async fn download_image(&self, request: &ImageDownloadRequest)
        -> ApiResult<ImageDownloadResult>;

    /// Run the single call a resolved query selects.
    async fn fetch_listing(&self, request: &RetrievalRequest) -> ApiResult<Paginated<Product>> {
        let (page, limit, family_id) = (request.page(), request.limit(), request.family_id());
        match request.term() {
            Some(term) => self.search_products(term, page, limit, family_id).await,
            None => self.list_products(page, limit, family_id).await,
        }
    }
}

#[async_trait]
impl<A: CatalogApi + ?Sized> CatalogApi for Arc<A> {
    async fn list_products(
        &self,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        (**self).list_products(page, limit, family_id).await
    }

    async fn search_products(
        &self,
        term: &str,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        (**self).search_products(term, page, limit, family_id).await
    }

    async fn families(&self) -> ApiResult<Vec<FamilyProduct>> {
        (**self).families().await
    }

    async fn generate_code(&self) -> ApiResult<GeneratedCode> {
        (**self).generate_code().await
    }

    async fn create_product(&self, dto: &CreateProductDto) -> ApiResult<CreateProductResponse> {
        (**self).create_product(dto).await
    }

    async fn update_product(&self, id: ProductId, dto: &UpdateProductDto) -> ApiResult<Value> {
        (**self).update_product(id, dto).await
    }

    async fn search_images(&self, request: &ImageSearchRequest) -> ApiResult<ImageSearchResult> {
        (**self).search_images(request).await
    }

    async fn download_image(
        &self,
        request: &ImageDownloadRequest,
    ) -> ApiResult<ImageDownloadResult> {
        (**self).download_image(request).await
    }
}
