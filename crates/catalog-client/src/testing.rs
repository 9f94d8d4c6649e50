//! In-memory catalog API for tests.

use async_trait::async_trait;
use catalog_core::catalog::{
    find_family, CreateProductDto, CreateProductResponse, CreatedProduct, FamilyProduct,
    GeneratedCode, ImageDownloadRequest, ImageDownloadResult, ImageSearchRequest,
    ImageSearchResult, Product, UpdateProductDto,
};
use catalog_core::search::{filter_locally, Paginated};
use catalog_core::{FamilyId, ProductId};
use catalog_data::FetchError;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::api::CatalogApi;
use crate::error::{ApiError, ApiResult};

/// A recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List {
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    },
    Search {
        term: String,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    },
    Families,
    GenerateCode,
    Create(CreateProductDto),
    Update(ProductId, UpdateProductDto),
    SearchImages(ImageSearchRequest),
    DownloadImage(ImageDownloadRequest),
}

pub struct FakeApi {
    pub products: Vec<Product>,
    pub families: Vec<FamilyProduct>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let families = vec![FamilyProduct::new(1, "Bebidas"), FamilyProduct::new(2, "Abarrotes")];
        let products = (1..=30)
            .map(|i| Product {
                id: ProductId::new(i),
                name: if i % 2 == 0 {
                    format!("Cafe {}", i)
                } else {
                    format!("Arroz {}", i)
                },
                family_name: if i % 2 == 0 { "Bebidas" } else { "Abarrotes" }.to_string(),
                price: i as f64,
                photo: None,
                photo_url: None,
                photo_thumbnail: None,
                photo_medium: None,
                photo_original: None,
            })
            .collect();
        Self {
            products,
            families,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, flag: &AtomicBool, operation: &'static str) -> ApiResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(ApiError::fetch(
                operation,
                FetchError::HttpError {
                    status: 500,
                    message: "fake failure".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn in_family(&self, family_id: Option<FamilyId>) -> Vec<Product> {
        let family = family_id.and_then(|id| find_family(&self.families, id));
        self.products
            .iter()
            .filter(|p| family.map_or(true, |f| f.name == p.family_name))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_products(
        &self,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        self.record(Call::List {
            page,
            limit,
            family_id,
        });
        self.check(&self.fail_reads, "list_products")?;
        Ok(filter_locally(&self.in_family(family_id), "", page, limit))
    }

    async fn search_products(
        &self,
        term: &str,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        self.record(Call::Search {
            term: term.to_string(),
            page,
            limit,
            family_id,
        });
        self.check(&self.fail_reads, "search_products")?;
        Ok(filter_locally(&self.in_family(family_id), term, page, limit))
    }

    async fn families(&self) -> ApiResult<Vec<FamilyProduct>> {
        self.record(Call::Families);
        self.check(&self.fail_reads, "families")?;
        Ok(self.families.clone())
    }

    async fn generate_code(&self) -> ApiResult<GeneratedCode> {
        self.record(Call::GenerateCode);
        self.check(&self.fail_reads, "generate_code")?;
        Ok(GeneratedCode {
            code: "P-0031".to_string(),
        })
    }

    async fn create_product(&self, dto: &CreateProductDto) -> ApiResult<CreateProductResponse> {
        self.record(Call::Create(dto.clone()));
        self.check(&self.fail_writes, "create_product")?;
        Ok(CreateProductResponse {
            message: "Producto creado".to_string(),
            product: CreatedProduct {
                id: ProductId::new(31),
                code: dto.code.clone(),
                name: dto.name.clone(),
                price: dto.price,
                photo: None,
                photo_url: None,
                photo_thumbnail: None,
                photo_medium: None,
                photo_original: None,
            },
        })
    }

    async fn update_product(&self, id: ProductId, dto: &UpdateProductDto) -> ApiResult<Value> {
        self.record(Call::Update(id, dto.clone()));
        self.check(&self.fail_writes, "update_product")?;
        Ok(serde_json::json!({ "idProducto": id.get() }))
    }

    async fn search_images(&self, request: &ImageSearchRequest) -> ApiResult<ImageSearchResult> {
        self.record(Call::SearchImages(request.clone()));
        self.check(&self.fail_reads, "search_images")?;
        let images: Vec<String> = (1..=request.num_results)
            .map(|i| format!("https://img.example.com/{}/{}.jpg", request.term, i))
            .collect();
        Ok(ImageSearchResult {
            count: images.len() as u32,
            images,
            search_term: request.term.clone(),
        })
    }

    async fn download_image(
        &self,
        request: &ImageDownloadRequest,
    ) -> ApiResult<ImageDownloadResult> {
        self.record(Call::DownloadImage(request.clone()));
        self.check(&self.fail_writes, "download_image")?;
        let filename = format!("{}.webp", request.product_id);
        Ok(ImageDownloadResult {
            message: "Imagen descargada".to_string(),
            url: format!("/catalog/images/{}", filename),
            thumbnail_url: format!("/catalog/images/thumb/{}", filename),
            medium_url: format!("/catalog/images/medium/{}", filename),
            original_url: format!("/catalog/images/original/{}", filename),
            filename,
        })
    }
}
