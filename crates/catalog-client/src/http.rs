//! HTTP implementation of [`CatalogApi`].

use async_trait::async_trait;
use catalog_core::catalog::{
    CreateProductDto, CreateProductResponse, FamilyProduct, GeneratedCode, ImageDownloadRequest,
    ImageDownloadResult, ImageSearchRequest, ImageSearchResult, Product, UpdateProductDto,
};
use catalog_core::form::{Payload, IMAGE_FIELD};
use catalog_core::search::{Paginated, RetrievalRequest};
use catalog_core::{FamilyId, ProductId};
use catalog_data::{ClientRequestBuilder, FetchClient, FetchError, MultipartForm, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::CatalogApi;
use crate::error::{ApiError, ApiResult};

const FAMILIES_PATH: &str = "/catalog/families";
const GENERATE_CODE_PATH: &str = "/catalog/generate-code";
const PRODUCT_PATH: &str = "/catalog/product";
const SEARCH_IMAGE_PATH: &str = "/catalog/search-image";
const DOWNLOAD_IMAGE_PATH: &str = "/catalog/download-image";

/// Catalog API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: FetchClient,
}

impl HttpCatalogApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Client with JSON accept header for `base_url`.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self::new(
            FetchClient::new()
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
        )
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    async fn listing(
        &self,
        operation: &'static str,
        request: &RetrievalRequest,
    ) -> ApiResult<Paginated<Product>> {
        let builder = self
            .client
            .get(request.path())
            .query_pairs(request.query_pairs());
        send(operation, builder).await
    }
}

async fn send<T: DeserializeOwned>(
    operation: &'static str,
    builder: ClientRequestBuilder,
) -> ApiResult<T> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::fetch(operation, e))?;
    decode(operation, response)
}

fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> ApiResult<T> {
    response
        .error_for_status()
        .and_then(|r| r.json())
        .map_err(|e| ApiError::fetch(operation, e))
}

/// Attach a payload as JSON or multipart body.
fn with_payload(
    builder: ClientRequestBuilder,
    payload: Payload,
) -> Result<ClientRequestBuilder, FetchError> {
    match payload {
        Payload::Json(value) => builder.json(&value),
        Payload::Multipart { fields, file } => {
            let mut form = MultipartForm::new();
            for (name, value) in fields {
                form = form.text(name, value);
            }
            if let Some(image) = file {
                form = form.file(IMAGE_FIELD, image.file_name, image.mime, image.bytes);
            }
            Ok(builder.multipart(form))
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(
        &self,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        let request = match family_id {
            Some(family_id) => RetrievalRequest::ListByFamily {
                family_id,
                page,
                limit,
            },
            None => RetrievalRequest::ListAll { page, limit },
        };
        self.listing("list_products", &request).await
    }

    async fn search_products(
        &self,
        term: &str,
        page: u32,
        limit: u32,
        family_id: Option<FamilyId>,
    ) -> ApiResult<Paginated<Product>> {
        let term = term.to_string();
        let request = match family_id {
            Some(family_id) => RetrievalRequest::SearchInFamily {
                term,
                family_id,
                page,
                limit,
            },
            None => RetrievalRequest::Search { term, page, limit },
        };
        self.listing("search_products", &request).await
    }

    async fn families(&self) -> ApiResult<Vec<FamilyProduct>> {
        send("families", self.client.get(FAMILIES_PATH)).await
    }

    async fn generate_code(&self) -> ApiResult<GeneratedCode> {
        send("generate_code", self.client.get(GENERATE_CODE_PATH)).await
    }

    async fn create_product(&self, dto: &CreateProductDto) -> ApiResult<CreateProductResponse> {
        const OPERATION: &str = "create_product";
        let builder = with_payload(self.client.post(PRODUCT_PATH), Payload::for_create(dto))
            .map_err(|e| ApiError::fetch(OPERATION, e))?;
        send(OPERATION, builder).await
    }

    async fn update_product(&self, id: ProductId, dto: &UpdateProductDto) -> ApiResult<Value> {
        const OPERATION: &str = "update_product";
        let url = format!("{}/{}", PRODUCT_PATH, id);
        let builder = with_payload(self.client.patch(url), Payload::for_update(dto))
            .map_err(|e| ApiError::fetch(OPERATION, e))?;
        send(OPERATION, builder).await
    }

    async fn search_images(&self, request: &ImageSearchRequest) -> ApiResult<ImageSearchResult> {
        const OPERATION: &str = "search_images";
        let builder = self
            .client
            .post(SEARCH_IMAGE_PATH)
            .json(request)
            .map_err(|e| ApiError::fetch(OPERATION, e))?;
        send(OPERATION, builder).await
    }

    async fn download_image(
        &self,
        request: &ImageDownloadRequest,
    ) -> ApiResult<ImageDownloadResult> {
        const OPERATION: &str = "download_image";
        let builder = self
            .client
            .post(DOWNLOAD_IMAGE_PATH)
            .json(request)
            .map_err(|e| ApiError::fetch(OPERATION, e))?;
        send(OPERATION, builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::catalog::LocalImage;
    use catalog_data::{Body, Part};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single HTTP response and hand back the raw request.
    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= head_end + 4 + content_length
    }

    const PAGE_JSON: &str = r#"{"data":[{"idProducto":1,"nombre":"Cafe","familiaProducto":"Bebidas","precio":"3.50"}],"meta":{"page":2,"limit":12,"total":13,"totalPages":2,"hasNextPage":false,"hasPreviousPage":true}}"#;

    #[tokio::test]
    async fn test_family_scoped_search_request() {
        let (base_url, server) = serve_once(200, PAGE_JSON).await;
        let api = HttpCatalogApi::from_base_url(base_url);

        let page = api
            .search_products("cafe molido", 2, 12, Some(FamilyId::new(3)))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.data[0].price, 3.5);
        assert_eq!(page.meta.total_pages, 2);

        let raw = server.await.unwrap();
        let request_line = raw.lines().next().unwrap();
        assert!(request_line.starts_with("GET /catalog/products/search?"));
        assert!(request_line.contains("term=cafe+molido"));
        assert!(request_line.contains("page=2"));
        assert!(request_line.contains("limit=12"));
        assert!(request_line.contains("idFamiliaProducto=3"));
    }

    #[tokio::test]
    async fn test_list_all_has_no_family_param() {
        let (base_url, server) = serve_once(200, PAGE_JSON).await;
        let api = HttpCatalogApi::from_base_url(base_url);
        api.list_products(1, 12, None).await.unwrap();

        let raw = server.await.unwrap();
        let request_line = raw.lines().next().unwrap();
        assert!(request_line.starts_with("GET /catalog/products?page=1&limit=12 "));
    }

    #[tokio::test]
    async fn test_non_2xx_becomes_api_error() {
        let (base_url, server) = serve_once(500, r#"{"message":"db down"}"#).await;
        let api = HttpCatalogApi::from_base_url(base_url);
        let err = api.families().await.unwrap_err();
        assert_eq!(err.operation(), "families");
        assert_eq!(err.status(), Some(500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_image_search_posts_json() {
        let (base_url, server) =
            serve_once(200, r#"{"images":["https://a/1.jpg"],"count":1,"searchTerm":"cafe"}"#).await;
        let api = HttpCatalogApi::from_base_url(base_url);
        let result = api
            .search_images(&ImageSearchRequest {
                term: "cafe".to_string(),
                num_results: 6,
            })
            .await
            .unwrap();
        assert_eq!(result.images, vec!["https://a/1.jpg"]);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /catalog/search-image "));
        assert!(raw.contains(r#"{"term":"cafe","numResults":6}"#));
    }

    #[tokio::test]
    async fn test_update_without_file_patches_json() {
        let (base_url, server) = serve_once(200, r#"{"ok":true}"#).await;
        let api = HttpCatalogApi::from_base_url(base_url);
        let dto = UpdateProductDto {
            price: Some(9.5),
            ..Default::default()
        };
        let value = api.update_product(ProductId::new(4), &dto).await.unwrap();
        assert_eq!(value["ok"], true);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("PATCH /catalog/product/4 "));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(raw.contains(r#"{"precio":9.5}"#));
    }

    #[test]
    fn test_multipart_payload_carries_file_under_image_field() {
        let payload = Payload::Multipart {
            fields: vec![("nombre".to_string(), "Cafe".to_string())],
            file: Some(LocalImage::new("cafe.png", "image/png", vec![1, 2, 3])),
        };
        let client = FetchClient::new().with_base_url("http://localhost:3001");
        let builder = with_payload(client.post(PRODUCT_PATH), payload).unwrap();

        let Some(Body::Multipart(form)) = builder.request().body_ref() else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("nombre"), Some("Cafe"));
        assert!(form
            .parts()
            .iter()
            .any(|p| matches!(p, Part::File { name, .. } if name == IMAGE_FIELD)));
    }
}
