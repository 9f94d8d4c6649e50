//! Catalog data transfer types.
//!
//! Contains products, families and image types exchanged with the API.

mod family;
mod image;
mod product;

pub use family::{filter_families, find_family, find_family_by_name, resolve_family, FamilyProduct};
pub use image::{
    mime_for_extension, validate_image, validate_image_within, ImageDownloadRequest, ImageDownloadResult,
    ImageSearchRequest, ImageSearchResult, LocalImage, DEFAULT_IMAGE_RESULTS, MAX_IMAGE_BYTES,
    SELECTOR_IMAGE_RESULTS,
};
pub use product::{
    CreateProductDto, CreateProductResponse, CreatedProduct, GeneratedCode, Product,
    UpdateProductDto,
};
