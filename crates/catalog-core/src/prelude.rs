//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//! ```

pub use crate::catalog::{
    FamilyProduct, ImageDownloadResult, ImageSearchResult, LocalImage, Product, UpdateProductDto,
};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::form::{CreateProductForm, ImageSourceSelector, Payload, PendingImage, UpdateProductForm};
pub use crate::ids::{FamilyId, ProductId};
pub use crate::media::MediaPolicy;
pub use crate::search::{
    DispatchBranch, Paginated, PaginationControl, PaginationMeta, QueryState, RetrievalRequest,
    DEFAULT_PAGE_SIZE,
};
