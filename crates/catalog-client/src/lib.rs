//! Catalog API service layer and query coordination.
//!
//! This crate provides:
//! - `CatalogApi` - Typed operations of the remote catalog API
//! - `HttpCatalogApi` - The HTTP implementation over `catalog-data`
//! - `QueryCoordinator` - Query state, dispatch and the displayed listing
//! - `create_product` / `update_product` - Mutation flows with refresh
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_client::{HttpCatalogApi, QueryCoordinator};
//! use catalog_core::FamilyId;
//!
//! let api = HttpCatalogApi::from_base_url("http://localhost:3001");
//! let mut coordinator = QueryCoordinator::new(api, 12);
//!
//! coordinator.toggle_family(FamilyId::new(2)).await;
//! let view = coordinator.set_search_term("cafe").await;
//! println!("{} products", view.products.len());
//! ```

mod api;
mod coordinator;
mod error;
mod http;
mod images;
mod mutation;

#[cfg(test)]
mod testing;

pub use api::*;
pub use coordinator::*;
pub use error::*;
pub use http::*;
pub use images::*;
pub use mutation::*;
