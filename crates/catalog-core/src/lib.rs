//! Catalog domain core.
//!
//! Holds everything about the product catalog that does not touch the
//! network:
//! - `catalog` - Products, families and image DTOs
//! - `search` - `QueryState`, the dispatch resolver and pagination
//! - `form` - Create/update form state, image selection, request payloads
//! - `media` - Photo URL resolution and the remote-pattern allow-list
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//!
//! let state = QueryState::new()
//!     .with_search("cafe")
//!     .toggle_family(FamilyId::new(2));
//!
//! let request = state.resolve(DEFAULT_PAGE_SIZE);
//! assert_eq!(request.branch(), DispatchBranch::SearchInFamily);
//! ```

pub mod catalog;
pub mod error;
pub mod form;
pub mod ids;
pub mod media;
pub mod prelude;
pub mod search;

pub use error::{CatalogError, CatalogResult};
pub use ids::{FamilyId, ProductId};
