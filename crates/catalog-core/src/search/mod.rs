//! Search module.
//!
//! Contains the query resolver, pagination types and the client-side filter.

mod filter;
mod query;
mod results;

pub use filter::{filter_locally, matches_term};
pub use query::{
    DispatchBranch, QueryState, RetrievalRequest, DEFAULT_PAGE_SIZE, PRODUCTS_PATH, SEARCH_PATH,
};
pub use results::{
    page_window, PageItem, PageNav, Paginated, PaginationControl, PaginationMeta,
    MAX_VISIBLE_PAGES,
};
