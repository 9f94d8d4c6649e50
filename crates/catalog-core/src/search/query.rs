//! Query state and retrieval request resolution.
//!
//! [`QueryState`] is the immutable snapshot of what the user is looking at
//! (search term, family filter, page). [`QueryState::resolve`] maps it to
//! exactly one [`RetrievalRequest`], following this precedence:
//!
//! 1. family and search term → family-scoped search
//! 2. search term only → search
//! 3. family only → family listing
//! 4. nothing → full listing

use crate::ids::FamilyId;
use serde::{Deserialize, Serialize};

/// Default page size of the product listing.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Listing endpoint.
pub const PRODUCTS_PATH: &str = "/catalog/products";

/// Server-side search endpoint.
pub const SEARCH_PATH: &str = "/catalog/products/search";

/// Snapshot of the active filters and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Raw search box content; blank means no search.
    pub search_term: String,
    /// Selected family, if any.
    pub family_id: Option<FamilyId>,
    /// Current page (1-indexed).
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    /// Unfiltered first page.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            family_id: None,
            page: 1,
        }
    }

    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Replace the search term. Filter changes go back to page 1.
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            family_id: self.family_id,
            page: 1,
        }
    }

    /// Clear the search term, keeping the family filter.
    pub fn without_search(&self) -> Self {
        self.with_search(String::new())
    }

    /// Select `family`, or deselect it when it is already selected.
    pub fn toggle_family(&self, family: FamilyId) -> Self {
        let family_id = if self.family_id == Some(family) {
            None
        } else {
            Some(family)
        };
        Self {
            search_term: self.search_term.clone(),
            family_id,
            page: 1,
        }
    }

    /// Same filters on another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            search_term: self.search_term.clone(),
            family_id: self.family_id,
            page: page.max(1),
        }
    }

    /// The single retrieval operation for this state.
    pub fn resolve(&self, limit: u32) -> RetrievalRequest {
        let page = self.page.max(1);
        match (self.family_id, self.term()) {
            (Some(family_id), Some(term)) => RetrievalRequest::SearchInFamily {
                term: term.to_string(),
                family_id,
                page,
                limit,
            },
            (None, Some(term)) => RetrievalRequest::Search {
                term: term.to_string(),
                page,
                limit,
            },
            (Some(family_id), None) => RetrievalRequest::ListByFamily {
                family_id,
                page,
                limit,
            },
            (None, None) => RetrievalRequest::ListAll { page, limit },
        }
    }
}

/// Kind of retrieval, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchBranch {
    SearchInFamily,
    Search,
    ListByFamily,
    ListAll,
}

impl DispatchBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchBranch::SearchInFamily => "search_in_family",
            DispatchBranch::Search => "search",
            DispatchBranch::ListByFamily => "list_by_family",
            DispatchBranch::ListAll => "list_all",
        }
    }
}

/// One fully parameterized retrieval operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalRequest {
    ListAll {
        page: u32,
        limit: u32,
    },
    ListByFamily {
        family_id: FamilyId,
        page: u32,
        limit: u32,
    },
    Search {
        term: String,
        page: u32,
        limit: u32,
    },
    SearchInFamily {
        term: String,
        family_id: FamilyId,
        page: u32,
        limit: u32,
    },
}

impl RetrievalRequest {
    pub fn branch(&self) -> DispatchBranch {
        match self {
            RetrievalRequest::ListAll { .. } => DispatchBranch::ListAll,
            RetrievalRequest::ListByFamily { .. } => DispatchBranch::ListByFamily,
            RetrievalRequest::Search { .. } => DispatchBranch::Search,
            RetrievalRequest::SearchInFamily { .. } => DispatchBranch::SearchInFamily,
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            RetrievalRequest::ListAll { page, .. }
            | RetrievalRequest::ListByFamily { page, .. }
            | RetrievalRequest::Search { page, .. }
            | RetrievalRequest::SearchInFamily { page, .. } => *page,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            RetrievalRequest::ListAll { limit, .. }
            | RetrievalRequest::ListByFamily { limit, .. }
            | RetrievalRequest::Search { limit, .. }
            | RetrievalRequest::SearchInFamily { limit, .. } => *limit,
        }
    }

    pub fn family_id(&self) -> Option<FamilyId> {
        match self {
            RetrievalRequest::ListByFamily { family_id, .. }
            | RetrievalRequest::SearchInFamily { family_id, .. } => Some(*family_id),
            _ => None,
        }
    }

    pub fn term(&self) -> Option<&str> {
        match self {
            RetrievalRequest::Search { term, .. } | RetrievalRequest::SearchInFamily { term, .. } => {
                Some(term)
            }
            _ => None,
        }
    }

    /// Endpoint path for this request.
    pub fn path(&self) -> &'static str {
        if self.term().is_some() {
            SEARCH_PATH
        } else {
            PRODUCTS_PATH
        }
    }

    /// Query parameters in wire order: `term`, `page`, `limit`, `idFamiliaProducto`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(term) = self.term() {
            pairs.push(("term".to_string(), term.to_string()));
        }
        pairs.push(("page".to_string(), self.page().to_string()));
        pairs.push(("limit".to_string(), self.limit().to_string()));
        if let Some(family_id) = self.family_id() {
            pairs.push(("idFamiliaProducto".to_string(), family_id.to_string()));
        }
        pairs
    }
}
