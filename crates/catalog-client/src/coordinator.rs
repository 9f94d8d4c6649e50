//! Query coordinator.
//!
//! Owns the `{search_term, family_id, page}` query state, picks the single
//! retrieval call the state resolves to, and replaces the displayed listing
//! with its result.
//!
//! Every issued request carries a sequence number. A result is applied only
//! when it belongs to the most recently issued request, so the products and
//! pagination metadata on screen always come from the same response.

use catalog_core::catalog::Product;
use catalog_core::search::{
    Paginated, PaginationControl, PaginationMeta, QueryState, RetrievalRequest,
};
use catalog_core::FamilyId;

use crate::api::CatalogApi;
use crate::error::ApiResult;

/// What the listing currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingView {
    pub products: Vec<Product>,
    /// `None` when nothing was loaded yet or the last retrieval failed.
    pub meta: Option<PaginationMeta>,
    pub current_page: u32,
    /// A request is outstanding.
    pub loading: bool,
    /// Request whose result is on screen.
    pub last_request: Option<RetrievalRequest>,
}

impl ListingView {
    /// Nothing to show; the empty-state message applies.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Pagination control, hidden for a single page.
    pub fn pagination(&self) -> Option<PaginationControl> {
        self.meta.as_ref().and_then(PaginationControl::from_meta)
    }
}

/// Handle of an issued retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    request: RetrievalRequest,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &RetrievalRequest {
        &self.request
    }
}

/// Coordinates query state, retrieval and the displayed listing.
pub struct QueryCoordinator<A> {
    api: A,
    limit: u32,
    state: QueryState,
    view: ListingView,
    issued: u64,
}

impl<A: CatalogApi> QueryCoordinator<A> {
    pub fn new(api: A, limit: u32) -> Self {
        Self {
            api,
            limit: limit.max(1),
            state: QueryState::new(),
            view: ListingView {
                current_page: 1,
                ..Default::default()
            },
            issued: 0,
        }
    }

    /// Start from `state` instead of the unfiltered first page.
    pub fn with_state(mut self, state: QueryState) -> Self {
        self.view.current_page = state.page.max(1);
        self.state = state;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn view(&self) -> &ListingView {
        &self.view
    }

    /// Resolve the current state and mark a request as outstanding.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.view.loading = true;
        let request = self.state.resolve(self.limit);
        tracing::debug!(
            seq = self.issued,
            branch = request.branch().as_str(),
            page = request.page(),
            "issuing retrieval"
        );
        Ticket {
            seq: self.issued,
            request,
        }
    }

    /// Apply a retrieval result. Returns `false` if the ticket is stale and
    /// the result was discarded.
    ///
    /// Failures are logged and shown as an empty listing without metadata.
    pub fn apply(&mut self, ticket: Ticket, result: ApiResult<Paginated<Product>>) -> bool {
        if ticket.seq != self.issued {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding stale retrieval result"
            );
            return false;
        }

        self.view.loading = false;
        self.view.current_page = ticket.request.page();
        match result {
            Ok(page) => {
                self.view.products = page.data;
                self.view.meta = Some(page.meta);
            }
            Err(e) => {
                tracing::error!(
                    branch = ticket.request.branch().as_str(),
                    error = %e,
                    "retrieval failed"
                );
                self.view.products.clear();
                self.view.meta = None;
            }
        }
        self.view.last_request = Some(ticket.request);
        true
    }

    /// Issue, fetch and apply.
    pub async fn dispatch(&mut self) -> &ListingView {
        let ticket = self.issue();
        let result = self.api.fetch_listing(ticket.request()).await;
        self.apply(ticket, result);
        &self.view
    }

    /// Search from page 1, keeping the family filter.
    pub async fn set_search_term(&mut self, term: impl Into<String>) -> &ListingView {
        self.state = self.state.with_search(term);
        self.dispatch().await
    }

    pub async fn clear_search(&mut self) -> &ListingView {
        self.state = self.state.without_search();
        self.dispatch().await
    }

    /// Select `family`, or clear the filter if it is already selected.
    pub async fn toggle_family(&mut self, family: FamilyId) -> &ListingView {
        self.state = self.state.toggle_family(family);
        self.dispatch().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> &ListingView {
        self.state = self.state.with_page(page);
        self.dispatch().await
    }

    /// Re-run the active query on the same page.
    pub async fn refresh(&mut self) -> &ListingView {
        self.dispatch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};
    use catalog_core::search::{DispatchBranch, PaginationMeta};
    use std::sync::Arc;

    fn coordinator() -> (Arc<FakeApi>, QueryCoordinator<Arc<FakeApi>>) {
        let api = Arc::new(FakeApi::new());
        let coordinator = QueryCoordinator::new(api.clone(), 12);
        (api, coordinator)
    }

    fn branch(coordinator: &QueryCoordinator<Arc<FakeApi>>) -> DispatchBranch {
        coordinator.view().last_request.as_ref().unwrap().branch()
    }

    #[tokio::test]
    async fn test_initial_dispatch_lists_all() {
        let (api, mut coordinator) = coordinator();
        let view = coordinator.dispatch().await;
        assert_eq!(view.products.len(), 12);
        assert_eq!(view.meta.unwrap().total_pages, 3);
        assert!(!view.loading);
        assert_eq!(
            api.calls(),
            vec![Call::List {
                page: 1,
                limit: 12,
                family_id: None
            }]
        );
    }

    #[tokio::test]
    async fn test_precedence_through_transitions() {
        let (api, mut coordinator) = coordinator();
        let bebidas = FamilyId::new(1);

        coordinator.toggle_family(bebidas).await;
        assert_eq!(branch(&coordinator), DispatchBranch::ListByFamily);

        coordinator.set_search_term("cafe").await;
        assert_eq!(branch(&coordinator), DispatchBranch::SearchInFamily);
        assert_eq!(
            api.last_call(),
            Some(Call::Search {
                term: "cafe".to_string(),
                page: 1,
                limit: 12,
                family_id: Some(bebidas)
            })
        );

        coordinator.toggle_family(bebidas).await;
        assert_eq!(branch(&coordinator), DispatchBranch::Search);

        coordinator.clear_search().await;
        assert_eq!(branch(&coordinator), DispatchBranch::ListAll);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let (_api, mut coordinator) = coordinator();
        coordinator.go_to_page(3).await;
        assert_eq!(coordinator.view().current_page, 3);

        coordinator.toggle_family(FamilyId::new(2)).await;
        assert_eq!(coordinator.view().current_page, 1);

        coordinator.go_to_page(2).await;
        coordinator.set_search_term("arroz").await;
        assert_eq!(coordinator.view().current_page, 1);
    }

    #[tokio::test]
    async fn test_refresh_keeps_branch_and_page() {
        let (api, mut coordinator) = coordinator();
        coordinator.toggle_family(FamilyId::new(1)).await;
        coordinator.go_to_page(2).await;
        let before = api.last_call();

        coordinator.refresh().await;
        assert_eq!(api.last_call(), before);
        assert_eq!(coordinator.view().current_page, 2);
    }

    #[tokio::test]
    async fn test_failed_retrieval_shows_empty_state() {
        let (api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        assert!(!coordinator.view().is_empty());

        api.fail_reads(true);
        let view = coordinator.set_search_term("cafe").await;
        assert!(view.is_empty());
        assert_eq!(view.meta, None);
        assert!(!view.loading);
        assert!(view.pagination().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let (_api, mut coordinator) = coordinator();
        let older = coordinator.issue();
        let newer = coordinator.issue();
        assert!(newer.seq() > older.seq());

        let fresh = Paginated::new(Vec::new(), PaginationMeta::new(1, 12, 0));
        assert!(coordinator.apply(newer, Ok(fresh)));

        let stale = Paginated::new(FakeApi::new().products, PaginationMeta::new(1, 12, 30));
        assert!(!coordinator.apply(older, Ok(stale)));
        assert!(coordinator.view().is_empty());
        assert_eq!(coordinator.view().meta.unwrap().total, 0);
    }

    #[test]
    fn test_loading_until_latest_applied() {
        let (_api, mut coordinator) = coordinator();
        let first = coordinator.issue();
        let second = coordinator.issue();
        assert!(coordinator.view().loading);

        coordinator.apply(first, Ok(Paginated::new(Vec::new(), PaginationMeta::new(1, 12, 0))));
        assert!(coordinator.view().loading);

        coordinator.apply(second, Ok(Paginated::new(Vec::new(), PaginationMeta::new(1, 12, 0))));
        assert!(!coordinator.view().loading);
    }

    #[tokio::test]
    async fn test_with_state_dispatches_once() {
        let api = Arc::new(FakeApi::new());
        let state = QueryState::new()
            .with_search("arroz")
            .toggle_family(FamilyId::new(2))
            .with_page(2);
        let mut coordinator = QueryCoordinator::new(api.clone(), 5).with_state(state);
        coordinator.dispatch().await;

        assert_eq!(
            api.calls(),
            vec![Call::Search {
                term: "arroz".to_string(),
                page: 2,
                limit: 5,
                family_id: Some(FamilyId::new(2))
            }]
        );
        assert_eq!(coordinator.view().products.len(), 5);
    }

    #[tokio::test]
    async fn test_pagination_control_from_view() {
        let (_api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        let control = coordinator.view().pagination().unwrap();
        assert_eq!(control.current, 1);
        assert_eq!(control.total, 30);

        coordinator.toggle_family(FamilyId::new(1)).await;
        coordinator.set_search_term("Cafe 2").await;
        assert!(coordinator.view().pagination().is_none());
    }
}
