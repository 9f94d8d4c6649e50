//! Image source selection shared by the create and update forms.
//!
//! Two acquisition paths feed one pending-image slot: picking a candidate
//! from a reverse image search, or selecting a local file. Picking from one
//! path replaces whatever the other path had put there.

use crate::catalog::{ImageSearchRequest, ImageSearchResult, LocalImage, SELECTOR_IMAGE_RESULTS};
use crate::error::CatalogResult;

/// Image waiting to be attached on submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingImage {
    #[default]
    None,
    /// Remote URL chosen from search results.
    Remote(String),
    /// Validated local file.
    Local(LocalImage),
}

impl PendingImage {
    pub fn is_none(&self) -> bool {
        matches!(self, PendingImage::None)
    }

    pub fn remote_url(&self) -> Option<&str> {
        match self {
            PendingImage::Remote(url) => Some(url),
            _ => None,
        }
    }

    pub fn local_file(&self) -> Option<&LocalImage> {
        match self {
            PendingImage::Local(image) => Some(image),
            _ => None,
        }
    }
}

/// State of the image source selector.
#[derive(Debug, Clone, Default)]
pub struct ImageSourceSelector {
    search_term: String,
    results: Vec<String>,
    searching: bool,
    pending: PendingImage,
    result_count: Option<u32>,
}

impl ImageSourceSelector {
    /// New selector with the search box prefilled (usually the product name).
    pub fn new(default_term: impl Into<String>) -> Self {
        Self {
            search_term: default_term.into(),
            ..Default::default()
        }
    }

    /// Candidates requested per search; defaults to [`SELECTOR_IMAGE_RESULTS`].
    pub fn set_result_count(&mut self, count: u32) {
        self.result_count = (count > 0).then_some(count);
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn pending(&self) -> &PendingImage {
        &self.pending
    }

    /// Start a search. Returns `None` for a blank term or while a search
    /// is already running.
    pub fn begin_search(&mut self) -> Option<ImageSearchRequest> {
        let term = self.search_term.trim();
        if term.is_empty() || self.searching {
            return None;
        }
        self.searching = true;
        Some(ImageSearchRequest {
            term: term.to_string(),
            num_results: self.result_count.unwrap_or(SELECTOR_IMAGE_RESULTS),
        })
    }

    /// Store search results. A previously chosen remote URL is dropped since
    /// it belongs to the old result set.
    pub fn finish_search(&mut self, result: ImageSearchResult) {
        self.searching = false;
        self.results = result.images;
        if matches!(self.pending, PendingImage::Remote(_)) {
            self.pending = PendingImage::None;
        }
    }

    /// Search failed; results and selection stay as they were.
    pub fn fail_search(&mut self) {
        self.searching = false;
    }

    /// Pick the candidate at `index`. Replaces any local file.
    pub fn select_result(&mut self, index: usize) -> Option<&str> {
        let url = self.results.get(index)?.clone();
        self.pending = PendingImage::Remote(url);
        self.pending.remote_url()
    }

    /// Pick a remote URL directly. Replaces any local file.
    pub fn select_remote_url(&mut self, url: impl Into<String>) {
        self.pending = PendingImage::Remote(url.into());
    }

    /// Pick a local file. Rejected files leave the slot untouched.
    pub fn select_file(&mut self, image: LocalImage) -> CatalogResult<()> {
        image.validate()?;
        self.pending = PendingImage::Local(image);
        Ok(())
    }

    /// Drop the pending image.
    pub fn clear(&mut self) {
        self.pending = PendingImage::None;
    }

    /// Reset everything except the search term.
    pub fn reset(&mut self) {
        self.results.clear();
        self.searching = false;
        self.pending = PendingImage::None;
    }
}
