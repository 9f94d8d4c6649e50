//! Service layer error types.

use catalog_core::CatalogError;
use catalog_data::FetchError;
use thiserror::Error;

/// Failure of a catalog API call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request failed or the server answered with a non-2xx status.
    #[error("{operation} failed: {source}")]
    Fetch {
        operation: &'static str,
        #[source]
        source: FetchError,
    },
}

impl ApiError {
    pub fn fetch(operation: &'static str, source: FetchError) -> Self {
        ApiError::Fetch { operation, source }
    }

    /// Name of the API operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::Fetch { operation, .. } => operation,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch { source, .. } => source.status(),
        }
    }
}

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a create or update flow.
#[derive(Error, Debug)]
pub enum MutationError {
    /// Rejected client-side before any request was sent.
    #[error(transparent)]
    Invalid(#[from] CatalogError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::fetch(
            "list_products",
            FetchError::HttpError {
                status: 500,
                message: "boom".to_string(),
            },
        );
        assert_eq!(err.to_string(), "list_products failed: HTTP 500: boom");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.operation(), "list_products");
    }

    #[test]
    fn test_mutation_error_is_transparent() {
        let err: MutationError = CatalogError::NothingToUpdate.into();
        assert_eq!(err.to_string(), "Nothing to update");
    }
}
