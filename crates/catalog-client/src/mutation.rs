//! Create and update flows.
//!
//! A successful mutation re-runs the active query on the same page. There is
//! no optimistic update; the listing only changes through the refresh.

use catalog_core::catalog::{CreateProductResponse, ImageDownloadRequest, ImageDownloadResult};
use catalog_core::form::{CreateProductForm, UpdateProductForm};
use catalog_core::ProductId;
use serde_json::Value;

use crate::api::CatalogApi;
use crate::coordinator::QueryCoordinator;
use crate::error::MutationError;

/// Result of an update flow.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub product_id: ProductId,
    /// Server response of the patch; `None` when only a remote image was set.
    pub updated: Option<Value>,
    /// Persisted remote image, if one was picked.
    pub image: Option<ImageDownloadResult>,
}

/// Validate the create form and post it.
pub async fn submit_create<A: CatalogApi + ?Sized>(
    api: &A,
    form: &CreateProductForm,
) -> Result<CreateProductResponse, MutationError> {
    let dto = form.to_dto()?;
    let response = api
        .create_product(&dto)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "create failed"))?;

    tracing::info!(
        id = %response.product.id,
        code = %response.product.code,
        "product created"
    );
    Ok(response)
}

/// Send the changed fields of the update form, then persist a picked
/// remote image.
pub async fn submit_update<A: CatalogApi + ?Sized>(
    api: &A,
    form: &UpdateProductForm,
) -> Result<UpdateOutcome, MutationError> {
    let submission = form.submission()?;
    let product_id = submission.product_id;

    let updated = if submission.changes.is_empty() {
        None
    } else {
        tracing::debug!(
            id = %product_id,
            fields = ?submission.changes.changed_fields(),
            "updating product"
        );
        let value = api
            .update_product(product_id, &submission.changes)
            .await
            .inspect_err(|e| tracing::error!(id = %product_id, error = %e, "update failed"))?;
        Some(value)
    };

    let image = match submission.remote_image_url {
        Some(image_url) => {
            let request = ImageDownloadRequest {
                image_url,
                product_id,
            };
            let result = api.download_image(&request).await.inspect_err(
                |e| tracing::error!(id = %product_id, error = %e, "image download failed"),
            )?;
            Some(result)
        }
        None => None,
    };

    tracing::info!(id = %product_id, "product updated");
    Ok(UpdateOutcome {
        product_id,
        updated,
        image,
    })
}

/// [`submit_create`], then refresh the listing.
pub async fn create_product<A: CatalogApi>(
    coordinator: &mut QueryCoordinator<A>,
    form: &CreateProductForm,
) -> Result<CreateProductResponse, MutationError> {
    let response = submit_create(coordinator.api(), form).await?;
    coordinator.refresh().await;
    Ok(response)
}

/// [`submit_update`], then refresh the listing.
pub async fn update_product<A: CatalogApi>(
    coordinator: &mut QueryCoordinator<A>,
    form: &UpdateProductForm,
) -> Result<UpdateOutcome, MutationError> {
    let outcome = submit_update(coordinator.api(), form).await?;
    coordinator.refresh().await;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};
    use catalog_core::catalog::{FamilyProduct, LocalImage};
    use catalog_core::CatalogError;
    use catalog_core::FamilyId;
    use std::sync::Arc;

    fn coordinator() -> (Arc<FakeApi>, QueryCoordinator<Arc<FakeApi>>) {
        let api = Arc::new(FakeApi::new());
        let coordinator = QueryCoordinator::new(api.clone(), 12);
        (api, coordinator)
    }

    fn create_form() -> CreateProductForm {
        let mut form = CreateProductForm::new("P-0031");
        form.set_name("Cafe de altura");
        form.select_family(FamilyProduct::new(1, "Bebidas"));
        form.price = "18.90".to_string();
        form
    }

    #[tokio::test]
    async fn test_create_refreshes_same_branch_and_page() {
        let (api, mut coordinator) = coordinator();
        coordinator.toggle_family(FamilyId::new(1)).await;
        coordinator.go_to_page(2).await;
        let before = api.last_call().unwrap();

        let response = create_product(&mut coordinator, &create_form()).await.unwrap();
        assert_eq!(response.product.code, "P-0031");

        let calls = api.calls();
        assert!(matches!(calls[calls.len() - 2], Call::Create(_)));
        assert_eq!(calls[calls.len() - 1], before);
        assert_eq!(coordinator.view().current_page, 2);
    }

    #[tokio::test]
    async fn test_invalid_create_sends_nothing() {
        let (api, mut coordinator) = coordinator();
        let mut form = create_form();
        form.price = "gratis".to_string();
        let err = create_product(&mut coordinator, &form).await.unwrap_err();
        assert!(matches!(err, MutationError::Invalid(CatalogError::InvalidPrice(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_does_not_refresh() {
        let (api, mut coordinator) = coordinator();
        api.fail_writes(true);
        let err = create_product(&mut coordinator, &create_form()).await.unwrap_err();
        assert!(matches!(err, MutationError::Api(_)));
        assert!(matches!(api.last_call(), Some(Call::Create(_))));
    }

    #[tokio::test]
    async fn test_update_sends_only_changes_then_refreshes() {
        let (api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        let product = coordinator.view().products[0].clone();

        let mut form = UpdateProductForm::open(&product, &api.families);
        form.price = "99".to_string();
        let outcome = update_product(&mut coordinator, &form).await.unwrap();
        assert!(outcome.updated.is_some());
        assert!(outcome.image.is_none());

        let calls = api.calls();
        let Call::Update(id, changes) = &calls[calls.len() - 2] else {
            panic!("expected update call, got {:?}", calls);
        };
        assert_eq!(*id, product.id);
        assert_eq!(changes.changed_fields(), vec!["precio"]);
        assert!(matches!(calls[calls.len() - 1], Call::List { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_update_with_file_attaches_it() {
        let (api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        let product = coordinator.view().products[0].clone();

        let mut form = UpdateProductForm::open(&product, &api.families);
        form.image
            .select_file(LocalImage::new("a.jpg", "image/jpeg", vec![0; 16]))
            .unwrap();
        update_product(&mut coordinator, &form).await.unwrap();

        let updates: Vec<_> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(_, changes) => Some(changes),
                _ => None,
            })
            .collect();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].image.is_some());
    }

    #[tokio::test]
    async fn test_update_with_remote_image_downloads_it() {
        let (api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        let product = coordinator.view().products[0].clone();

        let mut form = UpdateProductForm::open(&product, &api.families);
        form.image.select_remote_url("https://img.example.com/x.jpg");
        let outcome = update_product(&mut coordinator, &form).await.unwrap();

        assert!(outcome.updated.is_none());
        let image = outcome.image.unwrap();
        assert!(image.medium_url.contains("medium"));
        assert!(api.calls().iter().all(|c| !matches!(c, Call::Update(..))));
        assert!(api.calls().contains(&Call::DownloadImage(ImageDownloadRequest {
            image_url: "https://img.example.com/x.jpg".to_string(),
            product_id: product.id,
        })));
    }

    #[tokio::test]
    async fn test_submit_without_coordinator_does_not_refresh() {
        let api = FakeApi::new();
        let response = submit_create(&api, &create_form()).await.unwrap();
        assert_eq!(response.product.name, "Cafe de altura");
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unchanged_update_is_rejected() {
        let (api, mut coordinator) = coordinator();
        coordinator.dispatch().await;
        let product = coordinator.view().products[0].clone();
        let calls_before = api.calls().len();

        let form = UpdateProductForm::open(&product, &api.families);
        let err = update_product(&mut coordinator, &form).await.unwrap_err();
        assert!(matches!(err, MutationError::Invalid(CatalogError::NothingToUpdate)));
        assert_eq!(api.calls().len(), calls_before);
    }
}
