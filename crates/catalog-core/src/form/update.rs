//! Update-product form state and change detection.

use crate::catalog::{filter_families, find_family_by_name, FamilyProduct, Product, UpdateProductDto};
use crate::error::{CatalogError, CatalogResult};
use crate::form::{parse_price, ImageSourceSelector, PendingImage};
use crate::ids::ProductId;

/// What an update submit sends.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSubmission {
    pub product_id: ProductId,
    /// Changed fields, plus the local image if one was picked.
    pub changes: UpdateProductDto,
    /// Remote image to persist after the patch.
    pub remote_image_url: Option<String>,
}

/// Local state of the update dialog, seeded from the product being edited.
#[derive(Debug, Clone)]
pub struct UpdateProductForm {
    original: Product,
    original_family: Option<FamilyProduct>,
    pub name: String,
    pub price: String,
    pub family: Option<FamilyProduct>,
    pub family_search: String,
    pub image: ImageSourceSelector,
}

impl UpdateProductForm {
    /// Seed the form from `product`. The family is matched by name against
    /// the loaded families.
    pub fn open(product: &Product, families: &[FamilyProduct]) -> Self {
        let family = find_family_by_name(families, &product.family_name).cloned();
        Self {
            original: product.clone(),
            original_family: family.clone(),
            name: product.name.clone(),
            price: product.price.to_string(),
            family,
            family_search: String::new(),
            image: ImageSourceSelector::new(product.name.clone()),
        }
    }

    pub fn product(&self) -> &Product {
        &self.original
    }

    pub fn visible_families<'a>(&self, families: &'a [FamilyProduct]) -> Vec<&'a FamilyProduct> {
        filter_families(families, &self.family_search)
    }

    pub fn select_family(&mut self, family: FamilyProduct) {
        self.family = Some(family);
        self.family_search.clear();
    }

    /// Fields that differ from the product as opened.
    pub fn diff(&self) -> CatalogResult<UpdateProductDto> {
        let mut changes = UpdateProductDto::default();

        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::MissingField("nombre"));
        }
        if name != self.original.name {
            changes.name = Some(name.to_string());
        }

        let price = parse_price(&self.price)?;
        if (price - self.original.price).abs() > f64::EPSILON {
            changes.price = Some(price);
        }

        if let Some(family) = &self.family {
            let unchanged = self
                .original_family
                .as_ref()
                .is_some_and(|original| original.id == family.id);
            if !unchanged {
                changes.family_id = Some(family.id);
            }
        }

        if let PendingImage::Local(file) = self.image.pending() {
            changes.image = Some(file.clone());
        }

        Ok(changes)
    }

    /// Build the submission, or `NothingToUpdate` when nothing changed.
    pub fn submission(&self) -> CatalogResult<UpdateSubmission> {
        let changes = self.diff()?;
        let remote_image_url = self.image.pending().remote_url().map(str::to_string);
        if changes.is_empty() && remote_image_url.is_none() {
            return Err(CatalogError::NothingToUpdate);
        }
        Ok(UpdateSubmission {
            product_id: self.original.id,
            changes,
            remote_image_url,
        })
    }
}
