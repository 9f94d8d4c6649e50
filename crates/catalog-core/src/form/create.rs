//! Create-product form state.

use crate::catalog::{filter_families, CreateProductDto, FamilyProduct};
use crate::error::{CatalogError, CatalogResult};
use crate::form::{ImageSourceSelector, PendingImage};

/// Local state of the create dialog.
#[derive(Debug, Clone, Default)]
pub struct CreateProductForm {
    /// Product code, prefilled from the code generator.
    pub code: String,
    pub name: String,
    pub family: Option<FamilyProduct>,
    /// Text typed into the family picker.
    pub family_search: String,
    /// Price as typed.
    pub price: String,
    pub image: ImageSourceSelector,
}

impl CreateProductForm {
    /// Fresh form with a generated code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Families matching the picker's search text.
    pub fn visible_families<'a>(&self, families: &'a [FamilyProduct]) -> Vec<&'a FamilyProduct> {
        filter_families(families, &self.family_search)
    }

    pub fn select_family(&mut self, family: FamilyProduct) {
        self.family = Some(family);
        self.family_search.clear();
    }

    /// Set the name; the image search box follows it until edited.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.image.search_term().trim().is_empty() || self.image.search_term() == self.name {
            self.image.set_search_term(name.clone());
        }
        self.name = name;
    }

    /// Validate and build the request DTO.
    pub fn to_dto(&self) -> CatalogResult<CreateProductDto> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(CatalogError::MissingField("codigoMercaderia"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::MissingField("nombre"));
        }
        let family = self
            .family
            .as_ref()
            .ok_or(CatalogError::MissingField("FamiliaProducto"))?;
        let price = parse_price(&self.price)?;

        let (image, remote_image_url) = match self.image.pending() {
            PendingImage::None => (None, None),
            PendingImage::Local(file) => (Some(file.clone()), None),
            PendingImage::Remote(url) => (None, Some(url.clone())),
        };

        Ok(CreateProductDto {
            code: code.to_string(),
            name: name.to_string(),
            family_id: family.id,
            price,
            image,
            remote_image_url,
        })
    }

    /// Clear the form for the next product.
    pub fn reset(&mut self, next_code: impl Into<String>) {
        *self = Self::new(next_code);
    }
}

/// Parse a typed price. Accepts a comma as decimal separator.
pub fn parse_price(text: &str) -> CatalogResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CatalogError::MissingField("precio"));
    }
    let price: f64 = text
        .replace(',', ".")
        .parse()
        .map_err(|_| CatalogError::InvalidPrice(text.to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidPrice(text.to_string()));
    }
    Ok(price)
}
