//! Product types and mutation payloads.

use crate::catalog::LocalImage;
use crate::ids::{FamilyId, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

/// A product as listed by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Server-assigned product id.
    #[serde(rename = "idProducto")]
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Name of the family the product belongs to.
    #[serde(rename = "familiaProducto", default)]
    pub family_name: String,
    /// Unit price.
    #[serde(rename = "precio", deserialize_with = "number_or_string")]
    pub price: f64,
    /// Legacy photo path.
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "fotoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "fotoThumbnail", default)]
    pub photo_thumbnail: Option<String>,
    #[serde(rename = "fotoMedium", default)]
    pub photo_medium: Option<String>,
    #[serde(rename = "fotoOriginal", default)]
    pub photo_original: Option<String>,
}

impl Product {
    /// Best photo path for a detail preview (medium first).
    pub fn preview_photo(&self) -> Option<&str> {
        first_present(&[
            &self.photo_medium,
            &self.photo_url,
            &self.photo_original,
            &self.photo_thumbnail,
            &self.photo,
        ])
    }

    /// Best photo path for a list card (thumbnail first).
    pub fn card_photo(&self) -> Option<&str> {
        first_present(&[
            &self.photo_thumbnail,
            &self.photo_medium,
            &self.photo_url,
            &self.photo_original,
            &self.photo,
        ])
    }

    /// Whether the product has any photo at all.
    pub fn has_photo(&self) -> bool {
        self.card_photo().is_some()
    }
}

fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
}

/// Prices arrive as JSON numbers or as decimal strings depending on the
/// backend's numeric column type.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Payload for `POST /catalog/product`.
///
/// At most one of `image` and `remote_image_url` is set when built through
/// the create form.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductDto {
    pub code: String,
    pub name: String,
    pub family_id: FamilyId,
    pub price: f64,
    pub image: Option<LocalImage>,
    pub remote_image_url: Option<String>,
}

/// Summary of the created product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedProduct {
    pub id: ProductId,
    #[serde(rename = "codigoMercaderia")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "fotoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "fotoThumbnail", default)]
    pub photo_thumbnail: Option<String>,
    #[serde(rename = "fotoMedium", default)]
    pub photo_medium: Option<String>,
    #[serde(rename = "fotoOriginal", default)]
    pub photo_original: Option<String>,
}

/// Response of `POST /catalog/product`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProductResponse {
    pub message: String,
    #[serde(rename = "producto")]
    pub product: CreatedProduct,
}

/// Partial update for `PATCH /catalog/product/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateProductDto {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "FamiliaProducto", skip_serializing_if = "Option::is_none")]
    pub family_id: Option<FamilyId>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip)]
    pub image: Option<LocalImage>,
}

impl UpdateProductDto {
    /// True when no field and no image is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.family_id.is_none() && self.price.is_none() && self.image.is_none()
    }

    /// Names of the wire fields this update touches.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("nombre");
        }
        if self.family_id.is_some() {
            fields.push("FamiliaProducto");
        }
        if self.price.is_some() {
            fields.push("precio");
        }
        if self.image.is_some() {
            fields.push("image");
        }
        fields
    }
}

/// Response of `GET /catalog/generate-code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedCode {
    #[serde(rename = "codigo")]
    pub code: String,
}
