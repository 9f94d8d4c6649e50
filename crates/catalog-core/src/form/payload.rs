//! Request bodies for product mutations.

use crate::catalog::{CreateProductDto, LocalImage, UpdateProductDto};
use serde_json::{json, Map, Value};

/// Multipart field carrying the uploaded image file.
pub const IMAGE_FIELD: &str = "image";

/// Multipart field carrying a remote image URL picked from image search.
pub const REMOTE_IMAGE_FIELD: &str = "googleImageUrl";

/// Body of a create/update request, decided once at submit time.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json` body.
    Json(Value),
    /// `multipart/form-data` body: text fields plus an optional image file.
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<LocalImage>,
    },
}

impl Payload {
    /// Create requests are always multipart so either image source fits.
    pub fn for_create(dto: &CreateProductDto) -> Self {
        let mut fields = vec![
            ("codigoMercaderia".to_string(), dto.code.clone()),
            ("nombre".to_string(), dto.name.clone()),
            ("FamiliaProducto".to_string(), dto.family_id.to_string()),
            ("precio".to_string(), format_price(dto.price)),
        ];
        if let Some(url) = &dto.remote_image_url {
            fields.push((REMOTE_IMAGE_FIELD.to_string(), url.clone()));
        }
        Payload::Multipart {
            fields,
            file: dto.image.clone(),
        }
    }

    /// Update requests are multipart only when a file is attached.
    pub fn for_update(dto: &UpdateProductDto) -> Self {
        if !update_needs_multipart(dto) {
            let mut body = Map::new();
            if let Some(name) = &dto.name {
                body.insert("nombre".to_string(), json!(name));
            }
            if let Some(family_id) = dto.family_id {
                body.insert("FamiliaProducto".to_string(), json!(family_id.get()));
            }
            if let Some(price) = dto.price {
                body.insert("precio".to_string(), json!(price));
            }
            return Payload::Json(Value::Object(body));
        }

        let mut fields = Vec::new();
        if let Some(name) = &dto.name {
            fields.push(("nombre".to_string(), name.clone()));
        }
        if let Some(family_id) = dto.family_id {
            fields.push(("FamiliaProducto".to_string(), family_id.to_string()));
        }
        if let Some(price) = dto.price {
            fields.push(("precio".to_string(), format_price(price)));
        }
        Payload::Multipart {
            fields,
            file: dto.image.clone(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart { .. })
    }

    /// Value of a text field, whichever encoding is used.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            Payload::Json(value) => value.get(name).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            Payload::Multipart { fields, .. } => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone()),
        }
    }

    pub fn file(&self) -> Option<&LocalImage> {
        match self {
            Payload::Multipart { file, .. } => file.as_ref(),
            Payload::Json(_) => None,
        }
    }
}

/// An update is sent as multipart exactly when it carries a file.
pub fn update_needs_multipart(dto: &UpdateProductDto) -> bool {
    dto.image.is_some()
}

fn format_price(price: f64) -> String {
    format!("{}", price)
}
