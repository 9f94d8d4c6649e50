//! Product families (flat category list).

use crate::error::{CatalogError, CatalogResult};
use crate::ids::FamilyId;
use serde::{Deserialize, Serialize};

/// A product family as returned by `GET /catalog/families`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyProduct {
    #[serde(rename = "idFamiliaProducto")]
    pub id: FamilyId,
    #[serde(rename = "nombreFamilia")]
    pub name: String,
}

impl FamilyProduct {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: FamilyId::new(id),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match on the family name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        needle.is_empty() || self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Families whose name contains `needle` (all of them for a blank needle).
pub fn filter_families<'a>(families: &'a [FamilyProduct], needle: &str) -> Vec<&'a FamilyProduct> {
    families.iter().filter(|f| f.matches(needle)).collect()
}

/// Family with exactly this display name.
pub fn find_family_by_name<'a>(families: &'a [FamilyProduct], name: &str) -> Option<&'a FamilyProduct> {
    families.iter().find(|f| f.name == name)
}

/// Family with this id.
pub fn find_family<'a>(families: &'a [FamilyProduct], id: FamilyId) -> Option<&'a FamilyProduct> {
    families.iter().find(|f| f.id == id)
}

/// Resolve user input that is either a numeric id or a family name.
///
/// Names are compared case-insensitively.
pub fn resolve_family<'a>(families: &'a [FamilyProduct], input: &str) -> CatalogResult<&'a FamilyProduct> {
    let input = input.trim();
    if let Ok(id) = input.parse::<FamilyId>() {
        if let Some(family) = find_family(families, id) {
            return Ok(family);
        }
    }
    let lowered = input.to_lowercase();
    families
        .iter()
        .find(|f| f.name.to_lowercase() == lowered)
        .ok_or_else(|| CatalogError::FamilyNotFound(input.to_string()))
}
