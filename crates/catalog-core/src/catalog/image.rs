//! Image search, download and local upload types.

use crate::error::{CatalogError, CatalogResult};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Upload ceiling for local image files (5 MB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Default result count of a raw image search call.
pub const DEFAULT_IMAGE_RESULTS: u32 = 5;

/// Result count requested by the image source selector.
pub const SELECTOR_IMAGE_RESULTS: u32 = 6;

/// Body of `POST /catalog/search-image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchRequest {
    pub term: String,
    pub num_results: u32,
}

/// Response of `POST /catalog/search-image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchResult {
    pub images: Vec<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub search_term: String,
}

/// Body of `POST /catalog/download-image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageDownloadRequest {
    pub image_url: String,
    pub product_id: ProductId,
}

/// Descriptor of an image persisted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageDownloadResult {
    pub message: String,
    pub filename: String,
    pub url: String,
    pub thumbnail_url: String,
    pub medium_url: String,
    pub original_url: String,
}

/// A local image file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for LocalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalImage")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl LocalImage {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// The file is not validated here; see [`LocalImage::validate`].
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .map(mime_for_extension)
            .unwrap_or("application/octet-stream");
        Ok(Self::new(file_name, mime, bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Check the MIME type is `image/*` and the size is within the ceiling.
    pub fn validate(&self) -> CatalogResult<()> {
        validate_image(&self.mime, self.size())
    }
}

/// Check an upload candidate by MIME type and size.
pub fn validate_image(mime: &str, size: u64) -> CatalogResult<()> {
    validate_image_within(mime, size, MAX_IMAGE_BYTES)
}

/// Same as [`validate_image`] with a custom ceiling.
pub fn validate_image_within(mime: &str, size: u64, max: u64) -> CatalogResult<()> {
    if !mime.starts_with("image/") {
        return Err(CatalogError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    if size > max {
        return Err(CatalogError::ImageTooLarge { size, max });
    }
    Ok(())
}

/// Guess a MIME type from a file extension.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_search_request_wire_names() {
        let req = ImageSearchRequest {
            term: "cafe".to_string(),
            num_results: 6,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"term": "cafe", "numResults": 6})
        );
    }

    #[test]
    fn test_download_request_wire_names() {
        let req = ImageDownloadRequest {
            image_url: "https://img.example.com/a.jpg".to_string(),
            product_id: ProductId::new(9),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"imageUrl": "https://img.example.com/a.jpg", "productId": 9})
        );
    }

    #[test]
    fn test_download_result_parses() {
        let json = r#"{
            "message": "ok", "filename": "a.webp", "url": "/catalog/images/a.webp",
            "thumbnailUrl": "/t/a.webp", "mediumUrl": "/m/a.webp", "originalUrl": "/o/a.webp"
        }"#;
        let result: ImageDownloadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.medium_url, "/m/a.webp");
    }

    #[test]
    fn test_validate_image_rules() {
        assert!(validate_image("image/png", 1024).is_ok());
        assert!(validate_image("image/jpeg", MAX_IMAGE_BYTES).is_ok());
        assert_eq!(
            validate_image("application/pdf", 10),
            Err(CatalogError::NotAnImage {
                mime: "application/pdf".to_string()
            })
        );
        assert!(matches!(
            validate_image("image/png", MAX_IMAGE_BYTES + 1),
            Err(CatalogError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_local_image_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cafe.PNG");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let image = LocalImage::from_path(&path).unwrap();
        assert_eq!(image.file_name, "Cafe.PNG");
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.size(), 4);
        assert!(image.validate().is_ok());
    }

    #[test]
    fn test_local_image_missing_file() {
        let err = LocalImage::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
