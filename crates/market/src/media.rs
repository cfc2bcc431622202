//! Image file to data URL conversion.
//!
//! Uploaded avatars and listing photos are stored inline as
//! `data:<mime>;base64,<payload>` strings, so the store stays self-contained.

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::Result;

/// Fallback MIME type for unknown extensions.
const OCTET_STREAM: &str = "application/octet-stream";

/// Read a file and encode it as a data URL.
///
/// The MIME type is derived from the file extension.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read.
pub async fn file_to_data_url(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_guess::from_path(path).first_raw().unwrap_or(OCTET_STREAM);

    tracing::debug!(path = %path.display(), mime, size = bytes.len(), "Encoded image");
    Ok(to_data_url(mime, &bytes))
}

/// Encode raw bytes as a data URL.
#[must_use]
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an optional upload, yielding an empty string when none was given.
///
/// # Errors
///
/// Returns `AppError::Io` if a file was given but cannot be read.
pub async fn optional_upload(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => file_to_data_url(path).await,
        None => Ok(String::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[tokio::test]
    async fn test_file_to_data_url_uses_extension() {
        let temp = TempDir::new().unwrap();
        let png = temp.path().join("avatar.png");
        let jpg = temp.path().join("photo.JPG");
        let other = temp.path().join("blob.craftify-unknown");
        for path in [&png, &jpg, &other] {
            tokio::fs::write(path, b"abc").await.unwrap();
        }

        assert_eq!(
            file_to_data_url(&png).await.unwrap(),
            "data:image/png;base64,YWJj"
        );
        assert!(
            file_to_data_url(&jpg)
                .await
                .unwrap()
                .starts_with("data:image/jpeg;base64,")
        );
        assert!(
            file_to_data_url(&other)
                .await
                .unwrap()
                .starts_with("data:application/octet-stream;base64,")
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = file_to_data_url(temp.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_optional_upload() {
        assert_eq!(optional_upload(None).await.unwrap(), "");
    }
}
