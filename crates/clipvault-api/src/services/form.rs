//! Multipart form reading and validation for upload endpoints.

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use bytes::{Bytes, BytesMut};
use clipvault_core::constants::{BYTES_PER_MB, MAX_TITLE_LENGTH};
use clipvault_core::AppError;
use std::collections::HashMap;
use validator::Validate;

use crate::error::{multipart_error, multipart_rejection};

const FILE_FIELD: &str = "file";

/// Raw multipart fields: the file part plus every text part by name.
#[derive(Debug, Default)]
pub struct MultipartFields {
    pub file: Option<Bytes>,
    pub text: HashMap<String, String>,
}

impl MultipartFields {
    /// Drain a multipart body, refusing a file part larger than `max_file_bytes`.
    ///
    /// Takes the extractor result so a body that is not multipart at all is
    /// reported here, after the caller has been authenticated.
    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
        max_file_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut multipart = multipart.map_err(multipart_rejection)?;
        let mut fields = MultipartFields::default();

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    if buffer.len() + chunk.len() > max_file_bytes {
                        return Err(AppError::PayloadTooLarge(format!(
                            "File exceeds the {} MB limit",
                            max_file_bytes / BYTES_PER_MB
                        )));
                    }
                    buffer.extend_from_slice(&chunk);
                }
                fields.file = Some(buffer.freeze());
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                fields.text.insert(name, value);
            }
        }

        Ok(fields)
    }

    fn take_text(&mut self, name: &str) -> Option<String> {
        self.text
            .remove(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn take_file(&mut self) -> Result<Bytes, AppError> {
        self.file
            .take()
            .filter(|file| !file.is_empty())
            .ok_or_else(|| AppError::Validation("No file provided".to_string()))
    }
}

#[derive(Debug, Clone, Validate)]
pub struct VideoUploadForm {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    /// Size of the source file in bytes, as reported by the uploader.
    pub original_size: u64,
    pub file: Bytes,
}

impl VideoUploadForm {
    pub fn from_fields(mut fields: MultipartFields) -> Result<Self, AppError> {
        let file = fields.take_file()?;
        let title = fields
            .take_text("title")
            .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
        let original_size = fields
            .take_text("originalSize")
            .ok_or_else(|| AppError::Validation("originalSize is required".to_string()))?
            .parse::<u64>()
            .map_err(|_| {
                AppError::Validation("originalSize must be a non-negative integer".to_string())
            })?;

        let form = VideoUploadForm {
            title,
            description: fields.take_text("description"),
            original_size,
            file,
        };
        form.validate()?;
        Ok(form)
    }

    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
        max_file_bytes: usize,
    ) -> Result<Self, AppError> {
        Self::from_fields(MultipartFields::read(multipart, max_file_bytes).await?)
    }
}

#[derive(Debug, Clone)]
pub struct ImageUploadForm {
    pub file: Bytes,
}

impl ImageUploadForm {
    pub fn from_fields(mut fields: MultipartFields) -> Result<Self, AppError> {
        Ok(ImageUploadForm {
            file: fields.take_file()?,
        })
    }

    pub async fn read(
        multipart: Result<Multipart, MultipartRejection>,
        max_file_bytes: usize,
    ) -> Result<Self, AppError> {
        Self::from_fields(MultipartFields::read(multipart, max_file_bytes).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(file: Option<&'static str>, text: &[(&str, &str)]) -> MultipartFields {
        MultipartFields {
            file: file.map(|f| Bytes::from_static(f.as_bytes())),
            text: text
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_valid_form() {
        let form = VideoUploadForm::from_fields(fields(
            Some("bytes"),
            &[("title", " Demo "), ("description", "A clip"), ("originalSize", "1000")],
        ))
        .unwrap();
        assert_eq!(form.title, "Demo");
        assert_eq!(form.description.as_deref(), Some("A clip"));
        assert_eq!(form.original_size, 1000);
        assert_eq!(form.file.len(), 5);
    }

    #[test]
    fn test_blank_description_is_absent() {
        let form = VideoUploadForm::from_fields(fields(
            Some("x"),
            &[("title", "Demo"), ("description", "   "), ("originalSize", "1")],
        ))
        .unwrap();
        assert!(form.description.is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = VideoUploadForm::from_fields(fields(
            None,
            &[("title", "Demo"), ("originalSize", "1")],
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("No file")));
    }

    #[test]
    fn test_empty_file() {
        let err = VideoUploadForm::from_fields(fields(
            Some(""),
            &[("title", "Demo"), ("originalSize", "1")],
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_blank_title() {
        let err = VideoUploadForm::from_fields(fields(
            Some("x"),
            &[("title", "  "), ("originalSize", "1")],
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Title")));
    }

    #[test]
    fn test_title_too_long() {
        let long_title = "t".repeat(MAX_TITLE_LENGTH as usize + 1);
        let err = VideoUploadForm::from_fields(fields(
            Some("x"),
            &[("title", long_title.as_str()), ("originalSize", "1")],
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_original_size_must_be_numeric() {
        for bad in ["", "-5", "12kb", "1.5"] {
            let err = VideoUploadForm::from_fields(fields(
                Some("x"),
                &[("title", "Demo"), ("originalSize", bad)],
            ))
            .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_image_form_requires_file() {
        assert!(ImageUploadForm::from_fields(fields(None, &[])).is_err());
        assert!(ImageUploadForm::from_fields(fields(Some("png"), &[])).is_ok());
    }
}
