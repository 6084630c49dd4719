//! Form extractor accepting multipart, urlencoded and JSON bodies
//!
//! Endpoints declare their fields by name and read them through
//! [`FormData::char_field`] and [`FormData::file_field`], which collect
//! per-field messages into [`FieldErrors`] instead of failing fast.

use std::collections::HashMap;

use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::header,
};
use bytes::Bytes;
use serde_json::Value;

use super::error::{ApiError, ApiErrorType};
use super::fields::{self, FieldErrors};

/// A file part of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    Json(Value),
    File(UploadedFile),
}

/// Request body fields keyed by name. Repeated keys keep the last value.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, FieldValue>,
}

impl FormData {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a required, non-blank string field (surrounding whitespace trimmed)
    pub fn char_field(&self, name: &str, errors: &mut FieldErrors) -> Option<String> {
        let text = match self.fields.get(name) {
            None => {
                errors.add(name, fields::REQUIRED);
                return None;
            }
            Some(FieldValue::Text(text)) | Some(FieldValue::Json(Value::String(text))) => {
                text.trim().to_string()
            }
            Some(FieldValue::Json(Value::Number(number))) => number.to_string(),
            Some(FieldValue::Json(Value::Null)) => {
                errors.add(name, fields::NULL);
                return None;
            }
            Some(FieldValue::Json(_)) | Some(FieldValue::File(_)) => {
                errors.add(name, fields::NOT_A_STRING);
                return None;
            }
        };

        if text.is_empty() {
            errors.add(name, fields::BLANK);
            return None;
        }

        Some(text)
    }

    /// Read a required, non-empty file upload
    pub fn file_field(&self, name: &str, errors: &mut FieldErrors) -> Option<UploadedFile> {
        match self.fields.get(name) {
            Some(FieldValue::File(file)) if file.bytes.is_empty() => {
                errors.add(name, fields::EMPTY_FILE);
                None
            }
            Some(FieldValue::File(file)) => Some(file.clone()),
            None => {
                errors.add(name, fields::NO_FILE);
                None
            }
            Some(FieldValue::Text(text)) if text.is_empty() => {
                errors.add(name, fields::NO_FILE);
                None
            }
            Some(FieldValue::Json(Value::Null)) => {
                errors.add(name, fields::NULL);
                None
            }
            Some(_) => {
                errors.add(name, fields::NOT_A_FILE);
                None
            }
        }
    }

    async fn from_multipart<S: Send + Sync>(req: Request, state: &S) -> Result<Self, ApiError> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), ApiErrorType::InvalidRequestError, e.body_text()))?;

        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let value = match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;

                    FieldValue::File(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    })
                }
                None => FieldValue::Text(field.text().await.map_err(multipart_error)?),
            };

            form.fields.insert(name, value);
        }

        Ok(form)
    }

    async fn from_urlencoded<S: Send + Sync>(req: Request, state: &S) -> Result<Self, ApiError> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), ApiErrorType::InvalidRequestError, e.body_text()))?;

        let fields = pairs
            .into_iter()
            .map(|(name, value)| (name, FieldValue::Text(value)))
            .collect();

        Ok(Self { fields })
    }

    async fn from_json<S: Send + Sync>(req: Request, state: &S) -> Result<Self, ApiError> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), ApiErrorType::InvalidRequestError, e.body_text()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(map)) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(name, value)| (name, FieldValue::Json(value)))
                    .collect(),
            }),
            Ok(_) => Err(ApiError::bad_request("Invalid JSON data: expected an object")
                .with_code("json_parse_error")),
            Err(e) => Err(ApiError::bad_request(format!("Invalid JSON syntax: {}", e))
                .with_code("json_parse_error")),
        }
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::new(
        err.status(),
        ApiErrorType::InvalidRequestError,
        format!("Failed to read multipart field: {}", err.body_text()),
    )
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "multipart/form-data" => Self::from_multipart(req, state).await,
            "application/x-www-form-urlencoded" => Self::from_urlencoded(req, state).await,
            "application/json" | "" => Self::from_json(req, state).await,
            other => Err(ApiError::unsupported_media_type(format!(
                "Unsupported media type \"{}\" in request.",
                other
            ))),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const BOUNDARY: &str = "perception-boundary";

    pub enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    /// Encode a multipart/form-data body; returns the content type and bytes
    pub fn multipart(parts: &[Part<'_>]) -> (String, Vec<u8>) {
        let mut body = Vec::new();

        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n",
                            name, file_name
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        (format!("multipart/form-data; boundary={}", BOUNDARY), body)
    }
}
