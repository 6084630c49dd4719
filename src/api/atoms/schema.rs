//! Request bodies of the perception endpoints
//!
//! Every field of a body is checked before any error is reported, so a
//! client sees all problems at once.

use tracing::debug;

use crate::api::types::{FieldErrors, FormData, UploadedFile, fields};
use crate::domain::{DecodedImage, DomainError, EngineConfigurations};

/// An uploaded image plus engine configuration
#[derive(Debug)]
pub struct ImageUpload {
    pub image: DecodedImage,
    pub file_name: String,
    pub engine_configurations: EngineConfigurations,
}

impl ImageUpload {
    pub async fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let file = form.file_field("image", &mut errors);
        let raw_configurations = form.char_field("engine_configurations", &mut errors);
        let image = match &file {
            Some(file) => decode_upload(file, &mut errors).await,
            None => None,
        };

        match (file, image, raw_configurations) {
            (Some(file), Some(image), Some(raw)) => Ok(Self {
                image,
                file_name: file.file_name,
                engine_configurations: EngineConfigurations::parse(&raw),
            }),
            _ => Err(errors),
        }
    }
}

/// A face to enroll, referenced by a path the engine can read
#[derive(Debug)]
pub struct FaceEnrollment {
    pub image_path: String,
    pub person_name: String,
    pub engine_configurations: EngineConfigurations,
}

impl FaceEnrollment {
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let image_path = form.char_field("image_path", &mut errors);
        let raw_configurations = form.char_field("engine_configurations", &mut errors);
        let person_name = form.char_field("person_name", &mut errors);

        match (image_path, raw_configurations, person_name) {
            (Some(image_path), Some(raw), Some(person_name)) => Ok(Self {
                image_path,
                person_name,
                engine_configurations: EngineConfigurations::parse(&raw),
            }),
            _ => Err(errors),
        }
    }
}

/// An image referenced by path
#[derive(Debug)]
pub struct ImagePath {
    pub image_path: String,
    pub engine_configurations: EngineConfigurations,
}

impl ImagePath {
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let image_path = form.char_field("image_path", &mut errors);
        let raw_configurations = form.char_field("engine_configurations", &mut errors);

        match (image_path, raw_configurations) {
            (Some(image_path), Some(raw)) => Ok(Self {
                image_path,
                engine_configurations: EngineConfigurations::parse(&raw),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug)]
pub struct IntentText {
    pub text: String,
    pub engine_configurations: EngineConfigurations,
}

impl IntentText {
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let raw_configurations = form.char_field("engine_configurations", &mut errors);
        let text = form.char_field("text", &mut errors);

        match (raw_configurations, text) {
            (Some(raw), Some(text)) => Ok(Self {
                text,
                engine_configurations: EngineConfigurations::parse(&raw),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug)]
pub struct SpokenText {
    pub text: String,
}

impl SpokenText {
    pub fn from_form(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        match form.char_field("text", &mut errors) {
            Some(text) => Ok(Self { text }),
            None => Err(errors),
        }
    }
}

/// Decode an upload off the async runtime; failures become an `image` field error
async fn decode_upload(file: &UploadedFile, errors: &mut FieldErrors) -> Option<DecodedImage> {
    let bytes = file.bytes.clone();

    let decoded = tokio::task::spawn_blocking(move || DecodedImage::decode(&bytes))
        .await
        .unwrap_or_else(|e| Err(DomainError::internal(e.to_string())));

    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            debug!(file_name = %file.file_name, error = %e, "Rejected undecodable upload");
            errors.add("image", fields::INVALID_IMAGE);
            None
        }
    }
}
