//! Capability traits implemented by perception engines

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::perception::{
    DecodedImage, GestureRecognitionResult, ObjectDetectionResult, RecognizedFaces,
    RecognizedIntent, TextRecognitionResult,
};

/// Detects objects in a BGR bitmap
#[async_trait]
pub trait ObjectDetectionEngine: Send + Sync + Debug {
    async fn get_detected_objects(
        &self,
        image: &DecodedImage,
    ) -> Result<ObjectDetectionResult, DomainError>;
}

/// Recognizes known faces and enrolls new ones
#[async_trait]
pub trait FaceRecognitionEngine: Send + Sync + Debug {
    async fn recognize_face(&self, image: &DecodedImage) -> Result<RecognizedFaces, DomainError>;

    /// Enroll the face found in the image at `image_path` under `person_name`
    async fn remember_face(
        &self,
        image_path: &str,
        person_name: &str,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait IntentRecognitionEngine: Send + Sync + Debug {
    async fn recognize_intent(&self, text: &str) -> Result<RecognizedIntent, DomainError>;
}

/// Reads text from an image file resident on the serving host
#[async_trait]
pub trait TextRecognitionEngine: Send + Sync + Debug {
    async fn recognize_text(&self, image_path: &str) -> Result<TextRecognitionResult, DomainError>;
}

/// Extracts hand gestures and landmarks from an RGB bitmap
#[async_trait]
pub trait HandFeatureExtractionEngine: Send + Sync + Debug {
    async fn get_gesture(
        &self,
        image: &DecodedImage,
    ) -> Result<GestureRecognitionResult, DomainError>;
}

#[async_trait]
pub trait VoiceGenerationEngine: Send + Sync + Debug {
    async fn say(&self, text: &str) -> Result<(), DomainError>;
}
