//! Engines backed by a remote perception service
//!
//! Every capability call becomes one `POST {endpoint}/engines/{capability}`
//! with a JSON body of the form:
//!
//! ```json
//! {
//!   "algorithm": "YOLO",
//!   "configurations": {"model": "yolov8n"},
//!   "image": {"width": 640, "height": 480, "channel_order": "bgr", "data": "<base64>"}
//! }
//! ```
//!
//! The response body is the capability's result object.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::engine::{
    FaceRecognitionEngine, HandFeatureExtractionEngine, IntentRecognitionEngine,
    ObjectDetectionEngine, TextRecognitionEngine, VoiceGenerationEngine,
};
use crate::domain::perception::{
    DecodedImage, GestureRecognitionResult, ObjectDetectionResult, RecognizedFaces,
    RecognizedIntent, TextRecognitionResult,
};
use crate::domain::{Capability, DomainError, EngineConfigurations};

/// A single-use engine bound to one capability, algorithm and configuration
#[derive(Debug)]
pub struct RemoteEngine {
    client: Arc<dyn HttpClientTrait>,
    capability: Capability,
    algorithm: Option<&'static str>,
    configurations: Option<EngineConfigurations>,
    url: String,
    auth_header: Option<String>,
}

impl RemoteEngine {
    pub fn new(
        client: Arc<dyn HttpClientTrait>,
        capability: Capability,
        url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            capability,
            algorithm: None,
            configurations: None,
            url: url.into(),
            auth_header: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: &'static str) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_configurations(mut self, configurations: EngineConfigurations) -> Self {
        self.configurations = Some(configurations);
        self
    }

    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.auth_header = api_key.map(|key| format!("Bearer {}", key));
        self
    }

    fn build_request(&self, payload: Map<String, Value>) -> Value {
        let mut body = Map::new();

        if let Some(algorithm) = self.algorithm {
            body.insert("algorithm".to_string(), json!(algorithm));
        }

        if let Some(ref configurations) = self.configurations {
            body.insert("configurations".to_string(), configurations.to_value());
        }

        body.extend(payload);
        Value::Object(body)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }

        headers
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        payload: Map<String, Value>,
    ) -> Result<T, DomainError> {
        let body = self.build_request(payload);

        debug!(
            capability = %self.capability,
            algorithm = self.algorithm.unwrap_or("-"),
            url = %self.url,
            "Calling remote engine"
        );

        let response = self
            .client
            .post_json(&self.url, self.headers(), &body)
            .await
            .map_err(|e| match e {
                DomainError::Engine { message, .. } => self.engine_error(message),
                other => self.engine_error(other.to_string()),
            })?;

        serde_json::from_value(response)
            .map_err(|e| self.engine_error(format!("Unexpected result shape: {}", e)))
    }

    fn engine_error(&self, message: String) -> DomainError {
        DomainError::engine(self.capability.as_str(), message)
    }
}

fn image_payload(image: &DecodedImage) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(
        "image".to_string(),
        json!({
            "width": image.width(),
            "height": image.height(),
            "channel_order": image.channel_order(),
            "data": BASE64.encode(image.pixels()),
        }),
    );
    payload
}

fn string_payload(fields: &[(&str, &str)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), json!(value)))
        .collect()
}

#[async_trait]
impl ObjectDetectionEngine for RemoteEngine {
    async fn get_detected_objects(
        &self,
        image: &DecodedImage,
    ) -> Result<ObjectDetectionResult, DomainError> {
        self.invoke(image_payload(image)).await
    }
}

#[async_trait]
impl FaceRecognitionEngine for RemoteEngine {
    async fn recognize_face(&self, image: &DecodedImage) -> Result<RecognizedFaces, DomainError> {
        let mut payload = image_payload(image);
        payload.insert("operation".to_string(), json!("recognize_face"));
        self.invoke(payload).await
    }

    async fn remember_face(
        &self,
        image_path: &str,
        person_name: &str,
    ) -> Result<bool, DomainError> {
        let mut payload =
            string_payload(&[("image_path", image_path), ("person_name", person_name)]);
        payload.insert("operation".to_string(), json!("remember_face"));
        self.invoke(payload).await
    }
}

#[async_trait]
impl IntentRecognitionEngine for RemoteEngine {
    async fn recognize_intent(&self, text: &str) -> Result<RecognizedIntent, DomainError> {
        self.invoke(string_payload(&[("text", text)])).await
    }
}

#[async_trait]
impl TextRecognitionEngine for RemoteEngine {
    async fn recognize_text(&self, image_path: &str) -> Result<TextRecognitionResult, DomainError> {
        self.invoke(string_payload(&[("image_path", image_path)])).await
    }
}

#[async_trait]
impl HandFeatureExtractionEngine for RemoteEngine {
    async fn get_gesture(
        &self,
        image: &DecodedImage,
    ) -> Result<GestureRecognitionResult, DomainError> {
        self.invoke(image_payload(image)).await
    }
}

#[async_trait]
impl VoiceGenerationEngine for RemoteEngine {
    async fn say(&self, text: &str) -> Result<(), DomainError> {
        // The service acknowledges playback with an arbitrary JSON body
        let _: Value = self.invoke(string_payload(&[("text", text)])).await?;
        Ok(())
    }
}
