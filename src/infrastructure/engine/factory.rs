use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::http_client::{HttpClient, HttpClientTrait};
use super::remote::RemoteEngine;
use crate::config::EnginesConfig;
use crate::domain::engine::{
    FaceRecognitionEngine, HandFeatureExtractionEngine, IntentRecognitionEngine,
    ObjectDetectionEngine, TextRecognitionEngine, VoiceGenerationEngine,
};
use crate::domain::{
    Algorithm, Capability, DomainError, EngineConfigurations, EngineFactory,
    FaceRecognitionAlgorithm, IntentRecognitionAlgorithm, TextRecognitionAlgorithm,
    VisionAlgorithm,
};

/// Factory for engines served by a remote perception service
#[derive(Debug, Clone)]
pub struct RemoteEngineFactory {
    client: Arc<dyn HttpClientTrait>,
    base_url: String,
    endpoints: HashMap<String, String>,
    api_key: Option<String>,
}

impl RemoteEngineFactory {
    pub fn new(client: Arc<dyn HttpClientTrait>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            endpoints: HashMap::new(),
            api_key: None,
        }
    }

    /// Create a factory from the `engines` configuration section
    pub fn from_config(config: &EnginesConfig) -> Result<Self, DomainError> {
        let client: Arc<dyn HttpClientTrait> = match config.timeout_secs {
            Some(secs) => Arc::new(HttpClient::with_timeout(Duration::from_secs(secs))?),
            None => Arc::new(HttpClient::new()),
        };

        let mut factory = Self::new(client, &config.base_url);
        factory.endpoints = config.endpoints.clone();
        factory.api_key = config.api_key.clone();

        // Fail at startup rather than on the first request
        for capability in Capability::ALL {
            factory.engine_url(capability)?;
        }

        Ok(factory)
    }

    pub fn with_endpoint(mut self, capability: Capability, base_url: impl Into<String>) -> Self {
        self.endpoints
            .insert(capability.as_str().to_string(), base_url.into());
        self
    }

    /// Resolve and validate the URL an engine for `capability` posts to
    pub fn engine_url(&self, capability: Capability) -> Result<String, DomainError> {
        let base = self
            .endpoints
            .get(capability.as_str())
            .unwrap_or(&self.base_url)
            .trim_end_matches('/');

        let url = format!("{}/engines/{}", base, capability);

        reqwest::Url::parse(&url).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid engine URL '{}' for {}: {}",
                url, capability, e
            ))
        })?;

        Ok(url)
    }

    fn build(
        &self,
        capability: Capability,
        algorithm: Option<&'static str>,
        configurations: Option<EngineConfigurations>,
    ) -> Result<RemoteEngine, DomainError> {
        let url = self.engine_url(capability)?;

        debug!(
            capability = %capability,
            algorithm = algorithm.unwrap_or("-"),
            url = %url,
            "Constructing remote engine"
        );

        let mut engine = RemoteEngine::new(self.client.clone(), capability, url)
            .with_api_key(self.api_key.as_deref());

        if let Some(algorithm) = algorithm {
            engine = engine.with_algorithm(algorithm);
        }

        if let Some(configurations) = configurations {
            engine = engine.with_configurations(configurations);
        }

        Ok(engine)
    }

    fn build_for<A: Algorithm>(
        &self,
        algorithm: A,
        configurations: EngineConfigurations,
    ) -> Result<RemoteEngine, DomainError> {
        self.build(A::CAPABILITY, Some(algorithm.as_str()), Some(configurations))
    }
}

impl EngineFactory for RemoteEngineFactory {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    fn object_detection(
        &self,
        algorithm: VisionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn ObjectDetectionEngine>, DomainError> {
        Ok(Box::new(self.build_for(algorithm, configurations)?))
    }

    fn face_recognition(
        &self,
        algorithm: FaceRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn FaceRecognitionEngine>, DomainError> {
        Ok(Box::new(self.build_for(algorithm, configurations)?))
    }

    fn intent_recognition(
        &self,
        algorithm: IntentRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn IntentRecognitionEngine>, DomainError> {
        Ok(Box::new(self.build_for(algorithm, configurations)?))
    }

    fn text_recognition(
        &self,
        algorithm: TextRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn TextRecognitionEngine>, DomainError> {
        Ok(Box::new(self.build_for(algorithm, configurations)?))
    }

    fn hand_feature_extraction(
        &self,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn HandFeatureExtractionEngine>, DomainError> {
        Ok(Box::new(self.build(
            Capability::HandFeatureExtraction,
            None,
            Some(configurations),
        )?))
    }

    fn voice_generation(&self) -> Result<Box<dyn VoiceGenerationEngine>, DomainError> {
        Ok(Box::new(self.build(Capability::VoiceGeneration, None, None)?))
    }
}
