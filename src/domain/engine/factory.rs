//! Engine registry: builds one engine instance per request

use std::fmt::Debug;

use super::algorithm::{
    FaceRecognitionAlgorithm, IntentRecognitionAlgorithm, TextRecognitionAlgorithm,
    VisionAlgorithm,
};
use super::configuration::EngineConfigurations;
use super::traits::{
    FaceRecognitionEngine, HandFeatureExtractionEngine, IntentRecognitionEngine,
    ObjectDetectionEngine, TextRecognitionEngine, VoiceGenerationEngine,
};
use crate::domain::DomainError;

/// Constructs capability engines from a typed algorithm and a configuration.
///
/// Implementations must not cache engines: every call returns a fresh
/// instance so no engine state is shared between requests.
pub trait EngineFactory: Send + Sync + Debug {
    /// Short name of the backend the engines talk to
    fn backend_name(&self) -> &'static str;

    fn object_detection(
        &self,
        algorithm: VisionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn ObjectDetectionEngine>, DomainError>;

    fn face_recognition(
        &self,
        algorithm: FaceRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn FaceRecognitionEngine>, DomainError>;

    fn intent_recognition(
        &self,
        algorithm: IntentRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn IntentRecognitionEngine>, DomainError>;

    fn text_recognition(
        &self,
        algorithm: TextRecognitionAlgorithm,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn TextRecognitionEngine>, DomainError>;

    fn hand_feature_extraction(
        &self,
        configurations: EngineConfigurations,
    ) -> Result<Box<dyn HandFeatureExtractionEngine>, DomainError>;

    fn voice_generation(&self) -> Result<Box<dyn VoiceGenerationEngine>, DomainError>;
}
