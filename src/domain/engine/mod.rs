//! Perception engines and the registry that constructs them

pub mod algorithm;
pub mod configuration;
pub mod factory;
pub mod traits;

pub use algorithm::{
    Algorithm, Capability, FaceRecognitionAlgorithm, IntentRecognitionAlgorithm,
    TextRecognitionAlgorithm, VisionAlgorithm,
};
pub use configuration::EngineConfigurations;
pub use factory::EngineFactory;
pub use traits::{
    FaceRecognitionEngine, HandFeatureExtractionEngine, IntentRecognitionEngine,
    ObjectDetectionEngine, TextRecognitionEngine, VoiceGenerationEngine,
};
