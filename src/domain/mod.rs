//! Domain layer - Engines, perception results and errors

pub mod engine;
pub mod error;
pub mod perception;

pub use engine::{
    Algorithm, Capability, EngineConfigurations, EngineFactory, FaceRecognitionAlgorithm,
    IntentRecognitionAlgorithm, TextRecognitionAlgorithm, VisionAlgorithm,
};
pub use error::DomainError;
pub use perception::{DecodedImage, Normalize};
