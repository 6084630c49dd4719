//! Perception inputs and engine results

pub mod face;
pub mod gesture;
pub mod image;
pub mod intent;
pub mod normalize;
pub mod object_detection;
pub mod text;

pub use face::RecognizedFaces;
pub use gesture::{Category, GestureRecognitionResult, Landmark};
pub use image::{ChannelOrder, DecodedImage};
pub use intent::{RecognizedEntity, RecognizedIntent};
pub use normalize::Normalize;
pub use object_detection::{BoundingBox, DetectedCategory, DetectedObject, ObjectDetectionResult};
pub use text::{BoundingPoly, TextAnnotation, TextRecognitionResult, Vertex};
