//! Capabilities and the closed sets of algorithm names each one accepts

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::DomainError;

/// A perception capability exposed by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ObjectDetection,
    FaceRecognition,
    IntentRecognition,
    TextRecognition,
    HandFeatureExtraction,
    VoiceGeneration,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::ObjectDetection,
        Capability::FaceRecognition,
        Capability::IntentRecognition,
        Capability::TextRecognition,
        Capability::HandFeatureExtraction,
        Capability::VoiceGeneration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectDetection => "object_detection",
            Self::FaceRecognition => "face_recognition",
            Self::IntentRecognition => "intent_recognition",
            Self::TextRecognition => "text_recognition",
            Self::HandFeatureExtraction => "hand_feature_extraction",
            Self::VoiceGeneration => "voice_generation",
        }
    }

    /// Algorithm names accepted for this capability; empty when it takes no selector
    pub fn algorithm_names(&self) -> Vec<&'static str> {
        match self {
            Self::ObjectDetection => VisionAlgorithm::names(),
            Self::FaceRecognition => FaceRecognitionAlgorithm::names(),
            Self::IntentRecognition => IntentRecognitionAlgorithm::names(),
            Self::TextRecognition => TextRecognitionAlgorithm::names(),
            Self::HandFeatureExtraction | Self::VoiceGeneration => Vec::new(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common behaviour of the per-capability algorithm selectors
pub trait Algorithm: 'static + Copy + fmt::Debug + fmt::Display + FromStr<Err = DomainError> {
    /// Capability this selector belongs to
    const CAPABILITY: Capability;

    fn as_str(&self) -> &'static str;

    fn all() -> &'static [Self];

    fn names() -> Vec<&'static str> {
        Self::all().iter().map(|a| a.as_str()).collect()
    }
}

macro_rules! algorithm_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $capability:expr,
        { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Algorithm for $name {
            const CAPABILITY: Capability = $capability;

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    other => Err(DomainError::unsupported_algorithm(
                        $capability.as_str(),
                        other,
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

algorithm_enum! {
    /// Object detection algorithms
    VisionAlgorithm => Capability::ObjectDetection,
    {
        Yolo => "YOLO",
        GoogleVision => "GOOGLE_VISION",
        MediaPipe => "MEDIA_PIPE",
    }
}

algorithm_enum! {
    /// Face recognition and enrollment algorithms
    FaceRecognitionAlgorithm => Capability::FaceRecognition,
    {
        FaceRecc => "FACE_RECC",
        FaceReccKnn => "FACE_RECC_KNN",
    }
}

algorithm_enum! {
    /// Intent recognition algorithms
    IntentRecognitionAlgorithm => Capability::IntentRecognition,
    {
        ChatGpt => "CHAT_GPT",
        SnipsNlu => "SNIPS_NLU",
    }
}

algorithm_enum! {
    /// Text recognition (OCR) algorithms
    TextRecognitionAlgorithm => Capability::TextRecognition,
    {
        GoogleVision => "GOOGLE_VISION",
    }
}
