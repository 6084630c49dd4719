//! Perception endpoints mounted under `/atoms`

pub mod face_recognition;
pub mod hand_gesture;
pub mod intent_recognition;
pub mod object_detection;
pub mod schema;
pub mod text_recognition;
pub mod voice_generation;

use std::future::Future;
use std::time::Instant;

use axum::{
    Router,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, warn};

use super::state::AppState;
use super::types::{ApiError, FieldErrors, fields};
use crate::domain::{Algorithm, Capability, DomainError};
use crate::infrastructure::observability::record_engine_call;

/// Create the perception router
pub fn create_atoms_router() -> Router<AppState> {
    Router::new()
        .route(
            "/object-detection/detect-objects/",
            post(object_detection::detect_objects),
        )
        .route(
            "/face-recognition/recognize-face/",
            post(face_recognition::recognize_face),
        )
        .route(
            "/face-recognition/remember-face/",
            post(face_recognition::remember_face),
        )
        .route(
            "/intent-recognition/recognize-intent/",
            post(intent_recognition::recognize_intent),
        )
        .route(
            "/text-recognition/recognize-text/",
            post(text_recognition::recognize_text),
        )
        .route(
            "/feature-recognition/recognize-hand-gesture/",
            post(hand_gesture::recognize_hand_gesture),
        )
        .route(
            "/voice-generation/generate-voice/",
            post(voice_generation::generate_voice),
        )
}

/// Failure of a perception endpoint
#[derive(Debug)]
pub enum AtomError {
    /// Per-field validation failure, rendered as `{"field": [...]}`
    Invalid(FieldErrors),
    Api(ApiError),
}

impl From<FieldErrors> for AtomError {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}

impl From<ApiError> for AtomError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<DomainError> for AtomError {
    fn from(err: DomainError) -> Self {
        Self::Api(err.into())
    }
}

impl IntoResponse for AtomError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => errors.into_response(),
            Self::Api(err) => err.into_response(),
        }
    }
}

/// Query string of endpoints that take an algorithm selector.
///
/// A repeated `algorithm_name` keeps the last value, as body fields do.
#[derive(Debug, Default)]
pub struct AlgorithmQuery {
    pub algorithm_name: Option<String>,
}

impl<S> FromRequestParts<S> for AlgorithmQuery
where
    S: Send + Sync,
{
    type Rejection = AtomError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| {
                debug!(error = %e, "Rejected malformed query string");
                FieldErrors::single("algorithm_name", fields::INVALID_QUERY)
            })?;

        let algorithm_name = pairs
            .into_iter()
            .filter(|(key, _)| key == "algorithm_name")
            .map(|(_, value)| value)
            .last();

        Ok(Self { algorithm_name })
    }
}

impl AlgorithmQuery {
    /// Resolve `algorithm_name` against the capability's closed set
    pub fn algorithm<A: Algorithm>(&self) -> Result<A, FieldErrors> {
        let Some(name) = self.algorithm_name.as_deref() else {
            return Err(FieldErrors::single("algorithm_name", fields::QUERY_REQUIRED));
        };

        name.parse::<A>().map_err(|_| {
            debug!(capability = %A::CAPABILITY, algorithm = %name, "Rejected unknown algorithm");
            FieldErrors::single("algorithm_name", fields::invalid_choice(name))
        })
    }
}

/// Build and invoke an engine, recording duration and outcome.
///
/// Any failure while constructing or calling the engine is reported as an
/// engine error for `capability`.
pub(crate) async fn run_engine<T, F>(
    capability: Capability,
    algorithm: Option<&str>,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    let start = Instant::now();

    let result = call.await.map_err(|err| match err {
        DomainError::Engine { .. } => err,
        other => DomainError::engine(capability.as_str(), other.to_string()),
    });

    let duration = start.elapsed();
    record_engine_call(
        capability.as_str(),
        algorithm.unwrap_or("default"),
        result.is_ok(),
        duration,
    );

    match &result {
        Ok(_) => debug!(
            capability = %capability,
            algorithm = algorithm.unwrap_or("default"),
            duration_ms = duration.as_millis() as u64,
            "Engine call completed"
        ),
        Err(e) => warn!(
            capability = %capability,
            algorithm = algorithm.unwrap_or("default"),
            error = %e,
            "Engine call failed"
        ),
    }

    result
}
