//! Intent recognition endpoint

use axum::{
    Json,
    extract::State,
};
use tracing::info;

use super::schema::IntentText;
use super::{AlgorithmQuery, AtomError, run_engine};
use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData, fields::validated};
use crate::domain::{Algorithm, Capability, IntentRecognitionAlgorithm};

/// POST /atoms/intent-recognition/recognize-intent/
pub async fn recognize_intent(
    State(state): State<AppState>,
    query: AlgorithmQuery,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let (input, algorithm) = validated(
        IntentText::from_form(&form),
        query.algorithm::<IntentRecognitionAlgorithm>(),
    )?;

    info!(
        tag = "intent_recognition",
        text = %truncate_for_log(&input.text, 200),
        "Received text"
    );

    let IntentText {
        text,
        engine_configurations,
    } = input;

    let intent = run_engine(
        Capability::IntentRecognition,
        Some(algorithm.as_str()),
        async {
            let engine = state
                .engine_factory
                .intent_recognition(algorithm, engine_configurations)?;
            engine.recognize_intent(&text).await
        },
    )
    .await?;

    Ok(Json(AtomResponse::new(
        format!("Intent Recognition completed using {}", algorithm),
        &intent,
    )))
}
