//! Text-to-speech endpoint

use axum::{Json, extract::State};
use serde_json::json;
use tracing::info;

use super::schema::SpokenText;
use super::{AtomError, run_engine};
use crate::api::middleware::truncate_for_log;
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData};
use crate::domain::Capability;

/// POST /atoms/voice-generation/generate-voice/
pub async fn generate_voice(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let SpokenText { text } = SpokenText::from_form(&form)?;

    info!(
        tag = "voice_generation",
        text = %truncate_for_log(&text, 200),
        "Received text"
    );

    run_engine(Capability::VoiceGeneration, None, async {
        let engine = state.engine_factory.voice_generation()?;
        engine.say(&text).await
    })
    .await?;

    Ok(Json(AtomResponse::from_value("Voice played", json!([]))))
}
