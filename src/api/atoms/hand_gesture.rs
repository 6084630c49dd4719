//! Hand gesture and landmark extraction endpoint

use axum::{Json, extract::State};
use tracing::info;

use super::schema::ImageUpload;
use super::{AtomError, run_engine};
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData};
use crate::domain::Capability;

/// POST /atoms/feature-recognition/recognize-hand-gesture/
pub async fn recognize_hand_gesture(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let input = ImageUpload::from_form(&form).await?;

    info!(tag = "hand_feature_extraction", file_name = %input.file_name, "Received image");

    let ImageUpload {
        image,
        engine_configurations,
        ..
    } = input;

    // Hand landmark models expect RGB input
    let image = image.into_rgb();

    let gesture = run_engine(Capability::HandFeatureExtraction, None, async {
        let engine = state
            .engine_factory
            .hand_feature_extraction(engine_configurations)?;
        engine.get_gesture(&image).await
    })
    .await?;

    Ok(Json(AtomResponse::new("Hand feature completed", &gesture)))
}
