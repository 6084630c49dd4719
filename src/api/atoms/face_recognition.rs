//! Face recognition and enrollment endpoints

use axum::{
    Json,
    extract::State,
};
use tracing::info;

use super::schema::{FaceEnrollment, ImageUpload};
use super::{AlgorithmQuery, AtomError, run_engine};
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData, fields::validated};
use crate::domain::{Algorithm, Capability, FaceRecognitionAlgorithm};

/// POST /atoms/face-recognition/recognize-face/
pub async fn recognize_face(
    State(state): State<AppState>,
    query: AlgorithmQuery,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let (input, algorithm) = validated(
        ImageUpload::from_form(&form).await,
        query.algorithm::<FaceRecognitionAlgorithm>(),
    )?;

    info!(tag = "face_recognition", file_name = %input.file_name, "Received image");

    let ImageUpload {
        image,
        engine_configurations,
        ..
    } = input;

    let faces = run_engine(
        Capability::FaceRecognition,
        Some(algorithm.as_str()),
        async {
            let engine = state
                .engine_factory
                .face_recognition(algorithm, engine_configurations)?;
            engine.recognize_face(&image).await
        },
    )
    .await?;

    Ok(Json(AtomResponse::new(
        format!("Detection started using {}", algorithm),
        &faces,
    )))
}

/// POST /atoms/face-recognition/remember-face/
pub async fn remember_face(
    State(state): State<AppState>,
    query: AlgorithmQuery,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let (input, algorithm) = validated(
        FaceEnrollment::from_form(&form),
        query.algorithm::<FaceRecognitionAlgorithm>(),
    )?;

    info!(
        tag = "face_recognition",
        image_path = %input.image_path,
        person_name = %input.person_name,
        "Received face to remember"
    );

    let FaceEnrollment {
        image_path,
        person_name,
        engine_configurations,
    } = input;

    let remembered = run_engine(
        Capability::FaceRecognition,
        Some(algorithm.as_str()),
        async {
            let engine = state
                .engine_factory
                .face_recognition(algorithm, engine_configurations)?;
            engine.remember_face(&image_path, &person_name).await
        },
    )
    .await?;

    Ok(Json(AtomResponse::new(
        format!("Detection started using {}", algorithm),
        &remembered,
    )))
}
