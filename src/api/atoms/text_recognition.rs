//! Text recognition (OCR) endpoint

use axum::{
    Json,
    extract::State,
};
use tracing::info;

use super::schema::ImagePath;
use super::{AlgorithmQuery, AtomError, run_engine};
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData, fields::validated};
use crate::domain::{Algorithm, Capability, TextRecognitionAlgorithm};

/// POST /atoms/text-recognition/recognize-text/
pub async fn recognize_text(
    State(state): State<AppState>,
    query: AlgorithmQuery,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let (input, algorithm) = validated(
        ImagePath::from_form(&form),
        query.algorithm::<TextRecognitionAlgorithm>(),
    )?;

    info!(tag = "text_recognition", image_path = %input.image_path, "Received image path");

    let ImagePath {
        image_path,
        engine_configurations,
    } = input;

    let recognized = run_engine(
        Capability::TextRecognition,
        Some(algorithm.as_str()),
        async {
            let engine = state
                .engine_factory
                .text_recognition(algorithm, engine_configurations)?;
            engine.recognize_text(&image_path).await
        },
    )
    .await?;

    Ok(Json(AtomResponse::new(
        format!("Text Recognition completed using {}", algorithm),
        &recognized,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::atoms::test_support::{app, post, post_json};
    use crate::domain::engine::factory::mock::{CallInput, MockEngineFactory};
    use crate::domain::perception::{BoundingPoly, TextAnnotation, TextRecognitionResult, Vertex};

    const URI: &str = "/atoms/text-recognition/recognize-text/";

    #[tokio::test]
    async fn test_recognize_text() {
        let factory = MockEngineFactory::new().with_text(TextRecognitionResult {
            text: "hi".to_string(),
            locale: "en".to_string(),
            full_information: vec![TextAnnotation {
                description: "hi".to_string(),
                bounding_poly: BoundingPoly {
                    vertices: vec![Vertex { x: 1, y: 2 }],
                },
            }],
        });

        let (status, json) = post(
            app(&factory),
            &format!("{}?algorithm_name=GOOGLE_VISION", URI),
            "application/x-www-form-urlencoded",
            b"image_path=%2Fsigns%2Fstop.jpg&engine_configurations=%7B%7D".to_vec(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "message": "Text Recognition completed using GOOGLE_VISION",
                "result": {
                    "text": "hi",
                    "locale": "en",
                    "full_information": [{
                        "description": "hi",
                        "bounding_poly": {"vertices": [{"x": 1, "y": 2}]}
                    }]
                }
            })
        );
        assert_eq!(
            factory.calls()[0].input,
            CallInput::Path("/signs/stop.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_image_path_and_algorithm() {
        let factory = MockEngineFactory::new();

        let (status, json) = post_json(
            app(&factory),
            URI,
            json!({"engine_configurations": "{}"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({
                "algorithm_name": ["This query parameter is required."],
                "image_path": ["This field is required."]
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_algorithm() {
        let factory = MockEngineFactory::new();

        let (status, json) = post_json(
            app(&factory),
            &format!("{}?algorithm_name=YOLO", URI),
            json!({"image_path": "/signs/stop.jpg", "engine_configurations": "{}"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"algorithm_name": ["\"YOLO\" is not a valid choice."]}));
        assert_eq!(factory.constructed(), 0);
    }

    #[tokio::test]
    async fn test_engine_failure() {
        let factory = MockEngineFactory::new().with_error("file not found");

        let (status, json) = post_json(
            app(&factory),
            &format!("{}?algorithm_name=GOOGLE_VISION", URI),
            json!({"image_path": "/missing.jpg", "engine_configurations": "{}"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["type"], "engine_error");
        assert_eq!(json["error"]["code"], "text_recognition");
    }
}
