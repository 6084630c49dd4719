//! Object detection endpoint

use axum::{
    Json,
    extract::State,
};
use tracing::info;

use super::schema::ImageUpload;
use super::{AlgorithmQuery, AtomError, run_engine};
use crate::api::state::AppState;
use crate::api::types::{AtomResponse, FormData, fields::validated};
use crate::domain::{Algorithm, Capability, VisionAlgorithm};

/// POST /atoms/object-detection/detect-objects/
pub async fn detect_objects(
    State(state): State<AppState>,
    query: AlgorithmQuery,
    form: FormData,
) -> Result<Json<AtomResponse>, AtomError> {
    let (input, algorithm) = validated(
        ImageUpload::from_form(&form).await,
        query.algorithm::<VisionAlgorithm>(),
    )?;

    info!(tag = "object_detection", file_name = %input.file_name, "Received image");

    let ImageUpload {
        image,
        engine_configurations,
        ..
    } = input;

    let detected = run_engine(
        Capability::ObjectDetection,
        Some(algorithm.as_str()),
        async {
            let engine = state
                .engine_factory
                .object_detection(algorithm, engine_configurations)?;
            engine.get_detected_objects(&image).await
        },
    )
    .await?;

    Ok(Json(AtomResponse::new(
        format!("Detection started using {}", algorithm),
        &detected,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::atoms::test_support::{app, post, post_json};
    use crate::api::types::form::fixtures::{Part, multipart};
    use crate::domain::engine::factory::mock::{CallInput, MockEngineFactory};
    use crate::domain::perception::image::fixtures::png_bytes;
    use crate::domain::perception::{
        BoundingBox, ChannelOrder, DetectedCategory, DetectedObject, ObjectDetectionResult,
    };
    use crate::domain::{Capability, EngineConfigurations};

    const URI: &str = "/atoms/object-detection/detect-objects/";

    fn detection() -> ObjectDetectionResult {
        ObjectDetectionResult {
            object_names: vec!["person".to_string()],
            detected_objects: vec![DetectedObject {
                detected_categories: vec![DetectedCategory {
                    category_name: "person".to_string(),
                    confidence: 0.75,
                }],
                bounding_box: BoundingBox {
                    origin_x: 1.0,
                    origin_y: 2.0,
                    width: 3.0,
                    height: 4.0,
                },
            }],
        }
    }

    #[tokio::test]
    async fn test_detect_objects() {
        let factory = MockEngineFactory::new().with_objects(detection());
        let png = png_bytes(4, 2, [255, 0, 0]);
        let (content_type, body) = multipart(&[
            Part::File("image", "street.png", &png),
            Part::Text("engine_configurations", r#"{"a":"1"}"#),
        ]);

        let (status, json) = post(
            app(&factory),
            &format!("{}?algorithm_name=YOLO", URI),
            &content_type,
            body,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "message": "Detection started using YOLO",
                "result": {
                    "object_names": ["person"],
                    "detected_objects": [{
                        "detected_categories": [{"category_name": "person", "confidence": 0.75}],
                        "bounding_box": {"origin_x": 1.0, "origin_y": 2.0, "width": 3.0, "height": 4.0}
                    }]
                }
            })
        );

        let calls = factory.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].capability, Capability::ObjectDetection);
        assert_eq!(calls[0].algorithm.as_deref(), Some("YOLO"));
        assert_eq!(
            calls[0].configurations,
            Some(EngineConfigurations::parse(r#"{"a":"1"}"#))
        );
        assert_eq!(
            calls[0].input,
            CallInput::Image {
                channel_order: ChannelOrder::Bgr,
                width: 4,
                height: 2
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_configuration_json_is_passed_raw() {
        let factory = MockEngineFactory::new();
        let png = png_bytes(1, 1, [0, 0, 0]);
        let (content_type, body) = multipart(&[
            Part::File("image", "a.png", &png),
            Part::Text("engine_configurations", "not-json"),
        ]);

        let (status, _) = post(
            app(&factory),
            &format!("{}?algorithm_name=MEDIA_PIPE", URI),
            &content_type,
            body,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            factory.calls()[0].configurations,
            Some(EngineConfigurations::Raw("not-json".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unknown_algorithm_is_rejected_before_construction() {
        let factory = MockEngineFactory::new();
        let png = png_bytes(1, 1, [0, 0, 0]);
        let (content_type, body) = multipart(&[
            Part::File("image", "a.png", &png),
            Part::Text("engine_configurations", "{}"),
        ]);

        let (status, json) = post(
            app(&factory),
            &format!("{}?algorithm_name=FOO", URI),
            &content_type,
            body,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({"algorithm_name": ["\"FOO\" is not a valid choice."]})
        );
        assert_eq!(factory.constructed(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let factory = MockEngineFactory::new();

        let (status, json) = post_json(app(&factory), URI, json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({
                "algorithm_name": ["This query parameter is required."],
                "engine_configurations": ["This field is required."],
                "image": ["No file was submitted."]
            })
        );
        assert_eq!(factory.constructed(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_image() {
        let factory = MockEngineFactory::new();
        let (content_type, body) = multipart(&[
            Part::File("image", "notes.txt", b"plain text"),
            Part::Text("engine_configurations", "{}"),
        ]);

        let (status, json) = post(
            app(&factory),
            &format!("{}?algorithm_name=YOLO", URI),
            &content_type,
            body,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({"image": ["Upload a valid image. The file you uploaded was either not an image or a corrupted image."]})
        );
    }

    #[tokio::test]
    async fn test_engine_failure_is_bad_gateway() {
        let factory = MockEngineFactory::new().with_error("model crashed");
        let png = png_bytes(1, 1, [0, 0, 0]);
        let (content_type, body) = multipart(&[
            Part::File("image", "a.png", &png),
            Part::Text("engine_configurations", "{}"),
        ]);

        let (status, json) = post(
            app(&factory),
            &format!("{}?algorithm_name=GOOGLE_VISION", URI),
            &content_type,
            body,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["type"], "engine_error");
        assert_eq!(json["error"]["message"], "object_detection: model crashed");
    }
}
