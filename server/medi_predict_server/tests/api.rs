use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use medi_predict::{DatasetPaths, ModelSet, TrainingOptions};
use medi_predict_server::{app, SharedModels};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const CANONICAL_DIABETES: [f64; 8] = [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0];
const SAMPLE_HEART: [f64; 13] = [
    63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0,
];

fn models() -> SharedModels {
    static MODELS: OnceLock<SharedModels> = OnceLock::new();
    MODELS
        .get_or_init(|| {
            let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
            let paths = DatasetPaths {
                diabetes: data.join("diabetes.csv"),
                heart: data.join("heart_disease_data.csv"),
            };
            Arc::new(ModelSet::fit(&paths, &TrainingOptions::default()).expect("fit models"))
        })
        .clone()
}

fn router() -> Router {
    app(models())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn assert_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error string");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn diabetes_returns_boolean() {
    let (status, body) = send(
        router(),
        post_json("/predict/diabetes", &json!({"features": CANONICAL_DIABETES})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["is_diabetic"].is_boolean());
    assert_eq!(body.as_object().map(|o| o.len()), Some(1));
}

#[tokio::test]
async fn heart_returns_boolean() {
    let (status, body) = send(
        router(),
        post_json("/predict/heart", &json!({"features": SAMPLE_HEART})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["has_disease"].is_boolean());
}

#[tokio::test]
async fn identical_requests_get_identical_answers() {
    let app = router();
    let req = json!({"features": CANONICAL_DIABETES});
    let (_, first) = send(app.clone(), post_json("/predict/diabetes", &req)).await;
    let (_, second) = send(app.clone(), post_json("/predict/diabetes", &req)).await;
    assert_eq!(first, second);

    let req = json!({"features": SAMPLE_HEART});
    let (_, first) = send(app.clone(), post_json("/predict/heart", &req)).await;
    let (_, second) = send(app, post_json("/predict/heart", &req)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_features_key_is_rejected() {
    for uri in ["/predict/diabetes", "/predict/heart"] {
        let (status, body) = send(router(), post_json(uri, &json!({"values": [1, 2, 3]}))).await;
        assert_error(status, &body);
        assert!(body["error"].as_str().unwrap().contains("features"));
    }
}

#[tokio::test]
async fn wrong_length_is_rejected() {
    let (status, body) = send(
        router(),
        post_json(
            "/predict/diabetes",
            &json!({"features": &CANONICAL_DIABETES[..7]}),
        ),
    )
    .await;
    assert_error(status, &body);

    let (status, body) = send(
        router(),
        post_json("/predict/heart", &json!({"features": [1, 2, 3]})),
    )
    .await;
    assert_error(status, &body);
}

#[tokio::test]
async fn non_numeric_feature_is_rejected_and_service_keeps_serving() {
    let app = router();
    let bad = json!({"features": [6, "abc", 72, 35, 0, 33.6, 0.627, 50]});
    let (status, body) = send(app.clone(), post_json("/predict/diabetes", &bad)).await;
    assert_error(status, &body);

    let bad = json!({"features": [63, 1, 3, 145, "abc", 1, 0, 150, 0, 2.3, 0, 0, 1]});
    let (status, body) = send(app.clone(), post_json("/predict/heart", &bad)).await;
    assert_error(status, &body);

    let (status, body) = send(
        app,
        post_json("/predict/diabetes", &json!({"features": CANONICAL_DIABETES})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["is_diabetic"].is_boolean());
}

#[tokio::test]
async fn malformed_or_untyped_bodies_are_bad_requests() {
    let raw = Request::builder()
        .method("POST")
        .uri("/predict/heart")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(router(), raw).await;
    assert_error(status, &body);

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/predict/diabetes")
        .body(Body::from(json!({"features": CANONICAL_DIABETES}).to_string()))
        .unwrap();
    let (status, body) = send(router(), no_content_type).await;
    assert_error(status, &body);

    let (status, body) = send(
        router(),
        post_json("/predict/diabetes", &json!({"features": "6,148"})),
    )
    .await;
    assert_error(status, &body);
}

#[tokio::test]
async fn prediction_routes_are_post_only() {
    let req = Request::builder()
        .uri("/predict/diabetes")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_and_model_listing() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = Request::builder().uri("/models").body(Body::empty()).unwrap();
    let (status, body) = send(router(), req).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("model list");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["domain"], "diabetes");
    assert_eq!(list[0]["result_key"], "is_diabetic");
    assert_eq!(list[0]["features"].as_array().map(Vec::len), Some(8));
    assert_eq!(list[1]["route"], "/predict/heart");
    assert_eq!(list[1]["features"].as_array().map(Vec::len), Some(13));
    assert!(list[1]["test_accuracy"].is_number());
}
