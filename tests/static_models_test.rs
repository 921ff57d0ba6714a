use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tmi_backend::config::AppConfig;
use tmi_backend::services::generator::MockGenerator;
use tmi_backend::services::storage::LocalImageStore;
use tmi_backend::{AppState, create_app};
use tower::ServiceExt;

fn app_with_models_dir(models_dir: &std::path::Path, upload_dir: &std::path::Path) -> axum::Router {
    let config = AppConfig {
        upload_dir: upload_dir.to_path_buf(),
        models_dir: models_dir.to_path_buf(),
        generation_delay: Duration::ZERO,
        ..AppConfig::default()
    };

    create_app(AppState {
        store: Arc::new(LocalImageStore::new(&config.upload_dir)),
        generator: Arc::new(MockGenerator::new(Duration::ZERO)),
        config,
    })
}

#[tokio::test]
async fn test_serves_placeholder_model() {
    let models = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();

    let cube = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
    std::fs::write(models.path().join("mock_cube.obj"), cube).unwrap();

    let app = app_with_models_dir(models.path(), uploads.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/generated_models/mock_cube.obj")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), cube.as_bytes());
}

#[tokio::test]
async fn test_unknown_model_returns_404() {
    let models = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();

    let app = app_with_models_dir(models.path(), uploads.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/generated_models/missing.obj")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_allows_local_dev_origin() {
    let models = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();

    let app = app_with_models_dir(models.path(), uploads.path());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/generate-model/")
                .header(header::ORIGIN, "http://localhost:8000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:8000"
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let models = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();

    let app = app_with_models_dir(models.path(), uploads.path());

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/generate-model/")
                .header(header::ORIGIN, "http://evil.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
