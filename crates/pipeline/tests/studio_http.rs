//! End-to-end: local files -> real HTTP client -> stand-in enhancement
//! server -> exported results on disk.

use std::sync::Arc;

use axum::extract::{Multipart, Path};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use laparis_core::types::{BrandingConfig, ImageStatus};
use laparis_enhance::{EnhanceApi, HttpAssetFetcher};
use laparis_pipeline::{join_dispatched, ExportError, Studio};

/// Echo server: `/enhance` answers with a `/results/{preset}-{file}` URL
/// on the same host; `/results/...` serves a fixed PNG body. Files named
/// `broken` are rejected with 400.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{addr}");
    let result_base = base.clone();

    let app = Router::new()
        .route(
            "/enhance",
            post(move |mut multipart: Multipart| {
                let result_base = result_base.clone();
                async move {
                    let mut file_name = String::new();
                    let mut preset = String::new();
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        match name.as_str() {
                            "file" => {
                                file_name = field.file_name().unwrap_or_default().to_string();
                            }
                            "preset" => preset = field.text().await.unwrap(),
                            _ => {}
                        }
                    }
                    if file_name == "broken" {
                        return (StatusCode::BAD_REQUEST, "cannot read image").into_response();
                    }
                    Json(serde_json::json!({
                        "imageUrl": format!("{result_base}/results/{preset}-{file_name}"),
                    }))
                    .into_response()
                }
            }),
        )
        .route(
            "/results/{key}",
            get(|Path(key): Path<String>| async move {
                ([(header::CONTENT_TYPE, "image/png")], format!("PNG:{key}"))
            }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

#[tokio::test]
async fn batch_is_enhanced_and_exported() {
    let base = spawn_server().await;
    let photos = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let bag = photos.path().join("bag.jpg");
    let broken = photos.path().join("broken.png");
    std::fs::write(&bag, b"jpeg bytes").unwrap();
    std::fs::write(&broken, b"png bytes").unwrap();

    let studio = Studio::new(
        Arc::new(EnhanceApi::new(base)),
        Arc::new(HttpAssetFetcher::new()),
        BrandingConfig {
            active_preset: "solid-chic".into(),
            ..Default::default()
        },
    );

    let ids = studio.upload_files(vec![bag, broken]).await;
    assert_eq!(ids.len(), 2);

    let outcomes = join_dispatched(studio.process_all().await).await;
    assert_eq!(
        outcomes,
        vec![Some(ImageStatus::Completed), Some(ImageStatus::Failed)]
    );

    let bag_record = studio.image(&ids[0]).await.unwrap();
    assert!(bag_record
        .processed_url
        .as_deref()
        .unwrap()
        .ends_with("/results/solid-chic-bag"));

    let broken_record = studio.image(&ids[1]).await.unwrap();
    assert_eq!(broken_record.error.as_deref(), Some("cannot read image"));

    let path = studio.export_result(&ids[0], out.path()).await.unwrap();
    assert_eq!(path, out.path().join("LaParis_Studio_bag.png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"PNG:solid-chic-bag");

    let err = studio.export_result(&ids[1], out.path()).await.unwrap_err();
    assert!(matches!(err, ExportError::NotCompleted(_)));
}

#[tokio::test]
async fn missing_source_file_fails_without_request() {
    let base = spawn_server().await;
    let studio = Studio::new(
        Arc::new(EnhanceApi::new(base)),
        Arc::new(HttpAssetFetcher::new()),
        BrandingConfig::default(),
    );

    let ids = studio
        .upload_files(vec![std::path::PathBuf::from("/nowhere/ghost.jpg")])
        .await;
    let status = studio.process_image(&ids[0]).await;

    assert_eq!(status, Some(ImageStatus::Failed));
    let record = studio.image(&ids[0]).await.unwrap();
    assert!(record.error.unwrap().starts_with("Image could not be read"));
}
