// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchEngine, FetchRequest};
use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

async fn start_test_server() -> String {
    let app = Router::new()
        .route(
            "/test",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page = params.get("pageno").cloned().unwrap_or_default();
                format!("<html><body>page {}</body></html>", page)
            }),
        )
        .route(
            "/error",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn request_for(url: String) -> FetchRequest {
    FetchRequest {
        url,
        user_agent: "spiderd-test/1.0".to_string(),
        params: HashMap::new(),
        timeout: Duration::from_secs(10),
    }
}

#[tokio::test]
async fn test_reqwest_engine_basic_fetch() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine;
    let mut request = request_for(format!("{}/test", server_url));
    request
        .params
        .insert("pageno".to_string(), "1".to_string());

    let response = engine.fetch(&request).await.unwrap();
    assert_eq!(response.status_code, 200);
    assert!(response.is_ok());
    // Query params must reach the server as the request query string
    assert!(response.content.contains("page 1"));
}

#[tokio::test]
async fn test_reqwest_engine_non_success_status() {
    let server_url = start_test_server().await;

    let engine = ReqwestEngine;
    let request = request_for(format!("{}/error", server_url));

    let response = engine.fetch(&request).await.unwrap();
    assert_eq!(response.status_code, 500);
    assert!(!response.is_ok());
}

#[tokio::test]
async fn test_reqwest_engine_transport_error() {
    // Nothing listens here; connection must be refused
    let engine = ReqwestEngine;
    let request = request_for("http://127.0.0.1:1/".to_string());

    let result = engine.fetch(&request).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_reqwest_engine_name() {
    let engine = ReqwestEngine;
    assert_eq!(engine.name(), "reqwest");
}
