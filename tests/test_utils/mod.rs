//! Test utilities for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};
use http::Request;
use http_body_util::BodyExt;

use glimpse::ai::{Dispatcher, GenerativeModel, Part};
use glimpse::api::{AppState, app};
use glimpse::core::AppConfig;

/// A model that pops a scripted reply per call and remembers what it
/// was sent. Runs out of replies with an error.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Vec<Part>>>,
}

impl ScriptedModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(self: &Arc<Self>, text: &str) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        Arc::clone(self)
    }

    pub fn fail(self: &Arc<Self>, msg: &str) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(Err(msg.to_string()));
        Arc::clone(self)
    }

    pub fn calls(&self) -> Vec<Vec<Part>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_content(&self, parts: &[Part], _model: &str) -> Result<String, Error> {
        self.calls.lock().unwrap().push(parts.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(anyhow!(msg)),
            None => Err(anyhow!("no scripted reply")),
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        gemini_api_key: String::from("test-api-key"),
        gemini_api_hostname: String::from("http://127.0.0.1:1"),
        gemini_model: String::from("gemini-2.5-flash"),
        web_ui_path: String::from("./web-ui"),
    }
}

/// Creates a test application router backed by `model`.
pub fn test_app(model: Arc<ScriptedModel>) -> Router {
    let config = test_config();
    let dispatcher = Dispatcher::new(model, &config.gemini_model);
    let app_state = AppState::new(dispatcher, config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

const BOUNDARY: &str = "glimpse-test-boundary";

/// Builds a multipart upload with a single `file` field.
pub fn upload_request(file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .uri("/api/attachment")
        .method("POST")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
