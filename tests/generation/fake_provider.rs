// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local stand-in for the chat-completions provider

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub enum FakeReply {
    Json(u16, Value),
    Text(u16, &'static str),
}

pub struct RecordedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
pub struct FakeProvider {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    replies: Arc<Mutex<VecDeque<FakeReply>>>,
}

impl FakeProvider {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.calls.lock().unwrap()[index].body["messages"][0]["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

pub fn image_reply(url: &str) -> FakeReply {
    FakeReply::Json(
        200,
        json!({
            "id": "gen-123",
            "choices": [{
                "finish_reason": "stop",
                "message": {
                    "role": "assistant",
                    "content": "",
                    "images": [{"type": "image_url", "image_url": {"url": url}}]
                }
            }]
        }),
    )
}

async fn completions(
    State(fake): State<FakeProvider>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    fake.calls
        .lock()
        .unwrap()
        .push(RecordedCall { authorization, body });

    let reply = fake
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or(FakeReply::Json(200, json!({})));

    match reply {
        FakeReply::Json(status, value) => {
            (StatusCode::from_u16(status).unwrap(), Json(value)).into_response()
        }
        FakeReply::Text(status, text) => (StatusCode::from_u16(status).unwrap(), text).into_response(),
    }
}

/// Start the fake on an ephemeral port; returns its `API_URL` base
pub async fn spawn(replies: Vec<FakeReply>) -> (String, FakeProvider) {
    let fake = FakeProvider {
        calls: Arc::new(Mutex::new(Vec::new())),
        replies: Arc::new(Mutex::new(replies.into())),
    };

    let app = Router::new()
        .route("/api/v1/chat/completions", post(completions))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), fake)
}
