// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ChatCompletionsClient against a local fake provider

use super::fake_provider::{image_reply, spawn, FakeReply};
use nano_banana_node::config::ProviderConfig;
use nano_banana_node::generation::{
    ChatCompletionRequest, ChatCompletionsClient, ImageGenerationProvider, ProviderError,
};
use serde_json::json;
use std::time::Duration;

const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

fn config(api_url: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some("sk-or-test".to_string()),
        api_url: api_url.to_string(),
        model: "google/gemini-2.5-flash-image-preview:free".to_string(),
        is_limited: false,
    }
}

#[tokio::test]
async fn test_sends_bearer_and_body() {
    let (api_url, fake) = spawn(vec![image_reply("data:image/png;base64,OUT")]).await;
    let client = ChatCompletionsClient::new(None).unwrap();
    let request = ChatCompletionRequest::image_edit(
        "google/gemini-2.5-flash-image-preview:free",
        "a 1940s pilot",
        IMAGE,
    );

    let response = client
        .chat_completion(&config(&api_url), &request)
        .await
        .unwrap();
    assert_eq!(response.first_image_url(), Some("data:image/png;base64,OUT"));

    let calls = fake.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer sk-or-test"));
    assert_eq!(
        calls[0].body,
        json!({
            "model": "google/gemini-2.5-flash-image-preview:free",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "a 1940s pilot"},
                    {"type": "image_url", "image_url": {"url": IMAGE}}
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_trailing_slash_in_api_url() {
    let (api_url, fake) = spawn(vec![image_reply("u")]).await;
    let client = ChatCompletionsClient::new(Some(Duration::from_secs(10))).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);

    let response = client
        .chat_completion(&config(&format!("{}/", api_url)), &request)
        .await
        .unwrap();
    assert_eq!(response.first_image_url(), Some("u"));
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let (api_url, _fake) = spawn(vec![FakeReply::Json(
        429,
        json!({"error": {"message": "Rate limit exceeded: free-models-per-day", "code": 429}}),
    )])
    .await;
    let client = ChatCompletionsClient::new(None).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);

    let err = client
        .chat_completion(&config(&api_url), &request)
        .await
        .unwrap_err();
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("Rate limit exceeded"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (api_url, _fake) = spawn(vec![FakeReply::Text(200, "<html>gateway</html>")]).await;
    let client = ChatCompletionsClient::new(None).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);

    let err = client
        .chat_completion(&config(&api_url), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let client = ChatCompletionsClient::new(Some(Duration::from_secs(5))).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);

    let err = client
        .chat_completion(&config("http://127.0.0.1:9/api/v1"), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Network(_)));
}

#[tokio::test]
async fn test_missing_api_key_is_rejected_locally() {
    let (api_url, fake) = spawn(vec![]).await;
    let client = ChatCompletionsClient::new(None).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);
    let config = ProviderConfig {
        api_key: None,
        ..config(&api_url)
    };

    let err = client.chat_completion(&config, &request).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest(_)));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_first_image_survives_odd_sibling_fields() {
    let (api_url, fake) = spawn(vec![FakeReply::Json(
        200,
        json!({
            "choices": [
                {"message": {"images": [
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,KEEP"}},
                    {"type": 7}
                ]}},
                {"message": {"images": null}}
            ]
        }),
    )])
    .await;
    let client = ChatCompletionsClient::new(None).unwrap();
    let request = ChatCompletionRequest::image_edit("m", "p", IMAGE);

    let response = client
        .chat_completion(&config(&api_url), &request)
        .await
        .unwrap();
    assert_eq!(response.first_image_url(), Some("data:image/png;base64,KEEP"));
    assert_eq!(fake.call_count(), 1);
}
