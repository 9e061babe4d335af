// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error body returned to the browser client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Global limiter flag is set
    Limited,
    MissingApiKey,
    MissingFields,
    InvalidImageDataUrl,
    /// Every attempt finished without an image
    GenerationFailed,
    ApiKeyConfiguration,
    RateLimitExceeded,
    Unknown(String),
}

pub const LIMITED_MESSAGE: &str =
    "Service is temporarily limited due to high demand. Please try again later.";

impl ApiError {
    /// Classify a failure that escaped the request pipeline by its message text
    pub fn from_failure_message(message: &str) -> Self {
        if message.contains("API key") {
            ApiError::ApiKeyConfiguration
        } else if message.contains("rate limit") {
            ApiError::RateLimitExceeded
        } else {
            ApiError::Unknown(message.to_string())
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::Limited => LIMITED_MESSAGE.to_string(),
            ApiError::MissingApiKey => "Missing API_KEY env".to_string(),
            ApiError::MissingFields => "Missing imageDataUrl or prompt".to_string(),
            // Leading quote is part of the body the existing client already sees
            ApiError::InvalidImageDataUrl => {
                "\"Invalid image data URL format. Expected \"data:image/...;base64,...\""
                    .to_string()
            }
            ApiError::GenerationFailed => "Failed to generate image".to_string(),
            ApiError::ApiKeyConfiguration => {
                "API configuration error. Please check your API key.".to_string()
            }
            ApiError::RateLimitExceeded => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            ApiError::Unknown(msg) => format!("Failed to generate image: {}", msg),
        };
        ErrorResponse { error }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidImageDataUrl => 400,
            ApiError::Limited | ApiError::RateLimitExceeded => 429,
            // Missing fields stay 500 for compatibility with the existing client
            ApiError::MissingApiKey
            | ApiError::MissingFields
            | ApiError::GenerationFailed
            | ApiError::ApiKeyConfiguration
            | ApiError::Unknown(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Limited => write!(f, "Service limited"),
            ApiError::MissingApiKey => write!(f, "Missing API key configuration"),
            ApiError::MissingFields => write!(f, "Missing imageDataUrl or prompt"),
            ApiError::InvalidImageDataUrl => write!(f, "Invalid image data URL"),
            ApiError::GenerationFailed => write!(f, "Image generation failed"),
            ApiError::ApiKeyConfiguration => write!(f, "API key configuration error"),
            ApiError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ApiError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
