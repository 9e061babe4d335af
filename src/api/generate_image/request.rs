// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::generation::data_url::is_image_data_url;

/// Request for image generation via POST /api/generate-image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    /// Reference photo as `data:image/<subtype>;base64,<payload>`
    #[serde(default)]
    pub image_data_url: Option<String>,

    /// Text prompt, optionally naming a decade such as "1950s"
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateImageRequest {
    pub fn new(image_data_url: &str, prompt: &str) -> Self {
        Self {
            image_data_url: Some(image_data_url.to_string()),
            prompt: Some(prompt.to_string()),
        }
    }

    pub fn image_data_url(&self) -> &str {
        self.image_data_url.as_deref().unwrap_or_default()
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// Validate required fields, then the data URL shape
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.image_data_url().is_empty() || self.prompt().is_empty() {
            return Err(ApiError::MissingFields);
        }

        if !is_image_data_url(self.image_data_url()) {
            return Err(ApiError::InvalidImageDataUrl);
        }

        Ok(())
    }
}
