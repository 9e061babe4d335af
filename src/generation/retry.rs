// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-attempt generation loop with prompt fallback
//!
//! Attempts run strictly in sequence with no delay. A failed attempt is logged
//! and the loop moves on; only exhausting every attempt is reported.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::client::{ChatCompletionRequest, ImageGenerationProvider, ProviderError};
use super::prompt::prompt_for_attempt;
use crate::config::ProviderConfig;

/// Maximum number of provider calls per request
pub const MAX_ATTEMPTS: u32 = 2;

/// Outcome of a single provider call
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Provider returned a usable image URL
    Generated(String),
    /// Provider answered but carried no `image_url` entry
    NoImage,
    /// Call failed (network, status, decoding)
    Failed(ProviderError),
}

impl AttemptOutcome {
    pub fn image_url(self) -> Option<String> {
        match self {
            AttemptOutcome::Generated(url) => Some(url),
            _ => None,
        }
    }
}

/// Successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub image_url: String,
    /// Number of provider calls made, including the successful one
    pub attempts: u32,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no image generated after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Run a single provider call and classify its outcome
pub async fn run_attempt(
    provider: &dyn ImageGenerationProvider,
    config: &ProviderConfig,
    prompt: &str,
    image_data_url: &str,
) -> AttemptOutcome {
    let request = ChatCompletionRequest::image_edit(&config.model, prompt, image_data_url);
    match provider.chat_completion(config, &request).await {
        Ok(response) => {
            debug!("Provider response carried {} image(s)", response.image_count());
            match response.first_image_url() {
                Some(url) => AttemptOutcome::Generated(url.to_string()),
                None => AttemptOutcome::NoImage,
            }
        }
        Err(e) => AttemptOutcome::Failed(e),
    }
}

/// Generate an image, retrying once with the decade fallback prompt
pub async fn generate_with_fallback(
    provider: &dyn ImageGenerationProvider,
    config: &ProviderConfig,
    prompt: &str,
    image_data_url: &str,
) -> Result<GeneratedImage, GenerationError> {
    let mut attempt = 0;

    while attempt < MAX_ATTEMPTS {
        let current_prompt = prompt_for_attempt(prompt, attempt);
        info!(
            attempt = attempt + 1,
            max_attempts = MAX_ATTEMPTS,
            fallback = attempt > 0,
            provider = provider.name(),
            prompt_len = current_prompt.len(),
            "Requesting image from provider"
        );

        match run_attempt(provider, config, &current_prompt, image_data_url).await {
            AttemptOutcome::Generated(image_url) => {
                info!(attempt = attempt + 1, "Provider returned an image");
                return Ok(GeneratedImage {
                    image_url,
                    attempts: attempt + 1,
                });
            }
            AttemptOutcome::NoImage => {
                warn!(attempt = attempt + 1, "Provider response contained no image");
            }
            AttemptOutcome::Failed(e) => {
                warn!(attempt = attempt + 1, "Error on attempt {}: {}", attempt + 1, e);
            }
        }

        attempt += 1;
    }

    Err(GenerationError::Exhausted { attempts: attempt })
}
