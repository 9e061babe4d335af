// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation via a remote multimodal chat-completions provider

pub mod client;
pub mod data_url;
pub mod prompt;
pub mod retry;

pub use client::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletionsClient, ContentPart,
    ImageGenerationProvider, ProviderError,
};
pub use data_url::is_image_data_url;
pub use prompt::{extract_decade, fallback_prompt, DEFAULT_DECADE};
pub use retry::{generate_with_fallback, AttemptOutcome, GeneratedImage, GenerationError, MAX_ATTEMPTS};
