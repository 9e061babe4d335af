// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod generation;
pub mod version;

pub use api::{create_app, start_server, ApiError, AppState};
pub use config::{ConfigResolver, ProviderConfig, ServerArgs};
pub use generation::{
    generate_with_fallback, ChatCompletionsClient, ImageGenerationProvider, ProviderError,
};
