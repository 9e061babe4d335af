// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider configuration resolved from ordered sources

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use super::sources::{
    compose_gateway_url, ConfigSource, PlatformBindings, ProcessEnv, StaticSource, API_KEY,
    API_URL, IS_LIMITED, MODEL,
};

/// Provider base URL used when nothing overrides it
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1";

/// Model used when nothing overrides it
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-image-preview:free";

/// Snapshot of provider settings for one request
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    /// Bearer token for the provider (secret)
    pub api_key: Option<String>,
    /// Base URL of the chat-completions API
    pub api_url: String,
    /// Model identifier
    pub model: String,
    /// Global gate: when set, every generation request is refused
    pub is_limited: bool,
}

impl ProviderConfig {
    /// Full chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            is_limited: false,
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("is_limited", &self.is_limited)
            .finish()
    }
}

/// Parse a boolean flag value (`true`, `1`, `yes`, `on`)
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Merges an ordered list of sources into a `ProviderConfig`
///
/// For each key the first source with a non-empty value wins. A source that
/// fails to load is skipped.
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Platform bindings (if a path is given), then process environment, then defaults
    pub fn standard(platform_bindings: Option<PathBuf>) -> Self {
        let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();
        if let Some(path) = platform_bindings {
            sources.push(Box::new(PlatformBindings::new(path)));
        }
        sources.push(Box::new(ProcessEnv));
        sources.push(Box::new(Self::defaults()));
        Self::new(sources)
    }

    /// Static defaults for the optional keys
    pub fn defaults() -> StaticSource {
        StaticSource::new("defaults", &[(API_URL, DEFAULT_API_URL), (MODEL, DEFAULT_MODEL)])
    }

    /// Names of the configured sources, in priority order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Resolve a fresh snapshot
    pub fn resolve(&self) -> ProviderConfig {
        let mut merged: HashMap<String, String> = HashMap::new();

        for source in &self.sources {
            let mut values = match source.load() {
                Ok(values) => values,
                Err(e) => {
                    debug!("Skipping config source {}: {}", source.name(), e);
                    continue;
                }
            };
            compose_gateway_url(&mut values);

            for (key, value) in values {
                if value.trim().is_empty() {
                    continue;
                }
                merged.entry(key).or_insert(value);
            }
        }

        let defaults = ProviderConfig::default();
        ProviderConfig {
            api_key: merged.remove(API_KEY),
            api_url: merged.remove(API_URL).unwrap_or(defaults.api_url),
            model: merged.remove(MODEL).unwrap_or(defaults.model),
            is_limited: merged
                .get(IS_LIMITED)
                .map(|v| parse_flag(v))
                .unwrap_or(false),
        }
    }
}
