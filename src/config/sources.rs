// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration sources, consulted in priority order by the resolver

use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const API_KEY: &str = "API_KEY";
pub const API_URL: &str = "API_URL";
pub const MODEL: &str = "MODEL";
pub const IS_LIMITED: &str = "IS_LIMITED";
pub const CF_ACCOUNT_ID: &str = "CF_ACCOUNT_ID";
pub const CF_GATEWAY_ID: &str = "CF_GATEWAY_ID";

/// Every key a source may provide
pub const KNOWN_KEYS: &[&str] = &[API_KEY, API_URL, MODEL, IS_LIMITED, CF_ACCOUNT_ID, CF_GATEWAY_ID];

/// Errors loading a single source (never fatal to resolution)
#[derive(Debug, Error)]
pub enum ConfigSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bindings in {path}: {message}")]
    Parse { path: String, message: String },
}

/// A provider of raw configuration values
pub trait ConfigSource: Send + Sync {
    /// Load a snapshot of the values this source currently holds
    fn load(&self) -> Result<HashMap<String, String>, ConfigSourceError>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Bindings injected by the deployment platform, as a JSON object on disk
///
/// Re-read on every resolution so rotated bindings take effect without a restart.
pub struct PlatformBindings {
    path: PathBuf,
}

impl PlatformBindings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for PlatformBindings {
    fn load(&self) -> Result<HashMap<String, String>, ConfigSourceError> {
        let path = self.path.display().to_string();
        let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigSourceError::Io {
            path: path.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|e| ConfigSourceError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let object = value.as_object().ok_or_else(|| ConfigSourceError::Parse {
            path,
            message: "expected a JSON object".to_string(),
        })?;

        let mut values = HashMap::new();
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => continue,
            };
            values.insert(key.clone(), text);
        }
        Ok(values)
    }

    fn name(&self) -> &'static str {
        "platform"
    }
}

/// Process-level environment variables
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn load(&self) -> Result<HashMap<String, String>, ConfigSourceError> {
        Ok(KNOWN_KEYS
            .iter()
            .filter_map(|key| env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

/// Fixed in-memory values (defaults, tests)
pub struct StaticSource {
    name: &'static str,
    values: HashMap<String, String>,
}

impl StaticSource {
    pub fn new(name: &'static str, values: &[(&str, &str)]) -> Self {
        Self {
            name,
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ConfigSource for StaticSource {
    fn load(&self) -> Result<HashMap<String, String>, ConfigSourceError> {
        Ok(self.values.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// AI gateway endpoint built from account and gateway identifiers
pub fn gateway_api_url(account_id: &str, gateway_id: &str) -> String {
    format!(
        "https://gateway.ai.cloudflare.com/v1/{}/{}/openrouter",
        account_id, gateway_id
    )
}

/// Fill in `API_URL` from gateway identifiers when a source has no explicit one
pub fn compose_gateway_url(values: &mut HashMap<String, String>) {
    let has_url = values.get(API_URL).map_or(false, |v| !v.trim().is_empty());
    if has_url {
        return;
    }
    let account = values.get(CF_ACCOUNT_ID).filter(|v| !v.trim().is_empty());
    let gateway = values.get(CF_GATEWAY_ID).filter(|v| !v.trim().is_empty());
    if let (Some(account), Some(gateway)) = (account, gateway) {
        let url = gateway_api_url(account.trim(), gateway.trim());
        values.insert(API_URL.to_string(), url);
    }
}
