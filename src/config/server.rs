// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line / environment settings for the HTTP server

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Nano Banana image generation node
#[derive(Parser, Debug, Clone)]
#[command(name = "nano-banana-node")]
#[command(version)]
#[command(about = "Proxies portrait + prompt requests to a multimodal image generation provider", long_about = None)]
pub struct ServerArgs {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// JSON file holding platform-provided bindings (preferred over process env)
    #[arg(long, env = "PLATFORM_BINDINGS_FILE")]
    pub platform_bindings: Option<PathBuf>,

    /// Timeout for each provider call in seconds (unset = no timeout)
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS")]
    pub provider_timeout_secs: Option<u64>,
}

impl ServerArgs {
    pub fn provider_timeout(&self) -> Option<Duration> {
        self.provider_timeout_secs.map(Duration::from_secs)
    }
}
