// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Nano Banana node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-decade-fallback-2025-09-01";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-09-01";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "generate-image",
    "decade-fallback",
    "platform-bindings",
    "ai-gateway-url",
    "global-limiter",
];
