// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod provider;
pub mod server;
pub mod sources;

pub use provider::{ConfigResolver, ProviderConfig, DEFAULT_API_URL, DEFAULT_MODEL};
pub use server::ServerArgs;
pub use sources::{ConfigSource, ConfigSourceError, PlatformBindings, ProcessEnv, StaticSource};
