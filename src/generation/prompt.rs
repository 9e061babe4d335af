// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt selection for generation attempts
//!
//! The first attempt always sends the caller's prompt untouched. When it yields
//! no image, the retry sends a fixed era-portrait template keyed on the decade
//! named in the original prompt.

use regex::Regex;
use std::sync::OnceLock;

/// Decade used by the fallback template when the prompt names none
pub const DEFAULT_DECADE: &str = "1950s";

fn decade_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]{4}s)").expect("decade pattern is valid"))
}

/// Extract the first decade token (four digits followed by `s`) from a prompt
pub fn extract_decade(prompt: &str) -> Option<&str> {
    decade_pattern()
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Build the era-portrait template for the given decade
pub fn fallback_prompt(decade: &str) -> String {
    format!(
        "Create a photograph of the person in this image as if they were living in the {}. \
         The photograph should capture the distinct fashion, hairstyles, and overall atmosphere \
         of that time period. Ensure the final image is a clear photograph that looks authentic \
         to the era.",
        decade
    )
}

/// Prompt to send on a given zero-based attempt
pub fn prompt_for_attempt(original: &str, attempt: u32) -> String {
    if attempt == 0 {
        original.to_string()
    } else {
        fallback_prompt(extract_decade(original).unwrap_or(DEFAULT_DECADE))
    }
}
