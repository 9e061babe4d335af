// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shape check for inline image data URLs

use regex::Regex;
use std::sync::OnceLock;

fn image_data_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:image/([A-Za-z0-9_]+);base64,([^\n\r\u{2028}\u{2029}]*)$")
            .expect("data url pattern is valid")
    })
}

/// Returns true if `value` looks like `data:image/<subtype>;base64,<payload>`.
///
/// The payload is not decoded.
pub fn is_image_data_url(value: &str) -> bool {
    image_data_url_pattern().is_match(value)
}

/// Image subtype (e.g. `png`) of a well-formed data URL
pub fn image_subtype(value: &str) -> Option<&str> {
    image_data_url_pattern()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
