//! Encoded-payload heuristics.
//!
//! Three independent signals, OR-ed together. They are literal:
//! the base64 signal matches any whole-string run of 4+ characters from the
//! base64 alphabet, so plain words such as `hello` match too. Do not tighten
//! the pattern without changing the documented behavior of `not_encoded_payload`.

use fogguard_types::ids;
use regex::Regex;
use std::sync::LazyLock;

/// Whole string: 4+ base64 alphabet characters, then up to two `=`.
static BASE64_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+/]{4,}={0,2}$").expect("base64 pattern is a valid regex")
});

/// Anywhere: a percent sign followed by two hex digits.
static URL_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%[0-9A-Fa-f]{2}").expect("url escape pattern is a valid regex")
});

const DATA_URI_PREFIX: &str = "data:";

/// Which sub-heuristics fired for a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingSignals {
    pub base64_like: bool,
    pub url_encoded: bool,
    pub data_uri: bool,
}

impl EncodingSignals {
    pub fn any(&self) -> bool {
        self.base64_like || self.url_encoded || self.data_uri
    }

    /// Names of the heuristics that fired, in fixed order.
    pub fn fired(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.base64_like {
            out.push(ids::HEURISTIC_BASE64_LIKE);
        }
        if self.url_encoded {
            out.push(ids::HEURISTIC_URL_ENCODED);
        }
        if self.data_uri {
            out.push(ids::HEURISTIC_DATA_URI);
        }
        out
    }

    /// Finding code for the first heuristic that fired.
    pub fn primary_code(&self) -> Option<&'static str> {
        if self.base64_like {
            Some(ids::CODE_BASE64_PAYLOAD)
        } else if self.url_encoded {
            Some(ids::CODE_URL_ENCODED_PAYLOAD)
        } else if self.data_uri {
            Some(ids::CODE_DATA_URI_PAYLOAD)
        } else {
            None
        }
    }
}

pub fn looks_base64(payload: &str) -> bool {
    BASE64_LIKE.is_match(payload)
}

pub fn has_url_escape(payload: &str) -> bool {
    URL_ESCAPE.is_match(payload)
}

pub fn is_data_uri(payload: &str) -> bool {
    payload.starts_with(DATA_URI_PREFIX)
}

pub fn detect_encoding(payload: &str) -> EncodingSignals {
    EncodingSignals {
        base64_like: looks_base64(payload),
        url_encoded: has_url_escape(payload),
        data_uri: is_data_uri(payload),
    }
}

/// True when any heuristic flags the payload.
///
/// Callers are expected to skip blank payloads before calling this.
pub fn is_encoded_payload(payload: &str) -> bool {
    looks_base64(payload) || has_url_escape(payload) || is_data_uri(payload)
}
