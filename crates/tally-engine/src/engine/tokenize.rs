//! Formula text to raw tokens.
//!
//! Splits text into numeric literals (including `0x`/`0b`/`0o` forms), label-like words, and single-character
//! symbols. Whitespace separates tokens and is dropped. No classification
//! happens here; see [`Token::classify`](super::Token::classify).

use regex::Regex;
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"0[xXbBoO][0-9A-Za-z]+|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|[A-Za-z]+[0-9]*|\S")
            .expect("formula token regex must compile")
    })
}

/// Split formula text into raw tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    token_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
