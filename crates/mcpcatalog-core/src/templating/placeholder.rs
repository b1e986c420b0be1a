//! Placeholder conventions shared by extraction and substitution.
//!
//! Two textual forms mark a value an operator has to supply:
//!
//! - **Bracketed**: `<notion-bearer-token>`, usually inside env values or
//!   headers, sometimes embedded in a larger string such as a JSON blob.
//! - **Bare uppercase**: `YOUR_ACCESS_TOKEN_HERE` or `--api-key=PADDLE_API_KEY`
//!   inside command arguments.
//!
//! The bare form is a heuristic, not a grammar: any maximal run of `[A-Z_]`
//! longer than three characters counts, so short acronyms such as `SQL` or
//! `API` are skipped. Catalog data was curated against exactly this rule.

use lazy_static::lazy_static;
use regex::Regex;

/// Runs of at most this many characters are never treated as placeholders
pub const MAX_IGNORED_TOKEN_LEN: usize = 3;

lazy_static! {
    /// `<name>` with no whitespace or nested brackets; group 1 is the name
    pub static ref BRACKETED_PLACEHOLDER: Regex = Regex::new(r"<([^<>\s]+)>").unwrap();

    /// Maximal runs of uppercase ASCII letters and underscores
    pub static ref ARG_TOKEN: Regex = Regex::new(r"[A-Z_]+").unwrap();

    /// Either form in one scan. A bracketed match wins at its position, so
    /// an uppercase run inside `<...>` is only seen through group 1.
    pub static ref ANY_PLACEHOLDER: Regex = Regex::new(r"<([^<>\s]+)>|[A-Z_]+").unwrap();
}

/// Wrap a name in the bracket convention: `token` -> `<token>`
pub fn bracketed(name: &str) -> String {
    format!("<{}>", name)
}

/// Names of all bracketed placeholders in `text`, in order of appearance
pub fn bracketed_tokens(text: &str) -> Vec<String> {
    BRACKETED_PLACEHOLDER
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Bare uppercase tokens in `text` that qualify as placeholders, in order
pub fn arg_tokens(text: &str) -> Vec<String> {
    ARG_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| token.len() > MAX_IGNORED_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
