//! Monetary amount extraction from free text
//!
//! The amount of a message is its first numeric token: a run of digits,
//! optionally followed by one `.` or `,` and more digits. Anything after
//! that token is ignored, and thousand separators are not understood
//! ("1.500" reads as one and a half).

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::Money;

fn numeric_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+(?:[.,][0-9]+)?").expect("invalid numeric token regex"))
}

/// Derives a [`Money`] amount from a raw message
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueExtractor;

impl ValueExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The first numeric token of `raw_message`, if any
    pub fn numeric_token<'a>(&self, raw_message: &'a str) -> Option<&'a str> {
        numeric_token_re().find(raw_message).map(|m| m.as_str())
    }

    /// Extract the amount of a message, degrading to zero
    pub fn extract_amount(&self, raw_message: &str) -> Money {
        let Some(token) = self.numeric_token(raw_message) else {
            return Money::zero();
        };

        match Money::from_numeric_token(token) {
            Some(amount) => amount,
            None => {
                debug!(token, "unreadable numeric token, using zero");
                Money::zero()
            }
        }
    }
}
