//! Markup handling for translated strings.
//!
//! Translated strings may carry numbered placeholder tags (`<0>`, `</0>`,
//! `<1/>`) standing in for real markup, or raw HTML that must be restricted
//! before display. Both operations run over the same small tag tokenizer.

mod interpolate;
mod sanitize;
mod token;

pub use interpolate::interpolate;
pub use sanitize::{sanitize, ALLOWED_TAGS};
pub use token::{Tag, TagKind, Token, Tokenizer};
