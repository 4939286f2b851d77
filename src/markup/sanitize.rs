use crate::markup::{Token, Tokenizer};

/// Tags allowed to survive in translated HTML.
pub const ALLOWED_TAGS: [&str; 5] = ["strong", "br", "em", "i", "b"];

/// Sanitizes HTML content in translations by keeping only allowed tags.
///
/// Every tag whose name is not in [`ALLOWED_TAGS`] is removed, whether it
/// opens, closes or self-closes. Allowed tags are kept verbatim, attributes
/// included. Unterminated tags are removed whatever their name. Text between
/// tags is never removed.
pub fn sanitize(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    for token in Tokenizer::new(input) {
        match token {
            Token::Text(text) => sanitized.push_str(text),
            Token::Tag(tag) if tag.terminated && is_allowed(tag.name) => {
                sanitized.push_str(tag.raw)
            }
            Token::Tag(_) => {}
        }
    }
    sanitized
}

fn is_allowed(name: &str) -> bool {
    ALLOWED_TAGS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(name))
}
