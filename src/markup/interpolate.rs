use crate::markup::{Tag, TagKind, Token, Tokenizer};
use tracing::warn;

/// Interpolates a localized string with HTML tags taken from a reference string.
///
/// Start tags in `reference_string` are numbered from 0 in order of
/// appearance. In `localized_string`, `<i>` becomes the i-th tag with its
/// attributes, `<i/>` becomes its self-closing form and `</i>` its closing
/// tag. Placeholders without a matching reference tag, and any other markup,
/// are copied through unchanged.
///
/// # Example
/// ```
/// use locale_routes::interpolate;
///
/// let out = interpolate("Click <0>here</0>", "See <a href=\"/x\">this</a>");
/// assert_eq!(out, "Click <a href=\"/x\">here</a>");
/// ```
pub fn interpolate(localized_string: &str, reference_string: &str) -> String {
    let reference_tags: Vec<Tag<'_>> = Tokenizer::new(reference_string)
        .filter_map(|token| match token {
            Token::Tag(tag) if is_reference_tag(&tag) => Some(tag),
            _ => None,
        })
        .collect();

    if reference_tags.is_empty() {
        warn!(
            "Reference string has no HTML tags to interpolate; use the translation directly: {:?}",
            reference_string
        );
        return localized_string.to_string();
    }

    let mut interpolated = String::with_capacity(localized_string.len());
    for token in Tokenizer::new(localized_string) {
        let tag = match token {
            Token::Text(text) => {
                interpolated.push_str(text);
                continue;
            }
            Token::Tag(tag) => tag,
        };

        let Some(real) = placeholder_index(&tag).and_then(|i| reference_tags.get(i)) else {
            interpolated.push_str(tag.raw);
            continue;
        };

        let replaced = match tag.kind {
            TagKind::Open => format!("<{}{}>", real.name, real.attrs),
            TagKind::SelfClosing => format!("<{}{} />", real.name, real.attrs),
            TagKind::Close => format!("</{}>", real.name),
        };
        interpolated.push_str(&replaced);
    }

    interpolated
}

fn is_reference_tag(tag: &Tag<'_>) -> bool {
    tag.is_start()
        && tag.terminated
        && tag
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
}

/// Index of a `<i>`, `<i/>` or `</i>` placeholder.
fn placeholder_index(tag: &Tag<'_>) -> Option<usize> {
    if !tag.terminated || !tag.attrs.trim().is_empty() {
        return None;
    }
    if !tag.name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tag.name.parse().ok()
}
