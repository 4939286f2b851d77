//! A minimal HTML tag tokenizer.
//!
//! Splits a string into text runs and tags. It does not build a tree or
//! decode entities; each tag is reported with its name, its attribute span
//! and whether it opens, closes or self-closes.

/// How a tag relates to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name attrs>`
    Open,
    /// `<name attrs/>`
    SelfClosing,
    /// `</name>`
    Close,
}

/// A single tag as it appears in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// The full source text of the tag, delimiters included
    pub raw: &'a str,
    pub name: &'a str,
    /// Everything between the name and the closing `>`, minus a trailing
    /// self-closing `/`. Leading whitespace is kept.
    pub attrs: &'a str,
    pub kind: TagKind,
    /// False when the input ended (or another `<` began) before `>`
    pub terminated: bool,
}

impl Tag<'_> {
    /// Open or self-closing.
    pub fn is_start(&self) -> bool {
        self.kind != TagKind::Close
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
}

/// Iterator over the tokens of a string.
///
/// Each call owns its position, so tokenizers over different inputs never
/// share state.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if rest.starts_with('<') {
            if let Some(tag) = parse_tag(rest) {
                self.pos += tag.raw.len();
                return Some(Token::Tag(tag));
            }
            // A lone `<` is text; continue the run up to the next `<`
            let end = rest[1..].find('<').map_or(rest.len(), |i| i + 1);
            self.pos += end;
            return Some(Token::Text(&rest[..end]));
        }

        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/// Parse a tag at the start of `s`, which must begin with `<`.
fn parse_tag(s: &str) -> Option<Tag<'_>> {
    let body = &s[1..];
    let (closing, after_slash) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let name_len = after_slash
        .find(|c: char| c.is_whitespace() || matches!(c, '>' | '/' | '<'))
        .unwrap_or(after_slash.len());
    if name_len == 0 {
        return None;
    }
    let name = &after_slash[..name_len];
    let after_name = &after_slash[name_len..];

    // Scan to the closing `>`, ignoring any inside quoted attribute values
    let mut quote: Option<char> = None;
    let mut attrs_end = after_name.len();
    let mut terminated = false;
    for (i, c) in after_name.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => {
                attrs_end = i;
                terminated = true;
                break;
            }
            (None, '<') => {
                attrs_end = i;
                break;
            }
            (None, _) => {}
        }
    }

    let prefix_len = 1 + usize::from(closing) + name_len;
    let raw_len = prefix_len + attrs_end + usize::from(terminated);
    let raw = &s[..raw_len];

    let attrs = &after_name[..attrs_end];
    let (kind, attrs) = if closing {
        (TagKind::Close, attrs)
    } else if let Some(stripped) = attrs.trim_end().strip_suffix('/') {
        (TagKind::SelfClosing, stripped.trim_end())
    } else {
        (TagKind::Open, attrs)
    };

    Some(Tag {
        raw,
        name,
        attrs,
        kind,
        terminated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(src: &str) -> Vec<Tag<'_>> {
        Tokenizer::new(src)
            .filter_map(|t| match t {
                Token::Tag(tag) => Some(tag),
                Token::Text(_) => None,
            })
            .collect()
    }

    // ==================== Basic Tokenization Tests ====================

    #[test]
    fn test_text_only() {
        let tokens: Vec<_> = Tokenizer::new("plain text").collect();
        assert_eq!(tokens, vec![Token::Text("plain text")]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Tokenizer::new("").count(), 0);
    }

    #[test]
    fn test_open_and_close() {
        let tokens: Vec<_> = Tokenizer::new("a <b>bold</b> c").collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::Text("a "));
        assert_eq!(tokens[2], Token::Text("bold"));
        assert_eq!(tokens[4], Token::Text(" c"));

        let found = tags("a <b>bold</b> c");
        assert_eq!(found[0].kind, TagKind::Open);
        assert_eq!(found[0].raw, "<b>");
        assert_eq!(found[1].kind, TagKind::Close);
        assert_eq!(found[1].raw, "</b>");
    }

    #[test]
    fn test_tokens_reassemble_input() {
        let src = "x < y, <a href=\"/p\">link</a><br/> <3 done";
        let rebuilt: String = Tokenizer::new(src)
            .map(|t| match t {
                Token::Text(text) => text,
                Token::Tag(tag) => tag.raw,
            })
            .collect();
        assert_eq!(rebuilt, src);
    }

    // ==================== Attribute Tests ====================

    #[test]
    fn test_attributes_keep_leading_space() {
        let found = tags("<a href=\"/x\" class=\"c\">");
        assert_eq!(found[0].name, "a");
        assert_eq!(found[0].attrs, " href=\"/x\" class=\"c\"");
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let found = tags("<span title=\"a > b\">x</span>");
        assert_eq!(found[0].raw, "<span title=\"a > b\">");
        assert!(found[0].terminated);
    }

    // ==================== Self-closing Tests ====================

    #[test]
    fn test_self_closing_without_space() {
        let found = tags("<br/>");
        assert_eq!(found[0].kind, TagKind::SelfClosing);
        assert_eq!(found[0].name, "br");
        assert_eq!(found[0].attrs, "");
    }

    #[test]
    fn test_self_closing_with_attributes() {
        let found = tags("<img src=\"a.png\" />");
        assert_eq!(found[0].kind, TagKind::SelfClosing);
        assert_eq!(found[0].attrs, " src=\"a.png\"");
    }

    #[test]
    fn test_numbered_placeholders() {
        let found = tags("<0>x</0><1/>");
        assert_eq!(found[0].name, "0");
        assert_eq!(found[0].kind, TagKind::Open);
        assert_eq!(found[1].kind, TagKind::Close);
        assert_eq!(found[2].name, "1");
        assert_eq!(found[2].kind, TagKind::SelfClosing);
    }

    // ==================== Malformed Input Tests ====================

    #[test]
    fn test_lone_lt_is_text() {
        let tokens: Vec<_> = Tokenizer::new("1 < 2").collect();
        assert_eq!(tokens, vec![Token::Text("1 "), Token::Text("< 2")]);
    }

    #[test]
    fn test_unterminated_at_end() {
        let found = tags("text <script src=x");
        assert_eq!(found[0].name, "script");
        assert!(!found[0].terminated);
        assert_eq!(found[0].raw, "<script src=x");
    }

    #[test]
    fn test_unterminated_before_next_tag() {
        let found = tags("<div <b>");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw, "<div ");
        assert!(!found[0].terminated);
        assert_eq!(found[1].raw, "<b>");
    }
}
