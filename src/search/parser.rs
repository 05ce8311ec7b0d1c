//! Search query parsing.
//!
//! The query language has three token kinds:
//!
//! - `#tag` - a `#` followed by one or more word characters; the note must carry the tag
//! - `OR(a, #b)` - up to the first `)`; the note must carry at least one listed tag
//! - everything else - concatenated, trimmed of whitespace and commas, and matched as
//!   a case-sensitive substring of the note body
//!
//! Tokens are read left to right in a single pass. An `OR(...)` group claims its
//! whole span, so a `#tag` written inside a group only counts towards that group.
//! An `OR(` with no closing parenthesis is plain text, although `#tag` tokens
//! inside it are still picked up as required tags.

use super::Predicate;
use crate::domain::Tag;

const OR_OPEN: &str = "OR(";
const OR_CLOSE: char = ')';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Tag name without the `#`.
    Tag(&'a str),
    /// Raw text between `OR(` and `)`.
    OrGroup(&'a str),
    Text(&'a str),
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits a raw query into tokens. Adjacent plain characters form one `Text` token.
pub(crate) fn tokenize(raw: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < raw.len() {
        let rest = &raw[pos..];

        if let Some(inner) = rest.strip_prefix(OR_OPEN)
            && let Some(close) = inner.find(OR_CLOSE)
        {
            push_text(&mut tokens, &raw[text_start..pos]);
            tokens.push(Token::OrGroup(&inner[..close]));
            pos += OR_OPEN.len() + close + OR_CLOSE.len_utf8();
            text_start = pos;
            continue;
        }

        if let Some(after) = rest.strip_prefix('#') {
            let word_len: usize = after
                .chars()
                .take_while(|c| is_word_char(*c))
                .map(char::len_utf8)
                .sum();
            if word_len > 0 {
                push_text(&mut tokens, &raw[text_start..pos]);
                tokens.push(Token::Tag(&after[..word_len]));
                pos += 1 + word_len;
                text_start = pos;
                continue;
            }
        }

        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    push_text(&mut tokens, &raw[text_start..]);
    tokens
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}

/// Parses a raw query string into a [`Predicate`].
///
/// Never fails: malformed input degrades to a broader text match.
///
/// ```
/// use fastnote::search::parse;
///
/// let predicate = parse("design #done OR(#urgent, #blocked)");
/// assert_eq!(predicate.text(), Some("design"));
/// assert_eq!(predicate.required_tags().len(), 1);
/// assert_eq!(predicate.any_of_groups().len(), 1);
/// ```
pub fn parse(raw: &str) -> Predicate {
    let mut predicate = Predicate::match_all();
    let mut residue = String::new();

    for token in tokenize(raw) {
        match token {
            Token::Tag(name) => {
                if let Ok(tag) = Tag::new(name) {
                    predicate = predicate.require_tag(tag);
                }
            }
            Token::OrGroup(body) => {
                let group = body
                    .split(',')
                    .filter_map(|piece| Tag::new(piece.trim().trim_start_matches('#')).ok());
                predicate = predicate.require_any(group);
            }
            Token::Text(text) => residue.push_str(text),
        }
    }

    let residue = residue.trim_matches(|c: char| c.is_whitespace() || c == ',');
    predicate.with_text(residue)
}
