//! Bracket markup: a compact text form of a token sequence.
//!
//! ```text
//! [bold]Hello, [red]world[/red]![/bold][erase line]
//! ```
//!
//! Opening markers carry the tag name and its attributes; closing markers
//! carry only the name. Void tags (`move`, `erase`) never take a closing
//! marker, the parser closes them immediately.
//!
//! # Attributes
//!
//! Attributes follow the name, separated by whitespace:
//!
//! - `key` is shorthand for `key=true`
//! - `key=true` / `key=false`
//! - `key=-3` (integer)
//! - `key=0.25` (decimal)
//!
//! # Tag Name Syntax
//!
//! Names and attribute keys use the pattern `[a-z_][a-z0-9_-]*`. A bracket
//! group that does not fit that syntax, or that names a tag the registry does
//! not know, is literal text:
//!
//! ```rust
//! use termtag::markup::parse;
//! use termtag::Token;
//!
//! let tokens = parse("array[0] and [sparkle]").unwrap();
//! assert_eq!(tokens, vec![Token::Text("array[0] and [sparkle]".into())]);
//! ```
//!
//! Known tags are checked strictly: a closing marker with no open tag, a
//! closing marker for the wrong tag, an unclosed tag or attributes that do not
//! fit the tag are errors, reported with the byte offset of the offending
//! marker.

use thiserror::Error;

use crate::error::AttributeError;
use crate::registry::{AttributeValue, Attributes, Tag, TagName};
use crate::token::Token;

/// Errors raised while parsing bracket markup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkupError {
    #[error("closing marker [/{name}] at byte {offset} has no open tag")]
    OrphanClose { name: String, offset: usize },

    #[error("expected [/{expected}] but found [/{found}] at byte {offset}")]
    MismatchedClose {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("tag [{name}] opened at byte {offset} is never closed")]
    Unclosed { name: &'static str, offset: usize },

    #[error("invalid tag at byte {offset}: {source}")]
    Attributes {
        offset: usize,
        #[source]
        source: AttributeError,
    },
}

/// Parses bracket markup into a balanced token sequence.
pub fn parse(input: &str) -> Result<Vec<Token>, MarkupError> {
    let mut tokens = Vec::new();
    let mut stack: Vec<(TagName, usize)> = Vec::new();

    for (offset, piece) in Tokenizer::new(input) {
        match piece {
            Piece::Text(text) => push_text(&mut tokens, text),
            Piece::Open {
                name,
                attributes,
                raw,
            } => {
                let Ok(tag_name) = name.parse::<TagName>() else {
                    push_text(&mut tokens, raw);
                    continue;
                };
                let tag = Tag::resolve(tag_name, &attributes)
                    .map_err(|source| MarkupError::Attributes { offset, source })?;
                tokens.push(Token::OpeningTag(tag));
                if tag_name.is_void() {
                    tokens.push(Token::ClosingTag);
                } else {
                    stack.push((tag_name, offset));
                }
            }
            Piece::Close { name, raw } => {
                let Ok(tag_name) = name.parse::<TagName>() else {
                    push_text(&mut tokens, raw);
                    continue;
                };
                match stack.pop() {
                    Some((open, _)) if open == tag_name => tokens.push(Token::ClosingTag),
                    Some((open, _)) => {
                        return Err(MarkupError::MismatchedClose {
                            expected: open.as_str(),
                            found: name.to_string(),
                            offset,
                        })
                    }
                    None => {
                        return Err(MarkupError::OrphanClose {
                            name: name.to_string(),
                            offset,
                        })
                    }
                }
            }
            Piece::Invalid(raw) => push_text(&mut tokens, raw),
        }
    }

    match stack.pop() {
        Some((name, offset)) => Err(MarkupError::Unclosed {
            name: name.as_str(),
            offset,
        }),
        None => Ok(tokens),
    }
}

/// Appends literal text, merging it into a preceding text token.
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(Token::Text(existing)) => existing.push_str(text),
        _ => tokens.push(Token::Text(text.to_string())),
    }
}

/// A lexical piece of markup.
#[derive(Debug, Clone, PartialEq)]
enum Piece<'a> {
    Text(&'a str),
    Open {
        name: &'a str,
        attributes: Attributes,
        raw: &'a str,
    },
    Close {
        name: &'a str,
        raw: &'a str,
    },
    /// Bracketed text that is not tag syntax.
    Invalid(&'a str),
}

/// Splits markup into pieces, each with its starting byte offset.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Checks if a string is a valid tag or attribute name.
    fn is_valid_name(s: &str) -> bool {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !first.is_ascii_lowercase() && first != '_' {
            return false;
        }
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    }

    fn parse_value(s: &str) -> Option<AttributeValue> {
        match s {
            "true" => return Some(AttributeValue::Bool(true)),
            "false" => return Some(AttributeValue::Bool(false)),
            _ => {}
        }
        if let Ok(n) = s.parse::<i64>() {
            return Some(AttributeValue::Integer(n));
        }
        let numeric = s
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
        if numeric && s.chars().any(|c| c.is_ascii_digit()) {
            return s.parse::<f64>().ok().map(AttributeValue::Number);
        }
        None
    }

    /// Parses the inside of an opening marker: `name attr attr=value`.
    fn parse_open(content: &'a str, raw: &'a str) -> Option<Piece<'a>> {
        let mut words = content.split_ascii_whitespace();
        let name = words.next()?;
        if !content.starts_with(name) || !Self::is_valid_name(name) {
            return None;
        }

        let mut attributes = Attributes::new();
        for word in words {
            let (key, value) = match word.split_once('=') {
                Some((key, value)) => (key, Self::parse_value(value)?),
                None => (word, AttributeValue::Bool(true)),
            };
            if !Self::is_valid_name(key) {
                return None;
            }
            attributes.insert(key, value);
        }
        Some(Piece::Open {
            name,
            attributes,
            raw,
        })
    }

    fn classify(content: &'a str, raw: &'a str) -> Piece<'a> {
        if let Some(name) = content.strip_prefix('/') {
            if Self::is_valid_name(name) {
                return Piece::Close { name, raw };
            }
            return Piece::Invalid(raw);
        }
        Self::parse_open(content, raw).unwrap_or(Piece::Invalid(raw))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = (usize, Piece<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        let remaining = &self.input[start..];

        let Some(bracket_pos) = remaining.find('[') else {
            self.pos = self.input.len();
            return Some((start, Piece::Text(remaining)));
        };
        if bracket_pos > 0 {
            self.pos += bracket_pos;
            return Some((start, Piece::Text(&remaining[..bracket_pos])));
        }

        let Some(close_bracket) = remaining.find(']') else {
            self.pos = self.input.len();
            return Some((start, Piece::Text(remaining)));
        };

        let content = &remaining[1..close_bracket];
        if content.contains('[') {
            // Only this bracket is literal; a marker may start at the next one.
            self.pos += 1;
            return Some((start, Piece::Invalid(&remaining[..1])));
        }

        self.pos += close_bracket + 1;
        Some((start, Self::classify(content, &remaining[..=close_bracket])))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"]{1,50}"
    }

    fn toggle_name() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "bold",
            "dim",
            "italic",
            "underline",
            "blink",
            "negative",
            "conceal",
        ])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn plain_text_is_one_token(content in plain_text()) {
            prop_assert_eq!(parse(&content).unwrap(), vec![Token::Text(content)]);
        }

        #[test]
        fn valid_names_accepted(name in "[a-z_][a-z0-9_-]{0,10}") {
            prop_assert!(Tokenizer::is_valid_name(&name));
        }

        #[test]
        fn invalid_start_digit_rejected(n in 0..10u8, rest in "[a-z0-9_-]{0,5}") {
            let name = format!("{}{}", n, rest);
            prop_assert!(!Tokenizer::is_valid_name(&name));
        }

        #[test]
        fn nested_toggles_balance(
            outer in toggle_name(),
            inner in toggle_name(),
            content in plain_text()
        ) {
            let input = format!("[{}][{}]{}[/{}][/{}]", outer, inner, content, inner, outer);
            let tokens = parse(&input).unwrap();
            prop_assert_eq!(tokens.len(), 5);
            prop_assert_eq!(&tokens[2], &Token::Text(content));
            prop_assert_eq!(&tokens[3], &Token::ClosingTag);
            prop_assert_eq!(&tokens[4], &Token::ClosingTag);
        }

        #[test]
        fn unknown_tags_pass_through(name in "zz[a-z]{1,6}", content in plain_text()) {
            let input = format!("[{}]{}[/{}]", name, content, name);
            prop_assert_eq!(parse(&input).unwrap(), vec![Token::Text(input)]);
        }
    }
}
