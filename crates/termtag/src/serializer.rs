//! The tag-stack serializer.
//!
//! Terminal attributes are global and flat: there is no "pop the last style"
//! sequence. The serializer emulates nesting by keeping a stack of open tags.
//! When a tag closes it emits that tag's end sequence and then replays the
//! start sequence of every tag still open, from the innermost outward, so the
//! surrounding styles are back in effect.
//!
//! ```rust
//! use termtag::{Serializer, RenderOptions, Token};
//! use termtag::registry::{NamedColor, BasicColor, Toggle};
//!
//! let mut serializer = Serializer::new(RenderOptions::default());
//! let tokens = [
//!     Token::open(Toggle::Bold),
//!     Token::open(BasicColor::foreground(NamedColor::Red)),
//!     Token::Text("x".into()),
//!     Token::close(),
//!     Token::close(),
//! ];
//! let fragments: Vec<String> = tokens
//!     .into_iter()
//!     .filter_map(|token| serializer.push(token).unwrap())
//!     .collect();
//!
//! assert_eq!(
//!     fragments,
//!     ["\x1B[22m\x1B[1m", "\x1B[31m", "x", "\x1B[39m\x1B[22m\x1B[1m", "\x1B[22m"]
//! );
//! ```

use log::trace;

use crate::error::{RenderError, Result};
use crate::options::{OutputMode, RenderOptions};
use crate::registry::Tag;
use crate::token::Token;

/// Replaces every ESC character in `text` with `placeholder`.
///
/// Text must never be able to smuggle control sequences into the output.
pub fn escape_text(text: &str, placeholder: char) -> String {
    let mut buf = [0u8; 4];
    text.replace('\x1B', placeholder.encode_utf8(&mut buf))
}

/// Turns tokens into output fragments, one render at a time.
#[derive(Debug, Clone)]
pub struct Serializer {
    stack: Vec<Tag>,
    options: RenderOptions,
}

impl Serializer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            stack: Vec::new(),
            options,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Open tags, outermost first.
    pub fn open_tags(&self) -> &[Tag] {
        &self.stack
    }

    /// True when every opened tag has been closed.
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Consumes one token.
    ///
    /// Returns the fragment to emit, or `None` when the token produces no
    /// output. A closing token with nothing open is an error; the serializer
    /// is left unchanged in that case.
    pub fn push(&mut self, token: Token) -> Result<Option<String>> {
        trace!("serializer: {} at depth {}", token.kind(), self.stack.len());
        let fragment = match token {
            Token::Text(text) => escape_text(&text, self.options.escape_placeholder()),
            Token::OpeningTag(tag) => {
                let fragment = self.opening(&tag);
                self.stack.push(tag);
                fragment
            }
            Token::ClosingTag => {
                let fragment = self.closing()?;
                self.stack.pop();
                fragment
            }
        };

        Ok((!fragment.is_empty()).then_some(fragment))
    }

    fn opening(&self, tag: &Tag) -> String {
        match self.options.mode() {
            OutputMode::Term => tag.start().into_owned(),
            OutputMode::Text => String::new(),
            OutputMode::TermDebug => tag.to_string(),
        }
    }

    fn closing(&self) -> Result<String> {
        let (current, ancestors) = self.stack.split_last().ok_or(RenderError::DanglingClose)?;

        let fragment = match self.options.mode() {
            OutputMode::Term => {
                let mut out = current.end().to_string();
                for ancestor in ancestors.iter().rev() {
                    out.push_str(&ancestor.start());
                }
                out
            }
            OutputMode::Text => String::new(),
            OutputMode::TermDebug if current.is_void() => String::new(),
            OutputMode::TermDebug => format!("[/{}]", current.name()),
        };
        Ok(fragment)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
