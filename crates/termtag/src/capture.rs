//! Text capture: shaping raw content chunks into tokens.
//!
//! Content sources may yield plain strings or ready-made tokens. Capture
//! wraps strings as [`Token::Text`], passes tokens through and drops empty
//! strings, so the serializer sees one uniform token shape whatever the
//! source.

use futures_util::future;
use futures_util::stream::{Stream, StreamExt};

use crate::concat::TokenStream;
use crate::error::{BoxError, RenderError};
use crate::token::Token;

/// A raw item from a content source.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Text(String),
    Token(Token),
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

impl From<Token> for Chunk {
    fn from(token: Token) -> Self {
        Chunk::Token(token)
    }
}

impl Chunk {
    /// The token for this chunk; `None` for empty text.
    pub fn into_token(self) -> Option<Token> {
        match self {
            Chunk::Text(text) => Token::text(text),
            Chunk::Token(token) => Some(token),
        }
    }
}

/// Captures a fallible stream of chunks into a token stream.
///
/// Source errors are wrapped as [`RenderError::Source`].
pub fn capture<S, C, E>(chunks: S) -> TokenStream
where
    S: Stream<Item = Result<C, E>> + Send + 'static,
    C: Into<Chunk> + 'static,
    E: Into<BoxError> + 'static,
{
    chunks
        .filter_map(|item| {
            future::ready(match item {
                Ok(chunk) => Into::<Chunk>::into(chunk).into_token().map(Ok),
                Err(err) => Some(Err(RenderError::from_source(err))),
            })
        })
        .boxed()
}
