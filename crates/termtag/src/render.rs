//! Pull-driven rendering of a token stream.
//!
//! [`Render`] pairs a token source with [`RenderOptions`] and owns one
//! [`Serializer`] per render. Nothing happens until the output stream is
//! polled; each poll pulls tokens until one produces a non-empty fragment.
//! Dropping the output stream drops every upstream source with it.

use futures_util::stream::{self, BoxStream, StreamExt};
use log::{debug, warn};

use crate::concat::{concat, from_tokens, TokenStream};
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::serializer::Serializer;
use crate::token::Token;

/// Rendered output fragments.
pub type FragmentStream = BoxStream<'static, Result<String, RenderError>>;

/// Rendered output as UTF-8 chunks.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, RenderError>>;

/// A render in waiting.
pub struct Render {
    tokens: TokenStream,
    options: RenderOptions,
}

impl Render {
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            options: RenderOptions::default(),
        }
    }

    /// A render over several sources, concatenated in order.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = TokenStream>,
    {
        Self::new(concat(sources))
    }

    /// A render over already-known tokens.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: Send + 'static,
    {
        Self::new(from_tokens(tokens))
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Output fragments in emission order.
    ///
    /// The stream ends after the first error.
    pub fn into_strings(self) -> FragmentStream {
        debug!("render: starting in {:?} mode", self.options.mode());
        let state = State {
            tokens: self.tokens,
            serializer: Serializer::new(self.options),
            emitted: 0,
            finished: false,
        };

        stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }
            while let Some(next) = state.tokens.next().await {
                let pushed = next.and_then(|token| state.serializer.push(token));
                match pushed {
                    Ok(Some(fragment)) => {
                        state.emitted += 1;
                        return Some((Ok(fragment), state));
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!("render: stopped after {} fragments: {}", state.emitted, err);
                        state.finish();
                        return Some((Err(err), state));
                    }
                }
            }

            if !state.serializer.is_balanced() {
                warn!(
                    "render: token stream ended with {} open tags",
                    state.serializer.depth()
                );
            }
            debug!("render: finished after {} fragments", state.emitted);
            None
        })
        .boxed()
    }

    /// Output as UTF-8 bytes, one chunk per fragment.
    pub fn into_bytes(self) -> ByteStream {
        self.into_strings()
            .map(|fragment| fragment.map(String::into_bytes))
            .boxed()
    }
}

struct State {
    tokens: TokenStream,
    serializer: Serializer,
    emitted: usize,
    finished: bool,
}

impl State {
    /// Releases the upstream sources and refuses further output.
    fn finish(&mut self) {
        self.tokens = stream::empty().boxed();
        self.finished = true;
    }
}
