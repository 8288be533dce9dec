//! Ordered concatenation of token sources.
//!
//! Sources are drained strictly one after another: every token of source
//! *i* is delivered before the first token of source *i + 1* is even
//! requested, however fast the later source could have produced it. Nothing
//! is polled ahead of demand, so an endless source simply keeps the sources
//! after it waiting.
//!
//! The first error ends the concatenation. Tokens already delivered stay
//! delivered; the remaining sources are dropped without being polled.

use std::collections::VecDeque;

use futures_util::stream::{self, BoxStream, StreamExt};
use log::trace;

use crate::error::RenderError;
use crate::token::Token;

/// A lazily produced, fallible sequence of tokens.
pub type TokenStream = BoxStream<'static, Result<Token, RenderError>>;

struct Concat {
    pending: VecDeque<TokenStream>,
    position: usize,
}

/// Concatenates `sources` into one stream, preserving their order.
pub fn concat<I>(sources: I) -> TokenStream
where
    I: IntoIterator<Item = TokenStream>,
{
    let state = Concat {
        pending: sources.into_iter().collect(),
        position: 0,
    };

    stream::unfold(state, |mut state| async move {
        while let Some(current) = state.pending.front_mut() {
            let next = current.next().await;
            match next {
                Some(Ok(token)) => return Some((Ok(token), state)),
                Some(Err(err)) => {
                    trace!("concat: source {} failed, dropping the rest", state.position);
                    state.pending.clear();
                    return Some((Err(err), state));
                }
                None => {
                    trace!("concat: source {} exhausted", state.position);
                    state.pending.pop_front();
                    state.position += 1;
                }
            }
        }
        None
    })
    .boxed()
}

/// A source that yields already-known tokens.
pub fn from_tokens<I>(tokens: I) -> TokenStream
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: Send + 'static,
{
    stream::iter(tokens.into_iter().map(Ok)).boxed()
}

/// A source that fails immediately.
pub fn failed(err: RenderError) -> TokenStream {
    stream::once(async move { Err(err) }).boxed()
}
