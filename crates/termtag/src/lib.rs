//! Streaming terminal markup.
//!
//! `termtag` turns a stream of tokens (text, opening tags, closing tags) into
//! a stream of output fragments: escaped text and the control sequences that
//! move the cursor, erase regions, and switch colors and text attributes.
//!
//! Terminal state is flat, so nesting is emulated: whenever a tag closes,
//! every tag still open around it is re-applied. Content can arrive lazily
//! from futures and streams; output is produced on demand and in order.
//!
//! # Example
//!
//! ```rust
//! use futures_util::TryStreamExt;
//! use termtag::registry::{BasicColor, NamedColor, Toggle};
//! use termtag::{Child, Element};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # runtime.block_on(async {
//! let greeting = Element::new(Toggle::Bold)
//!     .child("Hello, ")
//!     .child(
//!         Element::new(BasicColor::foreground(NamedColor::Red))
//!             .child(Child::deferred(async { Ok::<_, std::io::Error>("world") })),
//!     )
//!     .child("!");
//!
//! let output: Vec<String> = greeting.render().into_strings().try_collect().await.unwrap();
//! assert_eq!(
//!     output.concat(),
//!     "\x1B[22m\x1B[1mHello, \x1B[31mworld\x1B[39m\x1B[22m\x1B[1m!\x1B[22m"
//! );
//! # });
//! # }
//! ```
//!
//! # Modules
//!
//! - [`registry`] - the closed tag set and its control sequences
//! - [`markup`] - a bracket-markup front end: `[bold]hi[/bold]`
//! - [`Serializer`] - the tag-stack state machine
//! - [`concat()`] / [`capture()`] - ordered token sources
//! - [`Render`] - pull-driven output as strings or bytes
//!
//! Color quantization lives in the `termtag-palette` crate and is re-exported
//! as [`palette`].
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: per-token `trace!` in the
//! serializer and concatenator, `debug!` at render start and end, `warn!`
//! when a render stops on an error or ends unbalanced.

pub use termtag_palette as palette;

mod capture;
mod concat;
mod element;
mod error;
pub mod markup;
mod options;
pub mod registry;
mod render;
mod serializer;
mod token;

pub use capture::{capture, Chunk};
pub use concat::{concat, failed, from_tokens, TokenStream};
pub use element::{Child, Element};
pub use error::{AttributeError, BoxError, ConfigError, RenderError, Result};
pub use markup::MarkupError;
pub use options::{OutputMode, RenderOptions, DEFAULT_ESCAPE_PLACEHOLDER};
pub use render::{ByteStream, FragmentStream, Render};
pub use serializer::{escape_text, Serializer};
pub use token::{LooseToken, Token};
