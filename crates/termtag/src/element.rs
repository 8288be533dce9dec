//! A small builder for styled content trees.
//!
//! An [`Element`] is a tag plus children; a fragment is children with no tag.
//! Each element becomes a token source that yields its opening tag, then each
//! child's tokens in order, then its closing tag. Children can be ready
//! immediately or arrive later:
//!
//! ```rust
//! use termtag::{Child, Element};
//! use termtag::registry::{EraseRegion, Toggle};
//!
//! let line = Element::fragment()
//!     .child(Element::new(EraseRegion::Line))
//!     .child(Element::new(Toggle::Bold).child("status: "))
//!     .child(Child::deferred(async { Ok::<_, std::io::Error>("ready") }));
//! ```

use std::fmt;
use std::future::Future;

use futures_util::future::{self, BoxFuture, FutureExt};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use crate::capture::{capture, Chunk};
use crate::concat::{concat, failed, from_tokens, TokenStream};
use crate::error::{AttributeError, BoxError, RenderError};
use crate::registry::{Attributes, Tag};
use crate::render::Render;
use crate::token::Token;

/// Content placed inside an element.
pub enum Child {
    /// Literal text, available immediately.
    Text(String),
    /// Pre-built tokens, e.g. from [`crate::markup::parse`].
    Tokens(Vec<Token>),
    /// A nested element or fragment.
    Element(Element),
    /// Several children concatenated in order.
    Group(Vec<Child>),
    /// Content that will be known once the future resolves.
    Deferred(BoxFuture<'static, Result<Child, BoxError>>),
    /// Content that arrives piece by piece.
    Live(BoxStream<'static, Result<Chunk, BoxError>>),
    /// An existing token source.
    Stream(TokenStream),
}

impl Child {
    /// Content produced by a future.
    pub fn deferred<F, C, E>(future: F) -> Self
    where
        F: Future<Output = Result<C, E>> + Send + 'static,
        C: Into<Child> + 'static,
        E: Into<BoxError> + 'static,
    {
        Child::Deferred(
            future
                .map(|result| result.map(Into::into).map_err(Into::into))
                .boxed(),
        )
    }

    /// Content produced by a stream of text or tokens.
    pub fn live<S, C, E>(chunks: S) -> Self
    where
        S: Stream<Item = Result<C, E>> + Send + 'static,
        C: Into<Chunk> + 'static,
        E: Into<BoxError> + 'static,
    {
        Child::Live(
            chunks
                .map(|item| item.map(Into::into).map_err(Into::into))
                .boxed(),
        )
    }

    /// Converts this child into a token source.
    pub fn into_stream(self) -> TokenStream {
        match self {
            Child::Text(text) => from_tokens(Token::text(text)),
            Child::Tokens(tokens) => from_tokens(tokens),
            Child::Element(element) => element.into_stream(),
            Child::Group(children) => concat(children.into_iter().map(Child::into_stream)),
            Child::Deferred(pending) => stream::once(pending)
                .map(|resolved| match resolved {
                    Ok(child) => child.into_stream(),
                    Err(err) => failed(RenderError::Source(err)),
                })
                .flatten()
                .boxed(),
            Child::Live(chunks) => capture(chunks),
            Child::Stream(tokens) => tokens,
        }
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Child::Tokens(tokens) => f.debug_tuple("Tokens").field(tokens).finish(),
            Child::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Child::Group(children) => f.debug_tuple("Group").field(children).finish(),
            Child::Deferred(_) => f.write_str("Deferred(..)"),
            Child::Live(_) => f.write_str("Live(..)"),
            Child::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Tokens(vec![token])
    }
}

impl From<Vec<Token>> for Child {
    fn from(tokens: Vec<Token>) -> Self {
        Child::Tokens(tokens)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<Vec<Child>> for Child {
    fn from(children: Vec<Child>) -> Self {
        Child::Group(children)
    }
}

impl From<TokenStream> for Child {
    fn from(tokens: TokenStream) -> Self {
        Child::Stream(tokens)
    }
}

/// A tag wrapping children, or a bare fragment.
#[derive(Debug)]
pub struct Element {
    tag: Option<Tag>,
    children: Vec<Child>,
}

impl Element {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: Some(tag.into()),
            children: Vec::new(),
        }
    }

    /// An element from a loose tag name and attributes.
    pub fn parse(name: &str, attributes: &Attributes) -> Result<Self, AttributeError> {
        Tag::parse(name, attributes).map(Self::new)
    }

    /// Children with no surrounding tag.
    pub fn fragment() -> Self {
        Self {
            tag: None,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// The element's token source.
    ///
    /// A void tag with children yields [`RenderError::VoidChildren`] as its
    /// only item.
    pub fn into_stream(self) -> TokenStream {
        let Some(tag) = self.tag else {
            return concat(self.children.into_iter().map(Child::into_stream));
        };

        if tag.is_void() && !self.children.is_empty() {
            return failed(RenderError::VoidChildren {
                tag: tag.name().as_str(),
            });
        }

        let children = self.children.into_iter().map(Child::into_stream);
        let open = from_tokens([Token::OpeningTag(tag)]);
        let close = stream::once(future::ready(Ok(Token::ClosingTag))).boxed();
        concat(std::iter::once(open).chain(children).chain(std::iter::once(close)))
    }

    /// Renders this element with default options.
    pub fn render(self) -> Render {
        Render::new(self.into_stream())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EraseRegion, Toggle};
    use futures_util::stream::TryStreamExt;

    async fn tokens(element: Element) -> Vec<Token> {
        element.into_stream().try_collect().await.unwrap()
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[tokio::test]
    async fn element_wraps_children() {
        let element = Element::new(Toggle::Bold).child("a").child("b");
        assert_eq!(
            tokens(element).await,
            vec![Token::open(Toggle::Bold), text("a"), text("b"), Token::close()]
        );
    }

    #[tokio::test]
    async fn fragment_has_no_tags() {
        let fragment = Element::fragment().children(["a", "", "b"]);
        assert_eq!(tokens(fragment).await, vec![text("a"), text("b")]);
    }

    #[tokio::test]
    async fn nested_fragments_flatten() {
        let nested = Element::fragment()
            .child(Element::fragment().child(Element::fragment().child("a")));
        assert_eq!(tokens(nested).await, vec![text("a")]);
    }

    #[tokio::test]
    async fn deferred_child_resolves_in_place() {
        let element = Element::new(Toggle::Bold)
            .child(Child::deferred(async { Ok::<_, BoxError>("later") }))
            .child("after");
        assert_eq!(
            tokens(element).await,
            vec![
                Token::open(Toggle::Bold),
                text("later"),
                text("after"),
                Token::close()
            ]
        );
    }

    #[tokio::test]
    async fn deferred_child_can_resolve_to_element() {
        let inner = Element::new(EraseRegion::Line);
        let fragment =
            Element::fragment().child(Child::deferred(async move { Ok::<_, BoxError>(inner) }));
        assert_eq!(
            tokens(fragment).await,
            vec![Token::open(EraseRegion::Line), Token::close()]
        );
    }

    #[tokio::test]
    async fn live_child_streams_chunks() {
        let chunks = stream::iter(vec![Ok::<_, BoxError>("x"), Ok(""), Ok("y")]);
        let fragment = Element::fragment().child(Child::live(chunks));
        assert_eq!(tokens(fragment).await, vec![text("x"), text("y")]);
    }

    #[tokio::test]
    async fn failed_deferred_child_ends_stream() {
        let element = Element::new(Toggle::Bold)
            .child(Child::deferred(async {
                Err::<String, _>(std::io::Error::other("lookup failed"))
            }))
            .child("never");
        let items: Vec<_> = element.into_stream().collect().await;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Ok(Token::OpeningTag(_))));
        assert!(matches!(items[1], Err(RenderError::Source(_))));
    }

    #[tokio::test]
    async fn void_element_with_children_fails() {
        let element = Element::new(EraseRegion::Line).child("illegal");
        let items: Vec<_> = element.into_stream().collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(
            items[0],
            Err(RenderError::VoidChildren { tag: "erase" })
        ));
    }

    #[test]
    fn parse_validates_attributes() {
        assert!(Element::parse("erase", &Attributes::new().with("line", true)).is_ok());
        assert!(Element::parse("erase", &Attributes::new()).is_err());
        assert!(Element::parse("blink", &Attributes::new()).is_ok());
    }
}
