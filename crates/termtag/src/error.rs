//! Error types for tag resolution and rendering.
//!
//! [`AttributeError`] is raised at the registry boundary when a tag name and
//! its attributes do not fit together. [`RenderError`] is the terminal error
//! of a render stream: once a stream yields one, it yields nothing else.
//! [`ConfigError`] rejects render options that would break text escaping.

use thiserror::Error;

use termtag_palette::PaletteError;

/// Boxed error produced by an upstream content source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while validating a loose token or a tag's attributes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// The tag name is not in the registry.
    #[error("unknown tag '{0}'")]
    UnknownTag(String),

    /// A loose text token carried an empty string.
    #[error("text tokens must not be empty")]
    EmptyText,

    /// A required attribute is absent.
    #[error("tag '{tag}' requires attribute '{attribute}'")]
    Missing {
        tag: &'static str,
        attribute: &'static str,
    },

    /// The tag does not accept this attribute.
    #[error("tag '{tag}' does not accept attribute '{attribute}'")]
    Unexpected { tag: &'static str, attribute: String },

    /// The attribute has the wrong kind of value.
    #[error("attribute '{attribute}' of tag '{tag}' must be {expected}")]
    InvalidValue {
        tag: &'static str,
        attribute: String,
        expected: &'static str,
    },

    /// A one-of choice had zero or several members selected.
    #[error("tag '{tag}' requires exactly one of: {}", .choices.join(", "))]
    ExactlyOne {
        tag: &'static str,
        choices: &'static [&'static str],
    },

    /// An extended color component could not be mapped to the palette.
    #[error("invalid color: {0}")]
    Color(#[from] PaletteError),
}

/// Errors raised while building render options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The escape placeholder would itself be a control character.
    #[error("escape placeholder {0:?} is a control character")]
    ControlPlaceholder(char),
}

/// Errors that terminate a render stream.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A closing token arrived while no tag was open.
    #[error("received a closing tag with no open tag; the token sequence is unbalanced")]
    DanglingClose,

    /// A content source failed.
    #[error("content source failed: {0}")]
    Source(#[source] BoxError),

    /// A loose token did not describe a valid tag.
    #[error(transparent)]
    Attributes(#[from] AttributeError),

    /// A void tag was given children.
    #[error("tag '{tag}' is void and cannot contain children")]
    VoidChildren { tag: &'static str },
}

impl RenderError {
    /// Wraps an arbitrary upstream failure.
    pub fn from_source<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        RenderError::Source(err.into())
    }
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
