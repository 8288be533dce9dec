//! The unit that flows through a render pipeline.
//!
//! A closing token carries no tag: it always closes whatever tag is innermost
//! at the time it arrives.
//!
//! [`LooseToken`] is the unvalidated wire form, suitable for serde. Converting
//! it into a [`Token`] resolves the tag against the registry, so a token
//! sequence loaded from JSON or YAML is shape-checked before it reaches the
//! serializer.

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::registry::{Attributes, Tag, TagName};

/// A text fragment, an opening tag, or a closing tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LooseToken", into = "LooseToken")]
pub enum Token {
    /// Literal content. Escaped on output.
    Text(String),
    /// Opens `Tag`; must eventually be matched by a [`Token::ClosingTag`].
    OpeningTag(Tag),
    /// Closes the innermost open tag.
    ClosingTag,
}

impl Token {
    /// A text token, or `None` for an empty string.
    pub fn text(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            None
        } else {
            Some(Token::Text(content))
        }
    }

    pub fn open(tag: impl Into<Tag>) -> Self {
        Token::OpeningTag(tag.into())
    }

    pub fn close() -> Self {
        Token::ClosingTag
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Text(_) => "text",
            Token::OpeningTag(_) => "openingTag",
            Token::ClosingTag => "closingTag",
        }
    }
}

/// A token whose attributes have not been checked against its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LooseToken {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    OpeningTag {
        tag_name: String,
        #[serde(default)]
        attributes: Attributes,
    },
    ClosingTag,
}

impl LooseToken {
    pub fn opening(tag_name: impl Into<String>, attributes: Attributes) -> Self {
        LooseToken::OpeningTag {
            tag_name: tag_name.into(),
            attributes,
        }
    }
}

impl TryFrom<LooseToken> for Token {
    type Error = AttributeError;

    fn try_from(loose: LooseToken) -> Result<Self, Self::Error> {
        match loose {
            LooseToken::Text { text } => Token::text(text).ok_or(AttributeError::EmptyText),
            LooseToken::OpeningTag {
                tag_name,
                attributes,
            } => {
                let name: TagName = tag_name.parse()?;
                Tag::resolve(name, &attributes).map(Token::OpeningTag)
            }
            LooseToken::ClosingTag => Ok(Token::ClosingTag),
        }
    }
}

impl From<Token> for LooseToken {
    fn from(token: Token) -> Self {
        match token {
            Token::Text(text) => LooseToken::Text { text },
            Token::OpeningTag(tag) => LooseToken::OpeningTag {
                tag_name: tag.name().as_str().to_string(),
                attributes: tag.attributes(),
            },
            Token::ClosingTag => LooseToken::ClosingTag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EraseRegion, Toggle};

    #[test]
    fn empty_text_is_none() {
        assert_eq!(Token::text(""), None);
        assert_eq!(Token::text("a"), Some(Token::Text("a".into())));
    }

    #[test]
    fn loose_token_validates() {
        let loose = LooseToken::opening("erase", Attributes::new().with("line", true));
        assert_eq!(
            Token::try_from(loose).unwrap(),
            Token::open(EraseRegion::Line)
        );

        let loose = LooseToken::opening("erase", Attributes::new());
        assert!(Token::try_from(loose).is_err());

        let loose = LooseToken::opening("sparkle", Attributes::new());
        assert_eq!(
            Token::try_from(loose).unwrap_err(),
            AttributeError::UnknownTag("sparkle".into())
        );
    }

    #[test]
    fn deserializes_token_sequence() {
        let json = r#"[
            {"kind": "text", "text": "Hello, "},
            {"kind": "openingTag", "tagName": "bold"},
            {"kind": "text", "text": "world"},
            {"kind": "closingTag"}
        ]"#;
        let tokens: Vec<Token> = serde_json::from_str(json).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text("Hello, ".into()),
                Token::open(Toggle::Bold),
                Token::Text("world".into()),
                Token::ClosingTag,
            ]
        );
    }

    #[test]
    fn empty_loose_text_is_rejected() {
        let loose = LooseToken::Text {
            text: String::new(),
        };
        assert_eq!(Token::try_from(loose), Err(AttributeError::EmptyText));
        assert!(serde_json::from_str::<Token>(r#"{"kind": "text", "text": ""}"#).is_err());
    }

    #[test]
    fn deserialization_rejects_bad_shape() {
        let json = r#"{"kind": "openingTag", "tagName": "bold", "attributes": {"x": 1}}"#;
        assert!(serde_json::from_str::<Token>(json).is_err());
    }

    #[test]
    fn serializes_through_loose_form() {
        let json = serde_json::to_value(Token::open(EraseRegion::Screen)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "openingTag",
                "tagName": "erase",
                "attributes": {"screen": true}
            })
        );
    }
}
