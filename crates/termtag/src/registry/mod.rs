//! The closed set of tags and the control sequences they produce.
//!
//! Every tag resolves to a *start* sequence and an *end* sequence. Most are
//! constants; `move`, `erase` and the colors compute theirs from attributes.
//! A tag whose end sequence is empty is *void*: it acts once and never wraps
//! content.
//!
//! | Family | Tags | Void |
//! |--------|------|------|
//! | Movement | `move` | yes |
//! | Erase | `erase` | yes |
//! | Toggles | `bold`, `dim`, `italic`, `underline`, `blink`, `negative`, `conceal` | no |
//! | Basic color | `black`, `red`, `green`, `yellow`, `blue`, `magenta`, `cyan`, `white` | no |
//! | Extended color | `color` | no |
//!
//! Front ends describe tags loosely, as a [`TagName`] plus [`Attributes`].
//! [`Tag::resolve`] checks that the two fit and produces a typed [`Tag`], so
//! the serializer never sees an ill-shaped tag.
//!
//! ```rust
//! use termtag::registry::{Attributes, Tag, TagName};
//!
//! let tag = Tag::resolve(
//!     TagName::Move,
//!     &Attributes::new().with("relative", true).with("x", -2).with("y", 0),
//! ).unwrap();
//! assert_eq!(tag.start(), "\x1B[2D");
//! assert!(tag.is_void());
//! ```

mod attributes;
mod color;
mod erase;
mod movement;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub use attributes::{AttributeValue, Attributes};
pub use color::{BasicColor, ExtendedColor, NamedColor};
pub use erase::EraseRegion;
pub use movement::Movement;

use attributes::Shape;

use crate::error::AttributeError;

/// Name of every tag the registry knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagName {
    Move,
    Erase,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Negative,
    Conceal,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Color,
}

impl TagName {
    pub const ALL: [TagName; 18] = [
        TagName::Move,
        TagName::Erase,
        TagName::Bold,
        TagName::Dim,
        TagName::Italic,
        TagName::Underline,
        TagName::Blink,
        TagName::Negative,
        TagName::Conceal,
        TagName::Black,
        TagName::Red,
        TagName::Green,
        TagName::Yellow,
        TagName::Blue,
        TagName::Magenta,
        TagName::Cyan,
        TagName::White,
        TagName::Color,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TagName::Move => "move",
            TagName::Erase => "erase",
            TagName::Bold => "bold",
            TagName::Dim => "dim",
            TagName::Italic => "italic",
            TagName::Underline => "underline",
            TagName::Blink => "blink",
            TagName::Negative => "negative",
            TagName::Conceal => "conceal",
            TagName::Black => "black",
            TagName::Red => "red",
            TagName::Green => "green",
            TagName::Yellow => "yellow",
            TagName::Blue => "blue",
            TagName::Magenta => "magenta",
            TagName::Cyan => "cyan",
            TagName::White => "white",
            TagName::Color => "color",
        }
    }

    /// Whether tags of this name can never hold content.
    pub fn is_void(self) -> bool {
        matches!(self, TagName::Move | TagName::Erase)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagName {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| AttributeError::UnknownTag(s.to_string()))
    }
}

/// Attribute-less SGR toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Negative,
    Conceal,
}

impl Toggle {
    fn name(self) -> TagName {
        match self {
            Toggle::Bold => TagName::Bold,
            Toggle::Dim => TagName::Dim,
            Toggle::Italic => TagName::Italic,
            Toggle::Underline => TagName::Underline,
            Toggle::Blink => TagName::Blink,
            Toggle::Negative => TagName::Negative,
            Toggle::Conceal => TagName::Conceal,
        }
    }

    // Bold and dim share SGR 22 as their reset, so each clears the other first.
    fn start(self) -> &'static str {
        match self {
            Toggle::Bold => "\x1B[22m\x1B[1m",
            Toggle::Dim => "\x1B[22m\x1B[2m",
            Toggle::Italic => "\x1B[3m",
            Toggle::Underline => "\x1B[4m",
            Toggle::Blink => "\x1B[5m",
            Toggle::Negative => "\x1B[7m",
            Toggle::Conceal => "\x1B[8m",
        }
    }

    fn end(self) -> &'static str {
        match self {
            Toggle::Bold | Toggle::Dim => "\x1B[22m",
            Toggle::Italic => "\x1B[23m",
            Toggle::Underline => "\x1B[24m",
            Toggle::Blink => "\x1B[25m",
            Toggle::Negative => "\x1B[27m",
            Toggle::Conceal => "\x1B[28m",
        }
    }
}

/// A fully resolved tag: its name together with well-formed attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tag {
    Move(Movement),
    Erase(EraseRegion),
    Toggle(Toggle),
    Color(BasicColor),
    ExtendedColor(ExtendedColor),
}

impl Tag {
    /// Checks `attributes` against the shape `name` requires.
    pub fn resolve(name: TagName, attributes: &Attributes) -> Result<Self, AttributeError> {
        let toggle = |which: Toggle| -> Result<Self, AttributeError> {
            Shape::new(name.as_str(), attributes).allow(&[])?;
            Ok(Tag::Toggle(which))
        };
        let basic = |which: NamedColor| {
            BasicColor::from_attributes(name.as_str(), which, attributes).map(Tag::Color)
        };

        match name {
            TagName::Move => Movement::from_attributes(attributes).map(Tag::Move),
            TagName::Erase => EraseRegion::from_attributes(attributes).map(Tag::Erase),
            TagName::Bold => toggle(Toggle::Bold),
            TagName::Dim => toggle(Toggle::Dim),
            TagName::Italic => toggle(Toggle::Italic),
            TagName::Underline => toggle(Toggle::Underline),
            TagName::Blink => toggle(Toggle::Blink),
            TagName::Negative => toggle(Toggle::Negative),
            TagName::Conceal => toggle(Toggle::Conceal),
            TagName::Black => basic(NamedColor::Black),
            TagName::Red => basic(NamedColor::Red),
            TagName::Green => basic(NamedColor::Green),
            TagName::Yellow => basic(NamedColor::Yellow),
            TagName::Blue => basic(NamedColor::Blue),
            TagName::Magenta => basic(NamedColor::Magenta),
            TagName::Cyan => basic(NamedColor::Cyan),
            TagName::White => basic(NamedColor::White),
            TagName::Color => ExtendedColor::from_attributes(attributes).map(Tag::ExtendedColor),
        }
    }

    /// Like [`Tag::resolve`], starting from a tag name string.
    pub fn parse(name: &str, attributes: &Attributes) -> Result<Self, AttributeError> {
        Self::resolve(name.parse()?, attributes)
    }

    pub fn name(&self) -> TagName {
        match self {
            Tag::Move(_) => TagName::Move,
            Tag::Erase(_) => TagName::Erase,
            Tag::Toggle(toggle) => toggle.name(),
            Tag::Color(basic) => match basic.color {
                NamedColor::Black => TagName::Black,
                NamedColor::Red => TagName::Red,
                NamedColor::Green => TagName::Green,
                NamedColor::Yellow => TagName::Yellow,
                NamedColor::Blue => TagName::Blue,
                NamedColor::Magenta => TagName::Magenta,
                NamedColor::Cyan => TagName::Cyan,
                NamedColor::White => TagName::White,
            },
            Tag::ExtendedColor(_) => TagName::Color,
        }
    }

    /// The loose attributes that resolve back to this tag.
    pub fn attributes(&self) -> Attributes {
        match self {
            Tag::Move(movement) => movement.to_attributes(),
            Tag::Erase(region) => region.to_attributes(),
            Tag::Toggle(_) => Attributes::new(),
            Tag::Color(basic) => basic.to_attributes(),
            Tag::ExtendedColor(extended) => extended.to_attributes(),
        }
    }

    /// Sequence emitted when the tag opens, and replayed when a child closes.
    pub fn start(&self) -> Cow<'static, str> {
        match self {
            Tag::Move(movement) => Cow::Owned(movement.start()),
            Tag::Erase(region) => Cow::Borrowed(region.start()),
            Tag::Toggle(toggle) => Cow::Borrowed(toggle.start()),
            Tag::Color(basic) => Cow::Owned(basic.start()),
            Tag::ExtendedColor(extended) => Cow::Owned(extended.start()),
        }
    }

    /// Sequence emitted when the tag closes.
    pub fn end(&self) -> &'static str {
        match self {
            Tag::Move(_) | Tag::Erase(_) => "",
            Tag::Toggle(toggle) => toggle.end(),
            Tag::Color(basic) => basic.end(),
            Tag::ExtendedColor(extended) => extended.end(),
        }
    }

    pub fn is_void(&self) -> bool {
        self.end().is_empty()
    }
}

impl From<Toggle> for Tag {
    fn from(toggle: Toggle) -> Self {
        Tag::Toggle(toggle)
    }
}

impl From<Movement> for Tag {
    fn from(movement: Movement) -> Self {
        Tag::Move(movement)
    }
}

impl From<EraseRegion> for Tag {
    fn from(region: EraseRegion) -> Self {
        Tag::Erase(region)
    }
}

impl From<BasicColor> for Tag {
    fn from(color: BasicColor) -> Self {
        Tag::Color(color)
    }
}

impl From<ExtendedColor> for Tag {
    fn from(color: ExtendedColor) -> Self {
        Tag::ExtendedColor(color)
    }
}

/// Renders the tag as bracket markup, e.g. `[move absolute x=1 y=2]`.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name())?;
        for (name, value) in self.attributes().iter() {
            match value {
                AttributeValue::Bool(true) => write!(f, " {}", name)?,
                _ => write!(f, " {}={}", name, value)?,
            }
        }
        f.write_str("]")
    }
}
