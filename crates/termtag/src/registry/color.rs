//! Foreground and background colors.
//!
//! Both color families carry a `background` flag that picks between the SGR
//! foreground range (`30–39`) and background range (`40–49`). The end
//! sequence follows the same flag: closing a foreground color resets only
//! the foreground (`39`), closing a background color only the background
//! (`49`).

use termtag_palette::{rgb_to_color_index, ColorIndex, PaletteError};

use super::attributes::{Attributes, Shape};
use crate::error::AttributeError;

/// The eight basic ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    fn code(self) -> u8 {
        match self {
            NamedColor::Black => 0,
            NamedColor::Red => 1,
            NamedColor::Green => 2,
            NamedColor::Yellow => 3,
            NamedColor::Blue => 4,
            NamedColor::Magenta => 5,
            NamedColor::Cyan => 6,
            NamedColor::White => 7,
        }
    }
}

fn end_sequence(background: bool) -> &'static str {
    if background {
        "\x1B[49m"
    } else {
        "\x1B[39m"
    }
}

/// One of the eight basic colors, as foreground or background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicColor {
    pub color: NamedColor,
    pub background: bool,
}

impl BasicColor {
    pub fn foreground(color: NamedColor) -> Self {
        Self {
            color,
            background: false,
        }
    }

    pub fn background(color: NamedColor) -> Self {
        Self {
            color,
            background: true,
        }
    }

    pub(crate) fn from_attributes(
        tag: &'static str,
        color: NamedColor,
        attributes: &Attributes,
    ) -> Result<Self, AttributeError> {
        let shape = Shape::new(tag, attributes);
        shape.allow(&["background"])?;
        Ok(Self {
            color,
            background: shape.flag("background")?,
        })
    }

    pub(crate) fn to_attributes(self) -> Attributes {
        background_attributes(Attributes::new(), self.background)
    }

    pub(crate) fn start(self) -> String {
        let base = if self.background { 40 } else { 30 };
        format!("\x1B[{}m", base + self.color.code())
    }

    pub(crate) fn end(self) -> &'static str {
        end_sequence(self.background)
    }
}

/// An arbitrary RGB color, shown as its nearest 256-color palette entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedColor {
    red: f64,
    green: f64,
    blue: f64,
    background: bool,
    index: ColorIndex,
}

impl ExtendedColor {
    /// A foreground color from fractional RGB components in `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self, PaletteError> {
        let index = rgb_to_color_index(red, green, blue)?;
        Ok(Self {
            red,
            green,
            blue,
            background: false,
            index,
        })
    }

    /// Switches this color to the background.
    pub fn on_background(mut self) -> Self {
        self.background = true;
        self
    }

    pub fn rgb(&self) -> (f64, f64, f64) {
        (self.red, self.green, self.blue)
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    /// The palette entry this color renders as.
    pub fn index(&self) -> ColorIndex {
        self.index
    }

    pub(crate) fn from_attributes(attributes: &Attributes) -> Result<Self, AttributeError> {
        let shape = Shape::new("color", attributes);
        shape.allow(&["r", "g", "b", "background"])?;
        let color = Self::new(shape.number("r")?, shape.number("g")?, shape.number("b")?)?;
        Ok(if shape.flag("background")? {
            color.on_background()
        } else {
            color
        })
    }

    pub(crate) fn to_attributes(self) -> Attributes {
        let attributes = Attributes::new()
            .with("r", self.red)
            .with("g", self.green)
            .with("b", self.blue);
        background_attributes(attributes, self.background)
    }

    pub(crate) fn start(self) -> String {
        let selector = if self.background { 48 } else { 38 };
        format!("\x1B[{};5;{}m", selector, self.index)
    }

    pub(crate) fn end(self) -> &'static str {
        end_sequence(self.background)
    }
}

fn background_attributes(attributes: Attributes, background: bool) -> Attributes {
    if background {
        attributes.with("background", true)
    } else {
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic {
        use super::*;

        #[test]
        fn foreground_sequences() {
            assert_eq!(BasicColor::foreground(NamedColor::Black).start(), "\x1B[30m");
            assert_eq!(BasicColor::foreground(NamedColor::Red).start(), "\x1B[31m");
            assert_eq!(BasicColor::foreground(NamedColor::White).start(), "\x1B[37m");
            assert_eq!(BasicColor::foreground(NamedColor::Red).end(), "\x1B[39m");
        }

        #[test]
        fn background_sequences() {
            assert_eq!(BasicColor::background(NamedColor::Green).start(), "\x1B[42m");
            assert_eq!(BasicColor::background(NamedColor::Cyan).start(), "\x1B[46m");
            assert_eq!(BasicColor::background(NamedColor::Green).end(), "\x1B[49m");
        }

        #[test]
        fn background_flag_from_attributes() {
            let attrs = Attributes::new().with("background", true);
            let color = BasicColor::from_attributes("blue", NamedColor::Blue, &attrs).unwrap();
            assert_eq!(color, BasicColor::background(NamedColor::Blue));
        }

        #[test]
        fn rejects_extra_attributes() {
            let attrs = Attributes::new().with("r", 1.0);
            assert!(matches!(
                BasicColor::from_attributes("blue", NamedColor::Blue, &attrs),
                Err(AttributeError::Unexpected { tag: "blue", .. })
            ));
        }
    }

    mod extended {
        use super::*;

        #[test]
        fn embeds_palette_index() {
            let color = ExtendedColor::new(1.0, 0.0, 0.0).unwrap();
            assert_eq!(color.index(), 196);
            assert_eq!(color.start(), "\x1B[38;5;196m");
            assert_eq!(color.end(), "\x1B[39m");
        }

        #[test]
        fn background_variant() {
            let color = ExtendedColor::new(0.5, 0.5, 0.5).unwrap().on_background();
            assert_eq!(color.start(), "\x1B[48;5;244m");
            assert_eq!(color.end(), "\x1B[49m");
        }

        #[test]
        fn out_of_range_component() {
            let attrs = Attributes::new().with("r", 1.5).with("g", 0.0).with("b", 0.0);
            assert!(matches!(
                ExtendedColor::from_attributes(&attrs),
                Err(AttributeError::Color(_))
            ));
        }

        #[test]
        fn requires_every_component() {
            let attrs = Attributes::new().with("r", 1.0).with("g", 0.0);
            assert_eq!(
                ExtendedColor::from_attributes(&attrs).unwrap_err(),
                AttributeError::Missing {
                    tag: "color",
                    attribute: "b"
                }
            );
        }

        #[test]
        fn attributes_roundtrip() {
            let color = ExtendedColor::new(0.2, 0.4, 0.6).unwrap().on_background();
            assert_eq!(
                ExtendedColor::from_attributes(&color.to_attributes()).unwrap(),
                color
            );
        }
    }
}
