//! Screen and line erasure.

use super::attributes::{Attributes, Shape};
use crate::error::AttributeError;

/// The region an `erase` tag clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseRegion {
    Screen,
    Line,
    ToStartOfScreen,
    ToEndOfScreen,
    ToStartOfLine,
    ToEndOfLine,
}

impl EraseRegion {
    pub const ALL: [EraseRegion; 6] = [
        EraseRegion::Screen,
        EraseRegion::Line,
        EraseRegion::ToStartOfScreen,
        EraseRegion::ToEndOfScreen,
        EraseRegion::ToStartOfLine,
        EraseRegion::ToEndOfLine,
    ];

    /// Attribute names, in the order of [`EraseRegion::ALL`].
    const NAMES: &'static [&'static str] = &[
        "screen",
        "line",
        "start-of-screen",
        "end-of-screen",
        "start-of-line",
        "end-of-line",
    ];

    /// The attribute that selects this region.
    pub fn attribute_name(self) -> &'static str {
        match self {
            EraseRegion::Screen => "screen",
            EraseRegion::Line => "line",
            EraseRegion::ToStartOfScreen => "start-of-screen",
            EraseRegion::ToEndOfScreen => "end-of-screen",
            EraseRegion::ToStartOfLine => "start-of-line",
            EraseRegion::ToEndOfLine => "end-of-line",
        }
    }

    pub(crate) fn from_attributes(attributes: &Attributes) -> Result<Self, AttributeError> {
        let shape = Shape::new("erase", attributes);
        shape.allow(Self::NAMES)?;
        let index = shape.exactly_one(Self::NAMES)?;
        Ok(Self::ALL[index])
    }

    pub(crate) fn to_attributes(self) -> Attributes {
        Attributes::new().with(self.attribute_name(), true)
    }

    /// ED / EL sequence for this region.
    pub(crate) fn start(self) -> &'static str {
        match self {
            EraseRegion::ToEndOfScreen => "\x1B[0J",
            EraseRegion::ToStartOfScreen => "\x1B[1J",
            EraseRegion::Screen => "\x1B[2J",
            EraseRegion::ToEndOfLine => "\x1B[0K",
            EraseRegion::ToStartOfLine => "\x1B[1K",
            EraseRegion::Line => "\x1B[2K",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_all_order() {
        for (region, name) in EraseRegion::ALL.iter().zip(EraseRegion::NAMES) {
            assert_eq!(region.attribute_name(), *name);
        }
    }

    #[test]
    fn every_region_roundtrips() {
        for region in EraseRegion::ALL {
            let parsed = EraseRegion::from_attributes(&region.to_attributes()).unwrap();
            assert_eq!(parsed, region);
        }
    }

    #[test]
    fn sequences() {
        assert_eq!(EraseRegion::Line.start(), "\x1B[2K");
        assert_eq!(EraseRegion::Screen.start(), "\x1B[2J");
        assert_eq!(EraseRegion::ToEndOfLine.start(), "\x1B[0K");
        assert_eq!(EraseRegion::ToStartOfScreen.start(), "\x1B[1J");
    }

    #[test]
    fn rejects_two_regions() {
        let attrs = Attributes::new().with("line", true).with("screen", true);
        assert!(matches!(
            EraseRegion::from_attributes(&attrs),
            Err(AttributeError::ExactlyOne { tag: "erase", .. })
        ));
    }

    #[test]
    fn rejects_no_region() {
        assert!(EraseRegion::from_attributes(&Attributes::new()).is_err());
    }
}
