//! Loose attribute sets and shape checking.
//!
//! Front ends hand the registry a tag name plus an untyped [`Attributes`]
//! map. [`Shape`] reads that map on behalf of one tag, rejecting names the tag
//! does not know and values of the wrong kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;

/// A single attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

/// Attribute name/value pairs, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<AttributeValue> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AttributeValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Reads an attribute set against one tag's expected shape.
pub(crate) struct Shape<'a> {
    tag: &'static str,
    attributes: &'a Attributes,
}

impl<'a> Shape<'a> {
    pub(crate) fn new(tag: &'static str, attributes: &'a Attributes) -> Self {
        Self { tag, attributes }
    }

    /// Fails on the first attribute whose name is not in `known`.
    pub(crate) fn allow(&self, known: &[&'static str]) -> Result<(), AttributeError> {
        match self
            .attributes
            .iter()
            .find(|(name, _)| !known.iter().any(|k| k == name))
        {
            Some((name, _)) => Err(AttributeError::Unexpected {
                tag: self.tag,
                attribute: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// An optional boolean; absent means `false`.
    pub(crate) fn flag(&self, name: &str) -> Result<bool, AttributeError> {
        match self.attributes.get(name) {
            None => Ok(false),
            Some(AttributeValue::Bool(b)) => Ok(b),
            Some(_) => Err(self.invalid(name, "a boolean")),
        }
    }

    /// A required integer.
    pub(crate) fn integer(&self, name: &'static str) -> Result<i64, AttributeError> {
        match self.attributes.get(name) {
            None => Err(self.missing(name)),
            Some(AttributeValue::Integer(n)) => Ok(n),
            Some(_) => Err(self.invalid(name, "an integer")),
        }
    }

    /// A required number; integers are accepted.
    pub(crate) fn number(&self, name: &'static str) -> Result<f64, AttributeError> {
        match self.attributes.get(name) {
            None => Err(self.missing(name)),
            Some(AttributeValue::Number(n)) => Ok(n),
            Some(AttributeValue::Integer(n)) => Ok(n as f64),
            Some(AttributeValue::Bool(_)) => Err(self.invalid(name, "a number")),
        }
    }

    /// Index of the single flag in `choices` that is set.
    pub(crate) fn exactly_one(
        &self,
        choices: &'static [&'static str],
    ) -> Result<usize, AttributeError> {
        let mut selected = None;
        for (index, choice) in choices.iter().enumerate() {
            if self.flag(choice)? {
                if selected.is_some() {
                    return Err(AttributeError::ExactlyOne {
                        tag: self.tag,
                        choices,
                    });
                }
                selected = Some(index);
            }
        }
        selected.ok_or(AttributeError::ExactlyOne {
            tag: self.tag,
            choices,
        })
    }

    pub(crate) fn invalid(&self, name: &str, expected: &'static str) -> AttributeError {
        AttributeError::InvalidValue {
            tag: self.tag,
            attribute: name.to_string(),
            expected,
        }
    }

    fn missing(&self, name: &'static str) -> AttributeError {
        AttributeError::Missing {
            tag: self.tag,
            attribute: name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let attrs = Attributes::new().with("x", 3).with("absolute", true);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("x"), Some(AttributeValue::Integer(3)));
        assert_eq!(attrs.get("y"), None);
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let attrs: Attributes = [("y", 1), ("x", 2)].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn deserializes_from_json() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"absolute": true, "x": 4, "r": 0.5}"#).unwrap();
        assert_eq!(attrs.get("absolute"), Some(AttributeValue::Bool(true)));
        assert_eq!(attrs.get("x"), Some(AttributeValue::Integer(4)));
        assert_eq!(attrs.get("r"), Some(AttributeValue::Number(0.5)));
    }

    mod shape {
        use super::*;

        #[test]
        fn rejects_unknown_names() {
            let attrs = Attributes::new().with("sparkle", true);
            let err = Shape::new("bold", &attrs).allow(&[]).unwrap_err();
            assert_eq!(
                err,
                AttributeError::Unexpected {
                    tag: "bold",
                    attribute: "sparkle".into()
                }
            );
        }

        #[test]
        fn flag_defaults_to_false() {
            let attrs = Attributes::new();
            assert!(!Shape::new("red", &attrs).flag("background").unwrap());
        }

        #[test]
        fn flag_rejects_numbers() {
            let attrs = Attributes::new().with("background", 1);
            assert!(matches!(
                Shape::new("red", &attrs).flag("background"),
                Err(AttributeError::InvalidValue { .. })
            ));
        }

        #[test]
        fn number_accepts_integers() {
            let attrs = Attributes::new().with("r", 1);
            assert_eq!(Shape::new("color", &attrs).number("r").unwrap(), 1.0);
        }

        #[test]
        fn integer_is_required() {
            let attrs = Attributes::new();
            assert_eq!(
                Shape::new("move", &attrs).integer("x").unwrap_err(),
                AttributeError::Missing {
                    tag: "move",
                    attribute: "x"
                }
            );
        }

        #[test]
        fn exactly_one_selects_index() {
            let attrs = Attributes::new().with("b", true).with("a", false);
            assert_eq!(
                Shape::new("t", &attrs).exactly_one(&["a", "b", "c"]).unwrap(),
                1
            );
        }

        #[test]
        fn exactly_one_rejects_none_and_many() {
            let none = Attributes::new();
            assert!(Shape::new("t", &none).exactly_one(&["a", "b"]).is_err());

            let many = Attributes::new().with("a", true).with("b", true);
            assert!(Shape::new("t", &many).exactly_one(&["a", "b"]).is_err());
        }
    }
}
