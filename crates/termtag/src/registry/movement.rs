//! Cursor movement.

use super::attributes::{Attributes, Shape};
use crate::error::AttributeError;

const MODES: &[&str] = &["absolute", "relative"];

/// Where a `move` tag puts the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Jump to a fixed position (CUP).
    Absolute { x: u32, y: u32 },
    /// Shift by a delta on each axis. A zero delta emits nothing for that axis.
    Relative { x: i64, y: i64 },
}

impl Movement {
    pub(crate) fn from_attributes(attributes: &Attributes) -> Result<Self, AttributeError> {
        let shape = Shape::new("move", attributes);
        shape.allow(&["absolute", "relative", "x", "y"])?;

        let x = shape.integer("x")?;
        let y = shape.integer("y")?;
        match shape.exactly_one(MODES)? {
            0 => {
                let x = u32::try_from(x).map_err(|_| shape.invalid("x", "a non-negative integer"))?;
                let y = u32::try_from(y).map_err(|_| shape.invalid("y", "a non-negative integer"))?;
                Ok(Movement::Absolute { x, y })
            }
            _ => Ok(Movement::Relative { x, y }),
        }
    }

    pub(crate) fn to_attributes(self) -> Attributes {
        match self {
            Movement::Absolute { x, y } => Attributes::new()
                .with("absolute", true)
                .with("x", x)
                .with("y", y),
            Movement::Relative { x, y } => Attributes::new()
                .with("relative", true)
                .with("x", x)
                .with("y", y),
        }
    }

    pub(crate) fn start(self) -> String {
        match self {
            Movement::Absolute { x, y } => format!("\x1B[{};{}H", x, y),
            Movement::Relative { x, y } => {
                let mut out = String::new();
                if x < 0 {
                    out.push_str(&format!("\x1B[{}D", x.unsigned_abs()));
                } else if x > 0 {
                    out.push_str(&format!("\x1B[{}C", x));
                }
                if y < 0 {
                    out.push_str(&format!("\x1B[{}A", y.unsigned_abs()));
                } else if y > 0 {
                    out.push_str(&format!("\x1B[{}B", y));
                }
                out
            }
        }
    }
}
