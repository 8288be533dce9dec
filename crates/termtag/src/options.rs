//! Render configuration.
//!
//! [`RenderOptions`] has serde support, so it can be embedded in an
//! application's own JSON or YAML configuration:
//!
//! ```rust
//! use termtag::{OutputMode, RenderOptions};
//!
//! let options = RenderOptions::default()
//!     .with_mode(OutputMode::TermDebug)
//!     .with_escape_placeholder('?')
//!     .unwrap();
//! assert_eq!(options.mode(), OutputMode::TermDebug);
//! assert!(RenderOptions::default().with_escape_placeholder('\x1B').is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Glyph substituted for raw ESC characters found in text.
pub const DEFAULT_ESCAPE_PLACEHOLDER: char = '␛';

/// Controls what tags turn into.
///
/// # Variants
///
/// - `Term` - Emit control sequences (default)
/// - `Text` - Emit only text; tags vanish
/// - `TermDebug` - Tags as visible bracket markup, e.g. `[bold]hi[/bold]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    #[default]
    Term,
    Text,
    TermDebug,
}

/// Options for one render.
///
/// The escape placeholder is never a control character, so escaped text can
/// not carry control sequences whatever the configuration says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LooseOptions")]
pub struct RenderOptions {
    mode: OutputMode,
    escape_placeholder: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Term,
            escape_placeholder: DEFAULT_ESCAPE_PLACEHOLDER,
        }
    }
}

impl RenderOptions {
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn escape_placeholder(&self) -> char {
        self.escape_placeholder
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the glyph that replaces ESC in text. Control characters are
    /// refused.
    pub fn with_escape_placeholder(mut self, placeholder: char) -> Result<Self, ConfigError> {
        if placeholder.is_control() {
            return Err(ConfigError::ControlPlaceholder(placeholder));
        }
        self.escape_placeholder = placeholder;
        Ok(self)
    }
}

/// Unchecked form read from configuration files.
#[derive(Deserialize)]
#[serde(default)]
struct LooseOptions {
    mode: OutputMode,
    escape_placeholder: char,
}

impl Default for LooseOptions {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            mode: options.mode,
            escape_placeholder: options.escape_placeholder,
        }
    }
}

impl TryFrom<LooseOptions> for RenderOptions {
    type Error = ConfigError;

    fn try_from(loose: LooseOptions) -> Result<Self, Self::Error> {
        RenderOptions::default()
            .with_mode(loose.mode)
            .with_escape_placeholder(loose.escape_placeholder)
    }
}
