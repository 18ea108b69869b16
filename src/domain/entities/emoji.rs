//! Custom emoji entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Returns whether `id` looks like an emoji identifier.
///
/// Only non-empty runs of ASCII decimal digits are accepted. This rejects
/// obviously malformed input; it cannot tell whether the emoji exists.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Unique identifier for a custom emoji (snowflake kept as text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(String);

impl EmojiId {
    /// Creates an identifier without validation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses a user-supplied identifier.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns error if the identifier is empty or contains non-digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !is_valid_id(trimmed) {
            return Err(ValidationError::invalid_identifier(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmojiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EmojiId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EmojiId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// On-disk and on-CDN encoding of an emoji image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmojiFormat {
    /// Static raster image.
    Png,
    /// Animated frame sequence.
    Gif,
}

impl EmojiFormat {
    /// Picks the format for the animated flag.
    #[must_use]
    pub const fn from_animated(animated: bool) -> Self {
        if animated { Self::Gif } else { Self::Png }
    }

    /// Maps a file extension back to a format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Returns the file extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Returns true for the animated format.
    #[must_use]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Gif)
    }
}

impl fmt::Display for EmojiFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A custom emoji owned by a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    id: EmojiId,
    name: String,
    animated: bool,
}

impl Emoji {
    /// Creates an emoji as listed by the server.
    #[must_use]
    pub fn new(id: impl Into<EmojiId>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animated,
        }
    }

    /// Creates an emoji from a manually entered identifier.
    ///
    /// The server cannot be asked for metadata of a single emoji, so the
    /// name is synthesized and the animated flag comes from the user.
    #[must_use]
    pub fn manual(id: EmojiId, animated: bool) -> Self {
        let name = format!("extra{id}");
        Self { id, name, animated }
    }

    /// Returns the emoji ID.
    #[must_use]
    pub const fn id(&self) -> &EmojiId {
        &self.id
    }

    /// Returns the emoji name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the emoji is animated.
    #[must_use]
    pub const fn animated(&self) -> bool {
        self.animated
    }

    /// Returns the image format implied by the animated flag.
    #[must_use]
    pub const fn format(&self) -> EmojiFormat {
        EmojiFormat::from_animated(self.animated)
    }

    /// File name shared by the CDN and the local cache: `{id}.{gif|png}`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.format().extension())
    }

    /// Returns the `:name:` form used inside messages.
    #[must_use]
    pub fn shortcode(&self) -> String {
        format!(":{}:", self.name)
    }
}
