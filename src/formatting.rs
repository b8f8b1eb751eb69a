//! Formatting flags for chat text.
//!
//! A [`Formatting`] is a single style (bold, italic, ...). Several styles are
//! combined into a [`CombinedFormatting`], a bitset that supports union,
//! subtraction and membership tests.
//!
//! # Examples
//!
//! ```
//! use chat_text::formatting::{CombinedFormatting, Formatting};
//!
//! let style = Formatting::Bold.with(Formatting::Italic);
//! assert!(style.has(Formatting::Bold));
//!
//! let plain = style.without(Formatting::Bold);
//! assert_eq!(plain, Formatting::Italic);
//! assert_eq!(plain.to_legacy_string(), "\u{a7}o");
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::LEGACY_PREFIX;

/// A single chat formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formatting {
    /// Reset color and formatting (`r`).
    Reset,
    /// Bold text (`l`).
    Bold,
    /// Italic text (`o`).
    Italic,
    /// Strikethrough text (`m`).
    Strikethrough,
    /// Underlined text (`n`).
    Underlined,
    /// Obfuscated ("magic") text (`k`).
    Obfuscated,
}

impl Formatting {
    /// Alias of [`Formatting::Underlined`].
    pub const UNDERLINE: Self = Self::Underlined;
    /// Alias of [`Formatting::Obfuscated`].
    pub const MAGIC: Self = Self::Obfuscated;

    /// Canonical order used for style lists and legacy serialization.
    const CANONICAL: [Self; 6] = [
        Self::Obfuscated,
        Self::Bold,
        Self::Strikethrough,
        Self::Underlined,
        Self::Italic,
        Self::Reset,
    ];

    /// All formatting styles in canonical order.
    #[must_use]
    pub const fn values() -> &'static [Self] {
        &Self::CANONICAL
    }

    /// The legacy code character.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Reset => 'r',
            Self::Bold => 'l',
            Self::Italic => 'o',
            Self::Strikethrough => 'm',
            Self::Underlined => 'n',
            Self::Obfuscated => 'k',
        }
    }

    /// The JSON property name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Underlined => "underlined",
            Self::Obfuscated => "obfuscated",
        }
    }

    /// The single-bit mask for this style.
    #[must_use]
    pub const fn mask(self) -> CombinedFormatting {
        match self {
            Self::Reset => CombinedFormatting::RESET,
            Self::Bold => CombinedFormatting::BOLD,
            Self::Italic => CombinedFormatting::ITALIC,
            Self::Strikethrough => CombinedFormatting::STRIKETHROUGH,
            Self::Underlined => CombinedFormatting::UNDERLINED,
            Self::Obfuscated => CombinedFormatting::OBFUSCATED,
        }
    }

    /// Find a style by its legacy code.
    ///
    /// Color codes are not accepted; see [`Color::from_legacy_code`](crate::color::Color::from_legacy_code).
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'r' => Some(Self::Reset),
            'k' => Some(Self::Obfuscated),
            'l' => Some(Self::Bold),
            'm' => Some(Self::Strikethrough),
            'n' => Some(Self::Underlined),
            'o' => Some(Self::Italic),
            _ => None,
        }
    }

    /// Find a style by its legacy code.
    ///
    /// # Errors
    ///
    /// Returns [`FormattingParseError::InvalidCode`] if `code` is not a
    /// formatting code.
    pub fn parse_code(code: char) -> Result<Self, FormattingParseError> {
        Self::from_code(code).ok_or_else(|| {
            log::debug!("rejected formatting code {code:?}");
            FormattingParseError::InvalidCode(code)
        })
    }

    /// Find a style by name, ignoring case and treating spaces as underscores.
    ///
    /// The aliases `underline` and `magic` are accepted.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "reset" => Some(Self::Reset),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "strikethrough" => Some(Self::Strikethrough),
            "underlined" | "underline" => Some(Self::Underlined),
            "obfuscated" | "magic" => Some(Self::Obfuscated),
            _ => None,
        }
    }

    /// Find a style by name.
    ///
    /// # Errors
    ///
    /// Returns [`FormattingParseError::UnknownName`] if no style has that name.
    pub fn parse_name(name: &str) -> Result<Self, FormattingParseError> {
        Self::from_name(name).ok_or_else(|| {
            log::debug!("rejected formatting name {name:?}");
            FormattingParseError::UnknownName(name.to_string())
        })
    }

    /// Combine with another style or set of styles.
    #[must_use]
    pub fn with(self, other: impl Into<CombinedFormatting>) -> CombinedFormatting {
        self.mask().union(other.into())
    }

    /// The legacy string: `§` followed by the code.
    #[must_use]
    pub fn to_legacy_string(self) -> String {
        format!("{LEGACY_PREFIX}{}", self.code())
    }
}

impl fmt::Display for Formatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formatting {
    type Err = FormattingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}

bitflags! {
    /// A set of simultaneously active formatting styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CombinedFormatting: u8 {
        const RESET         = 1 << 0;
        const BOLD          = 1 << 1;
        const ITALIC        = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const UNDERLINED    = 1 << 4;
        const OBFUSCATED    = 1 << 5;
    }
}

impl CombinedFormatting {
    /// Combine a list of styles.
    #[must_use]
    pub fn new(styles: &[Formatting]) -> Self {
        styles.iter().copied().collect()
    }

    /// A copy with the given styles added.
    #[must_use]
    pub fn with(self, styles: impl Into<Self>) -> Self {
        self.union(styles.into())
    }

    /// A copy with the given styles removed.
    #[must_use]
    pub fn without(self, styles: impl Into<Self>) -> Self {
        self.difference(styles.into())
    }

    /// Whether a style is active.
    #[must_use]
    pub fn has(self, style: Formatting) -> bool {
        self.intersects(style.mask())
    }

    /// Active styles in canonical order: obfuscated, bold, strikethrough,
    /// underlined, italic, reset.
    #[must_use]
    pub fn styles(self) -> SmallVec<[Formatting; 6]> {
        Formatting::CANONICAL
            .iter()
            .copied()
            .filter(|style| self.has(*style))
            .collect()
    }

    /// Legacy codes for the active styles.
    ///
    /// Reset comes first so that it never cancels the styles that follow it.
    #[must_use]
    pub fn to_legacy_string(self) -> String {
        let mut result = String::new();
        if self.has(Formatting::Reset) {
            result.push(LEGACY_PREFIX);
            result.push(Formatting::Reset.code());
        }
        for style in self.styles() {
            if style != Formatting::Reset {
                result.push(LEGACY_PREFIX);
                result.push(style.code());
            }
        }
        result
    }
}

impl From<Formatting> for CombinedFormatting {
    fn from(style: Formatting) -> Self {
        style.mask()
    }
}

impl From<&[Formatting]> for CombinedFormatting {
    fn from(styles: &[Formatting]) -> Self {
        Self::new(styles)
    }
}

impl<const N: usize> From<[Formatting; N]> for CombinedFormatting {
    fn from(styles: [Formatting; N]) -> Self {
        styles.into_iter().collect()
    }
}

impl FromIterator<Formatting> for CombinedFormatting {
    fn from_iter<I: IntoIterator<Item = Formatting>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, style| acc | style.mask())
    }
}

impl PartialEq<Formatting> for CombinedFormatting {
    fn eq(&self, other: &Formatting) -> bool {
        *self == other.mask()
    }
}

impl PartialEq<CombinedFormatting> for Formatting {
    fn eq(&self, other: &CombinedFormatting) -> bool {
        self.mask() == *other
    }
}

impl std::ops::BitOr<Formatting> for CombinedFormatting {
    type Output = Self;

    fn bitor(self, rhs: Formatting) -> Self::Output {
        self | rhs.mask()
    }
}

impl std::ops::BitOr for Formatting {
    type Output = CombinedFormatting;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.mask() | rhs.mask()
    }
}

impl std::ops::Sub<Formatting> for CombinedFormatting {
    type Output = Self;

    fn sub(self, rhs: Formatting) -> Self::Output {
        self - rhs.mask()
    }
}

impl fmt::Display for CombinedFormatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, style) in self.styles().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(style.name())?;
        }
        f.write_str("]")
    }
}

/// Error type for formatting lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingParseError {
    InvalidCode(char),
    UnknownName(String),
}

impl fmt::Display for FormattingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode(c) => write!(f, "'{c}' is not a valid formatting code"),
            Self::UnknownName(s) => write!(f, "'{s}' is not a valid formatting name"),
        }
    }
}

impl std::error::Error for FormattingParseError {}
