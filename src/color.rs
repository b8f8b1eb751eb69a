//! Chat colors: 24-bit RGB plus the legacy 16-color palette.
//!
//! Modern clients accept any 24-bit color. Legacy clients only know the
//! sixteen palette colors addressed by the codes `0-9a-f`, so every color can
//! be downgraded ("quantized") to its perceptually nearest palette entry using
//! the CIEDE2000 distance in LAB space.
//!
//! # Examples
//!
//! ## Creating Colors
//!
//! ```
//! use chat_text::color::Color;
//!
//! let teal = Color::from_rgb(0x008080);
//! let short = Color::from_hex("#fed").unwrap();
//! let red = Color::from_legacy_code('c').unwrap();
//! let pink = Color::from_legacy_name("Light Purple").unwrap();
//!
//! assert_eq!(short.rgb(), 0xFFEEDD);
//! assert_eq!(*red, Color::RED);
//! assert_eq!(*pink, Color::PINK);
//! assert_eq!(teal.to_string(), "#008080");
//! ```
//!
//! ## Quantization
//!
//! ```
//! use chat_text::color::Color;
//!
//! let almost_black = Color::from_rgb(0x131313);
//! assert!(!almost_black.is_legacy());
//! assert_eq!(almost_black.code(), '0');
//! assert_eq!(almost_black.legacy_name(), "black");
//! assert_eq!(almost_black.to_legacy_string(), "\u{a7}0");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::LEGACY_PREFIX;
use crate::color_space::{Lab, Rgb};
use crate::sync::SharedLru;

/// Capacity of the quantization memo table.
const QUANTIZE_CACHE_SIZE: usize = 1024;

/// Capacity of the string parse memo table.
const PARSE_CACHE_SIZE: usize = 256;

/// A 24-bit chat color.
///
/// Equality and hashing consider only the RGB value, so a color built from
/// `0xFF5555` is the same color as [`Color::RED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    rgb: u32,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0x000000);
    pub const DARK_BLUE: Self = Self::from_rgb(0x0000AA);
    pub const DARK_GREEN: Self = Self::from_rgb(0x00AA00);
    pub const DARK_AQUA: Self = Self::from_rgb(0x00AAAA);
    pub const DARK_RED: Self = Self::from_rgb(0xAA0000);
    pub const DARK_PURPLE: Self = Self::from_rgb(0xAA00AA);
    pub const GOLD: Self = Self::from_rgb(0xFFAA00);
    pub const GRAY: Self = Self::from_rgb(0xAAAAAA);
    pub const DARK_GRAY: Self = Self::from_rgb(0x555555);
    pub const BLUE: Self = Self::from_rgb(0x5555FF);
    pub const GREEN: Self = Self::from_rgb(0x55FF55);
    pub const AQUA: Self = Self::from_rgb(0x55FFFF);
    pub const RED: Self = Self::from_rgb(0xFF5555);
    pub const LIGHT_PURPLE: Self = Self::from_rgb(0xFF55FF);
    pub const YELLOW: Self = Self::from_rgb(0xFFFF55);
    pub const WHITE: Self = Self::from_rgb(0xFFFFFF);
    /// Alias of [`Color::LIGHT_PURPLE`].
    pub const PINK: Self = Self::LIGHT_PURPLE;

    /// Create a color from a `0xRRGGBB` integer. Bits above 24 are discarded.
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            rgb: rgb & 0x00FF_FFFF,
        }
    }

    /// Create a color from its components.
    #[must_use]
    pub const fn from_components(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgb(((red as u32) << 16) | ((green as u32) << 8) | (blue as u32))
    }

    /// Parse a CSS-style hex color, `#RGB` or `#RRGGBB`.
    ///
    /// Returns `None` for any other shape, including a missing `#`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_rgb),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::from_rgb)
            }
            _ => None,
        }
    }

    /// Parse a CSS-style hex color, `#RGB` or `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] if the string is not a hex color.
    pub fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        Self::from_hex(hex).ok_or_else(|| {
            log::debug!("rejected hex color {hex:?}");
            ColorParseError::InvalidHex(hex.to_string())
        })
    }

    /// Find a palette color by legacy code (`0-9`, `a-f`).
    ///
    /// Formatting codes are not accepted; see [`Formatting::from_code`](crate::formatting::Formatting::from_code).
    #[must_use]
    pub fn from_legacy_code(code: char) -> Option<&'static Self> {
        legacy_index(code).map(|index| &PALETTE[index])
    }

    /// Find a palette color by legacy code.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidLegacyCode`] if `code` is not a color code.
    pub fn parse_legacy_code(code: char) -> Result<&'static Self, ColorParseError> {
        Self::from_legacy_code(code).ok_or_else(|| {
            log::debug!("rejected legacy color code {code:?}");
            ColorParseError::InvalidLegacyCode(code)
        })
    }

    /// Find a palette color by name, ignoring case and treating spaces as
    /// underscores. The alias `pink` resolves to the same entry as
    /// `light_purple`.
    #[must_use]
    pub fn from_legacy_name(name: &str) -> Option<&'static Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(' ', "_");
        LEGACY_NAME_TABLE
            .get(normalized.as_str())
            .map(|&index| &PALETTE[index])
    }

    /// Find a palette color by name.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::UnknownName`] if no palette color has that name.
    pub fn parse_legacy_name(name: &str) -> Result<&'static Self, ColorParseError> {
        Self::from_legacy_name(name).ok_or_else(|| {
            log::debug!("rejected legacy color name {name:?}");
            ColorParseError::UnknownName(name.to_string())
        })
    }

    /// Parse any supported color notation (cached).
    ///
    /// Supported formats:
    /// - Hex: `#ff8800`, `#f80`
    /// - Legacy name: `gold`, `dark_blue`, `Light Purple`
    /// - Legacy code: `§6`, `&6`
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the string is not a color:
    /// - `Empty` if the string is blank
    /// - `InvalidHex` if it starts with `#` but is malformed
    /// - `InvalidLegacyCode` if it is a prefixed code outside `0-9a-f`
    /// - `UnknownName` otherwise
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<SharedLru<String, Color>> =
            LazyLock::new(|| SharedLru::new("Color::parse cache", PARSE_CACHE_SIZE));

        let trimmed = color.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }

        CACHE.try_get_or_insert_with(trimmed.to_string(), |key| Self::parse_uncached(key))
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        if color.starts_with('#') {
            return Self::parse_hex(color);
        }

        let mut chars = color.chars();
        if let (Some(LEGACY_PREFIX | '&'), Some(code), None) = (chars.next(), chars.next(), chars.next()) {
            return Self::parse_legacy_code(code).copied();
        }

        Self::parse_legacy_name(color).copied()
    }

    /// The color as a `0xRRGGBB` integer.
    #[must_use]
    pub const fn rgb(&self) -> u32 {
        self.rgb
    }

    #[must_use]
    pub const fn red(&self) -> u8 {
        self.rgb.to_be_bytes()[1]
    }

    #[must_use]
    pub const fn green(&self) -> u8 {
        self.rgb.to_be_bytes()[2]
    }

    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.rgb.to_be_bytes()[3]
    }

    /// Whether this color is exactly one of the sixteen palette colors.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        palette_index(self.rgb).is_some()
    }

    /// The legacy code of this color, or of its nearest palette color.
    ///
    /// Quantized codes are memoized in a process-wide cache.
    #[must_use]
    pub fn code(&self) -> char {
        static CACHE: LazyLock<SharedLru<u32, char>> =
            LazyLock::new(|| SharedLru::new("Color::code cache", QUANTIZE_CACHE_SIZE));

        match palette_index(self.rgb) {
            Some(index) => LEGACY_CODES[index],
            None => CACHE.get_or_insert_with(self.rgb, |rgb| quantize(*rgb)),
        }
    }

    /// The nearest palette color. Palette colors return themselves.
    #[must_use]
    pub fn to_legacy(&self) -> &'static Self {
        let code = self.code();
        legacy_index(code).map_or(&PALETTE[0], |index| &PALETTE[index])
    }

    /// The color name used by RGB-capable clients: the palette name for
    /// palette colors, `#rrggbb` otherwise.
    #[must_use]
    pub fn name(&self) -> String {
        match palette_index(self.rgb) {
            Some(index) => LEGACY_NAMES[index].to_string(),
            None => self.to_string(),
        }
    }

    /// The name of the nearest palette color.
    #[must_use]
    pub fn legacy_name(&self) -> &'static str {
        legacy_index(self.code()).map_or(LEGACY_NAMES[0], |index| LEGACY_NAMES[index])
    }

    /// The legacy string: `§` followed by the code.
    #[must_use]
    pub fn to_legacy_string(&self) -> String {
        format!("{LEGACY_PREFIX}{}", self.code())
    }

    /// The sixteen palette colors, black to white.
    #[must_use]
    pub fn values() -> &'static [Self; 16] {
        &PALETTE
    }

    /// RGB value of the palette color with the given code.
    #[must_use]
    pub fn legacy_to_rgb(code: char) -> Option<u32> {
        Self::from_legacy_code(code).map(Self::rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.rgb)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::from_rgb(rgb)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_components(red, green, blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_components(red, green, blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidLegacyCode(char),
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidLegacyCode(c) => write!(f, "'{c}' is not a valid color code"),
            Self::UnknownName(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Legacy Palette
// ============================================================================

/// The legacy palette in code order (`0` through `f`).
static PALETTE: [Color; 16] = [
    Color::BLACK,
    Color::DARK_BLUE,
    Color::DARK_GREEN,
    Color::DARK_AQUA,
    Color::DARK_RED,
    Color::DARK_PURPLE,
    Color::GOLD,
    Color::GRAY,
    Color::DARK_GRAY,
    Color::BLUE,
    Color::GREEN,
    Color::AQUA,
    Color::RED,
    Color::LIGHT_PURPLE,
    Color::YELLOW,
    Color::WHITE,
];

const LEGACY_CODES: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

const LEGACY_NAMES: [&str; 16] = [
    "black",
    "dark_blue",
    "dark_green",
    "dark_aqua",
    "dark_red",
    "dark_purple",
    "gold",
    "gray",
    "dark_gray",
    "blue",
    "green",
    "aqua",
    "red",
    "light_purple",
    "yellow",
    "white",
];

/// Name (and alias) to palette index.
static LEGACY_NAME_TABLE: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, usize> = LEGACY_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
    m.insert("pink", 13);
    m
});

/// LAB coordinates of the palette, computed once.
static PALETTE_LAB: LazyLock<[Lab; 16]> =
    LazyLock::new(|| PALETTE.map(|color| Rgb::from_u32(color.rgb).to_lab()));

fn palette_index(rgb: u32) -> Option<usize> {
    PALETTE.iter().position(|color| color.rgb == rgb)
}

fn legacy_index(code: char) -> Option<usize> {
    match code {
        '0'..='9' => Some(code as usize - '0' as usize),
        'a'..='f' => Some(code as usize - 'a' as usize + 10),
        _ => None,
    }
}

// ============================================================================
// Quantization
// ============================================================================

/// Legacy code of the palette color nearest to `rgb`.
///
/// Exact palette matches return their own code. Otherwise the palette is
/// scanned for the smallest CIEDE2000 distance; ties go to the earlier entry.
#[must_use]
pub fn quantize(rgb: u32) -> char {
    let rgb = rgb & 0x00FF_FFFF;
    if let Some(index) = palette_index(rgb) {
        return LEGACY_CODES[index];
    }

    log::trace!("quantizing #{rgb:06x}");
    let lab = Rgb::from_u32(rgb).to_lab();
    LEGACY_CODES[nearest_index(&lab, PALETTE_LAB.as_slice())]
}

/// Index of the entry in `table` closest to `lab`. Ties go to the lower index.
fn nearest_index(lab: &Lab, table: &[Lab]) -> usize {
    let mut best_index = 0;
    let mut best_delta = f64::MAX;

    for (index, entry) in table.iter().enumerate() {
        let delta = entry.delta_e_2000(lab);
        if delta < best_delta {
            best_delta = delta;
            best_index = index;
        }
    }

    best_index
}
