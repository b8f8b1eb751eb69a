//! Client capabilities.
//!
//! Rendering only needs to know one thing about the receiving client: which
//! [`ClientFeature`]s its protocol version supports. Features are gated by a
//! minimum [`ClientVersion`].
//!
//! ```
//! use chat_text::client::{Client, ClientFeature, ClientVersion};
//!
//! let client = Client::new("en_US", "1.15.2".parse::<ClientVersion>().unwrap());
//! assert!(client.supports(ClientFeature::NamespacedIds));
//! assert!(!client.supports(ClientFeature::TextRgb));
//! assert!(Client::latest().supports(ClientFeature::TextRgb));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::sync::SharedLru;

/// Capacity of the version parse memo table.
const VERSION_CACHE_SIZE: usize = 64;

/// Language tag used by the preset clients.
const DEFAULT_LANGUAGE: &str = "en_US";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("invalid regex"));

/// A `major.minor.patch` protocol version. Ordering is lexicographic over the
/// three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClientVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ClientVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor` or `major.minor.patch` (cached).
    ///
    /// A missing patch component is zero.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError::Empty`] for a blank string and
    /// [`VersionParseError::Invalid`] for anything that is not two or three
    /// dot-separated decimal numbers.
    pub fn parse(version: &str) -> Result<Self, VersionParseError> {
        static CACHE: LazyLock<SharedLru<String, ClientVersion>> =
            LazyLock::new(|| SharedLru::new("ClientVersion::parse cache", VERSION_CACHE_SIZE));

        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        CACHE.try_get_or_insert_with(trimmed.to_string(), |key| Self::parse_uncached(key))
    }

    fn parse_uncached(version: &str) -> Result<Self, VersionParseError> {
        log::trace!("parsing client version {version:?}");
        let invalid = || {
            log::debug!("rejected client version {version:?}");
            VersionParseError::Invalid(version.to_string())
        };

        let caps = VERSION_PATTERN.captures(version).ok_or_else(invalid)?;
        let component = |index: usize| -> Result<u32, VersionParseError> {
            caps.get(index)
                .map_or(Ok(0), |m| m.as_str().parse::<u32>().map_err(|_| invalid()))
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?))
    }

    /// Every feature this version supports.
    #[must_use]
    pub fn features(&self) -> Vec<ClientFeature> {
        ClientFeature::values()
            .iter()
            .copied()
            .filter(|feature| feature.applies_to(self))
            .collect()
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ClientVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for version parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    Empty,
    Invalid(String),
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty version string"),
            Self::Invalid(s) => write!(f, "Invalid version string: {s}"),
        }
    }
}

impl std::error::Error for VersionParseError {}

/// A protocol feature that only newer clients understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientFeature {
    /// 24-bit text colors in JSON components.
    TextRgb,
    /// Namespaced identifiers (`minecraft:stone`).
    NamespacedIds,
}

impl ClientFeature {
    #[must_use]
    pub const fn values() -> &'static [Self] {
        &[Self::TextRgb, Self::NamespacedIds]
    }

    /// The first version that supports this feature.
    #[must_use]
    pub const fn min_version(self) -> ClientVersion {
        match self {
            Self::TextRgb => ClientVersion::new(1, 16, 0),
            Self::NamespacedIds => ClientVersion::new(1, 13, 0),
        }
    }

    #[must_use]
    pub fn applies_to(self, version: &ClientVersion) -> bool {
        *version >= self.min_version()
    }
}

/// The receiving end of a rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Client {
    language: String,
    version: ClientVersion,
}

impl Client {
    #[must_use]
    pub fn new(language: impl Into<String>, version: ClientVersion) -> Self {
        Self {
            language: language.into(),
            version,
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub const fn version(&self) -> ClientVersion {
        self.version
    }

    #[must_use]
    pub fn supports(&self, feature: ClientFeature) -> bool {
        feature.applies_to(&self.version)
    }

    #[must_use]
    pub fn features(&self) -> Vec<ClientFeature> {
        self.version.features()
    }

    #[must_use]
    pub fn v1_16_0() -> Self {
        Self::new(DEFAULT_LANGUAGE, ClientVersion::new(1, 16, 0))
    }

    #[must_use]
    pub fn v1_15_0() -> Self {
        Self::new(DEFAULT_LANGUAGE, ClientVersion::new(1, 15, 0))
    }

    #[must_use]
    pub fn v1_14_0() -> Self {
        Self::new(DEFAULT_LANGUAGE, ClientVersion::new(1, 14, 0))
    }

    #[must_use]
    pub fn v1_13_0() -> Self {
        Self::new(DEFAULT_LANGUAGE, ClientVersion::new(1, 13, 0))
    }

    /// The newest known client.
    #[must_use]
    pub fn latest() -> Self {
        Self::v1_16_0()
    }

    /// A conservative client for output that must render everywhere.
    #[must_use]
    pub fn compatible() -> Self {
        Self::v1_14_0()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions() {
        assert_eq!(ClientVersion::parse("1.16.5"), Ok(ClientVersion::new(1, 16, 5)));
        assert_eq!(ClientVersion::parse("1.13"), Ok(ClientVersion::new(1, 13, 0)));
        assert_eq!(" 1.8.9 ".parse::<ClientVersion>(), Ok(ClientVersion::new(1, 8, 9)));
    }

    #[test]
    fn test_parse_invalid_versions() {
        assert_eq!(ClientVersion::parse(""), Err(VersionParseError::Empty));
        for invalid in ["1", "1.2.3.4", "a.b", "1.x", "1..2", "-1.2", "1.2.", "99999999999.0"] {
            assert_eq!(
                ClientVersion::parse(invalid),
                Err(VersionParseError::Invalid(invalid.to_string())),
                "{invalid:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_version_ordering() {
        assert!(ClientVersion::new(1, 16, 0) > ClientVersion::new(1, 15, 2));
        assert!(ClientVersion::new(2, 0, 0) > ClientVersion::new(1, 99, 99));
        assert!(ClientVersion::new(1, 16, 1) > ClientVersion::new(1, 16, 0));
        assert_eq!(ClientVersion::new(1, 16, 0), ClientVersion::new(1, 16, 0));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(ClientVersion::new(1, 16, 0).to_string(), "1.16.0");
    }

    #[test]
    fn test_feature_gates() {
        assert!(ClientFeature::TextRgb.applies_to(&ClientVersion::new(1, 16, 0)));
        assert!(ClientFeature::TextRgb.applies_to(&ClientVersion::new(1, 17, 1)));
        assert!(!ClientFeature::TextRgb.applies_to(&ClientVersion::new(1, 15, 2)));
        assert!(ClientFeature::NamespacedIds.applies_to(&ClientVersion::new(1, 13, 0)));
        assert!(!ClientFeature::NamespacedIds.applies_to(&ClientVersion::new(1, 12, 2)));
    }

    #[test]
    fn test_version_features() {
        assert_eq!(
            ClientVersion::new(1, 16, 0).features(),
            vec![ClientFeature::TextRgb, ClientFeature::NamespacedIds]
        );
        assert_eq!(
            ClientVersion::new(1, 14, 0).features(),
            vec![ClientFeature::NamespacedIds]
        );
        assert!(ClientVersion::new(1, 8, 0).features().is_empty());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Client::latest(), Client::v1_16_0());
        assert_eq!(Client::compatible().version(), ClientVersion::new(1, 14, 0));
        assert_eq!(Client::default().language(), "en_US");

        assert!(Client::latest().supports(ClientFeature::TextRgb));
        assert!(!Client::compatible().supports(ClientFeature::TextRgb));
        assert!(!Client::v1_15_0().supports(ClientFeature::TextRgb));
        assert!(Client::v1_13_0().supports(ClientFeature::NamespacedIds));
        assert_eq!(Client::v1_13_0().features(), vec![ClientFeature::NamespacedIds]);
    }
}
