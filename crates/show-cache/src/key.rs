//! Composite cache key

use crate::error::KeyError;
use std::fmt;
use std::str::FromStr;
use streaming_availability::Timeframe;

/// Identifies one cached listing: a streaming platform and a timeframe.
///
/// The string form `<platform>-<timeframe>` is both the map identity and the
/// cache file stem. Platforms are restricted to ASCII letters, digits and
/// `_`, so the separator can only appear once and the form parses back
/// exactly. Platforms are lowercased, so keys differing only in case share
/// one entry and one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    platform: String,
    timeframe: Timeframe,
}

impl CacheKey {
    pub const SEPARATOR: char = '-';
    /// Longest platform accepted, keeping `<key>.json` well under file name limits
    pub const MAX_PLATFORM_LEN: usize = 64;

    pub fn new(platform: impl Into<String>, timeframe: Timeframe) -> Result<Self, KeyError> {
        let mut platform = platform.into();
        validate_platform(&platform)?;
        platform.make_ascii_lowercase();
        Ok(Self {
            platform,
            timeframe,
        })
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Name of the file this key is persisted to
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }
}

fn validate_platform(platform: &str) -> Result<(), KeyError> {
    if platform.is_empty() {
        return Err(KeyError::EmptyPlatform);
    }
    if platform.len() > CacheKey::MAX_PLATFORM_LEN {
        return Err(KeyError::PlatformTooLong(platform.len()));
    }
    if !platform
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(KeyError::InvalidPlatform(platform.to_string()));
    }
    Ok(())
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.platform, Self::SEPARATOR, self.timeframe)
    }
}

impl FromStr for CacheKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (platform, timeframe) = s
            .split_once(Self::SEPARATOR)
            .ok_or_else(|| KeyError::MissingSeparator(s.to_string()))?;
        let timeframe = timeframe
            .parse::<Timeframe>()
            .map_err(|e| KeyError::UnknownTimeframe(e.0))?;
        Self::new(platform, timeframe)
    }
}
