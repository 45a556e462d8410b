//! The selectable family of cache replacement policies.

use std::fmt;
use std::str::FromStr;

/// Which replacement policy a [`crate::policy::Cache`] should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// No caching at all; every request is a miss. Used to measure the
    /// no-cache cost floor.
    #[default]
    None,
    /// First-in-first-out eviction.
    Fifo,
    /// Least-recently-used eviction.
    Lru,
    /// Least-frequently-used eviction.
    Lfu,
    /// Lowest-cost-to-recompute eviction.
    Lcr,
    /// Two-expert adaptive policy (LRU + LFU) with ghost history.
    LeCaR,
    /// Three-expert adaptive policy (LRU + LFU + LCR) with ghost history.
    CALeCaR,
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
            Self::Lcr => "LCR",
            Self::LeCaR => "LECAR",
            Self::CALeCaR => "LECARAC",
        };
        f.write_str(s)
    }
}

/// Error returned when a `--cache_type` value does not match any known policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCacheType(pub String);

impl fmt::Display for UnknownCacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized cache_type '{}'", self.0)
    }
}

impl std::error::Error for UnknownCacheType {}

impl FromStr for CacheType {
    type Err = UnknownCacheType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "FIFO" => Ok(Self::Fifo),
            "LRU" => Ok(Self::Lru),
            "LFU" => Ok(Self::Lfu),
            "LCR" => Ok(Self::Lcr),
            "LECAR" => Ok(Self::LeCaR),
            "LECARAC" => Ok(Self::CALeCaR),
            _ => Err(UnknownCacheType(s.to_string())),
        }
    }
}

impl CacheType {
    /// Parses a `--cache_type` value, falling back to [`CacheType::None`]
    /// and logging a warning for any value that doesn't match a known
    /// policy, per the CLI's documented fallback behavior.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s.parse() {
            Ok(cache_type) => cache_type,
            Err(UnknownCacheType(raw)) => {
                tracing::warn!(value = %raw, "unrecognized cache_type, falling back to NONE");
                Self::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values_case_insensitively() {
        assert_eq!("fifo".parse(), Ok(CacheType::Fifo));
        assert_eq!("LRU".parse(), Ok(CacheType::Lru));
        assert_eq!("lecarac".parse(), Ok(CacheType::CALeCaR));
    }

    #[test]
    fn falls_back_to_none_on_unknown_value() {
        assert_eq!(CacheType::parse_or_default("bogus"), CacheType::None);
    }
}
