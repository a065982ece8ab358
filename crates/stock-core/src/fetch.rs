//! Upstream fan-out modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing a fetch mode
#[derive(Debug, Clone)]
pub struct ParseFetchModeError(String);

impl fmt::Display for ParseFetchModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid fetch mode: {}", self.0)
    }
}

impl std::error::Error for ParseFetchModeError {}

/// How the combined endpoint issues its upstream calls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One call after another; the first failure skips the remaining calls
    #[default]
    Sequential,
    /// All calls at once; errors still resolve in declaration order
    Concurrent,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Sequential => "sequential",
            FetchMode::Concurrent => "concurrent",
        }
    }
}

impl FromStr for FetchMode {
    type Err = ParseFetchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(FetchMode::Sequential),
            "concurrent" => Ok(FetchMode::Concurrent),
            _ => Err(ParseFetchModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch_mode() {
        assert_eq!("sequential".parse::<FetchMode>().unwrap(), FetchMode::Sequential);
        assert_eq!("Concurrent".parse::<FetchMode>().unwrap(), FetchMode::Concurrent);
        assert!("parallel".parse::<FetchMode>().is_err());
    }

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(FetchMode::default(), FetchMode::Sequential);
        assert_eq!(FetchMode::default().as_str(), "sequential");
    }
}
