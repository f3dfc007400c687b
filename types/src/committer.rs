//! Committer identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ParamsError;

/// Identifies the owner of a commitment slot.
///
/// Any externally meaningful identity works (an account address, a user name);
/// the protocol only requires it to be non-empty and stable between commit and reveal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitterKey(String);

impl CommitterKey {
    /// Longest accepted key, in bytes.
    pub const MAX_LEN: usize = 128;

    /// Create a committer key, rejecting empty or oversized values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParamsError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(ParamsError::EmptyCommitter);
        }
        if s.len() > Self::MAX_LEN {
            return Err(ParamsError::CommitterTooLong(s.len()));
        }
        Ok(Self(s))
    }

    /// Return the raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CommitterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CommitterKey {
    type Error = ParamsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for CommitterKey {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_keys() {
        assert!(matches!(CommitterKey::new(""), Err(ParamsError::EmptyCommitter)));
        assert!(matches!(CommitterKey::new("   "), Err(ParamsError::EmptyCommitter)));
    }

    #[test]
    fn rejects_oversized_keys() {
        let long = "a".repeat(CommitterKey::MAX_LEN + 1);
        assert!(matches!(
            CommitterKey::new(long),
            Err(ParamsError::CommitterTooLong(129))
        ));
    }

    #[test]
    fn parses_from_str() {
        let key: CommitterKey = "alice".parse().unwrap();
        assert_eq!(key.as_str(), "alice");
        assert_eq!(key.to_string(), "alice");
    }
}
