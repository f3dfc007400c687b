//! Commitment identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ParamsError;

/// A 32-byte identifier binding a reveal back to the commitment that produced it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentId([u8; 32]);

impl CommitmentId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParamsError> {
        let s = s.trim();
        if s.len() != 64 {
            return Err(ParamsError::InvalidCommitmentId(format!(
                "expected 64 hex characters, got {}",
                s.len()
            )));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out)
            .map_err(|e| ParamsError::InvalidCommitmentId(e.to_string()))?;
        Ok(Self(out))
    }
}

impl fmt::Debug for CommitmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for CommitmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let id = CommitmentId::new([0xab; 32]);
        let parsed = CommitmentId::from_hex(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(CommitmentId::from_hex("abcd").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let s = "zz".repeat(32);
        assert!(CommitmentId::from_hex(&s).is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        let s = format!("{}é", "a".repeat(62));
        assert_eq!(s.len(), 64);
        assert!(CommitmentId::from_hex(&s).is_err());
    }

    #[test]
    fn debug_is_abbreviated() {
        let id = CommitmentId::new([0x01; 32]);
        assert_eq!(format!("{id:?}"), "CommitmentId(01010101)");
    }
}
