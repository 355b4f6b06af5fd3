//! Member address type with `plnm_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of a caller, always prefixed with `plnm_`.
///
/// Addresses are opaque to the engine: the hosting environment establishes
/// who the current caller is and passes their address into every operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberAddress(String);

impl MemberAddress {
    /// The standard prefix for all member addresses.
    pub const PREFIX: &'static str = "plnm_";

    /// Create a new member address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `plnm_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with plnm_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for MemberAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MemberAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefixed_address() {
        let addr = MemberAddress::new("plnm_alice");
        assert_eq!(addr.as_str(), "plnm_alice");
        assert!(addr.is_valid());
    }

    #[test]
    #[should_panic(expected = "must start with plnm_")]
    fn rejects_unprefixed_address() {
        MemberAddress::new("alice");
    }

    #[test]
    fn bare_prefix_is_not_valid() {
        let addr = MemberAddress::new("plnm_");
        assert!(!addr.is_valid());
    }

    #[test]
    fn display_matches_raw_string() {
        let addr = MemberAddress::new("plnm_bob");
        assert_eq!(addr.to_string(), "plnm_bob");
    }
}
