//! Id - opaque 64-bit identity assigned by the store
//!
//! Every table uses a `BIGSERIAL` primary key, so identities are only known
//! after an insert returns. Callers treat the value as opaque.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Store-assigned entity identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id(i64);

impl Id {
    /// Create an Id from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the Id is zero (not yet persisted)
    #[inline]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Id(id)),
            Ok(_) => Err(IdParseError::NotPositive),
            Err(_) => Err(IdParseError::InvalidFormat),
        }
    }
}

/// Error when parsing an Id from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,

    #[error("id must be positive")]
    NotPositive,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl std::str::FromStr for Id {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s)
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Id::parse("42"), Ok(Id::new(42)));
        assert_eq!(Id::parse(" 7 "), Ok(Id::new(7)));
        assert_eq!(Id::parse("abc"), Err(IdParseError::InvalidFormat));
        assert_eq!(Id::parse("0"), Err(IdParseError::NotPositive));
        assert_eq!(Id::parse("-3"), Err(IdParseError::NotPositive));
    }

    #[test]
    fn test_display_and_conversion() {
        let id = Id::from(123);
        assert_eq!(id.to_string(), "123");
        assert_eq!(i64::from(id), 123);
        assert!(!id.is_unassigned());
        assert!(Id::default().is_unassigned());
    }
}
