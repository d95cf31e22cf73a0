use crate::domain::result::{DomainError, DomainResult};
use bson::oid;
use std::fmt;
use std::str::FromStr;

/// Storage-native identifier for topics, organizations and environments.
///
/// Wraps a BSON object id: twelve bytes whose string form is 24 lowercase hex
/// characters. `ObjectId` is deliberately not serializable: anything leaving
/// the domain must be converted with [`ObjectId::to_hex`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(oid::ObjectId);

impl ObjectId {
    pub const LEN: usize = 12;

    /// Generate a new identifier
    pub fn new() -> Self {
        Self(oid::ObjectId::new())
    }

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(oid::ObjectId::from_bytes(bytes))
    }

    pub fn bytes(&self) -> [u8; Self::LEN] {
        self.0.bytes()
    }

    /// Parse the external (hex string) form
    pub fn parse_str(value: &str) -> DomainResult<Self> {
        oid::ObjectId::parse_str(value)
            .map(Self)
            .map_err(|e| DomainError::InvalidIdentifier(format!("{:?}: {}", value, e)))
    }

    /// External (string) form of the identifier
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ObjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = DomainError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; Self::LEN] = value.try_into().map_err(|_| {
            DomainError::InvalidIdentifier(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                value.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}
