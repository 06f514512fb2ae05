//! Identifier type naming every object of a project document.
//!
//! Xcode writes 24 uppercase hexadecimal characters, but documents produced by
//! other tools use arbitrary tokens, so any non-empty string is accepted when
//! hydrating. Identifiers minted by this crate always have the canonical form.

use serde::{Deserialize, Serialize};

use crate::constants::ID_LENGTH;

/// The key of an object in the `objects` dictionary of a project document.
///
/// Written back exactly as it was read unless the project is rekeyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wraps an identifier read from a document or built by a caller.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The identifier as written in the document.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ID has the form Xcode itself generates:
    /// 24 uppercase hexadecimal characters.
    pub fn is_canonical(&self) -> bool {
        self.0.len() == ID_LENGTH
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0)
    }
}

impl std::ops::Deref for ObjectId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<str> for ObjectId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ObjectId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(ObjectId)
    }
}
