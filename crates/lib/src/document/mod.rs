//! The decoded form of a project file.
//!
//! A [`Document`] is the nested dictionary / array / scalar tree a property
//! list decodes to. The project graph never looks at bytes: a [`PlistCodec`]
//! turns bytes into a `Document` and back, and the
//! [projector](crate::projector) turns a `Document` into an object graph and
//! back. Dictionaries keep their insertion order, so a document that is decoded
//! and encoded again is unchanged.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::constants::{OBJECTS, ROOT_OBJECT};

mod codec;
mod errors;

pub use codec::{JsonCodec, PlistCodec};
pub use errors::CodecError;

/// Ordered string-keyed dictionary.
pub type Dictionary = IndexMap<String, PlistValue>;

/// A node of the decoded tree.
///
/// Decoding rejects dictionaries that repeat a key, which is how a badly
/// merged project file usually shows up, instead of silently keeping one of
/// the entries. The one exception is the `objects` dictionary of a whole
/// document, see [`Document::repeated_objects`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlistValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Integer(i64),
    /// Floating point number
    Real(f64),
    /// String
    String(String),
    /// Array
    Array(Vec<PlistValue>),
    /// Dictionary
    Dictionary(Dictionary),
}

impl PlistValue {
    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the array, if this is one.
    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the dictionary, if this is one.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            PlistValue::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::Bool(_) => "bool",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::String(_) => "string",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }
}

impl<'de> Deserialize<'de> for PlistValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PlistVisitor { keys: KeyPolicy::Unique })
    }
}

/// How a dictionary treats a key it has already seen.
enum KeyPolicy<'r> {
    /// Every repetition is an error.
    Unique,
    /// The top-level dictionary: keys are unique, and the `objects` entry is
    /// read with [`KeyPolicy::Collect`].
    TopLevel(&'r mut Vec<(String, PlistValue)>),
    /// The first entry is kept, later ones are collected.
    Collect(&'r mut Vec<(String, PlistValue)>),
}

/// Reads one value with the given key policy for its outermost dictionary.
struct PlistSeed<'r> {
    keys: KeyPolicy<'r>,
}

impl<'de> DeserializeSeed<'de> for PlistSeed<'_> {
    type Value = PlistValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PlistVisitor { keys: self.keys })
    }
}

struct PlistVisitor<'r> {
    keys: KeyPolicy<'r>,
}

impl<'de> Visitor<'de> for PlistVisitor<'_> {
    type Value = PlistValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, boolean, array or dictionary")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PlistValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PlistValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(match i64::try_from(v) {
            Ok(n) => PlistValue::Integer(n),
            Err(_) => PlistValue::Real(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PlistValue::Real(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PlistValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PlistValue::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<PlistValue>()? {
            items.push(item);
        }
        Ok(PlistValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Dictionary::new();
        match self.keys {
            KeyPolicy::Unique => {
                while let Some((key, value)) = map.next_entry::<String, PlistValue>()? {
                    if entries.contains_key(&key) {
                        return Err(de::Error::custom(format!("duplicate key `{key}`")));
                    }
                    entries.insert(key, value);
                }
            }
            KeyPolicy::TopLevel(repeated) => {
                while let Some(key) = map.next_key::<String>()? {
                    if entries.contains_key(&key) {
                        return Err(de::Error::custom(format!("duplicate key `{key}`")));
                    }
                    let value = if key == OBJECTS {
                        map.next_value_seed(PlistSeed {
                            keys: KeyPolicy::Collect(&mut *repeated),
                        })?
                    } else {
                        map.next_value::<PlistValue>()?
                    };
                    entries.insert(key, value);
                }
            }
            KeyPolicy::Collect(repeated) => {
                while let Some((key, value)) = map.next_entry::<String, PlistValue>()? {
                    if entries.contains_key(&key) {
                        repeated.push((key, value));
                    } else {
                        entries.insert(key, value);
                    }
                }
            }
        }
        Ok(PlistValue::Dictionary(entries))
    }
}

/// Decodes a top-level value, collecting repeated entries of its `objects`
/// dictionary instead of failing on them.
pub(crate) fn decode_top_level<'de, D>(
    deserializer: D,
) -> Result<(PlistValue, Vec<(String, PlistValue)>), D::Error>
where
    D: Deserializer<'de>,
{
    let mut repeated = Vec::new();
    let value = PlistSeed {
        keys: KeyPolicy::TopLevel(&mut repeated),
    }
    .deserialize(deserializer)?;
    Ok((value, repeated))
}

impl From<&str> for PlistValue {
    fn from(s: &str) -> Self {
        PlistValue::String(s.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(s: String) -> Self {
        PlistValue::String(s)
    }
}

impl From<Dictionary> for PlistValue {
    fn from(map: Dictionary) -> Self {
        PlistValue::Dictionary(map)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(items: Vec<PlistValue>) -> Self {
        PlistValue::Array(items)
    }
}

/// The top-level dictionary of a project file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: Dictionary,
    /// Later entries of `objects` whose identifier was already taken
    #[serde(skip)]
    repeated_objects: Vec<(String, PlistValue)>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a top-level dictionary.
    pub fn from_entries(entries: Dictionary) -> Self {
        Self {
            entries,
            repeated_objects: Vec::new(),
        }
    }

    /// Records `objects` entries that repeat an identifier already present.
    pub fn with_repeated_objects(mut self, repeated: Vec<(String, PlistValue)>) -> Self {
        self.repeated_objects = repeated;
        self
    }

    /// Entries of `objects` that repeated an identifier when the document was
    /// decoded, in document order. They are not part of [`Self::objects`] and
    /// are never encoded; hydration reports each of them.
    pub fn repeated_objects(&self) -> &[(String, PlistValue)] {
        &self.repeated_objects
    }

    /// The top-level entries in document order.
    pub fn entries(&self) -> &Dictionary {
        &self.entries
    }

    /// Consumes the document, returning its entries.
    pub fn into_entries(self) -> Dictionary {
        self.entries
    }

    /// Reads a top-level entry.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.get(key)
    }

    /// Writes a top-level entry, keeping its position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PlistValue>) {
        let key = key.into();
        if key == OBJECTS {
            self.repeated_objects.clear();
        }
        self.entries.insert(key, value.into());
    }

    /// Identifier of the root object, if present and a string.
    pub fn root_object(&self) -> Option<&str> {
        self.get(ROOT_OBJECT).and_then(PlistValue::as_str)
    }

    /// The flat identifier → object map, if present and a dictionary.
    pub fn objects(&self) -> Option<&Dictionary> {
        self.get(OBJECTS).and_then(PlistValue::as_dictionary)
    }
}
