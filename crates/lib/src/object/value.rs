//! Attribute values stored on objects.
//!
//! Scalars, nested lists and dictionaries mirror the shapes a project
//! document can hold. Identifier-bearing attributes declared by the schema are
//! stored as [`Value::Ref`] / [`Value::RefList`] so that the relationship layer
//! can tell them apart from ordinary strings.

use std::fmt;

use indexmap::IndexMap;

use super::ObjectId;

/// Ordered attribute map, keyed by the attribute name as written in the
/// document.
pub type Attributes = IndexMap<String, Value>;

/// A value stored under an attribute of an object.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with string slices and booleans:
///
/// ```
/// # use pbxgraph::object::Value;
/// let text = Value::from("<group>");
/// assert!(text == "<group>");
/// assert!(!(Value::Bool(true) == "true"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Scalars
    /// UTF-8 text
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Real(f64),

    // Containers
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Nested dictionary, e.g. build settings
    Dict(Attributes),

    // References
    /// Identifier of a single related object
    Ref(ObjectId),
    /// Ordered identifiers of related objects
    RefList(Vec<ObjectId>),
}

impl Value {
    /// Returns true if this is a scalar (text, bool or number).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Text(_) | Value::Bool(_) | Value::Int(_) | Value::Real(_)
        )
    }

    /// Returns true if this value references other objects.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Ref(_) | Value::RefList(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Ref(_) => "ref",
            Value::RefList(_) => "ref_list",
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a dictionary
    pub fn as_dict(&self) -> Option<&Attributes> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable dictionary
    pub fn as_dict_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a single reference
    pub fn as_ref_id(&self) -> Option<&ObjectId> {
        match self {
            Value::Ref(id) => Some(id),
            _ => None,
        }
    }

    /// Attempts to convert to a reference list
    pub fn as_ref_list(&self) -> Option<&[ObjectId]> {
        match self {
            Value::RefList(ids) => Some(ids),
            _ => None,
        }
    }

    /// Every identifier this value references, in stored order.
    pub fn referenced_ids(&self) -> Vec<&ObjectId> {
        match self {
            Value::Ref(id) => vec![id],
            Value::RefList(ids) => ids.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns true if this value references `id`.
    pub fn references(&self, id: &ObjectId) -> bool {
        match self {
            Value::Ref(stored) => stored == id,
            Value::RefList(ids) => ids.contains(id),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(n) => write!(f, "{n}"),
            Value::Ref(id) => write!(f, "{id}"),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::RefList(ids) => {
                write!(f, "(")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{id}")?;
                }
                write!(f, ")")
            }
            Value::Dict(map) => {
                write!(f, "{{")?;
                for (key, value) in map {
                    write!(f, "{key} = {value}; ")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Ref(id)
    }
}

impl From<Vec<ObjectId>> for Value {
    fn from(ids: Vec<ObjectId>) -> Self {
        Value::RefList(ids)
    }
}

impl From<Attributes> for Value {
    fn from(map: Attributes) -> Self {
        Value::Dict(map)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(Value::from).collect())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
