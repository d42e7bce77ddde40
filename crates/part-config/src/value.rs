//! Field values: the typed form every configuration field holds.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::instance::ConfigInstance;

/// Static description of an enumeration a field may be declared as.
///
/// Member names are stored exactly as declared (conventionally upper-case);
/// lookups from documents upper-case the raw string before matching.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: &'static str,
    members: &'static [&'static str],
}

impl EnumDescriptor {
    pub const fn new(name: &'static str, members: &'static [&'static str]) -> Self {
        Self { name, members }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &'static [&'static str] {
        self.members
    }

    /// Look up a member by its exact declared name.
    pub fn member(&'static self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .position(|m| *m == name)
            .map(|index| EnumValue {
                descriptor: self,
                index,
            })
    }

    /// Upper-case `raw` and look up the member with that exact name.
    pub fn parse(&'static self, raw: &str) -> Option<EnumValue> {
        self.member(&raw.to_uppercase())
    }
}

/// A single member of an [`EnumDescriptor`].
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    descriptor: &'static EnumDescriptor,
    index: usize,
}

impl EnumValue {
    pub fn name(&self) -> &'static str {
        self.descriptor.members[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn descriptor(&self) -> &'static EnumDescriptor {
        self.descriptor
    }

    /// Whether this member belongs to `descriptor`.
    pub fn is_member_of(&self, descriptor: &EnumDescriptor) -> bool {
        self.descriptor.name == descriptor.name
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name && self.index == other.index
    }
}

impl Eq for EnumValue {}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.descriptor.name, self.name())
    }
}

/// The value held by one configuration field.
///
/// Scalars loaded from a document land in the matching primitive variant.
/// Sequences and mappings that were not coerced into a nested configuration
/// are kept verbatim as [`FieldValue::Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(EnumValue),
    Config(Box<ConfigInstance>),
    Document(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            FieldValue::Enum(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_config(&self) -> Option<&ConfigInstance> {
        match self {
            FieldValue::Config(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Value> {
        match self {
            FieldValue::Document(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Enum(e) => write!(f, "{}", e.name()),
            FieldValue::Config(c) => write!(f, "<{}>", c.schema().name()),
            FieldValue::Document(v) => write!(f, "{v:?}"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(x) => serializer.serialize_f64(*x),
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::Enum(e) => serializer.serialize_str(e.name()),
            FieldValue::Config(c) => c.serialize(serializer),
            FieldValue::Document(v) => v.serialize(serializer),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────────────

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Null),
            Value::String(s) => FieldValue::Str(s),
            Value::Tagged(tagged) => FieldValue::from(tagged.value),
            other => FieldValue::Document(other),
        }
    }
}

impl From<&FieldValue> for Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Float(x) => Value::Number((*x).into()),
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Enum(e) => Value::String(e.name().to_string()),
            FieldValue::Config(c) => c.to_document(),
            FieldValue::Document(v) => v.clone(),
        }
    }
}

impl From<Mapping> for FieldValue {
    fn from(mapping: Mapping) -> Self {
        FieldValue::Document(Value::Mapping(mapping))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<EnumValue> for FieldValue {
    fn from(e: EnumValue) -> Self {
        FieldValue::Enum(e)
    }
}

impl From<ConfigInstance> for FieldValue {
    fn from(c: ConfigInstance) -> Self {
        FieldValue::Config(Box::new(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLOR: EnumDescriptor = EnumDescriptor::new("Color", &["RED", "GREEN"]);
    static SHADE: EnumDescriptor = EnumDescriptor::new("Shade", &["RED", "DARK"]);

    #[test]
    fn parse_is_case_insensitive() {
        let green = COLOR.member("GREEN").unwrap();
        assert_eq!(COLOR.parse("green"), Some(green));
        assert_eq!(COLOR.parse("Green"), Some(green));
        assert_eq!(COLOR.parse("blue"), None);
    }

    #[test]
    fn member_lookup_is_exact() {
        assert!(COLOR.member("red").is_none());
        assert_eq!(COLOR.member("RED").unwrap().index(), 0);
    }

    #[test]
    fn same_name_in_different_enums_differs() {
        assert_ne!(COLOR.member("RED"), SHADE.member("RED"));
        assert!(COLOR.member("RED").unwrap().is_member_of(&COLOR));
        assert!(!COLOR.member("RED").unwrap().is_member_of(&SHADE));
    }

    #[test]
    fn yaml_scalars_map_to_primitives() {
        let doc: Value = serde_yaml::from_str("{a: 1, b: 1.5, c: text, d: true, e: ~}").unwrap();
        let get = |k: &str| FieldValue::from(doc.get(k).cloned().unwrap());
        assert_eq!(get("a"), FieldValue::Int(1));
        assert_eq!(get("b"), FieldValue::Float(1.5));
        assert_eq!(get("c"), FieldValue::Str("text".into()));
        assert_eq!(get("d"), FieldValue::Bool(true));
        assert!(get("e").is_null());
    }

    #[test]
    fn yaml_collections_stay_documents() {
        let doc: Value = serde_yaml::from_str("{list: [1, 2], map: {x: 1}}").unwrap();
        let list = FieldValue::from(doc.get("list").cloned().unwrap());
        let map = FieldValue::from(doc.get("map").cloned().unwrap());
        assert!(list.as_document().unwrap().is_sequence());
        assert!(map.as_document().unwrap().is_mapping());
    }

    #[test]
    fn integers_widen_to_float() {
        assert_eq!(FieldValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Str("3".into()).as_f64(), None);
    }
}
