use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, Serializer};

use crate::ordered_map::OrderedMap;

/// The shape of value a spec accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Numeric,
    Boolean,
    Array,
    Hash,
    /// Accepts whatever follows: a literal if one is given, `true` otherwise.
    Default,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::String,
        ValueType::Numeric,
        ValueType::Boolean,
        ValueType::Array,
        ValueType::Hash,
        ValueType::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Hash => "hash",
            Self::Default => "default",
        }
    }

    /// Whether a switch of this type must be followed by a value.
    pub fn input_required(self) -> bool {
        matches!(
            self,
            Self::String | Self::Numeric | Self::Array | Self::Hash
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ValueType::from_str`]; carries the rejected token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValueType(pub String);

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValueType(s.to_string()))
    }
}

/// A resolved or default value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Hash(OrderedMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&OrderedMap<String, Value>> {
        match self {
            Self::Hash(map) => Some(map),
            _ => None,
        }
    }

    /// Parse an integer or decimal literal (`3`, `-2`, `.5`, `3.0`).
    pub fn parse_numeric(raw: &str) -> Option<Value> {
        let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (digits, None),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) {
            return None;
        }
        match frac {
            None if !whole.is_empty() => match raw.parse() {
                Ok(n) => Some(Value::Int(n)),
                // out of i64 range
                Err(_) => raw.parse().ok().map(Value::Float),
            },
            Some(frac) if !frac.is_empty() && all_digits(frac) => {
                raw.parse().ok().map(Value::Float)
            }
            _ => None,
        }
    }

    /// Split `key:value` pairs on commas and whitespace.
    pub(crate) fn collect_pairs(raw: &str, into: &mut OrderedMap<String, Value>) {
        for pair in raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (key, value) = pair.split_once(':').unwrap_or((pair, ""));
            into.set(key.to_string(), Value::Str(value.to_string()));
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Hash(map) => {
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Hash(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<OrderedMap<String, Value>> for Value {
    fn from(map: OrderedMap<String, Value>) -> Self {
        Self::Hash(map)
    }
}

/// An untyped declaration value from which a spec's type and default are
/// inferred (see [`crate::ValueSpec::parse`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A bare keyword: `required`, `optional`, `default`, or a type name.
    Symbol(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Sequence(Vec<Value>),
    Map(OrderedMap<String, Value>),
}

impl Literal {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn required() -> Self {
        Self::symbol("required")
    }

    pub fn optional() -> Self {
        Self::symbol("optional")
    }

    pub fn of_type(value_type: ValueType) -> Self {
        Self::symbol(value_type.as_str())
    }
}

impl From<ValueType> for Literal {
    fn from(value_type: ValueType) -> Self {
        Self::of_type(value_type)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Literal {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<OrderedMap<String, Value>> for Literal {
    fn from(map: OrderedMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_round_trips_through_its_name() {
        for t in ValueType::ALL {
            assert_eq!(t.as_str().parse::<ValueType>(), Ok(t));
        }
        assert_eq!(
            "unknown".parse::<ValueType>(),
            Err(UnknownValueType("unknown".to_string()))
        );
    }

    #[test]
    fn input_required_only_for_valued_types() {
        assert!(ValueType::String.input_required());
        assert!(ValueType::Numeric.input_required());
        assert!(ValueType::Array.input_required());
        assert!(ValueType::Hash.input_required());
        assert!(!ValueType::Boolean.input_required());
        assert!(!ValueType::Default.input_required());
    }

    #[test]
    fn parse_numeric_accepts_ints_and_decimals() {
        assert_eq!(Value::parse_numeric("12"), Some(Value::Int(12)));
        assert_eq!(Value::parse_numeric("-3"), Some(Value::Int(-3)));
        assert_eq!(Value::parse_numeric(".5"), Some(Value::Float(0.5)));
        assert_eq!(Value::parse_numeric("3.0"), Some(Value::Float(3.0)));
        assert_eq!(
            Value::parse_numeric("99999999999999999999"),
            Some(Value::Float(1e20))
        );
        assert_eq!(Value::parse_numeric("foo"), None);
        assert_eq!(Value::parse_numeric("1e5"), None);
        assert_eq!(Value::parse_numeric("3."), None);
        assert_eq!(Value::parse_numeric(""), None);
        assert_eq!(Value::parse_numeric("inf"), None);
    }

    #[test]
    fn display_renders_usage_friendly_text() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "1 2 3");

        let mut map = OrderedMap::new();
        map.set("a".to_string(), Value::from("b"));
        map.set("c".to_string(), Value::from("d"));
        assert_eq!(Value::Hash(map).to_string(), "a:b c:d");
    }

    #[test]
    fn collect_pairs_splits_on_commas_and_whitespace() {
        let mut map = OrderedMap::new();
        Value::collect_pairs("name:string,age:integer  bare", &mut map);
        assert_eq!(map.get("name"), Some(&Value::from("string")));
        assert_eq!(map.get("age"), Some(&Value::from("integer")));
        assert_eq!(map.get("bare"), Some(&Value::from("")));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn collect_pairs_splits_only_on_first_colon() {
        let mut map = OrderedMap::new();
        Value::collect_pairs("url:http://x", &mut map);
        assert_eq!(map.get("url"), Some(&Value::from("http://x")));
    }
}
