//! Scalar field values.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest magnitude below which every integer is exact as an `f64`.
const F64_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A scalar field value: an integer, a floating point number or a string.
///
/// Integers are kept exact, so ids above 2^53 stay distinct. A float with
/// no fractional part equals the integer of the same value, and integral
/// numbers display without a fractional part, so `Number(1.0)` stringifies
/// to `"1"` and compares equal to the text filter value `"1"`.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i128),
    Number(f64),
    Text(String),
}

/// Normalised form behind equality and hashing.
#[derive(PartialEq, Eq, Hash)]
enum Canonical<'a> {
    Integer(i128),
    Float(u64),
    Text(&'a str),
}

impl Value {
    /// The numeric payload as a float, if this is a number.
    ///
    /// Integers beyond 2^53 are rounded.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// The exact integer payload, if this is an integer or an integral float.
    #[must_use]
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Number(n) => Self::integral(*n),
            Self::Text(_) => None,
        }
    }

    /// The text payload, if this is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) | Self::Number(_) => None,
        }
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Number(_))
    }

    /// Convert a JSON scalar into a value.
    ///
    /// Non-scalar JSON is kept as its compact JSON text.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(u.into())
                } else {
                    n.as_f64()
                        .map_or_else(|| Self::Text(n.to_string()), Self::Number)
                }
            }
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Null => Self::Text("null".to_string()),
            serde_json::Value::Bool(b) => Self::Text(b.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// `n` as an exact integer, when it has no fractional part and is
    /// within the range where floats represent integers exactly.
    fn integral(n: f64) -> Option<i128> {
        (n.fract() == 0.0 && n.abs() <= F64_EXACT_INT).then_some(n as i128)
    }

    fn canonical(&self) -> Canonical<'_> {
        match self {
            Self::Integer(n) => Canonical::Integer(*n),
            Self::Number(n) => match Self::integral(*n) {
                Some(i) => Canonical::Integer(i),
                None if n.is_nan() => Canonical::Float(f64::NAN.to_bits()),
                None => Canonical::Float(n.to_bits()),
            },
            Self::Text(s) => Canonical::Text(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(n) => {
                if let Ok(i) = i64::try_from(*n) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(*n) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.serialize_i128(*n)
                }
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct ValueVisitor;

impl Visitor<'_> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Integer(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Integer(n.into())
                }
            }
        )*
    };
}

value_from_int!(i32, i64, u32, u64);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Integer(n as i128)
    }
}
