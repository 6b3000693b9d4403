use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::fmt;

pub type ObjectMap<K, V> = BTreeMap<K, V>;

// ─── RecordNumber ───────────────────────────────────────────────────────────

/// A numeric field value.
///
/// `F64(NaN)` never equals anything, itself included, so a record holding NaN
/// is never equal to its own copy. CBOR keeps NaN and the infinities; JSON has
/// no encoding for them and `to_json` refuses such records.
#[derive(Clone, Copy)]
pub enum RecordNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl fmt::Debug for RecordNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordNumber::I64(i) => write!(f, "I64({})", i),
            RecordNumber::U64(u) => write!(f, "U64({})", u),
            RecordNumber::F64(v) => write!(f, "F64({})", v),
        }
    }
}

/// Integers compare by value regardless of signedness; floats only equal floats.
impl PartialEq for RecordNumber {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (RecordNumber::F64(a), RecordNumber::F64(b)) => a == b,
            (RecordNumber::F64(_), _) | (_, RecordNumber::F64(_)) => false,
            (a, b) => a.as_i128() == b.as_i128(),
        }
    }
}

impl fmt::Display for RecordNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordNumber::I64(i) => write!(f, "{}", i),
            RecordNumber::U64(u) => write!(f, "{}", u),
            RecordNumber::F64(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            RecordNumber::F64(v) => write!(f, "{}", v),
        }
    }
}

impl RecordNumber {
    fn as_i128(self) -> Option<i128> {
        match self {
            RecordNumber::I64(i) => Some(i as i128),
            RecordNumber::U64(u) => Some(u as i128),
            RecordNumber::F64(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            RecordNumber::I64(i) => i as f64,
            RecordNumber::U64(u) => u as f64,
            RecordNumber::F64(f) => f,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            RecordNumber::I64(i) => Some(i),
            RecordNumber::U64(u) => i64::try_from(u).ok(),
            RecordNumber::F64(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_u64(self) -> Option<u64> {
        match self {
            RecordNumber::U64(u) => Some(u),
            RecordNumber::I64(i) => u64::try_from(i).ok(),
            RecordNumber::F64(f) => {
                if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
                    Some(f as u64)
                } else {
                    None
                }
            }
        }
    }
}

// ─── RecordValue ────────────────────────────────────────────────────────────

/// An opaque field value held by a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordValue {
    #[default]
    Null,
    Bool(bool),
    Number(RecordNumber),
    Str(SmolStr),
    Array(Vec<RecordValue>),
    Object(ObjectMap<SmolStr, RecordValue>),
}

impl RecordValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RecordValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RecordValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RecordValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectMap<SmolStr, RecordValue>> {
        match self {
            RecordValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<RecordValue>> {
        match self {
            RecordValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.as_object()?.get(key)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RecordValue::Null)
    }

    /// False when this value or anything nested in it is a NaN or infinite float.
    pub fn is_finite(&self) -> bool {
        match self {
            RecordValue::Number(RecordNumber::F64(f)) => f.is_finite(),
            RecordValue::Array(arr) => arr.iter().all(RecordValue::is_finite),
            RecordValue::Object(obj) => obj.values().all(RecordValue::is_finite),
            _ => true,
        }
    }
}

// ─── Display (record representation) ────────────────────────────────────────

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            _ => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Null => f.write_str("null"),
            RecordValue::Bool(b) => write!(f, "{}", b),
            RecordValue::Number(n) => write!(f, "{}", n),
            RecordValue::Str(s) => write_quoted(f, s),
            RecordValue::Array(arr) => {
                f.write_str("[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            RecordValue::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, k)?;
                    write!(f, ": {}", v)?;
                }
                f.write_str("}")
            }
        }
    }
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordValue::Null => serializer.serialize_none(),
            RecordValue::Bool(b) => serializer.serialize_bool(*b),
            RecordValue::Number(n) => match n {
                RecordNumber::I64(i) => serializer.serialize_i64(*i),
                RecordNumber::U64(u) => serializer.serialize_u64(*u),
                RecordNumber::F64(f) => serializer.serialize_f64(*f),
            },
            RecordValue::Str(s) => serializer.serialize_str(s.as_str()),
            RecordValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            RecordValue::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
        }
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for RecordValue {
    fn from(n: f64) -> Self {
        RecordValue::Number(RecordNumber::F64(n))
    }
}

impl From<i64> for RecordValue {
    fn from(n: i64) -> Self {
        RecordValue::Number(RecordNumber::I64(n))
    }
}

impl From<i32> for RecordValue {
    fn from(n: i32) -> Self {
        RecordValue::Number(RecordNumber::I64(n as i64))
    }
}

impl From<u64> for RecordValue {
    fn from(n: u64) -> Self {
        RecordValue::Number(RecordNumber::U64(n))
    }
}

impl From<usize> for RecordValue {
    fn from(n: usize) -> Self {
        RecordValue::Number(RecordNumber::U64(n as u64))
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        RecordValue::Bool(b)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        RecordValue::Str(SmolStr::from(s))
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        RecordValue::Str(SmolStr::from(s))
    }
}

impl From<SmolStr> for RecordValue {
    fn from(s: SmolStr) -> Self {
        RecordValue::Str(s)
    }
}

impl<T: Into<RecordValue>> From<Vec<T>> for RecordValue {
    fn from(v: Vec<T>) -> Self {
        RecordValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RecordValue>> From<Option<T>> for RecordValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RecordValue::Null, Into::into)
    }
}

// ─── From/Into serde_json::Value ────────────────────────────────────────────

impl From<serde_json::Value> for RecordValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => RecordValue::Null,
            serde_json::Value::Bool(b) => RecordValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RecordValue::Number(RecordNumber::I64(i))
                } else if let Some(u) = n.as_u64() {
                    RecordValue::Number(RecordNumber::U64(u))
                } else {
                    RecordValue::Number(RecordNumber::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => RecordValue::Str(SmolStr::from(s)),
            serde_json::Value::Array(arr) => {
                RecordValue::Array(arr.into_iter().map(RecordValue::from).collect())
            }
            serde_json::Value::Object(obj) => RecordValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (SmolStr::from(k), RecordValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<RecordValue> for serde_json::Value {
    fn from(val: RecordValue) -> Self {
        match val {
            RecordValue::Null => serde_json::Value::Null,
            RecordValue::Bool(b) => serde_json::Value::Bool(b),
            RecordValue::Number(n) => match n {
                RecordNumber::I64(i) => serde_json::json!(i),
                RecordNumber::U64(u) => serde_json::json!(u),
                RecordNumber::F64(f) => serde_json::json!(f),
            },
            RecordValue::Str(s) => serde_json::Value::String(s.to_string()),
            RecordValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(|v| v.into()).collect())
            }
            RecordValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k.to_string(), v.into()))
                    .collect(),
            ),
        }
    }
}
