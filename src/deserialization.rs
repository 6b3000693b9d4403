use crate::error::RecordError;
use crate::record_type::{Record, RecordType};
use crate::record_value::{ObjectMap, RecordNumber, RecordValue};
use crate::shared_record::SharedRecord;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use smol_str::SmolStr;
use std::fmt;

// ─── RecordValue ────────────────────────────────────────────────────────────

struct RecordValueVisitor;

impl<'de> Visitor<'de> for RecordValueVisitor {
    type Value = RecordValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, bool, number, string, array or map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RecordValue, E> {
        Ok(RecordValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RecordValue, E> {
        Ok(RecordValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<RecordValue, D::Error> {
        RecordValue::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RecordValue, E> {
        Ok(RecordValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordValue, E> {
        Ok(RecordValue::Number(RecordNumber::I64(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordValue, E> {
        Ok(RecordValue::Number(RecordNumber::U64(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<RecordValue, E> {
        if let Ok(i) = i64::try_from(v) {
            self.visit_i64(i)
        } else if let Ok(u) = u64::try_from(v) {
            self.visit_u64(u)
        } else {
            Ok(RecordValue::Number(RecordNumber::F64(v as f64)))
        }
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<RecordValue, E> {
        match u64::try_from(v) {
            Ok(u) => self.visit_u64(u),
            Err(_) => Ok(RecordValue::Number(RecordNumber::F64(v as f64))),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RecordValue, E> {
        Ok(RecordValue::Number(RecordNumber::F64(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordValue, E> {
        Ok(RecordValue::Str(SmolStr::new(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RecordValue, E> {
        Ok(RecordValue::Str(SmolStr::from(v)))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<RecordValue, E> {
        Ok(RecordValue::Array(
            v.iter().map(|b| RecordValue::from(*b as i64)).collect(),
        ))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RecordValue, A::Error> {
        let mut arr = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element::<RecordValue>()? {
            arr.push(v);
        }
        Ok(RecordValue::Array(arr))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RecordValue, A::Error> {
        let mut obj = ObjectMap::new();
        while let Some((k, v)) = map.next_entry::<SmolStr, RecordValue>()? {
            obj.insert(k, v);
        }
        Ok(RecordValue::Object(obj))
    }
}

impl<'de> Deserialize<'de> for RecordValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(RecordValueVisitor)
    }
}

// ─── Record (per-shape) ─────────────────────────────────────────────────────

/// A `Record` is stored as its bare value sequence; the type supplies the
/// shape on the way back in.
impl<'de> DeserializeSeed<'de> for &RecordType {
    type Value = Record;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Record, D::Error> {
        let values = Vec::<RecordValue>::deserialize(d)?;
        self.from_values(values).map_err(de::Error::custom)
    }
}

impl RecordType {
    /// Rebuild a record of this type from the JSON array written by
    /// [`Record::to_json`].
    pub fn from_json(&self, json: &str) -> Result<Record, RecordError> {
        let mut de = serde_json::Deserializer::from_str(json);
        let record = DeserializeSeed::deserialize(self, &mut de)?;
        de.end()?;
        Ok(record)
    }

    /// Rebuild a record of this type from the CBOR array written by
    /// [`Record::to_cbor`].
    pub fn from_cbor(&self, data: &[u8]) -> Result<Record, RecordError> {
        let values: Vec<RecordValue> = cbor4ii::serde::from_slice(data)
            .map_err(|e| RecordError::Serialization(e.to_string()))?;
        self.from_values(values)
    }

    /// Build a record from a JSON object keyed by field name.
    pub fn from_json_object(&self, object: serde_json::Value) -> Result<Record, RecordError> {
        match object {
            serde_json::Value::Object(map) => {
                self.from_mapping(map.into_iter().map(|(k, v)| (k, RecordValue::from(v))))
            }
            other => Err(RecordError::Serialization(format!(
                "expected a JSON object for {}, got {}",
                self.name(),
                other
            ))),
        }
    }
}

// ─── SharedRecord ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename = "SharedRecord")]
struct SharedRecordRepr {
    typename: SmolStr,
    fields: Vec<SmolStr>,
    values: Vec<RecordValue>,
}

/// Restores both the shape and the values. The shape is validated again, so
/// a tampered payload cannot produce a record with invalid names.
impl<'de> Deserialize<'de> for SharedRecord {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let repr = SharedRecordRepr::deserialize(d)?;
        SharedRecord::from_parts(&repr.typename, repr.fields, repr.values).map_err(de::Error::custom)
    }
}

impl SharedRecord {
    pub fn from_json(json: &str) -> Result<SharedRecord, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_cbor(data: &[u8]) -> Result<SharedRecord, RecordError> {
        cbor4ii::serde::from_slice(data).map_err(|e| RecordError::Serialization(e.to_string()))
    }
}
