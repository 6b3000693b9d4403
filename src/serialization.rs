use crate::error::RecordError;
use crate::record_type::Record;
use crate::record_value::RecordValue;
use crate::shared_record::SharedRecord;
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

// ─── Serialize impls ────────────────────────────────────────────────────────
//
// Only the minimal state is written. A `Record` is a plain value sequence
// because its type already knows the shape; a `SharedRecord` also writes its
// typename and field names. The mapping view is never serialized.

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for v in self.values.iter() {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

impl Serialize for SharedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("SharedRecord", 3)?;
        st.serialize_field("typename", &self.typename)?;
        st.serialize_field("fields", &*self.field_names)?;
        st.serialize_field("values", &*self.values)?;
        st.end()
    }
}

// ─── Encoders ───────────────────────────────────────────────────────────────

pub(crate) fn encode_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, RecordError> {
    let mut buf: Vec<u8> = Vec::new();
    cbor4ii::serde::to_writer(&mut buf, value)
        .map_err(|e| RecordError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// serde_json writes NaN and the infinities as `null`, which would not read
/// back as the same record.
fn ensure_json_finite(typename: &str, values: &[RecordValue]) -> Result<(), RecordError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(RecordError::Serialization(format!(
            "{typename}: value at index {index} holds a non-finite float"
        ))),
        None => Ok(()),
    }
}

impl Record {
    /// JSON array of the values. Fails on NaN or infinite floats.
    pub fn to_json(&self) -> Result<String, RecordError> {
        ensure_json_finite(&self.shape.typename, &self.values)?;
        Ok(serde_json::to_string(self)?)
    }

    /// CBOR array of the values.
    pub fn to_cbor(&self) -> Result<Vec<u8>, RecordError> {
        encode_cbor(self)
    }
}

impl SharedRecord {
    /// JSON object `{"typename", "fields", "values"}`. Fails on NaN or
    /// infinite floats.
    pub fn to_json(&self) -> Result<String, RecordError> {
        ensure_json_finite(&self.typename, &self.values)?;
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, RecordError> {
        encode_cbor(self)
    }
}
