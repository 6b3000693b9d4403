use crate::error::RecordError;
use crate::record_value::RecordValue;
use crate::types::*;
use smol_str::SmolStr;
use std::fmt;

/// Read access shared by both record variants.
///
/// Implementors provide the shape (`typename`, `field_names`), the value slice
/// and a name lookup; everything else is derived from those.
pub trait RecordRead {
    fn typename(&self) -> &SmolStr;
    fn field_names(&self) -> &[SmolStr];
    fn values(&self) -> &[RecordValue];

    /// Slot index of a field name, if the shape declares it.
    fn position(&self, name: &str) -> Option<usize>;

    #[inline]
    fn len(&self) -> usize {
        self.values().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&RecordValue> {
        self.values().get(index)
    }

    /// Positional access that reports the shape on failure.
    fn try_get(&self, index: usize) -> Result<&RecordValue, RecordError> {
        self.values().get(index).ok_or_else(|| RecordError::IndexOutOfRange {
            typename: self.typename().clone(),
            index,
            len: self.len(),
        })
    }

    /// Named access.
    fn field(&self, name: &str) -> Result<&RecordValue, RecordError> {
        self.position(name)
            .map(|i| &self.values()[i])
            .ok_or_else(|| RecordError::NoSuchField {
                typename: self.typename().clone(),
                field: SmolStr::new(name),
            })
    }

    #[inline]
    fn has_field(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[inline]
    fn iter(&self) -> ValueIter<'_> {
        ValueIter::new(self.values())
    }

    #[inline]
    fn iter_fields(&self) -> FieldIter<'_> {
        FieldIter {
            names: self.field_names(),
            values: ValueIter::new(self.values()),
        }
    }

    fn to_ordered_mapping(&self) -> OrderedMapping {
        self.iter_fields()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Mapping view as a JSON object in declared field order.
    fn to_json_object(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter_fields()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }

    /// Compare values only, ignoring the shape.
    fn values_eq(&self, other: &[RecordValue]) -> bool {
        self.values() == other
    }

    /// `Typename(f1=v1, f2=v2)`.
    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.typename())?;
        for (i, (name, value)) in self.iter_fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}
