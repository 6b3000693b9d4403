use super::type_def::{RecordType, ShapeInner};
use crate::args::replace_values;
use crate::error::RecordError;
use crate::record_read::RecordRead;
use crate::record_value::RecordValue;
use crate::types::{OrderedMapping, ValueIter};
use smol_str::SmolStr;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

// ─── Record ─────────────────────────────────────────────────────────────────

/// An immutable record of a [`RecordType`].
///
/// The shape lives on the type; a record only holds a reference to it plus
/// its own values.
#[derive(Clone)]
pub struct Record {
    pub(crate) shape: Arc<ShapeInner>,
    pub(crate) values: Box<[RecordValue]>,
}

impl Record {
    /// The type that built this record.
    pub fn record_type(&self) -> RecordType {
        RecordType {
            shape: Arc::clone(&self.shape),
        }
    }

    #[inline]
    pub fn fields(&self) -> &[SmolStr] {
        &self.shape.fields
    }

    #[inline]
    pub fn as_slice(&self) -> &[RecordValue] {
        &self.values
    }

    /// The plain value sequence; the shape is recoverable from the type.
    pub fn to_values(&self) -> Vec<RecordValue> {
        self.values.to_vec()
    }

    pub fn into_values(self) -> Vec<RecordValue> {
        self.values.into_vec()
    }

    /// A copy with the named fields replaced. `self` is left untouched.
    pub fn replace<I, K, V>(&self, overrides: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<RecordValue>,
    {
        let values = replace_values(&self.shape.typename, &self.shape.fields, &self.values, overrides)?;
        Ok(Record {
            shape: Arc::clone(&self.shape),
            values: values.into_boxed_slice(),
        })
    }
}

impl RecordRead for Record {
    #[inline]
    fn typename(&self) -> &SmolStr {
        &self.shape.typename
    }

    #[inline]
    fn field_names(&self) -> &[SmolStr] {
        &self.shape.fields
    }

    #[inline]
    fn values(&self) -> &[RecordValue] {
        &self.values
    }

    /// O(1) through the type's accessor table.
    #[inline]
    fn position(&self, name: &str) -> Option<usize> {
        self.shape.slots.get(name).copied()
    }
}

impl Index<usize> for Record {
    type Output = RecordValue;

    fn index(&self, index: usize) -> &RecordValue {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a RecordValue;
    type IntoIter = ValueIter<'a>;

    fn into_iter(self) -> ValueIter<'a> {
        self.iter()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shape, &other.shape) && self.values == other.values
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f)
    }
}

impl From<&Record> for OrderedMapping {
    fn from(record: &Record) -> Self {
        record.to_ordered_mapping()
    }
}
