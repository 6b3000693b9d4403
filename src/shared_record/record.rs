use crate::args::{Args, bind_args, replace_values};
use crate::error::RecordError;
use crate::record_read::RecordRead;
use crate::record_value::RecordValue;
use crate::types::{OrderedMapping, ValueIter};
use crate::validate::validate_restored_shape;
use smol_str::SmolStr;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

// ─── SharedRecord ───────────────────────────────────────────────────────────

/// The one record type shared by every shape.
///
/// Each instance carries its own typename and field names. Named access scans
/// the field names, so it is linear in the field count.
#[derive(Clone)]
pub struct SharedRecord {
    pub(crate) typename: SmolStr,
    pub(crate) field_names: Arc<[SmolStr]>,
    pub(crate) values: Box<[RecordValue]>,
}

impl SharedRecord {
    /// Construct from a shape that has already been validated.
    pub(crate) fn new(
        typename: impl Into<SmolStr>,
        field_names: Arc<[SmolStr]>,
        args: Args,
    ) -> Result<Self, RecordError> {
        let typename = typename.into();
        let values = bind_args(&typename, &field_names, args)?;
        Ok(Self::from_checked(typename, field_names, values))
    }

    /// Construct from an ordered value sequence whose length must match the
    /// already validated shape.
    pub(crate) fn make<I, V>(
        typename: impl Into<SmolStr>,
        field_names: Arc<[SmolStr]>,
        iterable: I,
    ) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<RecordValue>,
    {
        let typename = typename.into();
        let values: Vec<RecordValue> = iterable.into_iter().map(Into::into).collect();
        if values.len() != field_names.len() {
            log::trace!("{typename}: expected {} values, got {}", field_names.len(), values.len());
            return Err(RecordError::ArityError {
                typename,
                expected: field_names.len(),
                actual: values.len(),
            });
        }
        Ok(Self::from_checked(typename, field_names, values))
    }

    /// Rebuild from a `(typename, field names, values)` triple coming from
    /// outside, validating the shape and the arity. `_<index>` placeholders
    /// left by renaming are accepted at their own position.
    pub fn from_parts(
        typename: &str,
        field_names: Vec<SmolStr>,
        values: Vec<RecordValue>,
    ) -> Result<Self, RecordError> {
        let (typename, field_names) = validate_restored_shape(typename, field_names)?;
        Self::make(typename, Arc::from(field_names), values)
    }

    /// Split into `(typename, field names, values)`, the state needed to rebuild.
    pub fn into_parts(self) -> (SmolStr, Arc<[SmolStr]>, Vec<RecordValue>) {
        (self.typename, self.field_names, self.values.into_vec())
    }

    #[inline]
    pub(crate) fn from_checked(
        typename: SmolStr,
        field_names: Arc<[SmolStr]>,
        values: Vec<RecordValue>,
    ) -> Self {
        debug_assert_eq!(values.len(), field_names.len());
        Self {
            typename,
            field_names,
            values: values.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn fields(&self) -> &[SmolStr] {
        &self.field_names
    }

    #[inline]
    pub fn as_slice(&self) -> &[RecordValue] {
        &self.values
    }

    pub fn to_values(&self) -> Vec<RecordValue> {
        self.values.to_vec()
    }

    /// A copy with the named fields replaced. `self` is left untouched.
    pub fn replace<I, K, V>(&self, overrides: I) -> Result<SharedRecord, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<RecordValue>,
    {
        let values = replace_values(&self.typename, &self.field_names, &self.values, overrides)?;
        Ok(Self::from_checked(
            self.typename.clone(),
            Arc::clone(&self.field_names),
            values,
        ))
    }
}

impl RecordRead for SharedRecord {
    #[inline]
    fn typename(&self) -> &SmolStr {
        &self.typename
    }

    #[inline]
    fn field_names(&self) -> &[SmolStr] {
        &self.field_names
    }

    #[inline]
    fn values(&self) -> &[RecordValue] {
        &self.values
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.field_names.iter().position(|f| f == name)
    }
}

impl Index<usize> for SharedRecord {
    type Output = RecordValue;

    fn index(&self, index: usize) -> &RecordValue {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a SharedRecord {
    type Item = &'a RecordValue;
    type IntoIter = ValueIter<'a>;

    fn into_iter(self) -> ValueIter<'a> {
        self.iter()
    }
}

impl PartialEq for SharedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.typename == other.typename
            && (Arc::ptr_eq(&self.field_names, &other.field_names)
                || self.field_names == other.field_names)
            && self.values == other.values
    }
}

impl fmt::Display for SharedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f)
    }
}

impl fmt::Debug for SharedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f)
    }
}

impl From<&SharedRecord> for OrderedMapping {
    fn from(record: &SharedRecord) -> Self {
        record.to_ordered_mapping()
    }
}
