use super::record::Record;
use crate::args::{Args, bind_args};
use crate::config::ShapeOptions;
use crate::error::RecordError;
use crate::record_value::RecordValue;
use crate::types::FastMap;
use crate::validate::{FieldNames, signature, validate_shape};
use smol_str::{SmolStr, format_smolstr};
use std::fmt;
use std::sync::Arc;

// ─── Shape ──────────────────────────────────────────────────────────────────

/// Validated shape metadata, shared by a `RecordType` and all of its records.
#[derive(Debug)]
pub(crate) struct ShapeInner {
    pub(crate) typename: SmolStr,
    pub(crate) fields: Box<[SmolStr]>,
    /// Accessor table: field name → slot, bound once when the type is defined.
    pub(crate) slots: FastMap<SmolStr, usize>,
    pub(crate) doc: SmolStr,
}

// ─── RecordType ─────────────────────────────────────────────────────────────

/// A record type defined at runtime from a typename and field names.
///
/// Every call to [`RecordType::new`] defines a fresh type: records built from
/// two separately defined types never compare equal, even when the shapes
/// match. Cloning a `RecordType` is cheap and keeps the same identity.
#[derive(Clone)]
pub struct RecordType {
    pub(crate) shape: Arc<ShapeInner>,
}

impl RecordType {
    /// Define a new record type. Invalid names are rejected.
    pub fn new(typename: &str, field_names: impl Into<FieldNames>) -> Result<Self, RecordError> {
        Self::with_options(typename, field_names, &ShapeOptions::default())
    }

    pub fn with_options(
        typename: &str,
        field_names: impl Into<FieldNames>,
        options: &ShapeOptions,
    ) -> Result<Self, RecordError> {
        let (typename, fields) = validate_shape(typename, field_names.into(), options)?;
        let slots = fields
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let doc = format_smolstr!("{}({})", typename, signature(&fields));

        if options.verbose {
            log::info!("defining record type {doc}");
        } else {
            log::debug!("defined record type {typename} with {} fields", fields.len());
        }

        Ok(Self {
            shape: Arc::new(ShapeInner {
                typename,
                fields: fields.into_boxed_slice(),
                slots,
                doc,
            }),
        })
    }

    #[inline]
    pub fn name(&self) -> &SmolStr {
        &self.shape.typename
    }

    #[inline]
    pub fn fields(&self) -> &[SmolStr] {
        &self.shape.fields
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.shape.fields.len()
    }

    /// `Typename(f1, f2)`.
    pub fn doc(&self) -> &str {
        &self.shape.doc
    }

    /// Constructor argument list, `f1, f2`.
    pub fn signature(&self) -> SmolStr {
        signature(&self.shape.fields)
    }

    /// The accessor bound to `name` when the type was defined.
    pub fn accessor(&self, name: &str) -> Option<FieldAccessor> {
        let index = *self.shape.slots.get(name)?;
        Some(FieldAccessor {
            shape: Arc::clone(&self.shape),
            index,
        })
    }

    /// Accessors for every field, in declared order.
    pub fn accessors(&self) -> impl Iterator<Item = FieldAccessor> + '_ {
        (0..self.field_count()).map(|index| FieldAccessor {
            shape: Arc::clone(&self.shape),
            index,
        })
    }

    /// Build a record from positional and keyword arguments.
    pub fn call(&self, args: Args) -> Result<Record, RecordError> {
        let values = bind_args(&self.shape.typename, &self.shape.fields, args)?;
        Ok(self.wrap(values))
    }

    /// Build a record from an already ordered sequence of values.
    pub fn make<I, V>(&self, iterable: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<RecordValue>,
    {
        self.from_values(iterable.into_iter().map(Into::into).collect())
    }

    /// Reconstruct a record from its plain value sequence.
    pub fn from_values(&self, values: Vec<RecordValue>) -> Result<Record, RecordError> {
        if values.len() != self.field_count() {
            log::trace!(
                "{}: expected {} values, got {}",
                self.shape.typename,
                self.field_count(),
                values.len()
            );
            return Err(RecordError::ArityError {
                typename: self.shape.typename.clone(),
                expected: self.field_count(),
                actual: values.len(),
            });
        }
        Ok(self.wrap(values))
    }

    /// Build a record from `(field, value)` pairs, as if passed as keywords.
    pub fn from_mapping<I, K, V>(&self, pairs: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<RecordValue>,
    {
        self.call(Args::keywords(pairs))
    }

    /// Whether `record` was built by this type.
    #[inline]
    pub fn is_type_of(&self, record: &Record) -> bool {
        Arc::ptr_eq(&self.shape, &record.shape)
    }

    #[inline]
    pub(crate) fn wrap(&self, values: Vec<RecordValue>) -> Record {
        debug_assert_eq!(values.len(), self.field_count());
        Record {
            shape: Arc::clone(&self.shape),
            values: values.into_boxed_slice(),
        }
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shape, &other.shape)
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("typename", &self.shape.typename)
            .field("fields", &self.shape.fields)
            .finish()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shape.doc)
    }
}

/// Define a per-shape record type.
pub fn make_record_type(
    typename: &str,
    field_names: impl Into<FieldNames>,
    rename: bool,
) -> Result<RecordType, RecordError> {
    RecordType::with_options(typename, field_names, &ShapeOptions::default().rename(rename))
}

// ─── FieldAccessor ──────────────────────────────────────────────────────────

/// Read-only accessor bound to one slot of one record type.
///
/// Reading through it is a direct slot read; no name lookup happens.
#[derive(Clone)]
pub struct FieldAccessor {
    shape: Arc<ShapeInner>,
    index: usize,
}

impl FieldAccessor {
    #[inline]
    pub fn name(&self) -> &SmolStr {
        &self.shape.fields[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Read the bound field. `None` if `record` belongs to another type.
    #[inline]
    pub fn get<'r>(&self, record: &'r Record) -> Option<&'r RecordValue> {
        if Arc::ptr_eq(&self.shape, &record.shape) {
            Some(&record.values[self.index])
        } else {
            None
        }
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldAccessor({}.{} @ {})", self.shape.typename, self.name(), self.index)
    }
}
