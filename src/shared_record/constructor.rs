use super::record::SharedRecord;
use crate::args::Args;
use crate::config::ShapeOptions;
use crate::error::RecordError;
use crate::record_value::RecordValue;
use crate::validate::{FieldNames, signature, validate_shape};
use smol_str::{SmolStr, format_smolstr};
use std::fmt;
use std::sync::Arc;

/// Constructor for [`SharedRecord`]s of one shape.
///
/// Defining one only validates the names and keeps them; no per-shape
/// accessor table is built.
#[derive(Clone)]
pub struct SharedRecordType {
    typename: SmolStr,
    fields: Arc<[SmolStr]>,
}

impl SharedRecordType {
    pub fn new(typename: &str, field_names: impl Into<FieldNames>) -> Result<Self, RecordError> {
        Self::with_options(typename, field_names, &ShapeOptions::default())
    }

    pub fn with_options(
        typename: &str,
        field_names: impl Into<FieldNames>,
        options: &ShapeOptions,
    ) -> Result<Self, RecordError> {
        let (typename, fields) = validate_shape(typename, field_names.into(), options)?;
        if options.verbose {
            log::info!("defining shared record shape {}({})", typename, signature(&fields));
        } else {
            log::debug!("defined shared record shape {typename} with {} fields", fields.len());
        }
        Ok(Self {
            typename,
            fields: Arc::from(fields),
        })
    }

    #[inline]
    pub fn name(&self) -> &SmolStr {
        &self.typename
    }

    #[inline]
    pub fn fields(&self) -> &[SmolStr] {
        &self.fields
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// `Typename(f1, f2)`.
    pub fn doc(&self) -> SmolStr {
        format_smolstr!("{}({})", self.typename, signature(&self.fields))
    }

    pub fn signature(&self) -> SmolStr {
        signature(&self.fields)
    }

    pub fn call(&self, args: Args) -> Result<SharedRecord, RecordError> {
        SharedRecord::new(self.typename.clone(), Arc::clone(&self.fields), args)
    }

    pub fn make<I, V>(&self, iterable: I) -> Result<SharedRecord, RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<RecordValue>,
    {
        SharedRecord::make(self.typename.clone(), Arc::clone(&self.fields), iterable)
    }

    pub fn from_mapping<I, K, V>(&self, pairs: I) -> Result<SharedRecord, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<RecordValue>,
    {
        self.call(Args::keywords(pairs))
    }
}

impl fmt::Debug for SharedRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRecordType")
            .field("typename", &self.typename)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Define a shared-record constructor.
pub fn make_shared_record_type(
    typename: &str,
    field_names: impl Into<FieldNames>,
    rename: bool,
) -> Result<SharedRecordType, RecordError> {
    SharedRecordType::with_options(typename, field_names, &ShapeOptions::default().rename(rename))
}
