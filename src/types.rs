use crate::record_value::RecordValue;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Field name → value, in declared field order.
pub type OrderedMapping = IndexMap<SmolStr, RecordValue>;

// ─── Iterator ───────────────────────────────────────────────────────────────

/// Iterates a record's values in declared field order. A fresh iterator
/// always starts at the first field.
#[derive(Debug, Clone)]
pub struct ValueIter<'a> {
    pub(crate) values: &'a [RecordValue],
    pub(crate) pos: usize,
}

impl<'a> ValueIter<'a> {
    pub(crate) fn new(values: &'a [RecordValue]) -> Self {
        Self { values, pos: 0 }
    }
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = &'a RecordValue;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.get(self.pos)?;
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ValueIter<'a> {}

/// Iterates `(field name, value)` pairs in declared field order.
pub struct FieldIter<'a> {
    pub(crate) names: &'a [SmolStr],
    pub(crate) values: ValueIter<'a>,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (&'a SmolStr, &'a RecordValue);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.values.pos;
        let value = self.values.next()?;
        Some((&self.names[pos], value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'a> ExactSizeIterator for FieldIter<'a> {}
