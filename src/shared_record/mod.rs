mod constructor;
mod record;

pub use constructor::{SharedRecordType, make_shared_record_type};
pub use record::SharedRecord;

#[cfg(test)]
mod tests;
