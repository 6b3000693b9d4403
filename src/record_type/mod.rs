mod record;
mod type_def;

pub use record::Record;
pub use type_def::{FieldAccessor, RecordType, make_record_type};
