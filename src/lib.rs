//! Immutable named-field records whose shapes are defined at runtime.
//!
//! Two factories produce records with the same behavior:
//!
//! - [`RecordType`] (per-shape): defining a type validates the names once and
//!   binds an accessor table; records hold only a reference to it plus their
//!   values.
//! - [`SharedRecordType`] (shared): every record is a [`SharedRecord`] that
//!   carries its own typename and field names; named access scans them.
//!
//! ```
//! use named_record::prelude::*;
//!
//! let point = RecordType::new("Point", ["x", "y"]).unwrap();
//! let p = point.call(Args::new().pos(11).kw("y", 22)).unwrap();
//! assert_eq!(p, point.call(Args::new().kw("x", 11).kw("y", 22)).unwrap());
//! assert_eq!(p[0].as_i64().unwrap() + p[1].as_i64().unwrap(), 33);
//! assert_eq!(p.field("x").unwrap().as_i64(), Some(11));
//! assert_eq!(p.to_string(), "Point(x=11, y=22)");
//!
//! let moved = p.replace([("x", 100)]).unwrap();
//! assert_eq!(moved.to_string(), "Point(x=100, y=22)");
//! ```

pub mod args;
pub mod config;
pub mod deserialization;
pub mod error;
pub mod record_read;
pub mod record_type;
pub mod record_value;
pub mod serialization;
pub mod shared_record;
pub mod types;
pub mod validate;

pub use args::Args;
pub use config::ShapeOptions;
pub use error::{IdentifierIssue, NameKind, RecordError};
pub use record_read::RecordRead;
pub use record_type::{FieldAccessor, Record, RecordType, make_record_type};
pub use record_value::{RecordNumber, RecordValue};
pub use shared_record::{SharedRecord, SharedRecordType, make_shared_record_type};
pub use types::{FastMap, OrderedMapping};
pub use validate::{FieldNames, is_reserved, validate_shape};

pub mod prelude {
    pub use crate::{
        Args, FieldAccessor, Record, RecordError, RecordRead, RecordType, RecordValue,
        ShapeOptions, SharedRecord, SharedRecordType,
    };
}
