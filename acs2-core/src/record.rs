//! Records of metrics collected while an agent learns.
//!
//! * [`Record`] - A container of key-value pairs
//! * [`RecordValue`] - The values that can be stored in a record
//! * [`Recorder`] - Destination of records
//! * [`BufferedRecorder`] - A recorder keeping records in memory
//! * [`NullRecorder`] - A recorder discarding all records
//!
//! ```rust
//! use acs2_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("trial", RecordValue::Scalar(3.0));
//! record.insert("steps_in_trial", RecordValue::Scalar(12.0));
//! assert_eq!(record.get_scalar("trial").ok(), Some(3.0));
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
