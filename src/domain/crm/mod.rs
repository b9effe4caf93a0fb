//! CRM record source boundary

mod source;

pub use source::{FieldUpdates, RecordSource};

#[cfg(test)]
pub use source::mock::MockRecordSource;
