//! Base implementation of records for logging.
use crate::Acs2Error;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, e.g. the number of steps in a trial.
    Scalar(f64),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// ```rust
/// use acs2_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("reliable", 12.0);
/// record.insert("phase", RecordValue::String("explore".to_string()));
///
/// assert_eq!(record.get_scalar("reliable").ok(), Some(12.0));
/// assert!(record.get_scalar("phase").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<'_, String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns an iterator that consumes the record.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite values of `self` with the same key.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        for (k, v) in record.0 {
            self.0.insert(k, v);
        }
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f64, Acs2Error> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(Acs2Error::RecordValueTypeError("Scalar".to_string())),
            None => Err(Acs2Error::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, Acs2Error> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(Acs2Error::RecordValueTypeError("String".to_string())),
            None => Err(Acs2Error::RecordKeyError(k.to_string())),
        }
    }

    /// Number of key-value pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites() {
        let a = Record::from_slice(&[
            ("trial", RecordValue::Scalar(1.0)),
            ("steps", RecordValue::Scalar(5.0)),
        ]);
        let b = Record::from_scalar("steps", 7.0);
        let merged = a.merge(b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("steps").ok(), Some(7.0));

        let mut keys = merged.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["steps".to_string(), "trial".to_string()]);
    }

    #[test]
    fn test_missing_key() {
        let record = Record::empty();
        assert_eq!(
            record.get_scalar("trial"),
            Err(Acs2Error::RecordKeyError("trial".to_string()))
        );
    }

    #[test]
    fn test_datetime_value() {
        let mut record = Record::empty();
        record.insert("start", RecordValue::DateTime(Local::now()));
        assert_eq!(
            record.get_string("start"),
            Err(Acs2Error::RecordValueTypeError("String".to_string()))
        );
    }
}
