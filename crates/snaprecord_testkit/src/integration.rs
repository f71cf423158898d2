//! Cross-crate integration test helpers.
//!
//! Provides a harness that mirrors every change in memory and checks the
//! stored collection against the mirror.

use crate::generators::RecordOperation;
use snaprecord_codec::{Attributes, Value};
use snaprecord_core::{Record, RecordType};
use std::sync::Arc;

/// A test harness for integration testing.
///
/// Keeps live records in creation order alongside the attributes each one
/// is expected to have in storage.
pub struct IntegrationHarness {
    /// The record type under test.
    pub schema: Arc<RecordType>,
    records: Vec<Record>,
}

impl IntegrationHarness {
    /// Creates a harness over an empty record type.
    pub fn new(schema: Arc<RecordType>) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Creates a record and tracks it.
    pub fn create(&mut self, attributes: Attributes) -> &Record {
        let record = self
            .schema
            .collection()
            .create(attributes)
            .expect("Failed to create record")
            .expect("Save was rejected");
        self.records.push(record);
        self.records.last().expect("Record was just pushed")
    }

    /// Updates the tracked record at `index` (modulo the live count).
    ///
    /// Does nothing when no records are live.
    pub fn update(&mut self, index: usize, attributes: Attributes) {
        if self.records.is_empty() {
            return;
        }
        let slot = index % self.records.len();
        let saved = self.records[slot]
            .update_attributes(attributes)
            .expect("Failed to update record");
        assert!(saved, "Update of a live record was rejected");
    }

    /// Destroys the tracked record at `index` (modulo the live count).
    ///
    /// Does nothing when no records are live.
    pub fn destroy(&mut self, index: usize) {
        if self.records.is_empty() {
            return;
        }
        let slot = index % self.records.len();
        let mut record = self.records.remove(slot);
        let destroyed = record.destroy().expect("Failed to destroy record");
        assert!(destroyed, "Destroy was rejected");
    }

    /// Applies a generated operation.
    pub fn apply(&mut self, operation: RecordOperation) {
        match operation {
            RecordOperation::Create(attributes) => {
                self.create(attributes);
            }
            RecordOperation::Update { index, attributes } => self.update(index, attributes),
            RecordOperation::Destroy { index } => self.destroy(index),
        }
    }

    /// Returns the tracked live records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Verifies the stored collection matches the tracked records, in
    /// order.
    pub fn verify_all(&self) {
        let stored: Vec<Attributes> = self
            .schema
            .collection()
            .all()
            .expect("Failed to load collection")
            .iter()
            .map(Record::persisted_attributes)
            .collect();
        let expected: Vec<Attributes> =
            self.records.iter().map(Record::persisted_attributes).collect();

        assert_eq!(stored, expected, "Stored collection diverged");
    }

    /// Verifies the record with `id` is stored with the tracked attributes.
    pub fn get_and_verify(&self, id: &Value) -> Option<Record> {
        let found = self
            .schema
            .collection()
            .find(id.clone())
            .expect("Failed to load collection");

        if let (Some(found), Some(tracked)) = (
            &found,
            self.records.iter().find(|r| r.id() == Some(id)),
        ) {
            assert_eq!(
                found.persisted_attributes(),
                tracked.persisted_attributes(),
                "Record mismatch for {id:?}"
            );
        }

        found
    }

    /// Returns the count of tracked records.
    pub fn tracked_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestStore;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn harness_tracks_changes() {
        let store = TestStore::local();
        let mut harness = IntegrationHarness::new(store.define("Post", &["title", "body"]));

        harness.create(attrs(&[("title", "A")]));
        harness.create(attrs(&[("title", "B")]));
        harness.update(0, attrs(&[("body", "edited")]));
        harness.verify_all();

        let id = harness.records()[1].id().cloned().unwrap();
        harness.destroy(0);
        assert_eq!(harness.tracked_count(), 1);
        assert!(harness.get_and_verify(&id).is_some());
        harness.verify_all();
    }

    #[test]
    fn operations_on_empty_harness_are_noops() {
        let store = TestStore::key_value();
        let mut harness = IntegrationHarness::new(store.define("Post", &["title"]));
        harness.update(3, Attributes::new());
        harness.destroy(7);
        harness.verify_all();
    }
}
