//! Save, destroy and reload.
//!
//! Every operation here follows the same read-modify-write cycle: load the
//! whole collection, change it in memory, write the whole collection back.
//! Nothing serializes concurrent cycles, so two writers racing between
//! read and write lose one update.

use super::Record;
use crate::error::CoreResult;
use crate::hooks::HookPoint;
use snaprecord_codec::{Attributes, Value};
use snaprecord_storage::StorageResult;
use std::sync::Arc;
use tracing::{debug, warn};

impl Record {
    /// Persists this record.
    ///
    /// A new record is appended to the collection and gets an id through
    /// the `before_create` hooks. A persisted record replaces the stored
    /// element with the same id. Every other element is written back as it
    /// was loaded.
    ///
    /// Returns `Ok(false)` without writing when a new record's id is already
    /// stored or a persisted record's id is no longer stored, and
    /// `Ok(false)` when the storage medium rejects the write.
    ///
    /// The record counts as created as soon as the collection is written,
    /// so a failing `after_create` or `after_save` hook does not make a
    /// retry append it twice.
    ///
    /// # Errors
    ///
    /// Returns an error if a hook fails, the collection cannot be loaded,
    /// or the collection cannot be encoded.
    pub fn save(&mut self) -> CoreResult<bool> {
        let schema = Arc::clone(&self.schema);
        let hooks = schema.hooks();
        let is_new = self.is_new_record();

        hooks.run(HookPoint::BeforeValidation, self)?;
        hooks.run(HookPoint::BeforeSave, self)?;
        if is_new {
            hooks.run(HookPoint::BeforeCreate, self)?;
        }

        let mut existing = schema.collection().all()?;
        if is_new {
            if self.id().is_some() && existing.iter().any(|item| item.id() == self.id()) {
                debug!(record_type = schema.name(), id = ?self.id(), "id already stored, not saving");
                return Ok(false);
            }
            existing.push(self.clone());
        } else {
            let Some(stored) = existing
                .iter_mut()
                .find(|item| item.id().is_some() && item.id() == self.id())
            else {
                debug!(record_type = schema.name(), id = ?self.id(), "record vanished, not saving");
                return Ok(false);
            };
            stored.attributes = self.attributes.clone();
        }

        if self.is_valid() {
            let raw: Vec<Attributes> = existing.iter().map(Record::persisted_attributes).collect();
            if !written(schema.write_contents(&raw))? {
                return Ok(false);
            }
            debug!(record_type = schema.name(), id = ?self.id(), records = raw.len(), "saved record");
        }
        self.mark_created();

        if is_new {
            hooks.run(HookPoint::AfterCreate, self)?;
        }
        hooks.run(HookPoint::AfterSave, self)?;
        Ok(true)
    }

    /// Assigns `attributes` and saves.
    ///
    /// # Errors
    ///
    /// Same as [`Record::save`].
    pub fn update_attributes<I, K, V>(&mut self, attributes: I) -> CoreResult<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.assign_attributes(attributes);
        self.save()
    }

    /// Removes this record from storage.
    ///
    /// Every stored element whose persisted attributes equal this record's
    /// persisted attributes is dropped; the rest are written back.
    ///
    /// Returns `Ok(false)` when the storage medium rejects the write.
    ///
    /// # Errors
    ///
    /// Returns an error if a hook fails, the collection cannot be loaded,
    /// or the collection cannot be encoded.
    pub fn destroy(&mut self) -> CoreResult<bool> {
        let schema = Arc::clone(&self.schema);
        let hooks = schema.hooks();

        hooks.run(HookPoint::BeforeDestroy, self)?;

        // Matches on content, not id.
        let target = self.persisted_attributes();
        let remaining: Vec<Attributes> = schema
            .collection()
            .all()?
            .iter()
            .map(Record::persisted_attributes)
            .filter(|attrs| *attrs != target)
            .collect();

        if !written(schema.write_contents(&remaining))? {
            return Ok(false);
        }
        debug!(record_type = schema.name(), id = ?self.id(), records = remaining.len(), "destroyed record");

        self.destroyed = true;
        hooks.run(HookPoint::AfterDestroy, self)?;
        Ok(true)
    }

    /// Assigns the stored attributes over this record's.
    ///
    /// Ad-hoc attributes that were never stored are kept. Returns the freshly loaded record, or `None` (leaving `self`
    /// untouched) if the id is no longer stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn reload(&mut self) -> CoreResult<Option<Record>> {
        let Some(id) = self.id().cloned() else {
            return Ok(None);
        };
        let found = self.schema.collection().find(id)?;
        if let Some(stored) = &found {
            self.attributes
                .extend(stored.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(found)
    }
}

/// Turns an I/O write failure into `false`; other failures propagate.
fn written(result: StorageResult<()>) -> CoreResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_io() => {
            warn!(error = %e, "collection write failed");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
