//! Records and their attributes.
//!
//! A [`Record`] is one entity of a declared [`RecordType`]: a map of
//! attribute values plus two lifecycle flags. The persistence operations
//! (`save`, `destroy`, `reload`) live in the `lifecycle` submodule.

mod id;
mod lifecycle;

pub use id::RecordId;

use crate::schema::RecordType;
use snaprecord_codec::{Attributes, Value};
use std::fmt;
use std::sync::Arc;

/// Name of the identity attribute every record type declares.
pub const ID: &str = "id";

/// Construction-only key that marks attributes as already stored.
///
/// It seeds the record's `created` flag and is never kept as an attribute.
pub const PERSISTED: &str = "persisted";

/// One entity of a declared record type.
///
/// Declared properties are always present in the attribute map, holding
/// [`Value::Null`] until set. Keys that are not declared are kept as ad-hoc
/// attributes: readable and writable, but never stored.
///
/// # States
///
/// ```text
/// Transient (created=false) --save--> Persisted (created=true)
///     --destroy--> Destroyed (destroyed=true)
/// ```
///
/// # Equality
///
/// Two records are equal when their ids are equal. Two records without an
/// id are therefore equal to each other.
#[derive(Clone)]
pub struct Record {
    schema: Arc<RecordType>,
    attributes: Attributes,
    created: bool,
    destroyed: bool,
}

impl Record {
    /// Builds an in-memory record from attribute pairs.
    ///
    /// Does not touch storage. A `persisted` key, if present, seeds the
    /// created flag and is dropped.
    pub fn new<I, K, V>(schema: &Arc<RecordType>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_attributes(schema, attributes)
    }

    /// Builds a record with every declared property unset.
    #[must_use]
    pub fn empty(schema: &Arc<RecordType>) -> Self {
        Self::from_attributes(schema, Attributes::new())
    }

    /// Builds a record from a raw attribute map.
    ///
    /// Same rules as [`Record::new`].
    #[must_use]
    pub fn from_attributes(schema: &Arc<RecordType>, mut attributes: Attributes) -> Self {
        let created = attributes
            .remove(PERSISTED)
            .is_some_and(|flag| flag.is_truthy());

        for name in schema.properties() {
            attributes.entry(name.clone()).or_insert(Value::Null);
        }

        Self {
            schema: Arc::clone(schema),
            attributes,
            created,
            destroyed: false,
        }
    }

    /// Returns the record type.
    #[must_use]
    pub fn schema(&self) -> &Arc<RecordType> {
        &self.schema
    }

    /// Returns the value of an attribute.
    ///
    /// Declared properties always resolve (to `Null` when unset); unknown
    /// names resolve to `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets an attribute, declared or ad-hoc.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Sets several attributes at once.
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in attributes {
            self.set(name, value);
        }
    }

    /// Returns the id, or `None` if it has not been assigned.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.get(ID).filter(|v| !v.is_null())
    }

    /// Returns the value used to refer to this record externally: its id.
    #[must_use]
    pub fn to_param(&self) -> Option<&Value> {
        self.id()
    }

    /// Returns every attribute, declared and ad-hoc.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the names of every attribute this record holds.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Returns the attributes that get stored: declared properties only,
    /// with null values left out.
    ///
    /// This projection is also what `destroy` matches on.
    #[must_use]
    pub fn persisted_attributes(&self) -> Attributes {
        self.schema
            .properties()
            .iter()
            .filter_map(|name| {
                self.attributes
                    .get(name)
                    .filter(|v| !v.is_null())
                    .map(|v| (name.clone(), v.clone()))
            })
            .collect()
    }

    /// Returns true until the record has been saved once.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        !self.created
    }

    /// Returns true once the record has been saved.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Returns true once the record has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Validation hook point. Always valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        true
    }

    /// Validation messages. Always empty.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        Vec::new()
    }

    pub(crate) fn mark_created(&mut self) {
        self.created = true;
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.schema.name())
            .field("attributes", &self.attributes)
            .field("created", &self.created)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
