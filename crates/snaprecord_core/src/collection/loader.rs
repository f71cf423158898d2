//! Collection loader.

use super::Limited;
use crate::error::CoreResult;
use crate::record::{Record, ID, PERSISTED};
use crate::schema::RecordType;
use snaprecord_codec::{Attributes, Value};
use std::sync::Arc;
use tracing::debug;

/// Query surface over one record type's stored collection.
///
/// # Full Scans
///
/// Every method reads and decodes the entire collection. Records come back
/// in stored order, which is insertion order.
///
/// # Example
///
/// ```rust
/// use snaprecord_core::{Config, RecordType};
/// use std::sync::Arc;
///
/// let dir = tempfile::tempdir().unwrap();
/// let posts = Arc::new(
///     RecordType::builder("Post")
///         .properties(["title", "tags"])
///         .config(Config::new().root(dir.path()))
///         .build()
///         .unwrap(),
/// );
///
/// let collection = posts.collection();
/// collection.create([("title", "Hello")]).unwrap();
/// assert_eq!(collection.count().unwrap(), 1);
///
/// let found = collection.find_by_attribute("title", "Hello").unwrap();
/// assert!(found.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Collection {
    schema: Arc<RecordType>,
}

impl Collection {
    /// Creates a loader for `schema`.
    #[must_use]
    pub fn new(schema: Arc<RecordType>) -> Self {
        Self { schema }
    }

    /// Returns the record type.
    #[must_use]
    pub fn schema(&self) -> &Arc<RecordType> {
        &self.schema
    }

    /// Returns the record type name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Loads every stored record.
    ///
    /// Loaded records are marked as created.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded.
    pub fn all(&self) -> CoreResult<Vec<Record>> {
        let raw = self.schema.read_contents()?;
        debug!(record_type = self.name(), records = raw.len(), "loaded collection");

        Ok(raw
            .into_iter()
            .map(|mut attributes: Attributes| {
                attributes.insert(PERSISTED.to_string(), Value::Bool(true));
                Record::from_attributes(&self.schema, attributes)
            })
            .collect())
    }

    /// Returns an iterator over every stored record.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn iter(&self) -> CoreResult<impl Iterator<Item = Record>> {
        Ok(self.all()?.into_iter())
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn count(&self) -> CoreResult<usize> {
        Ok(self.schema.read_contents()?.len())
    }

    /// Returns the leading records.
    ///
    /// A `limit` of 1 returns [`Limited::One`]; anything else returns
    /// [`Limited::Many`] with at most `limit` records.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn first(&self, limit: usize) -> CoreResult<Limited> {
        let mut records = self.all()?;
        if limit == 1 {
            return Ok(Limited::One(records.into_iter().next()));
        }
        records.truncate(limit);
        Ok(Limited::Many(records))
    }

    /// Returns the trailing records, in stored order.
    ///
    /// Same shape rules as [`Collection::first`].
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn last(&self, limit: usize) -> CoreResult<Limited> {
        let mut records = self.all()?;
        if limit == 1 {
            return Ok(Limited::One(records.pop()));
        }
        let start = records.len().saturating_sub(limit);
        Ok(Limited::Many(records.split_off(start)))
    }

    /// Returns the first record whose `name` attribute matches `expected`.
    ///
    /// An array attribute matches when it contains `expected`; any other
    /// value must equal it. An attribute the record does not have counts
    /// as null.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn find_by_attribute(
        &self,
        name: &str,
        expected: impl Into<Value>,
    ) -> CoreResult<Option<Record>> {
        let expected = expected.into();
        Ok(self.all()?.into_iter().find(|record| {
            match record.get(name) {
                Some(value @ Value::Array(_)) => value.contains(&expected),
                Some(value) => *value == expected,
                None => expected.is_null(),
            }
        }))
    }

    /// Returns the record with the given id.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn find_by_id(&self, id: impl Into<Value>) -> CoreResult<Option<Record>> {
        self.find_by_attribute(ID, id)
    }

    /// Alias for [`Collection::find_by_id`].
    ///
    /// # Errors
    ///
    /// Same as [`Collection::all`].
    pub fn find(&self, id: impl Into<Value>) -> CoreResult<Option<Record>> {
        self.find_by_id(id)
    }

    /// Builds a record without saving it.
    pub fn build<I, K, V>(&self, attributes: I) -> Record
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Record::new(&self.schema, attributes)
    }

    /// Builds and saves a record.
    ///
    /// Returns `None` if the save did not go through.
    ///
    /// # Errors
    ///
    /// Same as [`Record::save`].
    pub fn create<I, K, V>(&self, attributes: I) -> CoreResult<Option<Record>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut record = self.build(attributes);
        Ok(record.save()?.then_some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use snaprecord_storage::InMemoryKv;
    use tempfile::tempdir;

    fn kv_posts() -> Arc<RecordType> {
        Arc::new(
            RecordType::builder("Post")
                .properties(["title", "body", "child_ids"])
                .key_value(Arc::new(InMemoryKv::new()))
                .build()
                .unwrap(),
        )
    }

    fn title(record: &Record) -> &str {
        record.get("title").and_then(Value::as_text).unwrap_or_default()
    }

    fn seed(posts: &Collection, titles: &[&str]) {
        for t in titles {
            posts.create([("title", *t)]).unwrap().unwrap();
        }
    }

    #[test]
    fn empty_collection() {
        let posts = kv_posts().collection();
        assert!(posts.all().unwrap().is_empty());
        assert_eq!(posts.count().unwrap(), 0);
        assert_eq!(posts.first(1).unwrap(), Limited::One(None));
        assert_eq!(posts.last(3).unwrap(), Limited::Many(Vec::new()));
        assert!(posts.find("nope").unwrap().is_none());
    }

    #[test]
    fn all_keeps_stored_order_and_marks_created() {
        let posts = kv_posts().collection();
        seed(&posts, &["A", "B", "C"]);

        let all = posts.all().unwrap();
        let titles: Vec<&str> = all.iter().map(title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(all.iter().all(Record::is_created));
        assert!(all.iter().all(|r| r.id().is_some()));
    }

    #[test]
    fn first_and_last_shapes() {
        let posts = kv_posts().collection();
        seed(&posts, &["A", "B", "C"]);

        let first = posts.first(1).unwrap().one().unwrap();
        assert_eq!(title(&first), "A");
        let last = posts.last(1).unwrap().one().unwrap();
        assert_eq!(title(&last), "C");

        let leading = posts.first(2).unwrap();
        assert!(matches!(leading, Limited::Many(_)));
        let titles: Vec<String> = leading.into_vec().iter().map(|r| title(r).to_owned()).collect();
        assert_eq!(titles, vec!["A", "B"]);

        let trailing = posts.last(2).unwrap().into_vec();
        let titles: Vec<&str> = trailing.iter().map(title).collect();
        assert_eq!(titles, vec!["B", "C"]);

        assert_eq!(posts.first(10).unwrap().len(), 3);
        assert!(posts.first(0).unwrap().is_empty());
    }

    #[test]
    fn first_two_of_two_is_many() {
        let posts = kv_posts().collection();
        seed(&posts, &["A", "B"]);

        let result = posts.first(2).unwrap();
        assert!(matches!(&result, Limited::Many(v) if v.len() == 2));
    }

    #[test]
    fn find_by_attribute_on_arrays() {
        let posts = kv_posts().collection();
        posts
            .create([
                ("title", Value::from("parent")),
                ("child_ids", Value::from(vec!["a", "b"])),
            ])
            .unwrap();

        let found = posts.find_by_attribute("child_ids", "b").unwrap().unwrap();
        assert_eq!(title(&found), "parent");
        assert!(posts.find_by_attribute("child_ids", "z").unwrap().is_none());
    }

    #[test]
    fn find_by_attribute_on_scalars_needs_equality() {
        let posts = kv_posts().collection();
        seed(&posts, &["Hello"]);

        assert!(posts.find_by_attribute("title", "Hello").unwrap().is_some());
        assert!(posts.find_by_attribute("title", "Hell").unwrap().is_none());
        assert!(posts.find_by_attribute("title", 1).unwrap().is_none());
    }

    #[test]
    fn find_by_id() {
        let posts = kv_posts().collection();
        let created = posts.create([("title", "A")]).unwrap().unwrap();
        let id = created.id().cloned().unwrap();

        let found = posts.find(id.clone()).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(posts.find_by_id(id).unwrap(), Some(created));
    }

    #[test]
    fn create_round_trips_attributes() {
        let dir = tempdir().unwrap();
        let schema = Arc::new(
            RecordType::builder("Post")
                .properties(["title", "body"])
                .config(Config::new().root(dir.path()))
                .build()
                .unwrap(),
        );
        let posts = schema.collection();

        let created = posts
            .create([("title", "A"), ("body", "B")])
            .unwrap()
            .unwrap();
        assert!(created.is_created());

        let found = posts.find(created.id().cloned().unwrap()).unwrap().unwrap();
        assert_eq!(found.persisted_attributes(), created.persisted_attributes());
    }

    #[test]
    fn build_does_not_save() {
        let posts = kv_posts().collection();
        let record = posts.build([("title", "draft")]);
        assert!(record.is_new_record());
        assert_eq!(posts.count().unwrap(), 0);
    }
}
