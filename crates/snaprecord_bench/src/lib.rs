//! Benchmark utilities.

#![warn(missing_docs)]

use snaprecord_codec::{Attributes, Value};

/// Collection sizes every benchmark sweeps over.
pub const COLLECTION_SIZES: [usize; 4] = [10, 100, 500, 1000];

/// Builds the attributes of the `index`-th sample post.
pub fn sample_post(index: usize) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("id".into(), Value::from(format!("{index:032x}")));
    attrs.insert("title".into(), Value::from(format!("Post number {index}")));
    attrs.insert(
        "body".into(),
        Value::from("Lorem ipsum dolor sit amet, consectetur adipiscing elit."),
    );
    attrs.insert(
        "tags".into(),
        Value::from(vec![format!("tag-{}", index % 7), format!("tag-{}", index % 11)]),
    );
    attrs
}

/// Builds a raw collection of `count` sample posts.
pub fn sample_collection(count: usize) -> Vec<Attributes> {
    (0..count).map(sample_post).collect()
}
