//! Property-based test generators using proptest.
//!
//! Provides strategies for generating attribute values and record
//! contents that survive a storage round trip.

use proptest::prelude::*;
use snaprecord_codec::{Attributes, Value};

/// Strategy for generating scalar values.
///
/// Floats are limited to integral values so that JSON and CBOR decode
/// them back to the same variant.
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1_000_000i32..1_000_000).prop_map(|n| Value::Float(f64::from(n) + 0.5)),
        text_strategy().prop_map(Value::Text),
    ]
}

/// Strategy for generating short printable text.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _.-]{0,24}").expect("Invalid regex")
}

/// Strategy for generating non-null values, nested up to three levels.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_value_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(property_name_strategy(), inner, 0..4)
                .prop_map(Value::Map),
        ]
    })
}

/// Strategy for generating valid property names.
pub fn property_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}")
        .expect("Invalid regex")
        .prop_filter("Property name must not be reserved", |s| {
            s != "id" && s != "persisted"
        })
}

/// Strategy for generating attributes over a fixed set of declared
/// properties.
///
/// Each property is either set to a non-null value or left out.
pub fn attributes_strategy(properties: &'static [&'static str]) -> impl Strategy<Value = Attributes> {
    prop::collection::vec(prop::option::of(value_strategy()), properties.len()).prop_map(
        move |values| {
            properties
                .iter()
                .zip(values)
                .filter_map(|(name, value)| value.map(|v| ((*name).to_string(), v)))
                .collect()
        },
    )
}

/// An operation applied to a collection during a property test.
#[derive(Debug, Clone)]
pub enum RecordOperation {
    /// Create a record with these attributes.
    Create(Attributes),
    /// Update the record at this position (modulo collection size).
    Update {
        /// Position of the target among live records.
        index: usize,
        /// Attributes to assign.
        attributes: Attributes,
    },
    /// Destroy the record at this position (modulo collection size).
    Destroy {
        /// Position of the target among live records.
        index: usize,
    },
}

/// Strategy for generating record operations.
pub fn record_operation_strategy(
    properties: &'static [&'static str],
) -> impl Strategy<Value = RecordOperation> {
    prop_oneof![
        3 => attributes_strategy(properties).prop_map(RecordOperation::Create),
        2 => (any::<usize>(), attributes_strategy(properties))
            .prop_map(|(index, attributes)| RecordOperation::Update { index, attributes }),
        1 => any::<usize>().prop_map(|index| RecordOperation::Destroy { index }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    properties: &'static [&'static str],
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<RecordOperation>> {
    prop::collection::vec(record_operation_strategy(properties), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    ///
    /// Every case touches the file system, so this is the usual choice.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
