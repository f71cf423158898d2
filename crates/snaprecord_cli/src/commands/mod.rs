//! CLI command implementations.

pub mod mutate;
pub mod query;

use snaprecord_codec::{Attributes, Format, Value};
use snaprecord_core::{Config, Record, RecordType, ID};
use snaprecord_storage::{LocalStore, StorageAdapter};
use std::path::PathBuf;
use std::sync::Arc;

/// Result type shared by every command.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Where the collection lives and what it declares.
#[derive(Debug)]
pub struct Context {
    /// Directory the source is resolved against.
    pub root: Option<PathBuf>,
    /// Source name, without extension.
    pub source: String,
    /// Properties declared on the command line.
    pub properties: Vec<String>,
    /// Collection encoding.
    pub format: Format,
}

impl Context {
    fn config(&self) -> Config {
        let config = Config::new().format(self.format);
        match &self.root {
            Some(root) => config.root(root),
            None => config,
        }
    }

    /// Declares the record type for this collection.
    ///
    /// Properties are the declared ones, then every key already stored,
    /// then `extra`, in that order.
    pub fn record_type(&self, extra: &[&str]) -> CliResult<Arc<RecordType>> {
        let config = self.config();
        let store = LocalStore::new(self.format);
        let path = store.locate(&config.resolve_local(&self.source));
        let stored: Vec<String> = store
            .read(&path)?
            .into_iter()
            .flat_map(Attributes::into_keys)
            .collect();

        let schema = RecordType::builder(&self.source)
            .source(&self.source)
            .properties(self.properties.iter().cloned())
            .properties(stored)
            .properties(extra.iter().copied())
            .config(config)
            .build()?;
        Ok(Arc::new(schema))
    }
}

/// Parses a command-line value: JSON when it parses, plain text otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Text(raw.to_string()))
}

/// Splits `key=value` at the first `=`.
pub fn parse_assignment(raw: &str) -> CliResult<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty attribute name in {raw:?}").into());
    }
    if key == ID {
        return Err("the id attribute cannot be assigned".into());
    }
    Ok((key.to_string(), parse_value(value)))
}

/// Parses every assignment, keeping the last value for repeated keys.
pub fn parse_assignments(raw: &[String]) -> CliResult<Attributes> {
    raw.iter().map(|r| parse_assignment(r)).collect()
}

/// Prints records as a pretty JSON array of their stored attributes.
pub fn print_records(records: &[Record]) -> CliResult<()> {
    let raw: Vec<Attributes> = records.iter().map(Record::persisted_attributes).collect();
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}

/// Prints one record as a pretty JSON object of its stored attributes.
pub fn print_record(record: &Record) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&record.persisted_attributes())?);
    Ok(())
}
