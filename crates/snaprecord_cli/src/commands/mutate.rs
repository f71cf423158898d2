//! Commands that write the collection.

use super::{parse_assignments, print_record, CliResult, Context};
use tracing::info;

/// Creates a record from `key=value` assignments.
pub fn create(ctx: &Context, assignments: &[String]) -> CliResult<()> {
    let attributes = parse_assignments(assignments)?;
    let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
    let collection = ctx.record_type(&keys)?.collection();

    let record = collection
        .create(attributes.clone())?
        .ok_or("record could not be written")?;

    info!("Created record in {}", collection.schema().source());
    print_record(&record)
}

/// Assigns `key=value` pairs to the record with `id` and saves it.
pub fn update(ctx: &Context, id: &str, assignments: &[String]) -> CliResult<()> {
    let attributes = parse_assignments(assignments)?;
    let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
    let collection = ctx.record_type(&keys)?.collection();

    let mut record = collection
        .find(id)?
        .ok_or_else(|| format!("no record with id {id}"))?;
    if !record.update_attributes(attributes.clone())? {
        return Err(format!("record {id} could not be written").into());
    }

    info!("Updated record {id}");
    print_record(&record)
}

/// Removes the record with `id`.
pub fn destroy(ctx: &Context, id: &str) -> CliResult<()> {
    let collection = ctx.record_type(&[])?.collection();

    let mut record = collection
        .find(id)?
        .ok_or_else(|| format!("no record with id {id}"))?;
    if !record.destroy()? {
        return Err(format!("record {id} could not be removed").into());
    }

    info!("Destroyed record {id}");
    println!("✓ Record {id} destroyed");
    Ok(())
}
