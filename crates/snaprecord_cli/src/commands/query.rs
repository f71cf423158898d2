//! Read-only commands.

use super::{parse_value, print_record, print_records, CliResult, Context};
use tracing::info;

/// Prints every record, or the first/last `n`.
pub fn list(ctx: &Context, first: Option<usize>, last: Option<usize>) -> CliResult<()> {
    let collection = ctx.record_type(&[])?.collection();

    let records = match (first, last) {
        (Some(n), _) => collection.first(n)?.into_vec(),
        (None, Some(n)) => collection.last(n)?.into_vec(),
        (None, None) => collection.all()?,
    };

    info!("{} record(s) in {}", records.len(), collection.schema().source());
    print_records(&records)
}

/// Prints the record with `id`.
pub fn show(ctx: &Context, id: &str) -> CliResult<()> {
    let collection = ctx.record_type(&[])?.collection();
    let record = collection
        .find(id)?
        .ok_or_else(|| format!("no record with id {id}"))?;
    print_record(&record)
}

/// Prints the first record whose `attribute` matches `value`.
pub fn find(ctx: &Context, attribute: &str, value: &str) -> CliResult<()> {
    let collection = ctx.record_type(&[attribute])?.collection();
    let expected = parse_value(value);

    match collection.find_by_attribute(attribute, expected)? {
        Some(record) => print_record(&record),
        None => Err(format!("no record with {attribute} matching {value}").into()),
    }
}
