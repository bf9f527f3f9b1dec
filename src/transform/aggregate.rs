//! Grouping: `aggregate_by_category`.

use indexmap::IndexMap;

use crate::types::{Record, Records, Value, ValueKey};

/// Field records are grouped by.
pub const CATEGORY_FIELD: &str = "category";

/// Count field on aggregated records.
pub const COUNT_FIELD: &str = "count";

/// Category assigned to records that have no `category` field.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Count records per `category`, one output record `{category, count}` per distinct value.
///
/// Output is in the order categories were first seen. A missing `category` counts as
/// [`UNKNOWN_CATEGORY`]; a present null is its own group. Grouping is type-sensitive, so `1` and
/// `"1"` are different categories.
pub fn aggregate_by_category(records: &[Record]) -> Records {
    let mut groups: IndexMap<ValueKey, (Value, i64)> = IndexMap::new();
    for record in records {
        let category = record
            .get(CATEGORY_FIELD)
            .cloned()
            .unwrap_or_else(|| Value::Utf8(UNKNOWN_CATEGORY.to_string()));
        groups
            .entry(category.key())
            .or_insert_with(|| (category, 0))
            .1 += 1;
    }

    groups
        .into_values()
        .map(|(category, count)| {
            Record::new()
                .with(CATEGORY_FIELD, category)
                .with(COUNT_FIELD, count)
        })
        .collect()
}
