//! Field-set cardinality over schema-less event payloads.
//!
//! Events in the same category share no fixed schema, so the number of
//! distinct field names is computed as the size of the union of every
//! payload's top-level keys.

use std::collections::HashSet;

/// Count the distinct top-level keys across `payloads`.
///
/// Only JSON objects contribute keys. Arrays, scalars and `null` are
/// skipped rather than rejected, so one malformed payload never fails the
/// whole aggregation. Nested objects are not traversed.
pub fn distinct_field_count<'a, I>(payloads: I) -> usize
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    distinct_field_names(payloads).len()
}

/// The union of top-level keys across `payloads`.
pub fn distinct_field_names<'a, I>(payloads: I) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    payloads
        .into_iter()
        .filter_map(serde_json::Value::as_object)
        .flat_map(|map| map.keys().map(String::as_str))
        .collect()
}
