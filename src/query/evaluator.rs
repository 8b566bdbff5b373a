//! In-memory filter → sort → paginate evaluation of a [`QueryDescriptor`].
//!
//! This is the reference semantics of the list contract; the SQL
//! repositories reproduce it and tests compare against it.

use crate::domain::query::{DateRange, QueryDescriptor, SortKey};
use crate::domain::resource::{FieldValue, Resource};
use crate::pagination::Page;

/// Evaluates `query` against `records`, in their stored order.
///
/// A zero page size is treated as one so the result is never unbounded.
pub fn evaluate<R: Resource>(records: &[R], query: &QueryDescriptor) -> Page<R> {
    let mut matched = filter(records, query);
    if let Some(sort) = &query.sort {
        sort_by_key(&mut matched, sort);
    }
    let matched: Vec<R> = matched.into_iter().cloned().collect();
    Page::slice(matched, query.page, query.size.max(1))
}

/// Records passing the search, every exact-match filter and the date range,
/// in input order.
pub fn filter<'a, R: Resource>(records: &'a [R], query: &QueryDescriptor) -> Vec<&'a R> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    records
        .iter()
        .filter(|record| needle.as_deref().is_none_or(|needle| matches_search(*record, needle)))
        .filter(|record| {
            query.filters.iter().all(|(field, expected)| {
                record
                    .field(field)
                    .is_some_and(|value| value.matches_exact(expected))
            })
        })
        .filter(|record| {
            query
                .date_range
                .as_ref()
                .is_none_or(|range| within_range(*record, range))
        })
        .collect()
}

/// Stable single-key sort; equal keys keep their relative order.
pub fn sort_by_key<R: Resource>(records: &mut [&R], key: &SortKey) {
    use crate::domain::query::SortDirection;

    records.sort_by(|a, b| {
        let left = a.field(&key.field).unwrap_or(FieldValue::Null);
        let right = b.field(&key.field).unwrap_or(FieldValue::Null);
        let ordering = left.compare(&right);
        match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn matches_search<R: Resource>(record: &R, needle: &str) -> bool {
    R::SCHEMA.searchable.iter().any(|field| {
        record
            .field(field)
            .is_some_and(|value| value.contains_lowercase(needle))
    })
}

fn within_range<R: Resource>(record: &R, range: &DateRange) -> bool {
    let Some(date_field) = R::SCHEMA.date_field else {
        return false;
    };
    match record.field(date_field) {
        Some(FieldValue::DateTime(at)) => range.contains(at),
        Some(FieldValue::Date(date)) => range.contains_date(date),
        _ => false,
    }
}
