//! Resource metadata shared by the evaluator, the repositories, the API and
//! the client.
//!
//! Every listable record type implements [`Resource`], exposing its wire
//! field values and a static [`ResourceSchema`] that says which fields are
//! searchable, filterable and sortable, which date field a date range applies
//! to, who may read it, and how its endpoint wraps the result envelope.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::query::{QueryDescriptor, QueryError};

/// How an endpoint wraps the result envelope on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeStyle {
    /// `{content, page, size, ...}`
    Plain,
    /// `{data: {content, page, size, ...}}`
    Data,
    /// `{status, data: {content, page, size, ...}}`
    StatusData,
    /// `{data: [...]}` with every match and no pagination fields. Only
    /// external backends publish this; the client pages it locally.
    DataArray,
}

/// Borrowed value of a record field, as seen by filters and sorting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

impl FieldValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Int(_) => 1,
            FieldValue::Date(_) | FieldValue::DateTime(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Total order used for sorting: text lexicographically, numbers and
    /// dates by value, nulls first.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::DateTime(b)) => a.and_time(b.time()).cmp(b),
            (FieldValue::DateTime(a), FieldValue::Date(b)) => a.cmp(&b.and_time(a.time())),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Exact-match filter semantics.
    pub fn matches_exact(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(value) => *value == expected,
            FieldValue::Int(value) => expected.trim().parse::<i64>() == Ok(*value),
            FieldValue::Date(value) => NaiveDate::parse_from_str(expected.trim(), "%Y-%m-%d")
                .is_ok_and(|date| date == *value),
            FieldValue::DateTime(value) => {
                NaiveDateTime::parse_from_str(expected.trim(), "%Y-%m-%dT%H:%M:%S%.f")
                    .is_ok_and(|at| at == *value)
            }
            FieldValue::Null => false,
        }
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(value) => value.to_lowercase().contains(needle),
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Static description of how a resource participates in list queries.
#[derive(Debug)]
pub struct ResourceSchema {
    /// URL path segment, e.g. `medical-exams`.
    pub path: &'static str,
    pub searchable: &'static [&'static str],
    pub filterable: &'static [&'static str],
    pub sortable: &'static [&'static str],
    /// Field compared against a date range.
    pub date_field: Option<&'static str>,
    /// Role that grants read access besides the admin role.
    pub role: &'static str,
    pub envelope: EnvelopeStyle,
}

impl ResourceSchema {
    pub fn is_filterable(&self, field: &str) -> bool {
        self.filterable.contains(&field)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.contains(&field)
    }

    /// Checks that the descriptor only uses fields this resource supports.
    pub fn check(&self, query: &QueryDescriptor) -> Result<(), QueryError> {
        query.validate()?;
        if let Some(sort) = &query.sort {
            if !self.is_sortable(&sort.field) {
                return Err(QueryError::UnsortableField(sort.field.clone()));
            }
        }
        if let Some(field) = query.filters.keys().find(|field| !self.is_filterable(field)) {
            return Err(QueryError::UnfilterableField(field.clone()));
        }
        if query.date_range.is_some() && self.date_field.is_none() {
            return Err(QueryError::NoDateField);
        }
        Ok(())
    }
}

/// A record type that can be listed through the query contract.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const SCHEMA: ResourceSchema;

    fn id(&self) -> i32;

    /// Value of a wire field; `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
