//! Wire shapes of the list API: query string parsing and envelopes.

use serde::Serialize;

use crate::domain::query::{
    DateRange, MAX_PAGE_SIZE, QueryDescriptor, QueryError, SortKey, normalize_search,
    parse_date_bound,
};
use crate::domain::resource::{EnvelopeStyle, ResourceSchema};
use crate::pagination::Page;

/// Parses a raw query string into a descriptor for the given resource.
///
/// `page` and `size` default to the first page of ten; a `size` above
/// [`MAX_PAGE_SIZE`] is clamped. Parameters named after a filterable field
/// become exact-match filters unless they carry the `ALL` sentinel; any other
/// unknown parameter is ignored. Empty values count as absent.
pub fn parse_list_query(schema: &ResourceSchema, raw: &str) -> Result<QueryDescriptor, QueryError> {
    let pairs: Vec<(String, String)> =
        serde_html_form::from_str(raw).map_err(|err| QueryError::MalformedQuery(err.to_string()))?;

    let mut query = QueryDescriptor::default();
    let mut start = None;
    let mut end = None;

    for (key, value) in pairs {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "page" => {
                query.page = value
                    .parse()
                    .map_err(|_| QueryError::InvalidPage(value.to_string()))?;
            }
            "size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| QueryError::InvalidPageSize(value.to_string()))?;
                if size == 0 {
                    return Err(QueryError::ZeroPageSize);
                }
                query.size = size.min(MAX_PAGE_SIZE);
            }
            "search" => query.search = normalize_search(value),
            "sort" => query.sort = Some(value.parse::<SortKey>()?),
            "startDate" => start = Some(parse_date_bound(value)?),
            "endDate" => end = Some(parse_date_bound(value)?),
            field if schema.is_filterable(field) => query = query.filter(field, value),
            _ => {}
        }
    }

    query.date_range = DateRange::from_bounds(start, end)?;
    Ok(query)
}

/// A page wrapped the way its endpoint publishes it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Plain(Page<T>),
    Data { data: Page<T> },
    StatusData { status: &'static str, data: Page<T> },
    DataArray { data: Vec<T> },
}

impl<T> ApiEnvelope<T> {
    pub fn wrap(style: EnvelopeStyle, page: Page<T>) -> Self {
        match style {
            EnvelopeStyle::Plain => ApiEnvelope::Plain(page),
            EnvelopeStyle::Data => ApiEnvelope::Data { data: page },
            EnvelopeStyle::StatusData => ApiEnvelope::StatusData {
                status: "success",
                data: page,
            },
            EnvelopeStyle::DataArray => ApiEnvelope::DataArray { data: page.content },
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
