//! The query descriptor shared by every list screen and list endpoint.
//!
//! A [`QueryDescriptor`] describes which subset of a resource list is wanted:
//! a zero-based page of a given size, an optional free-text search, exact-match
//! filters, an inclusive date range and a single sort key. The same value is
//! built on the client, serialized to query parameters, parsed back by the
//! server and evaluated against a dataset.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filter value meaning "no constraint on this field".
pub const ALL_SENTINEL: &str = "ALL";
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Largest page size the server will honor.
pub const MAX_PAGE_SIZE: usize = 100;
/// Wire format of date bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a descriptor is rejected before it is evaluated or sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("invalid page index: {0}")]
    InvalidPage(String),
    #[error("invalid page size: {0}")]
    InvalidPageSize(String),
    #[error("date range needs both a start and an end date")]
    OneSidedDateRange,
    #[error("date range starts after it ends")]
    InvertedDateRange,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid sort: {0}")]
    InvalidSort(String),
    #[error("field `{0}` cannot be used for sorting")]
    UnsortableField(String),
    #[error("field `{0}` cannot be used for filtering")]
    UnfilterableField(String),
    #[error("resource has no date field to filter by")]
    NoDateField,
    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// Sort direction of the single active sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(QueryError::InvalidSort(format!("unknown direction `{other}`"))),
        }
    }
}

/// A single `(field, direction)` sort key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Encodes the key as the `sort` request parameter, `"<field>,<direction>"`.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction)
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    /// Parses `"<field>,<asc|desc>"`; a bare field name sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.parse()?),
            None => (s.trim(), SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(QueryError::InvalidSort(s.to_string()));
        }
        Ok(Self::new(field, direction))
    }
}

/// Inclusive calendar date range. Both bounds are always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting a start that falls after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvertedDateRange);
        }
        Ok(Self { start, end })
    }

    /// Both-or-nothing construction from optional bounds.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, QueryError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            (None, None) => Ok(None),
            _ => Err(QueryError::OneSidedDateRange),
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// First instant covered by the range.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// First instant after the range; the end day is covered up to its last second.
    pub fn end_exclusive(&self) -> NaiveDateTime {
        self.end
            .checked_add_days(Days::new(1))
            .map(|day| day.and_time(NaiveTime::MIN))
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.contains_date(at.date())
    }
}

/// Parses a date bound, accepting either `YYYY-MM-DD` or a full ISO timestamp.
pub fn parse_date_bound(value: &str) -> Result<NaiveDate, QueryError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .map_err(|_| QueryError::InvalidDate(value.to_string()))
}

/// What subset of a resource list is wanted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Zero-based page index.
    pub page: usize,
    /// Maximum number of records per page.
    pub size: usize,
    pub search: Option<String>,
    /// Exact-match constraints keyed by wire field name.
    pub filters: BTreeMap<String, String>,
    pub date_range: Option<DateRange>,
    pub sort: Option<SortKey>,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: BTreeMap::new(),
            date_range: None,
            sort: None,
        }
    }
}

impl QueryDescriptor {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = normalize_search(&text.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let field = field.into();
        if is_unconstrained(&value) {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value);
        }
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Checks the structural invariants shared by every resource.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        if let Some(range) = &self.date_range {
            if range.start > range.end {
                return Err(QueryError::InvertedDateRange);
            }
        }
        Ok(())
    }

    /// Index of the first record of the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Serializes the descriptor into request parameters.
    ///
    /// Filters are emitted under their own field names; absent parts are
    /// omitted rather than sent empty.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(field, value)| (field.clone(), value.clone())),
        );
        if let Some(range) = &self.date_range {
            pairs.push((
                "startDate".to_string(),
                range.start.format(DATE_FORMAT).to_string(),
            ));
            pairs.push((
                "endDate".to_string(),
                range.end.format(DATE_FORMAT).to_string(),
            ));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.to_param()));
        }
        pairs
    }
}

/// Trims search input; blank input means no search.
pub fn normalize_search(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Whether a filter value means "no constraint".
pub fn is_unconstrained(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL)
}
