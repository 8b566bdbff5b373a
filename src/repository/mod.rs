//! Storage access for listable hospital resources.
//!
//! Readers answer a [`QueryDescriptor`] with a [`Page`]; the Diesel
//! implementation expresses the query in SQL while [`memory`] evaluates it
//! over a vector with the reference evaluator. Both order ties by id, which
//! is the order records were stored in.

use diesel::dsl::sql;
use diesel::sql_types::Bool;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::invoice::Invoice;
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::Resource;
use crate::domain::types::{InvoiceId, TypeConstraintError};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;

pub mod batch;
mod employee;
pub mod errors;
mod invoice;
mod medical_exam;
mod medicine;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
mod patient;
mod payment;
mod schedule;

/// Read access to one resource list.
pub trait ResourceReader<R: Resource> {
    /// Returns the requested page of records matching `query`.
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<R>>;
    fn get_record(&self, id: i32) -> RepositoryResult<Option<R>>;
}

/// Bulk creation of records from their draft form `N`.
pub trait ResourceWriter<N> {
    fn create_records(&self, records: &[N]) -> RepositoryResult<usize>;
}

pub trait InvoiceWriter {
    /// Cancels an unpaid invoice, zeroing its balance and storing `reason`.
    ///
    /// Returns `None` when no unpaid invoice with this id exists.
    fn cancel_invoice(&self, id: InvoiceId, reason: &str) -> RepositoryResult<Option<Invoice>>;
}

/// Diesel-backed repository over the SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Builds a lowercase `LIKE` pattern matching `search` anywhere, with its
/// own wildcards escaped by `\`. Compare it against `unicode_lower(column)`.
pub(crate) fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Predicate no row satisfies, used for filter values that cannot match.
pub(crate) fn no_rows() -> diesel::expression::SqlLiteral<Bool> {
    sql::<Bool>("0")
}

/// `LIMIT` and `OFFSET` of the requested page.
pub(crate) fn page_window(query: &QueryDescriptor) -> (i64, i64) {
    let size = query.size.max(1);
    let limit = i64::try_from(size).unwrap_or(i64::MAX);
    let offset = i64::try_from(query.page.saturating_mul(size)).unwrap_or(i64::MAX);
    (limit, offset)
}

/// Converts loaded rows into the requested page of domain records.
pub(crate) fn rows_to_page<D, R>(
    rows: Vec<D>,
    query: &QueryDescriptor,
    total: i64,
) -> RepositoryResult<Page<R>>
where
    R: TryFrom<D, Error = TypeConstraintError>,
{
    let content = rows
        .into_iter()
        .map(R::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(
        content,
        query.page,
        query.size.max(1),
        usize::try_from(total).unwrap_or_default(),
    ))
}

/// Applies the single sort key, falling back to id order, and breaks ties
/// by ascending id.
macro_rules! order_by {
    ($items:expr, $sort:expr, $id:expr, { $($field:literal => $column:expr),+ $(,)? }) => {{
        use crate::domain::query::SortDirection;

        let items = $items;
        match $sort {
            $(
                Some(key) if key.field == $field => match key.direction {
                    SortDirection::Asc => items.order_by($column.asc()),
                    SortDirection::Desc => items.order_by($column.desc()),
                },
            )+
            _ => items.order_by($id.asc()),
        }
        .then_order_by($id.asc())
    }};
}

pub(crate) use order_by;
