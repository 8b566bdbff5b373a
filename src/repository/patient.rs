use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::query::QueryDescriptor;
use crate::models::patient::{NewPatient as DbNewPatient, Patient as DbPatient};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::patients;

/// Patients matching the search, filters and date range of `query`.
fn matching(query: &QueryDescriptor) -> patients::BoxedQuery<'static, Sqlite> {
    let mut items = patients::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(patients::code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(patients::full_name).like(pattern.clone()).escape('\\'))
                .or(unicode_lower(patients::phone).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "gender" => items.filter(patients::gender.eq(value.clone())),
            "status" => items.filter(patients::status.eq(value.clone())),
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items
            .filter(patients::created_at.ge(range.start_datetime()))
            .filter(patients::created_at.lt(range.end_exclusive()));
    }

    items
}

impl ResourceReader<Patient> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Patient>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), patients::id, {
            "id" => patients::id,
            "code" => patients::code,
            "fullName" => patients::full_name,
            "dateOfBirth" => patients::date_of_birth,
            "createdAt" => patients::created_at,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbPatient>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Patient>> {
        let mut conn = self.conn()?;
        let row = patients::table
            .find(id)
            .first::<DbPatient>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(Patient::try_from(row).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }
}

/// Inserts `records` on an already acquired connection.
pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewPatient]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewPatient> = records.iter().map(Into::into).collect();

    diesel::insert_into(patients::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewPatient> for DieselRepository {
    fn create_records(&self, records: &[NewPatient]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
