use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::employee::{Employee, NewEmployee};
use crate::domain::query::QueryDescriptor;
use crate::models::employee::{Employee as DbEmployee, NewEmployee as DbNewEmployee};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::employees;

fn matching(query: &QueryDescriptor) -> employees::BoxedQuery<'static, Sqlite> {
    let mut items = employees::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(employees::code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(employees::full_name).like(pattern.clone()).escape('\\'))
                .or(unicode_lower(employees::email).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "position" => items.filter(employees::position.eq(value.clone())),
            "status" => items.filter(employees::status.eq(value.clone())),
            "departmentId" => match value.trim().parse::<i32>() {
                Ok(department_id) => items.filter(employees::department_id.eq(department_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items.filter(employees::hired_at.between(range.start(), range.end()));
    }

    items
}

impl ResourceReader<Employee> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Employee>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), employees::id, {
            "id" => employees::id,
            "code" => employees::code,
            "fullName" => employees::full_name,
            "hiredAt" => employees::hired_at,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbEmployee>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Employee>> {
        let mut conn = self.conn()?;
        let row = employees::table
            .find(id)
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        row.map(Employee::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewEmployee]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewEmployee> = records.iter().map(Into::into).collect();

    diesel::insert_into(employees::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewEmployee> for DieselRepository {
    fn create_records(&self, records: &[NewEmployee]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
