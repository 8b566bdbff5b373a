use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::query::QueryDescriptor;
use crate::domain::schedule::{NewSchedule, Schedule};
use crate::models::schedule::{NewSchedule as DbNewSchedule, Schedule as DbSchedule};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::schedules;

fn matching(query: &QueryDescriptor) -> schedules::BoxedQuery<'static, Sqlite> {
    let mut items = schedules::table.into_boxed();

    if let Some(search) = &query.search {
        items = items.filter(
            unicode_lower(schedules::doctor_name)
                .like(like_pattern(search))
                .escape('\\'),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "shift" => items.filter(schedules::shift.eq(value.clone())),
            "status" => items.filter(schedules::status.eq(value.clone())),
            "doctorId" => match value.trim().parse::<i32>() {
                Ok(doctor_id) => items.filter(schedules::doctor_id.eq(doctor_id)),
                Err(_) => items.filter(no_rows()),
            },
            "departmentId" => match value.trim().parse::<i32>() {
                Ok(department_id) => items.filter(schedules::department_id.eq(department_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items.filter(schedules::work_date.between(range.start(), range.end()));
    }

    items
}

impl ResourceReader<Schedule> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Schedule>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), schedules::id, {
            "id" => schedules::id,
            "workDate" => schedules::work_date,
            "doctorName" => schedules::doctor_name,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbSchedule>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Schedule>> {
        let mut conn = self.conn()?;
        let row = schedules::table
            .find(id)
            .first::<DbSchedule>(&mut conn)
            .optional()?;

        row.map(Schedule::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewSchedule]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewSchedule> = records.iter().map(Into::into).collect();

    diesel::insert_into(schedules::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewSchedule> for DieselRepository {
    fn create_records(&self, records: &[NewSchedule]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
