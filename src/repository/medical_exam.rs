use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::medical_exam::{MedicalExam, NewMedicalExam};
use crate::domain::query::QueryDescriptor;
use crate::models::medical_exam::{
    MedicalExam as DbMedicalExam, NewMedicalExam as DbNewMedicalExam,
};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::medical_exams;

fn matching(query: &QueryDescriptor) -> medical_exams::BoxedQuery<'static, Sqlite> {
    let mut items = medical_exams::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(medical_exams::code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(medical_exams::patient_name).like(pattern.clone()).escape('\\'))
                .or(unicode_lower(medical_exams::test_name).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "status" => items.filter(medical_exams::status.eq(value.clone())),
            "patientId" => match value.trim().parse::<i32>() {
                Ok(patient_id) => items.filter(medical_exams::patient_id.eq(patient_id)),
                Err(_) => items.filter(no_rows()),
            },
            "doctorId" => match value.trim().parse::<i32>() {
                Ok(doctor_id) => items.filter(medical_exams::doctor_id.eq(doctor_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items
            .filter(medical_exams::ordered_at.ge(range.start_datetime()))
            .filter(medical_exams::ordered_at.lt(range.end_exclusive()));
    }

    items
}

impl ResourceReader<MedicalExam> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<MedicalExam>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), medical_exams::id, {
            "id" => medical_exams::id,
            "code" => medical_exams::code,
            "patientName" => medical_exams::patient_name,
            "orderedAt" => medical_exams::ordered_at,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbMedicalExam>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<MedicalExam>> {
        let mut conn = self.conn()?;
        let row = medical_exams::table
            .find(id)
            .first::<DbMedicalExam>(&mut conn)
            .optional()?;

        row.map(MedicalExam::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    records: &[NewMedicalExam],
) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewMedicalExam> = records.iter().map(Into::into).collect();

    diesel::insert_into(medical_exams::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewMedicalExam> for DieselRepository {
    fn create_records(&self, records: &[NewMedicalExam]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
