use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::query::QueryDescriptor;
use crate::models::payment::{NewPayment as DbNewPayment, Payment as DbPayment};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::payments;

fn matching(query: &QueryDescriptor) -> payments::BoxedQuery<'static, Sqlite> {
    let mut items = payments::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(payments::invoice_code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(payments::patient_name).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "method" => items.filter(payments::method.eq(value.clone())),
            "status" => items.filter(payments::status.eq(value.clone())),
            "invoiceId" => match value.trim().parse::<i32>() {
                Ok(invoice_id) => items.filter(payments::invoice_id.eq(invoice_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items
            .filter(payments::paid_at.ge(range.start_datetime()))
            .filter(payments::paid_at.lt(range.end_exclusive()));
    }

    items
}

impl ResourceReader<Payment> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Payment>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), payments::id, {
            "id" => payments::id,
            "amount" => payments::amount,
            "paidAt" => payments::paid_at,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbPayment>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Payment>> {
        let mut conn = self.conn()?;
        let row = payments::table
            .find(id)
            .first::<DbPayment>(&mut conn)
            .optional()?;

        row.map(Payment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewPayment]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewPayment> = records.iter().map(Into::into).collect();

    diesel::insert_into(payments::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewPayment> for DieselRepository {
    fn create_records(&self, records: &[NewPayment]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
