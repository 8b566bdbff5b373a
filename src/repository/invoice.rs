use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::invoice::{Invoice, InvoiceStatus, NewInvoice};
use crate::domain::query::QueryDescriptor;
use crate::domain::types::InvoiceId;
use crate::models::invoice::{Invoice as DbInvoice, NewInvoice as DbNewInvoice};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, InvoiceWriter, ResourceReader, ResourceWriter, like_pattern, no_rows,
    order_by, page_window, rows_to_page,
};
use crate::schema::invoices;

fn matching(query: &QueryDescriptor) -> invoices::BoxedQuery<'static, Sqlite> {
    let mut items = invoices::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(invoices::code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(invoices::patient_name).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "status" => items.filter(invoices::status.eq(value.clone())),
            "patientId" => match value.trim().parse::<i32>() {
                Ok(patient_id) => items.filter(invoices::patient_id.eq(patient_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items
            .filter(invoices::issued_at.ge(range.start_datetime()))
            .filter(invoices::issued_at.lt(range.end_exclusive()));
    }

    items
}

impl ResourceReader<Invoice> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Invoice>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), invoices::id, {
            "id" => invoices::id,
            "code" => invoices::code,
            "totalAmount" => invoices::total_amount,
            "balance" => invoices::balance,
            "issuedAt" => invoices::issued_at,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbInvoice>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Invoice>> {
        let mut conn = self.conn()?;
        let row = invoices::table
            .find(id)
            .first::<DbInvoice>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(Invoice::try_from(row).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }
}

pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewInvoice]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewInvoice> = records.iter().map(Into::into).collect();

    diesel::insert_into(invoices::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewInvoice> for DieselRepository {
    fn create_records(&self, records: &[NewInvoice]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}

impl InvoiceWriter for DieselRepository {
    fn cancel_invoice(&self, id: InvoiceId, reason: &str) -> RepositoryResult<Option<Invoice>> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            invoices::table
                .filter(invoices::id.eq(id.get()))
                .filter(invoices::status.eq(InvoiceStatus::Unpaid.as_str())),
        )
        .set((
            invoices::status.eq(InvoiceStatus::Cancelled.as_str()),
            invoices::balance.eq(0_i64),
            invoices::cancelled_reason.eq(reason),
        ))
        .get_result::<DbInvoice>(&mut conn)
        .optional()?;

        match updated {
            Some(row) => Ok(Some(Invoice::try_from(row).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }
}
