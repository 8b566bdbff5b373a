use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::unicode_lower;
use crate::domain::medicine::{Medicine, NewMedicine};
use crate::domain::query::QueryDescriptor;
use crate::models::medicine::{Medicine as DbMedicine, NewMedicine as DbNewMedicine};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ResourceReader, ResourceWriter, like_pattern, no_rows, order_by,
    page_window, rows_to_page,
};
use crate::schema::medicines;

fn matching(query: &QueryDescriptor) -> medicines::BoxedQuery<'static, Sqlite> {
    let mut items = medicines::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        items = items.filter(
            unicode_lower(medicines::code)
                .like(pattern.clone())
                .escape('\\')
                .or(unicode_lower(medicines::name).like(pattern).escape('\\')),
        );
    }

    for (field, value) in &query.filters {
        items = match field.as_str() {
            "status" => items.filter(medicines::status.eq(value.clone())),
            "categoryId" => match value.trim().parse::<i32>() {
                Ok(category_id) => items.filter(medicines::category_id.eq(category_id)),
                Err(_) => items.filter(no_rows()),
            },
            _ => items.filter(no_rows()),
        };
    }

    if let Some(range) = &query.date_range {
        items = items.filter(medicines::expiry_date.between(range.start(), range.end()));
    }

    items
}

impl ResourceReader<Medicine> for DieselRepository {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Medicine>> {
        let mut conn = self.conn()?;

        let total: i64 = matching(query).count().get_result(&mut conn)?;

        let (limit, offset) = page_window(query);
        let rows = order_by!(matching(query), query.sort.as_ref(), medicines::id, {
            "id" => medicines::id,
            "code" => medicines::code,
            "name" => medicines::name,
            "price" => medicines::price,
            "stock" => medicines::stock,
            "expiryDate" => medicines::expiry_date,
        })
        .limit(limit)
        .offset(offset)
        .load::<DbMedicine>(&mut conn)?;

        rows_to_page(rows, query, total)
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<Medicine>> {
        let mut conn = self.conn()?;
        let row = medicines::table
            .find(id)
            .first::<DbMedicine>(&mut conn)
            .optional()?;

        row.map(Medicine::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

pub(super) fn insert(conn: &mut SqliteConnection, records: &[NewMedicine]) -> QueryResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }
    let insertables: Vec<DbNewMedicine> = records.iter().map(Into::into).collect();

    diesel::insert_into(medicines::table)
        .values(&insertables)
        .execute(conn)
}

impl ResourceWriter<NewMedicine> for DieselRepository {
    fn create_records(&self, records: &[NewMedicine]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert(&mut conn, records)?)
    }
}
