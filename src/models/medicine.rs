//! Diesel models for the pharmacy catalogue.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::medicine::{Medicine as DomainMedicine, NewMedicine as DomainNewMedicine};
use crate::domain::types::{CategoryId, MedicineId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::medicines)]
pub struct Medicine {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub category_id: i32,
    pub unit: String,
    pub price: i64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::medicines)]
pub struct NewMedicine<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub category_id: i32,
    pub unit: &'a str,
    pub price: i64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    pub status: &'a str,
}

impl TryFrom<Medicine> for DomainMedicine {
    type Error = TypeConstraintError;

    fn try_from(medicine: Medicine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MedicineId::try_from(medicine.id)?,
            code: medicine.code,
            name: medicine.name,
            category_id: CategoryId::try_from(medicine.category_id)?,
            unit: medicine.unit,
            price: medicine.price,
            stock: medicine.stock,
            expiry_date: medicine.expiry_date,
            status: medicine.status.parse()?,
        })
    }
}

impl<'a> From<&'a DomainNewMedicine> for NewMedicine<'a> {
    fn from(medicine: &'a DomainNewMedicine) -> Self {
        Self {
            code: medicine.code.as_str(),
            name: medicine.name.as_str(),
            category_id: medicine.category_id.get(),
            unit: medicine.unit.as_str(),
            price: medicine.price,
            stock: medicine.stock,
            expiry_date: medicine.expiry_date,
            status: medicine.status.as_str(),
        }
    }
}
