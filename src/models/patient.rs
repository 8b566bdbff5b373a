//! Diesel models for patient records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::patient::{NewPatient as DomainNewPatient, Patient as DomainPatient};
use crate::domain::types::{PatientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::patients)]
/// Diesel model for [`crate::domain::patient::Patient`].
pub struct Patient {
    pub id: i32,
    pub code: String,
    pub full_name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::patients)]
/// Insertable form of [`Patient`].
pub struct NewPatient<'a> {
    pub code: &'a str,
    pub full_name: &'a str,
    pub gender: &'a str,
    pub date_of_birth: NaiveDate,
    pub phone: &'a str,
    pub address: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Patient> for DomainPatient {
    type Error = TypeConstraintError;

    fn try_from(patient: Patient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PatientId::try_from(patient.id)?,
            code: patient.code,
            full_name: patient.full_name,
            gender: patient.gender.parse()?,
            date_of_birth: patient.date_of_birth,
            phone: patient.phone,
            address: patient.address,
            status: patient.status.parse()?,
            created_at: patient.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPatient> for NewPatient<'a> {
    fn from(patient: &'a DomainNewPatient) -> Self {
        Self {
            code: patient.code.as_str(),
            full_name: patient.full_name.as_str(),
            gender: patient.gender.as_str(),
            date_of_birth: patient.date_of_birth,
            phone: patient.phone.as_str(),
            address: patient.address.as_deref(),
            status: patient.status.as_str(),
            created_at: patient.created_at,
        }
    }
}
