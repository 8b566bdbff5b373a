//! Diesel models for invoices.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::invoice::{Invoice as DomainInvoice, NewInvoice as DomainNewInvoice};
use crate::domain::types::{InvoiceId, PatientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::invoices)]
/// Diesel model for [`crate::domain::invoice::Invoice`].
pub struct Invoice {
    pub id: i32,
    pub code: String,
    pub patient_id: i32,
    pub patient_name: String,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub status: String,
    pub issued_at: NaiveDateTime,
    pub cancelled_reason: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invoices)]
/// Insertable form of [`Invoice`].
pub struct NewInvoice<'a> {
    pub code: &'a str,
    pub patient_id: i32,
    pub patient_name: &'a str,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub status: &'a str,
    pub issued_at: NaiveDateTime,
}

impl TryFrom<Invoice> for DomainInvoice {
    type Error = TypeConstraintError;

    fn try_from(invoice: Invoice) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::try_from(invoice.id)?,
            code: invoice.code,
            patient_id: PatientId::try_from(invoice.patient_id)?,
            patient_name: invoice.patient_name,
            total_amount: invoice.total_amount,
            paid_amount: invoice.paid_amount,
            balance: invoice.balance,
            status: invoice.status.parse()?,
            issued_at: invoice.issued_at,
            cancelled_reason: invoice.cancelled_reason,
        })
    }
}

impl<'a> From<&'a DomainNewInvoice> for NewInvoice<'a> {
    fn from(invoice: &'a DomainNewInvoice) -> Self {
        Self {
            code: invoice.code.as_str(),
            patient_id: invoice.patient_id.get(),
            patient_name: invoice.patient_name.as_str(),
            total_amount: invoice.total_amount,
            paid_amount: invoice.paid_amount,
            balance: invoice.balance(),
            status: invoice.status.as_str(),
            issued_at: invoice.issued_at,
        }
    }
}
