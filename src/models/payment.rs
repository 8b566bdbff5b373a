//! Diesel models for invoice payments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::payment::{NewPayment as DomainNewPayment, Payment as DomainPayment};
use crate::domain::types::{InvoiceId, PaymentId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::payments)]
/// Diesel model for [`crate::domain::payment::Payment`].
pub struct Payment {
    pub id: i32,
    pub invoice_id: i32,
    pub invoice_code: String,
    pub patient_name: String,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub paid_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub invoice_id: i32,
    pub invoice_code: &'a str,
    pub patient_name: &'a str,
    pub amount: i64,
    pub method: &'a str,
    pub status: &'a str,
    pub paid_at: NaiveDateTime,
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentId::try_from(payment.id)?,
            invoice_id: InvoiceId::try_from(payment.invoice_id)?,
            invoice_code: payment.invoice_code,
            patient_name: payment.patient_name,
            amount: payment.amount,
            method: payment.method.parse()?,
            status: payment.status.parse()?,
            paid_at: payment.paid_at,
        })
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            invoice_id: payment.invoice_id.get(),
            invoice_code: payment.invoice_code.as_str(),
            patient_name: payment.patient_name.as_str(),
            amount: payment.amount,
            method: payment.method.as_str(),
            status: payment.status.as_str(),
            paid_at: payment.paid_at,
        }
    }
}
