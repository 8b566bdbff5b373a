use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{InvoiceId, PatientId, code_enum};

code_enum!(
    /// Payment state of an invoice.
    InvoiceStatus, "invoice status" {
        Unpaid => "UNPAID",
        PartiallyPaid => "PARTIALLY_PAID",
        Paid => "PAID",
        Cancelled => "CANCELLED",
    }
);

impl InvoiceStatus {
    /// Only invoices nobody has paid towards can be cancelled.
    pub const fn is_cancellable(self) -> bool {
        matches!(self, InvoiceStatus::Unpaid)
    }
}

/// Billing document issued to a patient. Amounts are in minor currency units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "InvoiceRecord")]
pub struct Invoice {
    pub id: InvoiceId,
    pub code: String,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub status: InvoiceStatus,
    pub issued_at: NaiveDateTime,
    pub cancelled_reason: Option<String>,
}

/// Invoice as different backends serialize it: the outstanding amount has
/// been published both as `balance` and as `balanceDue`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceRecord {
    id: InvoiceId,
    code: String,
    patient_id: PatientId,
    patient_name: String,
    total_amount: i64,
    #[serde(default)]
    paid_amount: i64,
    balance: Option<i64>,
    balance_due: Option<i64>,
    status: InvoiceStatus,
    issued_at: NaiveDateTime,
    #[serde(default)]
    cancelled_reason: Option<String>,
}

impl From<InvoiceRecord> for Invoice {
    fn from(record: InvoiceRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            patient_id: record.patient_id,
            patient_name: record.patient_name,
            total_amount: record.total_amount,
            paid_amount: record.paid_amount,
            balance: record.balance.or(record.balance_due).unwrap_or(0),
            status: record.status,
            issued_at: record.issued_at,
            cancelled_reason: record.cancelled_reason,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub code: String,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub total_amount: i64,
    #[serde(default)]
    pub paid_amount: i64,
    pub status: InvoiceStatus,
    pub issued_at: NaiveDateTime,
}

impl NewInvoice {
    /// Outstanding amount at creation time.
    pub fn balance(&self) -> i64 {
        (self.total_amount - self.paid_amount).max(0)
    }
}

impl Resource for Invoice {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "invoices",
        searchable: &["code", "patientName"],
        filterable: &["status", "patientId"],
        sortable: &["id", "code", "totalAmount", "balance", "issuedAt"],
        date_field: Some("issuedAt"),
        role: "billing",
        envelope: EnvelopeStyle::Data,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "code" => self.code.as_str().into(),
            "patientId" => self.patient_id.get().into(),
            "patientName" => self.patient_name.as_str().into(),
            "totalAmount" => self.total_amount.into(),
            "paidAmount" => self.paid_amount.into(),
            "balance" => self.balance.into(),
            "status" => self.status.as_str().into(),
            "issuedAt" => self.issued_at.into(),
            "cancelledReason" => self.cancelled_reason.as_deref().into(),
            _ => return None,
        };
        Some(value)
    }
}
