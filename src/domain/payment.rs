use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{InvoiceId, PaymentId, code_enum};

code_enum!(
    PaymentMethod, "payment method" {
        Cash => "CASH",
        Card => "CARD",
        BankTransfer => "BANK_TRANSFER",
        Insurance => "INSURANCE",
    }
);

code_enum!(
    PaymentStatus, "payment status" {
        Completed => "COMPLETED",
        Refunded => "REFUNDED",
    }
);

/// Money received against an invoice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub invoice_code: String,
    pub patient_name: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub invoice_id: InvoiceId,
    pub invoice_code: String,
    pub patient_name: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: NaiveDateTime,
}

impl Resource for Payment {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "payments",
        searchable: &["invoiceCode", "patientName"],
        filterable: &["method", "status", "invoiceId"],
        sortable: &["id", "amount", "paidAt"],
        date_field: Some("paidAt"),
        role: "billing",
        envelope: EnvelopeStyle::StatusData,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "invoiceId" => self.invoice_id.get().into(),
            "invoiceCode" => self.invoice_code.as_str().into(),
            "patientName" => self.patient_name.as_str().into(),
            "amount" => self.amount.into(),
            "method" => self.method.as_str().into(),
            "status" => self.status.as_str().into(),
            "paidAt" => self.paid_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
