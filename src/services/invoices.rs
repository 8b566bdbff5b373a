//! Invoice workflows beyond listing.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::invoice::Invoice;
use crate::domain::resource::Resource;
use crate::domain::types::InvoiceId;
use crate::forms::invoices::{CancelInvoiceForm, CancelInvoicePayload};
use crate::repository::{InvoiceWriter, ResourceReader};
use crate::services::{ServiceError, ServiceResult, ensure_access};

/// Cancels an unpaid invoice with the reason given in `form`.
///
/// Invoices in any other status are left untouched and reported as a
/// conflict.
pub fn cancel_invoice<R>(
    repo: &R,
    user: &AuthenticatedUser,
    invoice_id: i32,
    form: CancelInvoiceForm,
) -> ServiceResult<Invoice>
where
    R: ResourceReader<Invoice> + InvoiceWriter + ?Sized,
{
    ensure_access(user, &Invoice::SCHEMA)?;

    let payload = CancelInvoicePayload::try_from(form)?;
    let id = InvoiceId::new(invoice_id).map_err(|_| ServiceError::NotFound)?;

    let invoice = repo.get_record(id.get())?.ok_or(ServiceError::NotFound)?;
    if !invoice.status.is_cancellable() {
        return Err(ServiceError::Conflict(format!(
            "invoice {} is {} and cannot be cancelled",
            invoice.code, invoice.status
        )));
    }

    let cancelled = repo
        .cancel_invoice(id, payload.reason.as_str())
        .map_err(|err| {
            log::error!("Failed to cancel invoice {id}: {err}");
            err
        })?
        .ok_or_else(|| {
            ServiceError::Conflict(format!("invoice {} changed while cancelling", invoice.code))
        })?;

    log::info!("Invoice {} cancelled by {}", cancelled.code, user.email);
    Ok(cancelled)
}
