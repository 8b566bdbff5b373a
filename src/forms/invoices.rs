use serde::Deserialize;
use validator::Validate;

use crate::domain::types::NonEmptyString;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/v1/invoices/{id}/cancel`.
pub struct CancelInvoiceForm {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

/// Validated cancellation request.
#[derive(Debug)]
pub struct CancelInvoicePayload {
    pub reason: NonEmptyString,
}

impl TryFrom<CancelInvoiceForm> for CancelInvoicePayload {
    type Error = FormError;

    fn try_from(form: CancelInvoiceForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let reason = NonEmptyString::new(form.reason).map_err(|_| FormError::BlankReason)?;
        Ok(Self { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(reason: &str) -> CancelInvoiceForm {
        CancelInvoiceForm {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn accepts_reason_within_bounds() {
        let payload = CancelInvoicePayload::try_from(form("  duplicate billing ")).unwrap();
        assert_eq!(payload.reason.as_str(), "duplicate billing");

        let longest = "x".repeat(500);
        assert!(CancelInvoicePayload::try_from(form(&longest)).is_ok());
    }

    #[test]
    fn rejects_empty_blank_and_overlong_reasons() {
        assert!(matches!(
            CancelInvoicePayload::try_from(form("")),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            CancelInvoicePayload::try_from(form("   ")),
            Err(FormError::BlankReason)
        ));
        assert!(matches!(
            CancelInvoicePayload::try_from(form(&"x".repeat(501))),
            Err(FormError::Validation(_))
        ));
    }
}
