//! Request bodies accepted by the mutating API routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod invoices;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("cancellation reason cannot be blank")]
    BlankReason,
}
