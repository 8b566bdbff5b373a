//! Use cases behind the API routes.
//!
//! Services receive the authenticated user explicitly, check its roles
//! against the resource schema, and translate repository outcomes into
//! [`ServiceError`]s the routes map onto HTTP statuses.

use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::query::QueryError;
use crate::domain::resource::ResourceSchema;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod invoices;
pub mod list;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("insufficient role")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `user` may read `schema`.
pub fn ensure_access(user: &AuthenticatedUser, schema: &ResourceSchema) -> ServiceResult<()> {
    if user.can_access(schema) {
        Ok(())
    } else {
        log::warn!(
            "User {} denied access to {}: roles {:?}",
            user.sub,
            schema.path,
            user.roles
        );
        Err(ServiceError::Unauthorized)
    }
}
