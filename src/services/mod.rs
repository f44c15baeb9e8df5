//! Business workflows invoked by the HTTP routes.
//!
//! Services are generic over the repository traits they need, so tests can
//! run them against [`crate::repository::mock::MockRepository`].

use thiserror::Error;

use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

pub mod convenios;
pub mod dashboard;
pub mod descuentos;
pub mod empresas;
pub mod eventos;
pub mod export;
#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod fixtures;
pub mod pasajeros;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// A user-facing message explaining why the request was rejected.
    #[error("{0}")]
    Form(String),

    #[error("invalid fields: {0}")]
    Validation(FieldErrors),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// The change clashes with existing data, e.g. a duplicate RUT.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.into_field_errors())
    }
}

/// Maps a unique-constraint failure to [`ServiceError::Conflict`].
pub(crate) fn conflict_on_duplicate(message: &str) -> impl Fn(RepositoryError) -> ServiceError + '_ {
    move |err| match err {
        RepositoryError::Duplicate(detail) => {
            log::warn!("Rejected duplicate write: {detail}");
            ServiceError::Conflict(message.to_string())
        }
        other => ServiceError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_become_conflicts() {
        let map = conflict_on_duplicate("RUT ya registrado");
        assert!(matches!(
            map(RepositoryError::Duplicate("UNIQUE".into())),
            ServiceError::Conflict(message) if message == "RUT ya registrado"
        ));
        assert!(matches!(
            map(RepositoryError::NotFound),
            ServiceError::Repository(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn form_errors_keep_field_messages() {
        let mut fields = FieldErrors::new();
        fields.add("rut", "RUT inválido");
        match ServiceError::from(FormError::Fields(fields)) {
            ServiceError::Validation(fields) => assert_eq!(fields.get("rut"), Some("RUT inválido")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
