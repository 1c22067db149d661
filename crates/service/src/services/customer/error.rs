//! Customer service error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use clientele_core::{CustomerId, EmailError};

use crate::blob::BlobError;
use crate::db::RepositoryError;
use crate::services::hasher::HashError;

/// Typed failures raised by the customer service.
///
/// Each variant carries the minimal context the boundary needs for
/// translation; the service never catches and suppresses a collaborator
/// failure.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// No customer with this ID.
    #[error("customer with id [{id}] not found")]
    NotFound { id: CustomerId },

    /// The customer exists but has no profile image linked.
    #[error("customer with id [{id}] profile image not found")]
    ImageNotSet { id: CustomerId },

    /// A different customer already owns this email.
    #[error("customer with email [{email}] already exists")]
    DuplicateEmail { email: String },

    /// The supplied email failed to parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Structurally valid request, semantically rejected.
    #[error("{0}")]
    Validation(String),

    /// Blob write failed during a profile-image upload; the image pointer
    /// was not touched.
    #[error("failed to upload customer profile image")]
    Upload(#[source] BlobError),

    /// Credential hashing failed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// Storage failure, propagated untranslated.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Blob read failure, propagated untranslated.
    #[error("blob storage error: {0}")]
    Blob(#[from] BlobError),
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        // Log server-class errors before responding
        if matches!(
            self,
            Self::Upload(_) | Self::Hash(_) | Self::Repository(_) | Self::Blob(_)
        ) {
            tracing::error!(error = %self, "Customer request error");
        }

        let status = match &self {
            Self::NotFound { .. } | Self::ImageNotSet { .. } => StatusCode::NOT_FOUND,
            // A Conflict from the store is the uniqueness constraint
            // catching the check-then-act race.
            Self::DuplicateEmail { .. } | Self::Repository(RepositoryError::Conflict(_)) => {
                StatusCode::CONFLICT
            }
            Self::InvalidEmail(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upload(_) | Self::Hash(_) | Self::Repository(_) | Self::Blob(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = CustomerError::NotFound {
            id: CustomerId::new(1),
        };
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let duplicate = CustomerError::DuplicateEmail {
            email: "a@x.com".to_owned(),
        };
        assert_eq!(duplicate.into_response().status(), StatusCode::CONFLICT);

        let no_changes = CustomerError::Validation("customer information not changed".to_owned());
        assert_eq!(no_changes.into_response().status(), StatusCode::BAD_REQUEST);

        let conflict = CustomerError::Repository(RepositoryError::Conflict("email".to_owned()));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let upload = CustomerError::Upload(BlobError::Put("io".to_owned()));
        assert_eq!(
            upload.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
