use axum::http::StatusCode;

use crate::{registrations::StoreError, storage::StorageError};

/// Problems with what the visitor entered. Nothing has been changed
/// anywhere when one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequiredField(&'static str),
    #[error("Team size must be between 2-4 members")]
    TeamSizeOutOfRange,
    #[error("Please provide names for all {expected} team members")]
    NotEnoughMembers { expected: usize, provided: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{0} profile must be a valid URL")]
    InvalidProfileUrl(&'static str),
    #[error("This form has expired. Please reload the page and try again")]
    MissingFormToken,
    #[error("Please select a file first")]
    NoFileSelected,
    #[error("Please select an image file")]
    NotAnImage,
    #[error("File size must be less than 5MB")]
    FileTooLarge,
    #[error("The upload could not be read. Please try again")]
    UnreadableUpload,
}

#[derive(thiserror::Error, Debug)]
pub enum FunnelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("This registration is already being submitted")]
    SubmissionInFlight,
    #[error("Upload already in progress")]
    UploadInFlight,
    #[error("Registration failed: {0}")]
    Registration(#[source] StoreError),
    #[error("Failed to upload file")]
    Upload(#[source] StorageError),
    #[error("Failed to update registration record")]
    RecordUpdate(#[source] StoreError),
}

impl FunnelError {
    pub fn status(&self) -> StatusCode {
        match self {
            FunnelError::Validation(_) => StatusCode::BAD_REQUEST,
            FunnelError::SubmissionInFlight | FunnelError::UploadInFlight => {
                StatusCode::CONFLICT
            }
            FunnelError::Registration(_)
            | FunnelError::Upload(_)
            | FunnelError::RecordUpdate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error at a level matching who caused it.
    pub fn log(&self) {
        match self {
            FunnelError::Validation(e) => {
                tracing::debug!("Rejected input: {e:?}")
            }
            FunnelError::SubmissionInFlight | FunnelError::UploadInFlight => {
                tracing::warn!("{self}")
            }
            FunnelError::Registration(source)
            | FunnelError::RecordUpdate(source) => {
                tracing::error!("{self}: {source}")
            }
            FunnelError::Upload(source) => tracing::error!("{self}: {source}"),
        }
    }
}

#[cfg(test)]
#[test]
fn test_messages() {
    assert_eq!(
        ValidationError::NotEnoughMembers {
            expected: 3,
            provided: 1
        }
        .to_string(),
        "Please provide names for all 3 team members"
    );
    assert_eq!(
        FunnelError::Registration(StoreError::Unavailable("down".into()))
            .to_string(),
        "Registration failed: registration store unavailable: down"
    );
    assert_eq!(
        FunnelError::from(ValidationError::NotAnImage).status(),
        StatusCode::BAD_REQUEST
    );
}
