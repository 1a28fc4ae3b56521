//! Domain error type shared by the service layer and the gRPC transport.

use thiserror::Error;

/// Errors produced by the rocket service.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied identifier is not a well-formed UUID.
    #[error("invalid rocket id: {0}")]
    InvalidId(#[from] uuid::Error),

    /// The store refused the insert. The underlying cause is logged, not carried.
    #[error("failed to insert rocket")]
    InsertFailed,

    /// The store could not complete the operation.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that reach the wire without an explicit mapping keep their message
/// and get the `Unknown` code.
impl From<Error> for tonic::Status {
    fn from(err: Error) -> Self {
        tonic::Status::unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_failure_has_generic_message() {
        let status = tonic::Status::from(Error::InsertFailed);
        assert_eq!(status.code(), tonic::Code::Unknown);
        assert_eq!(status.message(), "failed to insert rocket");
    }

    #[test]
    fn invalid_id_is_not_mapped_to_invalid_argument() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let status = tonic::Status::from(Error::from(err));
        assert_eq!(status.code(), tonic::Code::Unknown);
        assert!(status.message().starts_with("invalid rocket id"));
    }
}
