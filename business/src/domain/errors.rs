/// Errors raised by the outbound ports (stock API, catalog API, key-value storage).
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.network")]
    Network,
    #[error("repository.malformed_response")]
    MalformedResponse,
    #[error("repository.persistence")]
    Persistence,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn network() -> Self {
        RepositoryError::Network
    }
    pub fn malformed_response() -> Self {
        RepositoryError::MalformedResponse
    }
    pub fn persistence() -> Self {
        RepositoryError::Persistence
    }
}
