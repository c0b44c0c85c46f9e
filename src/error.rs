use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    /// The long URL already has a row. Raised by the store on the url unique
    /// constraint; the facade recovers from it, callers normally never see it.
    #[error("URL is already stored")]
    DuplicateUrl,

    /// A candidate token lost the race to another link. Internal to the
    /// allocation loop; surfaces only from custom-token assignment.
    #[error("token '{token}' is already assigned to another link")]
    TokenCollision { token: String },

    #[error("no free token among the candidates for link id {id}")]
    AllocationExhausted { id: i64 },

    #[error("custom token '{token}' is already taken")]
    TokenAlreadyTaken { token: String },

    #[error("no link found for token '{token}'")]
    NotFound { token: String },

    #[error("storage failure: {0}")]
    Store(String),
}

impl Error {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
    pub fn token_collision(token: impl Into<String>) -> Self {
        Self::TokenCollision {
            token: token.into(),
        }
    }
    pub fn token_already_taken(token: impl Into<String>) -> Self {
        Self::TokenAlreadyTaken {
            token: token.into(),
        }
    }
    pub fn not_found(token: impl Into<String>) -> Self {
        Self::NotFound {
            token: token.into(),
        }
    }
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

/// Catch-all for driver errors the stores do not map themselves. Unique
/// violations are translated to [`Error::DuplicateUrl`] or
/// [`Error::TokenCollision`] inside the store impls, before `?` applies.
impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(e.to_string())
    }
}
