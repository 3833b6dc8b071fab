use std::error::Error;
use std::fmt;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider id is not one of the built-in registry entries.
    UnknownProvider(String),
    InvalidConfig(String),
    Other(String),
}

impl ProviderError {
    /// HTTP status a request boundary should answer with for this error.
    pub fn status(&self) -> u16 {
        match self {
            ProviderError::UnknownProvider(_) => 400,
            ProviderError::InvalidConfig(_) | ProviderError::Other(_) => 500,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::UnknownProvider(id) => write!(f, "Unknown OAuth provider: {id}"),
            ProviderError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            ProviderError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for ProviderError {}
