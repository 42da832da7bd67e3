use dkc_auth::DkcAuthError;
use dkc_resources::ResourceError;
use thiserror::Error;

/// Any failure surfaced by [`DkcApi`](crate::DkcApi)
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] DkcAuthError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl Error {
    /// True when the master key was refused
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(e) if e.is_auth())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
