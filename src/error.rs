use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
