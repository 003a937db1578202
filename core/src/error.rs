use std::collections::TryReserveError;

use thiserror::Error;

pub type RtgenResult<T> = std::result::Result<T, RtgenError>;

#[derive(Error, Debug)]
pub enum RtgenError {
    #[error("Unsupported hash algorithm `{0}`, expected one of sha1, sha256, sha512")]
    InvalidAlgorithm(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Unable to allocate the storage for the rainbow table")]
    AllocationFailure(#[from] TryReserveError),

    #[error("Unable to build the worker thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
