// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Request(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("region data unavailable: {0}")]
    RegionData(String),
    #[error("cache persistence failed: {0}")]
    Persistence(String),
    #[error("invalid selection {index}: expected 1..={len}")]
    InvalidSelection { index: usize, len: usize },
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
