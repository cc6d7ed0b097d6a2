use siteprobe_core::SiteProbeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CardError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("prefix must be 1-12 digits, got '{0}'")]
    InvalidPrefix(String),

    #[error("count must be between 1 and {max}, got {actual}")]
    InvalidCount { max: usize, actual: usize },
}

impl From<CardError> for SiteProbeError {
    fn from(err: CardError) -> Self {
        Self::Validation(err.to_string())
    }
}
