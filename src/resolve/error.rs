//! Strategy failure taxonomy.

use crate::fetch::FetchError;
use thiserror::Error;

/// Why a retrieval strategy produced nothing.
///
/// The resolver treats every variant the same way: log it and move on to
/// the next strategy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StrategyError {
    #[error(transparent)]
    NetworkUnavailable(#[from] FetchError),

    #[error("could not parse `{file}`: {message}")]
    ParseFailure { file: String, message: String },

    #[error("no usable records")]
    EmptyResult,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl StrategyError {
    pub fn parse(file: impl Into<String>, message: impl ToString) -> Self {
        Self::ParseFailure {
            file: file.into(),
            message: message.to_string(),
        }
    }
}
