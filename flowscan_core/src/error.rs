//! Error type shared by the scanning engines.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to compile {category} pattern `{pattern}`: {source}")]
    PatternCompile {
        category: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("unknown token type: {0}")]
    UnknownTokenType(String),
}
