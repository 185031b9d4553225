use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The response couldn't be parsed as a search page: {reason}")]
    Protocol { reason: String },

    #[error("There are over {page_size} diamonds with these characteristics at price {price}.")]
    CursorStuck { page_size: u32, price: u64 },

    #[error("Malformed record, field `{field}`: {reason}")]
    MalformedRecord { field: &'static str, reason: String },

    #[error("Results must be sorted by ascending price, got `{column} {direction}`.")]
    UnsortedQuery { column: String, direction: String },
    #[error("Lower bound of `{0}` is above its upper bound.")]
    InvalidRange(&'static str),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}
