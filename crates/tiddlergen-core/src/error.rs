use thiserror::Error;

/// Core error type shared across tiddlergen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A derived timestamp falls outside the representable range.
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(String),
}

/// Convenience alias for results returned by tiddlergen crates.
pub type Result<T> = std::result::Result<T, Error>;
