use thiserror::Error;

/// Errors from loading and serving a menu. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid date '{0}', use YYYY-MM-DD or YYYY/MM/DD")]
    InvalidDate(String),
}
