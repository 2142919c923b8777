use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SalesError {
    #[error("Failed to read sales data from {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("Row {row}: invalid date `{value}`")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: invalid amount `{value}`")]
    InvalidAmount { row: usize, value: String },

    #[error("Amount overflow while summing sales for `{group}` in week {week}")]
    AmountOverflow { group: String, week: chrono::NaiveDate },

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SalesError {
    /// True for errors caused by the content of the transaction file rather
    /// than by access to it.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SalesError::Csv(_)
                | SalesError::MissingColumn(_)
                | SalesError::InvalidDate { .. }
                | SalesError::InvalidAmount { .. }
                | SalesError::AmountOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SalesError>;
