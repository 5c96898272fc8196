use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("workbook not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("content to write is empty")]
    EmptyContent,

    #[error("invalid cell position {0:?}, expected Row:Column")]
    InvalidCoordinateFormat(String),

    #[error("cell ({row}, {col}) is outside the worksheet")]
    CellOutOfRange { row: i64, col: i64 },

    #[error("workbook {} could not be processed: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: umya_spreadsheet::XlsxError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BatchError {
    /// Errors worth a warning dialog when the interactive prompt is on.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BatchError::MissingFile(_)
                | BatchError::EmptyContent
                | BatchError::InvalidCoordinateFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
