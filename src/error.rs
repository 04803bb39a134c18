use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid cell reference: {0}")]
    InvalidAddress(String),

    #[error("Invalid range order: {0}")]
    RangeOrder(String),

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("No data provided to write")]
    NoData,

    #[error("Data error: {0}")]
    Data(String),

    #[error("Path error: {0}")]
    Path(String),
}
