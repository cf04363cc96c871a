use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid include pattern: {0}")]
    InvalidPattern(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("File is not valid UTF-8: {0}")]
    Decode(String),

    #[error("Directory walk error: {0}")]
    WalkDir(String),

    #[error("Count table not found: {0}")]
    TableNotFound(String),

    #[error("Count table does not match alphabet: {0}")]
    AlphabetMismatch(String),
}

impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
