use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("csv parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection already exists: {0}")]
    AlreadyExists(String),

    #[error("collection handle does not belong to this store: {0}")]
    UnknownCollection(String),

    #[error("collection is empty: {0}")]
    EmptyCollection(String),

    #[error("top-k must be a positive integer, got {0}")]
    InvalidTopK(usize),
}

/// Errors surfaced by the end-to-end pipeline, which crosses the
/// ingestion and store boundaries.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
