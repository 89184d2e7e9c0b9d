pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod store;
pub mod table;

pub use chunking::{split_text, ChunkingConfig};
pub use embeddings::{Embedder, HashedFeatureEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{IngestError, PipelineError, StoreError};
pub use models::{PipelineOptions, QueryMatch, SourceFingerprint};
pub use normalize::normalize;
pub use pipeline::{index_csv, index_pdf, index_text, normalize_csv_rows, IndexReport};
pub use reader::{combine_columns, read_csv, read_pdf};
pub use store::{CollectionHandle, VectorStore};
pub use table::Table;
