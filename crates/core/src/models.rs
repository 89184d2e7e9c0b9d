use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of one ingested source file: where it came from, what its
/// bytes hashed to, and when it entered the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFingerprint {
    pub source_path: String,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

/// One nearest-neighbor hit: the stored chunk id, its original text, and
/// the cosine distance to the query vector (smaller is closer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryMatch {
    pub id: String,
    pub text: String,
    pub distance: f32,
}

/// Knobs for one indexing run. Defaults match the reference settings the
/// pipeline was tuned with for prose documents.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub chunk_max_chars: usize,
    pub chunk_overlap_chars: usize,
    pub collection: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            chunk_max_chars: 100,
            chunk_overlap_chars: 30,
            collection: "documentos".to_string(),
        }
    }
}
