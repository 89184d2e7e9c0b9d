//! End-to-end indexing: source text → normalization → chunking → vector
//! store. Strictly sequential; each stage consumes the previous stage's
//! output and nothing feeds back.

use crate::chunking::{split_text, ChunkingConfig};
use crate::embeddings::Embedder;
use crate::error::{IngestError, PipelineError};
use crate::models::{PipelineOptions, SourceFingerprint};
use crate::normalize::normalize;
use crate::reader;
use crate::store::{CollectionHandle, VectorStore};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of one indexing run.
pub struct IndexReport {
    pub handle: CollectionHandle,
    pub chunk_ids: Vec<String>,
    pub fingerprint: Option<SourceFingerprint>,
}

/// Normalize `raw_text`, split it, create the target collection, and add
/// every chunk. The collection name comes from `options`; creating it
/// here keeps one run atomic per collection.
pub fn index_text<E: Embedder>(
    store: &mut VectorStore<E>,
    options: &PipelineOptions,
    raw_text: &str,
) -> Result<IndexReport, PipelineError> {
    let normalized = normalize(raw_text);
    let config = ChunkingConfig {
        max_chars: options.chunk_max_chars,
        overlap_chars: options.chunk_overlap_chars,
    };
    let chunks = split_text(&normalized, config)?;
    if chunks.is_empty() {
        warn!(collection = %options.collection, "normalized input produced no chunks");
    }

    let handle = store.create_collection(&options.collection)?;
    let chunk_ids = store.add_chunks(handle, &chunks)?;
    info!(
        collection = %options.collection,
        chunk_count = chunk_ids.len(),
        "chunks indexed"
    );

    Ok(IndexReport {
        handle,
        chunk_ids,
        fingerprint: None,
    })
}

/// Combine the named CSV columns into row lines and index the result.
pub fn index_csv<E: Embedder>(
    store: &mut VectorStore<E>,
    options: &PipelineOptions,
    path: &Path,
    columns: &[String],
) -> Result<IndexReport, PipelineError> {
    let fingerprint = fingerprint_file(path)?;
    info!(source = %path.display(), checksum = %fingerprint.checksum, "reading csv source");

    let combined = reader::combine_columns(path, columns)?;
    let mut report = index_text(store, options, &combined)?;
    report.fingerprint = Some(fingerprint);
    Ok(report)
}

/// Extract a PDF's page text and index the result.
pub fn index_pdf<E: Embedder>(
    store: &mut VectorStore<E>,
    options: &PipelineOptions,
    path: &Path,
) -> Result<IndexReport, PipelineError> {
    let fingerprint = fingerprint_file(path)?;
    info!(source = %path.display(), checksum = %fingerprint.checksum, "reading pdf source");

    let text = reader::read_pdf(path)?;
    let mut report = index_text(store, options, &text)?;
    report.fingerprint = Some(fingerprint);
    Ok(report)
}

/// Normalize one CSV column row by row, returning one normalized string
/// per row in source order.
pub fn normalize_csv_rows(path: &Path, column: &str) -> Result<Vec<String>, IngestError> {
    let table = crate::table::Table::read_csv(path)?;
    let values = table.column(column)?;
    Ok(values.iter().map(|value| normalize(value)).collect())
}

fn fingerprint_file(path: &Path) -> Result<SourceFingerprint, IngestError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);

    Ok(SourceFingerprint {
        source_path: path.to_string_lossy().to_string(),
        checksum: format!("{:x}", hasher.finalize()),
        ingested_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::{index_csv, index_text, normalize_csv_rows};
    use crate::error::IngestError;
    use crate::embeddings::HashedFeatureEmbedder;
    use crate::models::PipelineOptions;
    use crate::store::VectorStore;
    use std::fs;
    use tempfile::tempdir;

    fn options(collection: &str) -> PipelineOptions {
        PipelineOptions {
            chunk_max_chars: 40,
            chunk_overlap_chars: 10,
            collection: collection.to_string(),
        }
    }

    #[test]
    fn csv_rows_are_retrievable_after_indexing() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("people.csv");
        fs::write(
            &path,
            "First Name,Last Name,Job Title\n\
             Ana,Silva,Engineer\n\
             Bob,Lima,Developer\n\
             Carla,Souza,Game Developer\n",
        )
        .expect("fixture written");

        let mut store = VectorStore::new(HashedFeatureEmbedder::default());
        let columns = vec![
            "First Name".to_string(),
            "Last Name".to_string(),
            "Job Title".to_string(),
        ];
        let report = index_csv(&mut store, &options("pessoas"), &path, &columns)
            .expect("pipeline run");

        assert!(!report.chunk_ids.is_empty());
        let fingerprint = report.fingerprint.expect("file source has a fingerprint");
        assert_eq!(fingerprint.checksum.len(), 64);

        let matches = store
            .query(report.handle, "game developer", 3)
            .expect("query");
        assert!(!matches.is_empty());
        for pair in matches.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn index_text_creates_the_named_collection_once() {
        let mut store = VectorStore::new(HashedFeatureEmbedder::default());
        let options = options("contos");

        let report = index_text(&mut store, &options, "O lobo assoprou a casa de madeira")
            .expect("first run");
        assert!(report.fingerprint.is_none());
        assert_eq!(
            store.collection_len(report.handle).expect("len"),
            report.chunk_ids.len()
        );

        // Same collection name again must refuse, not overwrite.
        let result = index_text(&mut store, &options, "outro texto qualquer");
        assert!(result.is_err());
    }

    #[test]
    fn csv_column_rows_normalize_one_string_per_row() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("frases.csv");
        fs::write(&path, "titulo,frase\nprimeira,Sol e mar\nsegunda,123 Luz!\n")
            .expect("fixture written");

        let rows = normalize_csv_rows(&path, "frase").expect("column exists");
        assert_eq!(rows, vec!["sol mar", "luz"]);

        let result = normalize_csv_rows(&path, "inexistente");
        assert!(matches!(result, Err(IngestError::MissingColumn(_))));
    }

    #[test]
    fn invalid_chunk_config_aborts_before_touching_the_store() {
        let mut store = VectorStore::new(HashedFeatureEmbedder::default());
        let bad = PipelineOptions {
            chunk_max_chars: 10,
            chunk_overlap_chars: 10,
            collection: "invalida".to_string(),
        };

        let result = index_text(&mut store, &bad, "qualquer texto de entrada");
        assert!(result.is_err());

        // The collection must not exist afterwards.
        let mut store_probe = store;
        assert!(store_probe.create_collection("invalida").is_ok());
    }
}
