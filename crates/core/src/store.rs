//! In-process vector store and nearest-neighbor query engine.
//!
//! Collections are append-only sets of `(id, text, vector)` triples. The
//! store owns the embedder, so stored vectors and query vectors always
//! come from the same embedding function. Mutation takes `&mut self`;
//! the borrow checker enforces the single-writer discipline the design
//! assumes.

use crate::embeddings::Embedder;
use crate::error::StoreError;
use crate::models::QueryMatch;
use std::collections::HashMap;
use tracing::debug;

/// Opaque reference to a collection inside one [`VectorStore`]. Handles
/// from a different store are rejected at use, not at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionHandle(usize);

#[derive(Debug)]
struct StoredChunk {
    id: String,
    text: String,
    vector: Vec<f32>,
}

#[derive(Debug)]
struct Collection {
    name: String,
    // Monotonic id counter; never reset, so repeated add_chunks calls
    // cannot silently reuse doc_0.
    next_id: u64,
    entries: Vec<StoredChunk>,
}

pub struct VectorStore<E: Embedder> {
    embedder: E,
    collections: Vec<Collection>,
    names: HashMap<String, usize>,
}

impl<E: Embedder> VectorStore<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            collections: Vec::new(),
            names: HashMap::new(),
        }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Create a new empty named collection.
    pub fn create_collection(&mut self, name: &str) -> Result<CollectionHandle, StoreError> {
        if self.names.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        let index = self.collections.len();
        self.collections.push(Collection {
            name: name.to_string(),
            next_id: 0,
            entries: Vec::new(),
        });
        self.names.insert(name.to_string(), index);
        debug!(collection = name, "collection created");
        Ok(CollectionHandle(index))
    }

    /// Embed `chunks` and append them as `(doc_{n}, text, vector)`
    /// triples, returning the assigned ids in input order. Every vector
    /// is computed before anything is committed, so a failing embed
    /// leaves the collection untouched.
    pub fn add_chunks(
        &mut self,
        handle: CollectionHandle,
        chunks: &[String],
    ) -> Result<Vec<String>, StoreError> {
        let vectors: Vec<Vec<f32>> = chunks.iter().map(|text| self.embedder.embed(text)).collect();

        let collection = self
            .collections
            .get_mut(handle.0)
            .ok_or_else(|| StoreError::UnknownCollection(format!("handle {}", handle.0)))?;

        let mut ids = Vec::with_capacity(chunks.len());
        for (text, vector) in chunks.iter().zip(vectors) {
            let id = format!("doc_{}", collection.next_id);
            collection.next_id += 1;
            collection.entries.push(StoredChunk {
                id: id.clone(),
                text: text.clone(),
                vector,
            });
            ids.push(id);
        }

        debug!(
            collection = %collection.name,
            added = ids.len(),
            total = collection.entries.len(),
            "chunks added"
        );
        Ok(ids)
    }

    /// Embed `text` with the store's embedder and return the `top_k`
    /// nearest stored chunks by cosine distance, nearest first. A `top_k`
    /// past the collection size returns everything.
    pub fn query(
        &self,
        handle: CollectionHandle,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<QueryMatch>, StoreError> {
        if top_k == 0 {
            return Err(StoreError::InvalidTopK(top_k));
        }

        let collection = self
            .collections
            .get(handle.0)
            .ok_or_else(|| StoreError::UnknownCollection(format!("handle {}", handle.0)))?;

        if collection.entries.is_empty() {
            return Err(StoreError::EmptyCollection(collection.name.clone()));
        }

        let query_vector = self.embedder.embed(text);
        let mut matches: Vec<QueryMatch> = collection
            .entries
            .iter()
            .map(|entry| QueryMatch {
                id: entry.id.clone(),
                text: entry.text.clone(),
                distance: cosine_distance(&entry.vector, &query_vector),
            })
            .collect();

        matches.sort_by(|left, right| left.distance.total_cmp(&right.distance));
        matches.truncate(top_k);
        Ok(matches)
    }

    pub fn collection_len(&self, handle: CollectionHandle) -> Result<usize, StoreError> {
        self.collections
            .get(handle.0)
            .map(|collection| collection.entries.len())
            .ok_or_else(|| StoreError::UnknownCollection(format!("handle {}", handle.0)))
    }

    /// Ids currently stored in a collection, in insertion order.
    pub fn chunk_ids(&self, handle: CollectionHandle) -> Result<Vec<&str>, StoreError> {
        self.collections
            .get(handle.0)
            .map(|collection| {
                collection
                    .entries
                    .iter()
                    .map(|entry| entry.id.as_str())
                    .collect()
            })
            .ok_or_else(|| StoreError::UnknownCollection(format!("handle {}", handle.0)))
    }
}

/// Cosine distance, `1 - cosine similarity`. Zero-magnitude vectors are
/// treated as maximally distant.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}
