//! Deterministic local embeddings.
//!
//! Indexing and querying must share one embedding function for distances
//! to be meaningful, so the store is generic over [`Embedder`] and holds
//! a single instance for both paths.

const DEFAULT: usize = 256;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = DEFAULT;

pub trait Embedder {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Hashed bag-of-features embedder: word unigrams plus character
/// trigrams, FNV-1a hashed into a fixed number of buckets and
/// L2-normalized. Deterministic for the same input and dimension count.
#[derive(Debug, Clone, Copy)]
pub struct HashedFeatureEmbedder {
    pub dimensions: usize,
}

impl Default for HashedFeatureEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf29ce484222325u64;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn bump(vector: &mut [f32], hash: u64, weight: f32) {
    let bucket = (hash % vector.len() as u64) as usize;
    vector[bucket] += weight;
}

impl Embedder for HashedFeatureEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();

        for word in lowered.split_whitespace() {
            bump(&mut vector, fnv1a(word.as_bytes()), WORD_WEIGHT);
        }

        let chars: Vec<char> = lowered.chars().collect();
        for window in chars.windows(3) {
            let trigram: String = window.iter().collect();
            bump(&mut vector, fnv1a(trigram.as_bytes()), TRIGRAM_WEIGHT);
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}
