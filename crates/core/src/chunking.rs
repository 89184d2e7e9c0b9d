//! Boundary-preferring text splitting with overlap.
//!
//! `split_text` tries paragraph breaks first, then sentence ends, then
//! word breaks, and only hard-cuts by character count when no boundary
//! fits inside the size limit. All indexing is `char`-based so accented
//! Portuguese text never lands on a byte boundary.

use crate::error::IngestError;
use std::collections::VecDeque;

/// Boundary hierarchy tried in order before hard character cuts. Each
/// separator stays attached to the segment that precedes it, so
/// concatenating segments reconstructs the source text.
const SEPARATORS: [&str; 5] = ["\n\n", ". ", "! ", "? ", " "];

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl ChunkingConfig {
    fn validate(self) -> Result<Self, IngestError> {
        if self.max_chars == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_chars must be positive".to_string(),
            ));
        }
        if self.overlap_chars >= self.max_chars {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                self.overlap_chars, self.max_chars
            )));
        }
        Ok(self)
    }
}

/// Split `text` into pieces of at most `config.max_chars` characters,
/// in source order. Consecutive hard-cut pieces share
/// `config.overlap_chars` characters; boundary-merged pieces carry over
/// whole trailing segments that fit the overlap budget.
pub fn split_text(text: &str, config: ChunkingConfig) -> Result<Vec<String>, IngestError> {
    let config = config.validate()?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(split_recursive(text, config, &SEPARATORS))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn split_recursive(text: &str, config: ChunkingConfig, separators: &[&str]) -> Vec<String> {
    if char_len(text) <= config.max_chars {
        return vec![text.to_string()];
    }

    let Some((separator, rest)) = separators.split_first() else {
        return split_by_chars(text, config);
    };

    let segments = split_keeping_separator(text, separator);
    if segments.len() <= 1 {
        return split_recursive(text, config, rest);
    }

    merge_segments(&segments, config, rest)
}

/// Merge adjacent segments into chunks bounded by `max_chars`. When a
/// chunk is emitted, trailing segments within the overlap budget stay in
/// the window so the next chunk shares context with the previous one.
fn merge_segments(segments: &[&str], config: ChunkingConfig, rest: &[&str]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut window_len = 0usize;

    for &segment in segments {
        let segment_len = char_len(segment);

        if !window.is_empty() && window_len + segment_len > config.max_chars {
            emit(&mut chunks, &window, config, rest);

            while window_len > config.overlap_chars
                || (window_len + segment_len > config.max_chars && !window.is_empty())
            {
                match window.pop_front() {
                    Some(removed) => window_len -= char_len(removed),
                    None => break,
                }
            }
        }

        window.push_back(segment);
        window_len += segment_len;
    }

    if !window.is_empty() {
        emit(&mut chunks, &window, config, rest);
    }

    chunks
}

fn emit(chunks: &mut Vec<String>, window: &VecDeque<&str>, config: ChunkingConfig, rest: &[&str]) {
    let piece: String = window.iter().copied().collect();
    if piece.trim().is_empty() {
        return;
    }
    if char_len(&piece) > config.max_chars {
        chunks.extend(split_recursive(&piece, config, rest));
    } else {
        chunks.push(piece);
    }
}

/// Split at `separator`, keeping the separator attached to the preceding
/// segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut start = 0;

    while let Some(position) = text[start..].find(separator) {
        let end = start + position + separator.len();
        segments.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }

    segments
}

/// Hard character cut: fixed-size windows advancing by
/// `max_chars - overlap_chars`, so consecutive pieces share exactly
/// `overlap_chars` characters.
fn split_by_chars(text: &str, config: ChunkingConfig) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = config.max_chars - config.overlap_chars;
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + config.max_chars).min(chars.len());
        pieces.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    pieces
}
