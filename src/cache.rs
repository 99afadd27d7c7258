//! Intermediate Cache — the append-only, byte-offset-addressable log of
//! tokenized documents that intake writes to before a segment ever sees
//! the data. One logical log per index type (word / char).
//!
//! Log record framing:
//! `id: u32-LE | tokenCount: u32-LE | (tokenLen: u16-LE | tokenBytes: UTF-8)×tokenCount | 0x1E`
//!
//! Token byte length is clamped to `u16::MAX`; the trailing `0x1E` sentinel
//! lets a tolerant reader stop cleanly at a truncated tail instead of
//! panicking on a partial frame.

use crate::blob_store::BlobStore;
use crate::error::{IndexError, Result};

/// Sentinel byte closing every log record, used for tolerant scanning.
const RECORD_SEP: u8 = 0x1E;

/// A document after tokenization, ready to append to a single-type log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedDoc {
    pub id: u32,
    pub tokens: Vec<String>,
}

impl TokenizedDoc {
    pub fn new(id: u32, tokens: Vec<String>) -> Self {
        TokenizedDoc { id, tokens }
    }

    /// Encode this document as one framed log record, clamping any token
    /// whose UTF-8 byte length exceeds `u16::MAX`.
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&(self.tokens.len() as u32).to_le_bytes());
        for token in &self.tokens {
            let bytes = token.as_bytes();
            let mut len = bytes.len().min(u16::MAX as usize);
            while len > 0 && !token.is_char_boundary(len) {
                len -= 1;
            }
            out.extend_from_slice(&(len as u16).to_le_bytes());
            out.extend_from_slice(&bytes[..len]);
        }
        out.push(RECORD_SEP);
    }
}

/// Durable, ordered, byte-offset-addressable log of tokenized documents.
/// Backed by a single named blob in a caller-supplied `BlobStore`. Holds no
/// state of its own — every operation takes the store explicitly, so an
/// `Engine` can own its store directly instead of threading a borrow
/// through a second struct.
pub struct IntermediateCache;

impl IntermediateCache {
    /// Frame every document into one contiguous buffer and append it in a
    /// single `BlobStore::append` call. Returns the log's new total size.
    /// An empty `docs` slice still reports the current size without an
    /// append call.
    pub fn append_batch(store: &impl BlobStore, name: &str, docs: &[TokenizedDoc]) -> Result<u64> {
        if docs.is_empty() {
            return Self::size(store, name);
        }
        let mut buf = Vec::new();
        for doc in docs {
            doc.encode(&mut buf);
        }
        store.append(name, &buf)?;
        Self::size(store, name)
    }

    /// Current size in bytes of the named log.
    pub fn size(store: &impl BlobStore, name: &str) -> Result<u64> {
        store.size(name)
    }

    /// Read and decode every record in `[start, end)`. Tolerant of a
    /// truncated tail: stops cleanly and returns what it decoded so far
    /// rather than erroring, per the log's crash-tolerance contract.
    pub fn read_range(
        store: &impl BlobStore,
        name: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<TokenizedDoc>> {
        let Some(bytes) = store.read_range(name, start, end)? else {
            return Ok(Vec::new());
        };
        Ok(decode_records(&bytes))
    }
}

/// Decode as many complete records as possible from `bytes`, stopping
/// silently at the first incomplete or malformed frame.
fn decode_records(bytes: &[u8]) -> Vec<TokenizedDoc> {
    let mut docs = Vec::new();
    let mut pos = 0usize;

    loop {
        match decode_one(bytes, pos) {
            Some((doc, next)) => {
                docs.push(doc);
                pos = next;
            }
            None => break,
        }
    }

    docs
}

/// Decode a single record starting at `pos`. Returns `None` (without
/// panicking) if the buffer doesn't hold a full, well-formed frame there.
fn decode_one(bytes: &[u8], pos: usize) -> Option<(TokenizedDoc, usize)> {
    let mut cursor = pos;

    let id = read_u32(bytes, cursor)?;
    cursor += 4;
    let token_count = read_u32(bytes, cursor)?;
    cursor += 4;

    let mut tokens = Vec::with_capacity(token_count as usize);
    for _ in 0..token_count {
        let token_len = read_u16(bytes, cursor)? as usize;
        cursor += 2;
        let slice = bytes.get(cursor..cursor + token_len)?;
        let token = std::str::from_utf8(slice).ok()?.to_string();
        cursor += token_len;
        tokens.push(token);
    }

    let sep = *bytes.get(cursor)?;
    if sep != RECORD_SEP {
        return None;
    }
    cursor += 1;

    Some((TokenizedDoc::new(id, tokens), cursor))
}

fn read_u32(bytes: &[u8], pos: usize) -> Option<u32> {
    let slice = bytes.get(pos..pos + 4)?;
    Some(u32::from_le_bytes(slice.try_into().unwrap()))
}

fn read_u16(bytes: &[u8], pos: usize) -> Option<u16> {
    let slice = bytes.get(pos..pos + 2)?;
    Some(u16::from_le_bytes(slice.try_into().unwrap()))
}

/// Surface a record-level decode failure as `IndexError::MalformedLogRecord`
/// for callers that want a hard error rather than truncation (e.g. a repair
/// tool auditing a log file offline). Not used by `read_range`, which is
/// deliberately tolerant per the log's crash-recovery contract.
pub fn decode_strict(name: &str, bytes: &[u8]) -> Result<Vec<TokenizedDoc>> {
    let mut docs = Vec::new();
    let mut pos = 0usize;
    while pos < bytes.len() {
        match decode_one(bytes, pos) {
            Some((doc, next)) => {
                docs.push(doc);
                pos = next;
            }
            None => {
                return Err(IndexError::MalformedLogRecord {
                    name: name.to_string(),
                    offset: pos as u64,
                    reason: "truncated or malformed record frame".to_string(),
                });
            }
        }
    }
    Ok(docs)
}
