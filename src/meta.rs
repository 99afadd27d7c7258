//! Meta Manager (C5) — the durable catalog of segments per index type, the
//! added-id set, and the tombstone (deleted-id) set.
//!
//! Persistence: one JSON blob for `{wordSegments, charSegments}`
//! (`search_meta.json`), and two binary `u32-LE | 0x1E` id-stream blobs
//! (`added_ids.bin`, `deleted_ids.bin`). Saving an empty id-set removes its
//! blob rather than writing an empty file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::blob_store::BlobStore;
use crate::error::Result;

pub const META_BLOB: &str = "search_meta.json";
pub const ADDED_IDS_BLOB: &str = "added_ids.bin";
pub const DELETED_IDS_BLOB: &str = "deleted_ids.bin";

/// Which log/segment family an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    Word,
    Char,
}

impl IndexType {
    pub fn cache_name(self) -> &'static str {
        match self {
            IndexType::Word => "word_cache.bin",
            IndexType::Char => "char_cache.bin",
        }
    }

    pub fn segment_prefix(self) -> &'static str {
        match self {
            IndexType::Word => "word_seg_",
            IndexType::Char => "char_seg_",
        }
    }
}

/// One catalogued segment: the log byte range it was built from and the
/// token count it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    pub filename: String,
    pub start: u64,
    pub end: u64,
    pub token_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MetaBlob {
    #[serde(default, rename = "wordSegments")]
    word_segments: Vec<SegmentDescriptor>,
    #[serde(default, rename = "charSegments")]
    char_segments: Vec<SegmentDescriptor>,
}

/// Durable catalog: segment descriptors per type, plus the added/deleted id
/// sets. Holds its state in memory between `load` and `save`; takes the
/// `BlobStore` as a parameter on `load`/`save` rather than storing a
/// reference, so an `Engine` can own both the store and its `MetaManager`
/// without a self-referential borrow.
#[derive(Default)]
pub struct MetaManager {
    word_segments: Vec<SegmentDescriptor>,
    char_segments: Vec<SegmentDescriptor>,
    added_ids: HashSet<u32>,
    deleted_ids: HashSet<u32>,
}

impl MetaManager {
    pub fn new() -> Self {
        MetaManager::default()
    }

    /// Load the catalog and id sets from the store, replacing in-memory
    /// state. Absent blobs decode as empty.
    pub fn load(&mut self, store: &impl BlobStore) -> Result<()> {
        let blob = match store.read(META_BLOB)? {
            Some(bytes) => serde_json::from_slice::<MetaBlob>(&bytes)?,
            None => MetaBlob::default(),
        };
        self.word_segments = blob.word_segments;
        self.char_segments = blob.char_segments;

        self.added_ids = load_id_set(store, ADDED_IDS_BLOB)?;
        self.deleted_ids = load_id_set(store, DELETED_IDS_BLOB)?;
        Ok(())
    }

    /// Persist the catalog and id sets. An empty id-set removes its blob
    /// instead of writing an empty file.
    pub fn save(&self, store: &impl BlobStore) -> Result<()> {
        let blob = MetaBlob {
            word_segments: self.word_segments.clone(),
            char_segments: self.char_segments.clone(),
        };
        let bytes = serde_json::to_vec(&blob)?;
        store.write(META_BLOB, &bytes)?;

        save_id_set(store, ADDED_IDS_BLOB, &self.added_ids)?;
        save_id_set(store, DELETED_IDS_BLOB, &self.deleted_ids)?;
        Ok(())
    }

    pub fn get_segments(&self, index_type: IndexType) -> &[SegmentDescriptor] {
        match index_type {
            IndexType::Word => &self.word_segments,
            IndexType::Char => &self.char_segments,
        }
    }

    pub fn get_last_segment_info(&self, index_type: IndexType) -> Option<&SegmentDescriptor> {
        self.get_segments(index_type).last()
    }

    /// The segment number the next new segment of this type should use.
    /// Reuses numbers after `reset` (since the catalog is empty again);
    /// this is a documented, accepted quirk rather than a bug (see design
    /// notes on segment numbering).
    pub fn next_segment_number(&self, index_type: IndexType) -> u64 {
        self.get_segments(index_type).len() as u64 + 1
    }

    /// Push a new tail descriptor, or mutate the existing tail's `end` and
    /// `token_count` in place. Must only ever be called on the last
    /// descriptor of its type — callers never retarget an earlier one.
    pub fn update_segment(
        &mut self,
        index_type: IndexType,
        filename: String,
        start: u64,
        end: u64,
        token_count: u64,
        is_new: bool,
    ) {
        let segments = match index_type {
            IndexType::Word => &mut self.word_segments,
            IndexType::Char => &mut self.char_segments,
        };

        if is_new {
            segments.push(SegmentDescriptor {
                filename,
                start,
                end,
                token_count,
            });
        } else if let Some(tail) = segments.last_mut() {
            tail.end = end;
            tail.token_count = token_count;
        } else {
            // No tail existed; treat as a new descriptor defensively.
            segments.push(SegmentDescriptor {
                filename,
                start,
                end,
                token_count,
            });
        }
    }

    pub fn add_deleted_id(&mut self, id: u32) {
        self.deleted_ids.insert(id);
        self.added_ids.remove(&id);
    }

    pub fn is_deleted(&self, id: u32) -> bool {
        self.deleted_ids.contains(&id)
    }

    pub fn add_added_id(&mut self, id: u32) {
        self.added_ids.insert(id);
    }

    pub fn remove_added_id(&mut self, id: u32) {
        self.added_ids.remove(&id);
    }

    pub fn is_added(&self, id: u32) -> bool {
        self.added_ids.contains(&id)
    }

    pub fn has_document(&self, id: u32) -> bool {
        self.is_added(id) || self.is_deleted(id)
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_ids.len()
    }

    pub fn added_count(&self) -> usize {
        self.added_ids.len()
    }

    /// Drop all in-memory state. Does not touch the store; callers pair
    /// this with `BlobStore::clear_all` at the engine level.
    pub fn reset(&mut self) {
        self.word_segments.clear();
        self.char_segments.clear();
        self.added_ids.clear();
        self.deleted_ids.clear();
    }
}

fn load_id_set(store: &impl BlobStore, name: &str) -> Result<HashSet<u32>> {
    let Some(bytes) = store.read(name)? else {
        return Ok(HashSet::new());
    };
    let mut ids = HashSet::new();
    let mut pos = 0usize;
    while pos + 5 <= bytes.len() {
        let id = u32::from_le_bytes(bytes[pos..pos + 4].try_into().unwrap());
        if bytes[pos + 4] != 0x1E {
            break;
        }
        ids.insert(id);
        pos += 5;
    }
    Ok(ids)
}

fn save_id_set(store: &impl BlobStore, name: &str, ids: &HashSet<u32>) -> Result<()> {
    if ids.is_empty() {
        store.remove(name)?;
        return Ok(());
    }
    let mut sorted: Vec<u32> = ids.iter().copied().collect();
    sorted.sort_unstable();

    let mut buf = Vec::with_capacity(sorted.len() * 5);
    for id in sorted {
        buf.extend_from_slice(&id.to_le_bytes());
        buf.push(0x1E);
    }
    store.write(name, &buf)?;
    Ok(())
}
