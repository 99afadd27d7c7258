//! Loads an Index File and answers `search(term)` against it.
//!
//! The dictionary is sorted by `(hash, tokenBytes)`; a binary search on
//! `hash` lands somewhere inside the (possibly length-1) run of colliding
//! entries, which is then walked linearly to find the exact token.

use crate::error::Result;
use crate::hash::{HashWidth, TokenHash};
use crate::segment::format::{DictEntry, IndexHeader};

/// A single loaded, immutable inverted file. Holds its full byte buffer in
/// memory and indexes into it; this crate does not mandate an eviction
/// policy (callers may drop a `Segment` to reclaim its memory).
pub struct Segment {
    header: IndexHeader,
    entries: Vec<DictEntry>,
    postings: Vec<u8>,
    tokens: Vec<u8>,
}

impl Segment {
    /// Build from tokenized documents and return the ready-to-persist byte
    /// image plus the live, already-loaded segment — the caller still owns
    /// writing the bytes via the blob store.
    pub fn build(docs: &[crate::cache::TokenizedDoc], hasher: &dyn TokenHash) -> (Vec<u8>, Segment) {
        let bytes = crate::segment::builder::build_and_save(docs, hasher);
        let segment = Segment::load(&bytes, "<build>", hasher.width())
            .expect("freshly built segment must load");
        (bytes, segment)
    }

    /// Parse a full Index File byte buffer with an explicit expected hash
    /// width (the width an `Engine` instance is configured with). There is
    /// deliberately no width-defaulting convenience here: a caller hashing
    /// with `Murmur3_32` but loading with the 64-bit default would silently
    /// misparse every record, per spec.md §9 Open Question 4.
    pub fn load(bytes: &[u8], name: &str, width: HashWidth) -> Result<Segment> {
        let mut cursor = bytes;
        let header = IndexHeader::read_from(&mut cursor, width, name)?;

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        for _ in 0..header.entry_count {
            entries.push(DictEntry::read_from(&mut cursor, width)?);
        }

        let header_size = IndexHeader::header_size(width);
        let dict_size = entries.len() * DictEntry::record_size(width);
        let postings_region_start = header_size + dict_size;
        let tokens_region_start = header.tokens_region_offset as usize;

        let postings = bytes
            .get(postings_region_start..tokens_region_start)
            .unwrap_or(&[])
            .to_vec();
        let tokens = bytes.get(tokens_region_start..).unwrap_or(&[]).to_vec();

        Ok(Segment {
            header,
            entries,
            postings,
            tokens,
        })
    }

    pub fn entry_count(&self) -> u32 {
        self.header.entry_count
    }

    pub fn width(&self) -> HashWidth {
        self.header.width
    }

    /// Search for an exact token. Computes `hash(term)` with `hasher`,
    /// binary-searches the dictionary, then walks the colliding run (if
    /// any) comparing raw UTF-8 bytes to find the exact entry.
    pub fn search(&self, term: &str, hasher: &dyn TokenHash) -> Vec<u32> {
        let h = hasher.hash(term);
        let Ok(found_idx) = self.entries.binary_search_by_key(&h, |e| e.hash) else {
            return Vec::new();
        };

        // Fast path: neither neighbor shares this hash, so the found entry
        // is the only candidate — no need to compare token bytes.
        let prev_shares = found_idx > 0 && self.entries[found_idx - 1].hash == h;
        let next_shares =
            found_idx + 1 < self.entries.len() && self.entries[found_idx + 1].hash == h;
        if !prev_shares && !next_shares {
            return self.postings_for(&self.entries[found_idx]);
        }

        // Walk backward to the first entry in the colliding run.
        let mut run_start = found_idx;
        while run_start > 0 && self.entries[run_start - 1].hash == h {
            run_start -= 1;
        }

        let term_bytes = term.as_bytes();
        let mut i = run_start;
        while i < self.entries.len() && self.entries[i].hash == h {
            if self.token_bytes(&self.entries[i]) == term_bytes {
                return self.postings_for(&self.entries[i]);
            }
            i += 1;
        }

        Vec::new()
    }

    fn token_bytes(&self, entry: &DictEntry) -> &[u8] {
        let start = entry.token_offset as usize;
        let end = start + entry.token_byte_len as usize;
        self.tokens.get(start..end).unwrap_or(&[])
    }

    fn postings_for(&self, entry: &DictEntry) -> Vec<u32> {
        let start = entry.postings_offset as usize * 4;
        let count = entry.postings_len as usize;
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let off = start + i * 4;
            if let Some(slice) = self.postings.get(off..off + 4) {
                out.push(u32::from_le_bytes(slice.try_into().unwrap()));
            }
        }
        out
    }

    /// Exposed for property tests (spec.md §8's dictionary sort-order
    /// invariant); not part of the crate's stable public surface beyond
    /// that use.
    #[cfg(any(test, feature = "test-util"))]
    pub fn dictionary_is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| {
            let (a, b) = (&w[0], &w[1]);
            if a.hash != b.hash {
                a.hash < b.hash
            } else {
                self.token_bytes(a) <= self.token_bytes(b)
            }
        })
    }
}
