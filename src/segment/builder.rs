//! Builds the in-memory byte buffer for an Index File from a set of
//! tokenized documents. Build is total — the only failures possible are
//! blob-store I/O, which happen after this step when the buffer is written.

use std::collections::HashMap;

use crate::cache::TokenizedDoc;
use crate::hash::{HashWidth, TokenHash};
use crate::segment::format::{DictEntry, IndexHeader};

/// One dictionary bucket while the segment is being assembled: every
/// distinct token maps to the hash used for ordering and its (ordered,
/// deduped) doc-id postings list.
struct Bucket {
    hash: u64,
    postings: Vec<u32>,
}

/// Build the full byte image of an Index File for `docs` using `hasher`.
///
/// 1. Per document, tokens are deduped before bucketing (a token
///    contributes at most one posting per document).
/// 2. Buckets are sorted by `(hash asc, tokenBytes asc)`.
/// 3. Offsets for dictionary / postings / tokens regions are computed, then
///    the whole buffer is emitted in one pass.
pub fn build_and_save(docs: &[TokenizedDoc], hasher: &dyn TokenHash) -> Vec<u8> {
    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for doc in docs {
        let mut seen = std::collections::HashSet::new();
        for token in &doc.tokens {
            if !seen.insert(token.as_str()) {
                continue;
            }
            let bucket = buckets.entry(token.clone()).or_insert_with(|| Bucket {
                hash: hasher.hash(token),
                postings: Vec::new(),
            });
            if bucket.postings.last() != Some(&doc.id) {
                bucket.postings.push(doc.id);
            }
        }
    }

    let mut entries: Vec<(String, Bucket)> = buckets.into_iter().collect();
    entries.sort_by(|(tok_a, bucket_a), (tok_b, bucket_b)| {
        bucket_a
            .hash
            .cmp(&bucket_b.hash)
            .then_with(|| tok_a.as_bytes().cmp(tok_b.as_bytes()))
    });

    let width = hasher.width();
    let entry_count = entries.len() as u32;
    let header_size = IndexHeader::header_size(width);
    let dict_size = entries.len() * DictEntry::record_size(width);
    let postings_total: usize = entries.iter().map(|(_, b)| b.postings.len()).sum();
    let postings_region_size = postings_total * 4;
    let postings_region_offset = header_size + dict_size;
    let tokens_region_offset = postings_region_offset + postings_region_size;

    let mut dict_entries = Vec::with_capacity(entries.len());
    let mut postings_buf = Vec::with_capacity(postings_region_size);
    let mut tokens_buf = Vec::new();
    let mut running_postings_offset = 0u32;
    let mut running_token_offset = 0u32;

    for (token, bucket) in &entries {
        let token_bytes = token.as_bytes();
        dict_entries.push(DictEntry {
            hash: bucket.hash,
            token_byte_len: token_bytes.len() as u32,
            token_offset: running_token_offset,
            postings_offset: running_postings_offset,
            postings_len: bucket.postings.len() as u32,
        });

        for &id in &bucket.postings {
            postings_buf.extend_from_slice(&id.to_le_bytes());
        }
        running_postings_offset += bucket.postings.len() as u32;

        tokens_buf.extend_from_slice(token_bytes);
        tokens_buf.push(0u8);
        running_token_offset += token_bytes.len() as u32 + 1;
    }

    let header = IndexHeader {
        entry_count,
        tokens_region_offset: tokens_region_offset as u32,
        width,
    };

    let mut out = Vec::with_capacity(tokens_region_offset + tokens_buf.len());
    header.write_to(&mut out).expect("writing to a Vec cannot fail");
    for entry in &dict_entries {
        entry
            .write_to(&mut out, width)
            .expect("writing to a Vec cannot fail");
    }
    out.extend_from_slice(&postings_buf);
    out.extend_from_slice(&tokens_buf);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Murmur3_64;
    use crate::segment::query::Segment;

    #[test]
    fn build_then_load_answers_match_direct_computation() {
        let docs = vec![
            TokenizedDoc::new(1, vec!["hello".into(), "world".into()]),
            TokenizedDoc::new(2, vec!["hello".into(), "there".into()]),
        ];
        let bytes = build_and_save(&docs, &Murmur3_64);
        let segment = Segment::load(&bytes, "seg", HashWidth::W64).unwrap();

        assert_eq!(segment.search("hello", &Murmur3_64), vec![1, 2]);
        assert_eq!(segment.search("world", &Murmur3_64), vec![1]);
        assert_eq!(segment.search("there", &Murmur3_64), vec![2]);
        assert_eq!(segment.search("nope", &Murmur3_64), Vec::<u32>::new());
    }

    #[test]
    fn dedupes_tokens_within_one_document() {
        let docs = vec![TokenizedDoc::new(1, vec!["a".into(), "a".into(), "a".into()])];
        let bytes = build_and_save(&docs, &Murmur3_64);
        let segment = Segment::load(&bytes, "seg", HashWidth::W64).unwrap();
        assert_eq!(segment.search("a", &Murmur3_64), vec![1]);
    }

    #[test]
    fn dictionary_is_sorted_by_hash_then_token_bytes() {
        let docs = vec![TokenizedDoc::new(
            1,
            vec!["zebra".into(), "apple".into(), "mango".into()],
        )];
        let bytes = build_and_save(&docs, &Murmur3_64);
        let segment = Segment::load(&bytes, "seg", HashWidth::W64).unwrap();
        assert!(segment.dictionary_is_sorted());
    }

    #[test]
    fn empty_docs_produce_a_loadable_empty_segment() {
        let bytes = build_and_save(&[], &Murmur3_64);
        let segment = Segment::load(&bytes, "seg", HashWidth::W64).unwrap();
        assert_eq!(segment.search("anything", &Murmur3_64), Vec::<u32>::new());
    }
}
