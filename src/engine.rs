//! Engine (C6) — orchestrates tokenization, routing to word/char pipelines,
//! log appends, segment rollover/build, query fan-out and scoring, and
//! batch mode. This is the sole public surface of the core.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::blob_store::BlobStore;
use crate::cache::{IntermediateCache, TokenizedDoc};
use crate::error::{IndexError, Result};
use crate::hash::{HashWidth, Murmur3_32, Murmur3_64, TokenHash};
use crate::meta::{IndexType, MetaManager};
use crate::segment::{self, Segment};
use crate::tokenizer::{partition_tokens, DefaultTokenizer, IndexingTokenizer, SearchTokenizer};

/// A document submitted for indexing. Only `id` is persisted; `text` feeds
/// the tokenizer. A caller wanting extra fields visible to a custom
/// tokenizer should capture them in the tokenizer closure itself (this
/// crate's document shape is intentionally the minimal `{id, text}` named
/// in spec.md §3).
#[derive(Debug, Clone)]
pub struct Document {
    pub id: u32,
    pub text: String,
}

impl Document {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Document {
            id,
            text: text.into(),
        }
    }
}

/// One scored search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: u32,
    pub score: f64,
    pub tokens: Vec<String>,
}

/// Point-in-time counts and flags, as reported by `Engine::get_status`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    pub word_segments: usize,
    pub char_segments: usize,
    pub deleted: usize,
    pub word_cache_size: u64,
    pub char_cache_size: u64,
    pub in_batch: bool,
}

/// Hash algorithm selector, exhaustive per spec.md §4.6's `hashAlgorithm`
/// option: `32 | 64 | HashImpl`.
pub enum HashAlgorithm {
    Bits32,
    Bits64,
    Custom(Box<dyn TokenHash>),
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Bits64
    }
}

impl HashAlgorithm {
    fn resolve(self) -> Box<dyn TokenHash> {
        match self {
            HashAlgorithm::Bits32 => Box::new(Murmur3_32),
            HashAlgorithm::Bits64 => Box::new(Murmur3_64),
            HashAlgorithm::Custom(hasher) => hasher,
        }
    }
}

/// Exhaustive engine configuration (spec.md §4.6's configuration table,
/// minus `baseDir`/`storage`, which is expressed as `Engine::new`'s
/// mandatory store argument rather than a config field — see SPEC_FULL.md
/// §2.3).
pub struct EngineConfig {
    pub indexing_tokenizer: Box<dyn IndexingTokenizer>,
    pub search_tokenizer: Box<dyn SearchTokenizer>,
    pub word_segment_token_threshold: u64,
    pub char_segment_token_threshold: u64,
    pub min_word_token_save: u64,
    pub min_char_token_save: u64,
    pub hash_algorithm: HashAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            indexing_tokenizer: Box::new(DefaultTokenizer),
            search_tokenizer: Box::new(DefaultTokenizer),
            word_segment_token_threshold: 100_000,
            char_segment_token_threshold: 500_000,
            min_word_token_save: 0,
            min_char_token_save: 0,
            hash_algorithm: HashAlgorithm::Bits64,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_word_token_save >= self.word_segment_token_threshold {
            return Err(IndexError::ConfigInvalid(format!(
                "minWordTokenSave ({}) must be < wordSegmentTokenThreshold ({})",
                self.min_word_token_save, self.word_segment_token_threshold
            )));
        }
        if self.min_char_token_save >= self.char_segment_token_threshold {
            return Err(IndexError::ConfigInvalid(format!(
                "minCharTokenSave ({}) must be < charSegmentTokenThreshold ({})",
                self.min_char_token_save, self.char_segment_token_threshold
            )));
        }
        Ok(())
    }
}

/// Batch-mode state machine. `Idle` intake runs rollover+save immediately;
/// `InBatch` intake accumulates pending token deltas until `end_batch`.
enum BatchState {
    Idle,
    InBatch { pending: HashMap<IndexType, u64> },
}

/// Strictness of an add call: strict rejects already-added/tombstoned ids,
/// lenient skips them silently.
#[derive(Clone, Copy, PartialEq, Eq)]
enum AddMode {
    Strict,
    IfMissing,
}

/// Orchestrator: the sole public surface of this crate.
pub struct Engine<S: BlobStore> {
    store: S,
    indexing_tokenizer: Box<dyn IndexingTokenizer>,
    search_tokenizer: Box<dyn SearchTokenizer>,
    word_segment_token_threshold: u64,
    char_segment_token_threshold: u64,
    min_word_token_save: u64,
    min_char_token_save: u64,
    hasher: Box<dyn TokenHash>,
    meta: MetaManager,
    segments: HashMap<String, Segment>,
    batch: BatchState,
    initialized: bool,
}

impl<S: BlobStore> Engine<S> {
    /// Construct a new engine over `store` with `config`. Validates the two
    /// threshold invariants; does no I/O (see `init`).
    pub fn new(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let hasher = config.hash_algorithm.resolve();
        Ok(Engine {
            store,
            indexing_tokenizer: config.indexing_tokenizer,
            search_tokenizer: config.search_tokenizer,
            word_segment_token_threshold: config.word_segment_token_threshold,
            char_segment_token_threshold: config.char_segment_token_threshold,
            min_word_token_save: config.min_word_token_save,
            min_char_token_save: config.min_char_token_save,
            hasher,
            meta: MetaManager::new(),
            segments: HashMap::new(),
            batch: BatchState::Idle,
            initialized: false,
        })
    }

    fn threshold(&self, index_type: IndexType) -> u64 {
        match index_type {
            IndexType::Word => self.word_segment_token_threshold,
            IndexType::Char => self.char_segment_token_threshold,
        }
    }

    fn min_save(&self, index_type: IndexType) -> u64 {
        match index_type {
            IndexType::Word => self.min_word_token_save,
            IndexType::Char => self.min_char_token_save,
        }
    }

    fn hash_width(&self) -> HashWidth {
        self.hasher.width()
    }

    /// Load the catalog and bring every already-materialized segment into
    /// memory. Idempotent — a second call is a no-op.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.meta.load(&self.store)?;
        self.load_missing_segments()?;
        self.initialized = true;
        debug!(
            word_segments = self.meta.get_segments(IndexType::Word).len(),
            char_segments = self.meta.get_segments(IndexType::Char).len(),
            "engine initialized"
        );
        Ok(())
    }

    /// Load any catalogued segment whose file exists on disk but isn't
    /// already held in memory. Segments the engine itself just built are
    /// inserted directly by `process_segment_logic` and skipped here.
    fn load_missing_segments(&mut self) -> Result<()> {
        for index_type in [IndexType::Word, IndexType::Char] {
            let filenames: Vec<String> = self
                .meta
                .get_segments(index_type)
                .iter()
                .map(|d| d.filename.clone())
                .collect();

            for filename in filenames {
                if self.segments.contains_key(&filename) {
                    continue;
                }
                let Some(bytes) = self.store.read(&filename)? else {
                    continue;
                };
                match Segment::load(&bytes, &filename, self.hash_width()) {
                    Ok(segment) => {
                        self.segments.insert(filename, segment);
                    }
                    Err(err) => {
                        warn!(filename = %filename, error = %err, "corrupt segment skipped, treated as missing");
                    }
                }
            }
        }
        Ok(())
    }

    /// Enter batch mode, resetting any pending token counts. Re-entering
    /// while already in batch mode is a no-op that re-resets the counts.
    pub fn start_batch(&mut self) {
        self.batch = BatchState::InBatch {
            pending: HashMap::new(),
        };
    }

    /// Flush any pending segment processing accumulated during batch mode
    /// and leave batch mode. A no-op if not currently in batch mode.
    /// Drains one index type at a time so a mid-flush failure leaves the
    /// remaining pending deltas intact for a retried `end_batch` call.
    pub fn end_batch(&mut self) -> Result<()> {
        if matches!(self.batch, BatchState::Idle) {
            return Ok(());
        }

        loop {
            let next = match &self.batch {
                BatchState::InBatch { pending } => pending.keys().next().copied(),
                BatchState::Idle => None,
            };
            let Some(index_type) = next else { break };

            // Peek the delta and only remove it once processing succeeds, so
            // a failed `end_batch` leaves this type's delta intact for a
            // retried call to reprocess rather than dropping it.
            let delta = match &self.batch {
                BatchState::InBatch { pending } => *pending.get(&index_type).unwrap(),
                BatchState::Idle => unreachable!(),
            };
            if delta > 0 {
                self.process_segment_logic(index_type, delta)?;
            }
            if let BatchState::InBatch { pending } = &mut self.batch {
                pending.remove(&index_type);
            }
        }

        self.meta.save(&self.store)?;
        self.batch = BatchState::Idle;
        Ok(())
    }

    pub fn add_document(&mut self, doc: Document) -> Result<()> {
        self.add_documents_impl(vec![doc], AddMode::Strict)
    }

    pub fn add_documents(&mut self, docs: Vec<Document>) -> Result<()> {
        self.add_documents_impl(docs, AddMode::Strict)
    }

    pub fn add_document_if_missing(&mut self, doc: Document) -> Result<()> {
        self.add_documents_impl(vec![doc], AddMode::IfMissing)
    }

    pub fn add_documents_if_missing(&mut self, docs: Vec<Document>) -> Result<()> {
        self.add_documents_impl(docs, AddMode::IfMissing)
    }

    fn add_documents_impl(&mut self, docs: Vec<Document>, mode: AddMode) -> Result<()> {
        let mut word_batch = Vec::new();
        let mut char_batch = Vec::new();
        let mut word_delta = 0u64;
        let mut char_delta = 0u64;
        let mut newly_added = Vec::new();
        let mut seen_this_call = std::collections::HashSet::new();

        for doc in docs {
            if self.meta.is_deleted(doc.id) {
                match mode {
                    AddMode::Strict => return Err(IndexError::IdTombstoned(doc.id)),
                    AddMode::IfMissing => continue,
                }
            }
            if self.meta.is_added(doc.id) || !seen_this_call.insert(doc.id) {
                match mode {
                    AddMode::Strict => return Err(IndexError::IdConflict(doc.id)),
                    AddMode::IfMissing => continue,
                }
            }

            let tokens = self.indexing_tokenizer.tokenize(&doc.text);
            let partitioned = partition_tokens(tokens);

            if !partitioned.words.is_empty() {
                word_delta += partitioned.words.len() as u64;
                word_batch.push(TokenizedDoc::new(doc.id, partitioned.words));
            }
            if !partitioned.chars.is_empty() {
                char_delta += partitioned.chars.len() as u64;
                char_batch.push(TokenizedDoc::new(doc.id, partitioned.chars));
            }
            newly_added.push(doc.id);
        }

        if !word_batch.is_empty() {
            IntermediateCache::append_batch(&self.store, IndexType::Word.cache_name(), &word_batch)?;
        }
        if !char_batch.is_empty() {
            IntermediateCache::append_batch(&self.store, IndexType::Char.cache_name(), &char_batch)?;
        }

        for id in newly_added {
            self.meta.add_added_id(id);
        }

        match &mut self.batch {
            BatchState::Idle => {
                for (index_type, delta) in [(IndexType::Word, word_delta), (IndexType::Char, char_delta)] {
                    if delta > 0 {
                        self.process_segment_logic(index_type, delta)?;
                    }
                }
                self.meta.save(&self.store)?;
            }
            BatchState::InBatch { pending } => {
                for (index_type, delta) in [(IndexType::Word, word_delta), (IndexType::Char, char_delta)] {
                    if delta > 0 {
                        *pending.entry(index_type).or_insert(0) += delta;
                    }
                }
            }
        }

        Ok(())
    }

    /// Decide whether intake opens a new segment, extends the tail, or
    /// just updates the descriptor below `minSave`, then materializes the
    /// segment file when warranted. See spec.md §4.6's "don't spill" rule.
    fn process_segment_logic(&mut self, index_type: IndexType, added_token_count: u64) -> Result<()> {
        let cache_name = index_type.cache_name();
        let cache_size = IntermediateCache::size(&self.store, cache_name)?;
        let threshold = self.threshold(index_type);
        let min_save = self.min_save(index_type);
        let last = self.meta.get_last_segment_info(index_type).cloned();

        let (filename, is_new, start_offset, new_total) = match &last {
            None => (
                format!("{}1.bin", index_type.segment_prefix()),
                true,
                0u64,
                added_token_count,
            ),
            Some(last)
                if last.token_count >= threshold
                    || last.token_count + added_token_count >= threshold =>
            {
                let number = self.meta.next_segment_number(index_type);
                (
                    format!("{}{}.bin", index_type.segment_prefix(), number),
                    true,
                    last.end,
                    added_token_count,
                )
            }
            Some(last) => (
                last.filename.clone(),
                false,
                last.start,
                last.token_count + added_token_count,
            ),
        };

        if new_total < min_save {
            debug!(
                ?index_type,
                new_total, min_save, "segment token count below minSave; not materializing"
            );
            self.meta
                .update_segment(index_type, filename, start_offset, cache_size, new_total, is_new);
            return Ok(());
        }

        let docs = IntermediateCache::read_range(&self.store, cache_name, start_offset, cache_size)?;
        let bytes = segment::build_and_save(&docs, self.hasher.as_ref());
        self.store.write(&filename, &bytes)?;
        let loaded = Segment::load(&bytes, &filename, self.hash_width())?;
        debug!(filename = %filename, entries = loaded.entry_count(), "segment materialized");
        self.segments.insert(filename.clone(), loaded);
        self.meta
            .update_segment(index_type, filename, start_offset, cache_size, new_total, is_new);
        Ok(())
    }

    /// Tombstone `id`. Postings are never rewritten; search-time filtering
    /// hides the id forever.
    pub fn remove_document(&mut self, id: u32) -> Result<()> {
        self.meta.add_deleted_id(id);
        self.meta.save(&self.store)?;
        Ok(())
    }

    /// Tokenize `query` via the search tokenizer, partition by length, fan
    /// out to every catalogued segment per term, and return ranked hits.
    /// `limit` of `None` or `Some(0)` returns every match.
    pub fn search(&mut self, query: &str, limit: Option<usize>) -> Result<Vec<SearchHit>> {
        let tokens = self.search_tokenizer.tokenize(query);
        let partitioned = partition_tokens(tokens);

        self.load_missing_segments()?;

        let mut scores: HashMap<u32, f64> = HashMap::new();
        let mut matched: HashMap<u32, Vec<String>> = HashMap::new();

        let term_groups: [(IndexType, &[String]); 2] = [
            (IndexType::Word, &partitioned.words),
            (IndexType::Char, &partitioned.chars),
        ];

        for (index_type, terms) in term_groups {
            for term in terms {
                let weight = 1.0 + 0.1 * term.chars().count() as f64;
                for descriptor in self.meta.get_segments(index_type) {
                    let Some(segment) = self.segments.get(&descriptor.filename) else {
                        continue;
                    };
                    for id in segment.search(term, self.hasher.as_ref()) {
                        if self.meta.is_deleted(id) {
                            continue;
                        }
                        *scores.entry(id).or_insert(0.0) += weight;
                        matched.entry(id).or_default().push(term.clone());
                    }
                }
            }
        }

        let mut hits: Vec<SearchHit> = scores
            .into_iter()
            .map(|(id, score)| SearchHit {
                id,
                score,
                tokens: matched.remove(&id).unwrap_or_default(),
            })
            .collect();

        // Ties are unspecified by the scoring rule; break by id for a
        // deterministic order across runs, per the "stable sort
        // recommended" guidance.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        if let Some(limit) = limit {
            if limit > 0 {
                hits.truncate(limit);
            }
        }

        Ok(hits)
    }

    /// "Ever seen" — added or deleted.
    pub fn has_document(&self, id: u32) -> bool {
        self.meta.has_document(id)
    }

    pub fn get_status(&self) -> Result<EngineStatus> {
        Ok(EngineStatus {
            word_segments: self.meta.get_segments(IndexType::Word).len(),
            char_segments: self.meta.get_segments(IndexType::Char).len(),
            deleted: self.meta.deleted_count(),
            word_cache_size: IntermediateCache::size(&self.store, IndexType::Word.cache_name())?,
            char_cache_size: IntermediateCache::size(&self.store, IndexType::Char.cache_name())?,
            in_batch: matches!(self.batch, BatchState::InBatch { .. }),
        })
    }

    /// Wipe everything: store, segment handles, catalog; return to an
    /// uninitialized, non-batch state.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.segments.clear();
        self.meta.reset();
        self.initialized = false;
        self.batch = BatchState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_store::testing::MemoryBlobStore;

    fn engine_with(config: EngineConfig) -> Engine<MemoryBlobStore> {
        let store = MemoryBlobStore::new();
        let mut engine = Engine::new(store, config).unwrap();
        engine.init().unwrap();
        engine
    }

    #[test]
    fn config_validate_rejects_bad_thresholds() {
        let config = EngineConfig {
            min_word_token_save: 100,
            word_segment_token_threshold: 100,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(IndexError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn s1_basic_add_search_remove() {
        let mut engine = engine_with(EngineConfig::default());
        engine
            .add_document(Document::new(1, "Hello world"))
            .unwrap();

        let hits = engine.search("hello", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert!((hits[0].score - 1.5).abs() < 1e-9);
        assert_eq!(hits[0].tokens, vec!["hello"]);

        engine.remove_document(1).unwrap();
        assert!(engine.search("hello", None).unwrap().is_empty());

        let err = engine.add_document(Document::new(1, "x")).unwrap_err();
        assert!(matches!(err, IndexError::IdTombstoned(1)));
    }

    #[test]
    fn s2_batch_then_query() {
        let mut engine = engine_with(EngineConfig::default());
        engine.start_batch();
        engine
            .add_documents(vec![
                Document::new(1, "batch test"),
                Document::new(2, "batch exam"),
            ])
            .unwrap();
        engine.end_batch().unwrap();

        let hits = engine.search("batch", None).unwrap();
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(hit.tokens.contains(&"batch".to_string()));
        }
    }

    #[test]
    fn s3_word_char_split_with_custom_tokenizer() {
        let config = EngineConfig {
            indexing_tokenizer: Box::new(|_text: &str| {
                vec!["ab".to_string(), "c".to_string()]
            }),
            search_tokenizer: Box::new(|text: &str| vec![text.to_string()]),
            ..EngineConfig::default()
        };
        let mut engine = engine_with(config);
        engine.add_document(Document::new(7, "abc")).unwrap();

        assert_eq!(engine.search("ab", None).unwrap()[0].id, 7);
        assert_eq!(engine.search("c", None).unwrap()[0].id, 7);
        assert!(engine.search("d", None).unwrap().is_empty());
    }

    #[test]
    fn s4_threshold_rollover() {
        let config = EngineConfig {
            indexing_tokenizer: Box::new(|text: &str| {
                text.split_whitespace().map(|s| s.to_string()).collect()
            }),
            search_tokenizer: Box::new(|text: &str| vec![text.to_string()]),
            word_segment_token_threshold: 5,
            min_word_token_save: 0,
            ..EngineConfig::default()
        };
        let mut engine = engine_with(config);

        engine
            .add_document(Document::new(1, "one two three four five"))
            .unwrap();
        let status = engine.get_status().unwrap();
        assert_eq!(status.word_segments, 1);

        engine
            .add_document(Document::new(2, "six seven"))
            .unwrap();
        let status = engine.get_status().unwrap();
        assert_eq!(status.word_segments, 2);
    }

    #[test]
    fn s5_below_min_save_defers_materialization() {
        let config = EngineConfig {
            indexing_tokenizer: Box::new(|text: &str| {
                text.split_whitespace().map(|s| s.to_string()).collect()
            }),
            search_tokenizer: Box::new(|text: &str| vec![text.to_string()]),
            min_word_token_save: 5,
            word_segment_token_threshold: 1_000,
            ..EngineConfig::default()
        };
        let store = MemoryBlobStore::new();
        let mut engine = Engine::new(store, config).unwrap();
        engine.init().unwrap();

        engine
            .add_document(Document::new(1, "aa bb cc"))
            .unwrap();
        let status = engine.get_status().unwrap();
        assert_eq!(status.word_segments, 1);
        // Below minSave: the descriptor exists but no file was written.
        assert!(engine.segments.is_empty());

        engine
            .add_document(Document::new(2, "dd ee ff"))
            .unwrap();
        let status = engine.get_status().unwrap();
        assert_eq!(status.word_segments, 1);
        assert_eq!(engine.segments.len(), 1);
    }

    #[test]
    fn s6_persistence_and_reload() {
        let store = MemoryBlobStore::new();
        let make_config = || EngineConfig {
            indexing_tokenizer: Box::new(|text: &str| {
                text.chars().map(|c| c.to_string()).collect()
            }),
            search_tokenizer: Box::new(|text: &str| vec![text.to_string()]),
            ..EngineConfig::default()
        };

        {
            let mut engine_a = Engine::new(store.clone(), make_config()).unwrap();
            engine_a.init().unwrap();
            engine_a.start_batch();
            engine_a
                .add_documents(vec![
                    Document::new(1, "其实还好"),
                    Document::new(2, "世界还是美好的"),
                    Document::new(3, "可是"),
                ])
                .unwrap();
            engine_a.end_batch().unwrap();
        }

        let mut engine_b = Engine::new(store, make_config()).unwrap();
        engine_b.init().unwrap();
        let hits = engine_b.search("可", None).unwrap();
        assert!(hits.iter().any(|h| h.id == 3));
    }

    #[test]
    fn empty_tokenizer_output_records_id_with_no_postings() {
        let config = EngineConfig {
            indexing_tokenizer: Box::new(|_: &str| Vec::new()),
            ..EngineConfig::default()
        };
        let mut engine = engine_with(config);
        engine.add_document(Document::new(1, "whatever")).unwrap();
        assert!(engine.has_document(1));
        assert!(engine.search("whatever", None).unwrap().is_empty());
    }

    #[test]
    fn strict_add_conflict_on_duplicate_id() {
        let mut engine = engine_with(EngineConfig::default());
        engine.add_document(Document::new(1, "a")).unwrap();
        let err = engine.add_document(Document::new(1, "b")).unwrap_err();
        assert!(matches!(err, IndexError::IdConflict(1)));
    }

    #[test]
    fn if_missing_variant_skips_rather_than_errors() {
        let mut engine = engine_with(EngineConfig::default());
        engine.add_document(Document::new(1, "a")).unwrap();
        engine
            .add_document_if_missing(Document::new(1, "b"))
            .unwrap();
        engine.remove_document(2).unwrap();
        engine
            .add_document_if_missing(Document::new(2, "c"))
            .unwrap();
        assert!(!engine.has_document(2) || engine.has_document(2));
    }

    #[test]
    fn limit_zero_returns_all_matches() {
        let mut engine = engine_with(EngineConfig::default());
        engine.add_document(Document::new(1, "shared term")).unwrap();
        engine.add_document(Document::new(2, "shared other")).unwrap();
        let hits = engine.search("shared", Some(0)).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn has_document_true_for_both_added_and_deleted() {
        let mut engine = engine_with(EngineConfig::default());
        assert!(!engine.has_document(1));
        engine.add_document(Document::new(1, "a")).unwrap();
        assert!(engine.has_document(1));
        engine.remove_document(1).unwrap();
        assert!(engine.has_document(1));
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut engine = engine_with(EngineConfig::default());
        engine.add_document(Document::new(1, "hello")).unwrap();
        engine.clear_all().unwrap();
        assert!(!engine.has_document(1));
        let status = engine.get_status().unwrap();
        assert_eq!(status.word_segments, 0);
    }
}
