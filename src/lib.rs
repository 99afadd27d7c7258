//! `lexicon-core` — an embeddable full-text indexing and retrieval core.
//!
//! This crate accepts numbered documents, tokenizes them, persists a
//! segmented inverted index behind a narrow [`blob_store::BlobStore`]
//! abstraction, and answers term-set queries with ranked document ids. It
//! is designed for environments without a server: every concrete storage
//! backend, the tokenizer itself, and any default-instance facade are
//! external collaborators this crate only speaks an interface to.
//!
//! Start with [`engine::Engine`]: construct one over anything implementing
//! [`blob_store::BlobStore`], call [`engine::Engine::init`], then
//! `add_document`/`search`/`remove_document` as needed.
//!
//! Out of scope here (see spec'd Non-goals): positional/phrase search,
//! TF-IDF/BM25 scoring, concurrent writers against one base directory,
//! segment compaction, and in-place document updates.

pub mod blob_store;
pub mod cache;
pub mod engine;
pub mod error;
pub mod hash;
pub mod meta;
pub mod segment;
pub mod tokenizer;

pub use blob_store::BlobStore;
pub use engine::{Document, Engine, EngineConfig, EngineStatus, HashAlgorithm, SearchHit};
pub use error::{IndexError, Result};
