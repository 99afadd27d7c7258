//! A minimal native-filesystem `BlobStore`, exercising the trait contract
//! against real files rather than the in-memory test double. Concrete
//! blob-storage backends are out of this crate's scope (spec.md §1); this
//! adapter lives in `tests/` purely to prove the trait is implementable
//! the way a caller would, and that the engine round-trips through it.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use lexicon_core::{BlobStore, Document, Engine, EngineConfig, Result};

mod common;

struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        fs::create_dir_all(&root).unwrap();
        FsBlobStore { root }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BlobStore for FsBlobStore {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        fs::write(self.path(name), bytes)?;
        Ok(())
    }

    fn append(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(name))?;
        file.write_all(bytes)?;
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_range(&self, name: &str, start: u64, end: u64) -> Result<Option<Vec<u8>>> {
        let mut file = match fs::File::open(self.path(name)) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let len = file.metadata()?.len();
        let end = end.min(len);
        if start >= len || start >= end {
            return Ok(Some(Vec::new()));
        }
        file.seek(SeekFrom::Start(start))?;
        let mut buf = vec![0u8; (end - start) as usize];
        file.read_exact(&mut buf)?;
        Ok(Some(buf))
    }

    fn size(&self, name: &str) -> Result<u64> {
        match fs::metadata(self.path(name)) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, name: &str) -> Result<()> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn clear_all(&self) -> Result<()> {
        for name in self.list()? {
            self.remove(&name)?;
        }
        Ok(())
    }
}

#[test]
fn engine_round_trips_through_a_real_filesystem_store() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FsBlobStore::new(dir.path());
        let mut engine = Engine::new(store, EngineConfig::default()).unwrap();
        engine.init().unwrap();
        engine
            .add_document(Document::new(1, "filesystem backed search"))
            .unwrap();
        let hits = engine.search("filesystem", None).unwrap();
        assert_eq!(hits.len(), 1);
    }

    // Reopen against the same directory with a fresh engine instance.
    {
        let store = FsBlobStore::new(dir.path());
        let mut engine = Engine::new(store, EngineConfig::default()).unwrap();
        engine.init().unwrap();
        let hits = engine.search("filesystem", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}

#[test]
fn fs_store_read_range_clamps_like_the_contract_requires() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::new(dir.path());
    store.write("a", b"hello world").unwrap();

    assert_eq!(store.read_range("a", 0, 1000).unwrap().unwrap(), b"hello world");
    assert_eq!(store.read_range("a", 6, 11).unwrap().unwrap(), b"world");
    assert!(store.read_range("missing", 0, 10).unwrap().is_none());
    assert_eq!(store.size("missing").unwrap(), 0);
}
