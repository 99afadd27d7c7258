//! Binary layout of an Index File: header, sorted dictionary, postings
//! region, tokens region. All multi-byte integers are little-endian.
//!
//! ```text
//! [header][dictionary: entryCount records][postings: Σ postingsLen × u32][tokens: utf8 + 0x00]*
//! ```
//!
//! The dictionary is sorted by `(hash asc, tokenBytes asc)`; collisions on
//! `hash` form a contiguous run that `segment::query` walks linearly.

use std::io::{self, Read, Write};

use crate::error::{IndexError, Result};
use crate::hash::HashWidth;

/// Magic number stamped at the start of every Index File ("INDX").
pub const MAGIC: u32 = 0x494E_4458;

/// Tag written in the 64-bit header's width field.
const HASH_WIDTH_TAG_64: u32 = 64;

/// On-disk header. 16 bytes for the 64-bit variant, 12 for the 32-bit
/// variant (the width tag is only present on the 64-bit header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub entry_count: u32,
    pub tokens_region_offset: u32,
    pub width: HashWidth,
}

impl IndexHeader {
    pub fn header_size(width: HashWidth) -> usize {
        match width {
            HashWidth::W32 => 12,
            HashWidth::W64 => 16,
        }
    }

    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&MAGIC.to_le_bytes())?;
        w.write_all(&self.entry_count.to_le_bytes())?;
        w.write_all(&self.tokens_region_offset.to_le_bytes())?;
        if self.width == HashWidth::W64 {
            w.write_all(&HASH_WIDTH_TAG_64.to_le_bytes())?;
        }
        Ok(())
    }

    /// Read a header of the given expected width. The width is supplied by
    /// the caller (a segment inherits its engine's configured hash
    /// algorithm) rather than sniffed from file size, per the single-width-
    /// per-engine-instance design: the 64-bit tag is still checked as a
    /// defense against opening a directory built by a differently
    /// configured engine.
    pub fn read_from(r: &mut impl Read, width: HashWidth, name: &str) -> Result<Self> {
        let mut magic_buf = [0u8; 4];
        r.read_exact(&mut magic_buf)
            .map_err(|_| IndexError::corrupt(name, "truncated header"))?;
        let magic = u32::from_le_bytes(magic_buf);
        if magic != MAGIC {
            return Err(IndexError::corrupt(
                name,
                format!("bad magic: expected {MAGIC:#x}, found {magic:#x}"),
            ));
        }

        let mut u32_buf = [0u8; 4];
        r.read_exact(&mut u32_buf)
            .map_err(|_| IndexError::corrupt(name, "truncated header"))?;
        let entry_count = u32::from_le_bytes(u32_buf);

        r.read_exact(&mut u32_buf)
            .map_err(|_| IndexError::corrupt(name, "truncated header"))?;
        let tokens_region_offset = u32::from_le_bytes(u32_buf);

        if width == HashWidth::W64 {
            r.read_exact(&mut u32_buf)
                .map_err(|_| IndexError::corrupt(name, "truncated 64-bit width tag"))?;
            let tag = u32::from_le_bytes(u32_buf);
            if tag != HASH_WIDTH_TAG_64 {
                return Err(IndexError::corrupt(
                    name,
                    format!("hash-width tag mismatch: expected {HASH_WIDTH_TAG_64}, found {tag}"),
                ));
            }
        }

        Ok(IndexHeader {
            entry_count,
            tokens_region_offset,
            width,
        })
    }
}

/// One dictionary record. `hash` is always carried as `u64` in memory;
/// the 32-bit on-disk variant truncates it to `u32` on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictEntry {
    pub hash: u64,
    pub token_byte_len: u32,
    pub token_offset: u32,
    pub postings_offset: u32,
    pub postings_len: u32,
}

impl DictEntry {
    /// On-disk record size: 20 B for the 32-bit variant, 28 B for the
    /// 64-bit variant (a 4-byte reserved field pads the 64-bit record to
    /// that size).
    pub fn record_size(width: HashWidth) -> usize {
        match width {
            HashWidth::W32 => 20,
            HashWidth::W64 => 28,
        }
    }

    pub fn write_to(&self, w: &mut impl Write, width: HashWidth) -> io::Result<()> {
        match width {
            HashWidth::W32 => {
                w.write_all(&(self.hash as u32).to_le_bytes())?;
            }
            HashWidth::W64 => {
                w.write_all(&self.hash.to_le_bytes())?;
            }
        }
        w.write_all(&self.token_byte_len.to_le_bytes())?;
        w.write_all(&self.token_offset.to_le_bytes())?;
        w.write_all(&self.postings_offset.to_le_bytes())?;
        w.write_all(&self.postings_len.to_le_bytes())?;
        if width == HashWidth::W64 {
            w.write_all(&[0u8; 4])?;
        }
        Ok(())
    }

    pub fn read_from(r: &mut impl Read, width: HashWidth) -> io::Result<Self> {
        let hash = match width {
            HashWidth::W32 => {
                let mut buf = [0u8; 4];
                r.read_exact(&mut buf)?;
                u32::from_le_bytes(buf) as u64
            }
            HashWidth::W64 => {
                let mut buf = [0u8; 8];
                r.read_exact(&mut buf)?;
                u64::from_le_bytes(buf)
            }
        };

        let mut u32_buf = [0u8; 4];
        r.read_exact(&mut u32_buf)?;
        let token_byte_len = u32::from_le_bytes(u32_buf);
        r.read_exact(&mut u32_buf)?;
        let token_offset = u32::from_le_bytes(u32_buf);
        r.read_exact(&mut u32_buf)?;
        let postings_offset = u32::from_le_bytes(u32_buf);
        r.read_exact(&mut u32_buf)?;
        let postings_len = u32::from_le_bytes(u32_buf);

        if width == HashWidth::W64 {
            let mut reserved = [0u8; 4];
            r.read_exact(&mut reserved)?;
        }

        Ok(DictEntry {
            hash,
            token_byte_len,
            token_offset,
            postings_offset,
            postings_len,
        })
    }
}
