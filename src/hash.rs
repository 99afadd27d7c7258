//! Token hashing — deterministic, non-cryptographic, fixed-seed.
//!
//! The dictionary on disk is ordered by `(hash, token bytes)`, so two engine
//! instances opened against the same base directory MUST hash a token
//! identically or lookups silently miss. `Murmur3_32`/`Murmur3_64` are the
//! two variants spec.md §4.2 calls for; both use the fixed seed below.

/// Fixed seed shared by every hash variant so hashes are stable across
/// processes opening the same base directory.
pub const HASH_SEED: u32 = 0x1234_5678;

/// Width of the hash a segment's dictionary is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashWidth {
    W32,
    W64,
}

/// A deterministic, seeded string hash. Implementations must be pure
/// functions of their input (no interior state affects the result).
pub trait TokenHash: Send + Sync {
    /// Hash width this implementation produces.
    fn width(&self) -> HashWidth;

    /// Hash a token to 64 bits. 32-bit implementations zero-extend.
    fn hash(&self, token: &str) -> u64;
}

/// MurmurHash3 x86_32 finalizer-style mix, seeded, producing a `u32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3_32;

impl Murmur3_32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    pub fn hash32(token: &str) -> u32 {
        let data = token.as_bytes();
        let mut h: u32 = HASH_SEED;
        let nblocks = data.len() / 4;

        for i in 0..nblocks {
            let block = &data[i * 4..i * 4 + 4];
            let mut k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            k = k.wrapping_mul(Self::C1);
            k = k.rotate_left(15);
            k = k.wrapping_mul(Self::C2);

            h ^= k;
            h = h.rotate_left(13);
            h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        let tail = &data[nblocks * 4..];
        let mut k1: u32 = 0;
        if tail.len() >= 3 {
            k1 ^= (tail[2] as u32) << 16;
        }
        if tail.len() >= 2 {
            k1 ^= (tail[1] as u32) << 8;
        }
        if !tail.is_empty() {
            k1 ^= tail[0] as u32;
            k1 = k1.wrapping_mul(Self::C1);
            k1 = k1.rotate_left(15);
            k1 = k1.wrapping_mul(Self::C2);
            h ^= k1;
        }

        h ^= data.len() as u32;
        h = fmix32(h);
        h
    }
}

impl TokenHash for Murmur3_32 {
    fn width(&self) -> HashWidth {
        HashWidth::W32
    }

    fn hash(&self, token: &str) -> u64 {
        Self::hash32(token) as u64
    }
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// MurmurHash3 x64_128-derived mix, folded to a single `u64`, seeded.
///
/// This is not the reference 128-bit algorithm verbatim — it reuses the
/// same finalizer/mixing constants over a single 64-bit accumulator, which
/// is sufficient for the spec's requirement (deterministic, well-distributed,
/// stable across processes for the same seed).
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3_64;

impl Murmur3_64 {
    const C1: u64 = 0xff51_afd7_ed55_8ccd;
    const C2: u64 = 0xc4ce_b9fe_1a85_ec53;

    pub fn hash64(token: &str) -> u64 {
        let data = token.as_bytes();
        let mut h: u64 = HASH_SEED as u64;
        let nblocks = data.len() / 8;

        for i in 0..nblocks {
            let block = &data[i * 8..i * 8 + 8];
            let mut k = u64::from_le_bytes(block.try_into().unwrap());
            k = k.wrapping_mul(Self::C1);
            k = k.rotate_left(31);
            k = k.wrapping_mul(Self::C2);

            h ^= k;
            h = h.rotate_left(27);
            h = h.wrapping_mul(5).wrapping_add(0x52dc_e729);
        }

        let tail = &data[nblocks * 8..];
        let mut k1: u64 = 0;
        for (i, &b) in tail.iter().enumerate().rev() {
            k1 ^= (b as u64) << (i * 8);
        }
        if !tail.is_empty() {
            k1 = k1.wrapping_mul(Self::C1);
            k1 = k1.rotate_left(31);
            k1 = k1.wrapping_mul(Self::C2);
            h ^= k1;
        }

        h ^= data.len() as u64;
        h = fmix64(h);
        h
    }
}

impl TokenHash for Murmur3_64 {
    fn width(&self) -> HashWidth {
        HashWidth::W64
    }

    fn hash(&self, token: &str) -> u64 {
        Self::hash64(token)
    }
}

#[inline]
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}
