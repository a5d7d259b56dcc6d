//! Stable label hashing.
//!
//! Random phase streams are derived from a scenario seed plus a dotted label
//! (`"lattice.point.phase"`). The label hash must be identical across
//! platforms and releases, so it uses FNV-1a 64-bit rather than `std`'s
//! randomized hasher.
//!
//! FNV-1a is not cryptographically secure.

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
const fn mix(mut hash: u64, bytes: &[u8]) -> u64 {
    let mut i = 0usize;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(PRIME);
        i += 1;
    }
    hash
}

/// Hash a byte slice with FNV-1a 64-bit.
#[inline]
pub const fn fnv1a64(bytes: &[u8]) -> u64 {
    mix(OFFSET_BASIS, bytes)
}

/// Hash a UTF-8 string with FNV-1a 64-bit.
#[inline]
pub const fn fnv1a64_str(s: &str) -> u64 {
    fnv1a64(s.as_bytes())
}
