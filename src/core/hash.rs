//! Case-insensitive name hashing.
//!
//! Registry keys are 32-bit Jenkins one-at-a-time hashes of the lower-cased
//! name. `0` is reserved: it is what an empty name hashes to and it never
//! identifies a registered entry.

use std::ops::Range;

/// The reserved "no entry" hash.
pub const INVALID_HASH: u32 = 0;

/// Hash a console name.
///
/// Usable in constant context, so lookup keys can be computed at compile time:
///
/// ```
/// use bevy_console_args::core::hash_name;
///
/// const G_TEST_INTEGER: u32 = hash_name("g_testInteger");
/// assert_eq!(G_TEST_INTEGER, 0xf681f79d);
/// assert_eq!(hash_name("G_TESTINTEGER"), G_TEST_INTEGER);
/// ```
#[inline]
pub const fn hash_name(name: &str) -> u32 {
    hash_bytes(name.as_bytes())
}

/// Hash raw bytes, lower-casing ASCII and stopping at the first NUL.
pub const fn hash_bytes(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i].to_ascii_lowercase();
        if c == 0 {
            break;
        }
        hash = hash.wrapping_add(c as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
        i += 1;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash
}

/// Hash the half-open byte range `range` of `text`.
///
/// An out-of-bounds range hashes to [`INVALID_HASH`].
pub fn hash_range(text: &str, range: Range<usize>) -> u32 {
    text.as_bytes().get(range).map_or(INVALID_HASH, hash_bytes)
}
