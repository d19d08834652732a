//! Random identifier tokens for directory entities.
//!
//! Tokens are 12 characters drawn from a 55-character alphabet, so the id
//! space holds 55^12 ≈ 7.7e20 values. By the birthday bound, minting 10^5
//! ids in one session collides with probability ≈ (10^5)^2 / (2 · 55^12)
//! ≈ 6.5e-12, which is why no uniqueness check against stored state is
//! performed anywhere in the crate.

use nanoid::nanoid;

/// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const ID_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const ID_LENGTH: usize = 12;

/// Mints a fresh opaque token. Tokens are never reused or recomputed.
pub fn token() -> String {
    nanoid!(ID_LENGTH, ID_ALPHABET)
}
