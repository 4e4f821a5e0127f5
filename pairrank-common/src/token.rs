//! Access-token generation
//!
//! Rankings carry two 32-character alphanumeric tokens: a public one for
//! viewing and a private one required to vote. Uniqueness is enforced by a
//! bounded retry loop against the caller's existence check; running out of
//! attempts means the namespace is effectively exhausted and is reported as
//! an error rather than looping forever.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{Error, Result};

/// Token length in characters.
pub const TOKEN_LEN: usize = 32;

/// Collision-retry cap for [`generate_unique`].
const MAX_ATTEMPTS: usize = 64;

/// Generate one random alphanumeric token.
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Generate a token for which `is_taken` returns false.
///
/// `is_taken` is the repository's existence check (in-memory index and/or
/// on-disk file).
pub fn generate_unique(mut is_taken: impl FnMut(&str) -> bool) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let token = generate();
        if !is_taken(&token) {
            return Ok(token);
        }
    }
    Err(Error::TokenSpaceExhausted(MAX_ATTEMPTS))
}
