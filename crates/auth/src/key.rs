//! API key generation.
//!
//! A key is the lowercase hex SHA-256 digest of 32 random bytes, so every key
//! is exactly 64 characters from `[0-9a-f]` whatever the random source emits.

use crate::Error;
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Number of random bytes hashed into each key.
const KEY_ENTROPY_BYTES: usize = 32;

/// Generate a new API key from the operating system's CSPRNG.
pub fn generate_key() -> Result<String, Error> {
    generate_key_from(&mut OsRng)
}

/// Generate a new API key from the given random source.
///
/// Fails with [`Error::EntropySource`] if the source cannot fill the buffer.
/// There is no fallback source.
pub fn generate_key_from<R>(source: &mut R) -> Result<String, Error>
where
    R: RngCore + ?Sized,
{
    let mut bytes = [0u8; KEY_ENTROPY_BYTES];
    source.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Capability to issue new API keys.
///
/// Held by the HTTP layer so the entropy source can be swapped in tests.
pub trait KeySource: Send + Sync + 'static {
    /// Issue a fresh key.
    fn generate(&self) -> Result<String, Error>;
}

/// [`KeySource`] backed by [`OsRng`].
#[derive(Clone, Copy, Debug, Default)]
pub struct OsKeySource;

impl KeySource for OsKeySource {
    fn generate(&self) -> Result<String, Error> {
        generate_key()
    }
}
