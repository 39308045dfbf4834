extern crate openssl;

use std::os::raw::c_int;

use openssl::hash::{Hasher as DigestContext, MessageDigest};

use crate::error::{CryptError, CryptResult};

/// Alternative spellings mapped onto the names OpenSSL registers for the same digest.
const ALIASES: &[(&str, &str)] = &[
    ("sha3_224", "sha3-224"),
    ("sha3_256", "sha3-256"),
    ("sha3_384", "sha3-384"),
    ("sha3_512", "sha3-512"),
    ("sha512_224", "sha512-224"),
    ("sha512_256", "sha512-256"),
    ("blake2b", "blake2b512"),
    ("blake2s", "blake2s256"),
];

/// Extendable output functions have no default output length.
const XOF: &[&str] = &["shake128", "shake256", "shake_128", "shake_256"];

/// Resolves an algorithm name to the digest used as the HMAC hash inside PBKDF2.
pub fn message_digest(algorithm: &str) -> CryptResult<MessageDigest> {
    let lowered = algorithm.to_ascii_lowercase();
    if XOF.contains(&lowered.as_str()) {
        return Err(CryptError::UnsupportedHasherAlgorithm(algorithm.to_string()));
    }

    let name = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, name)| *name)
        .unwrap_or(algorithm);

    let digest = MessageDigest::from_name(name)
        .ok_or_else(|| CryptError::UnsupportedHasherAlgorithm(algorithm.to_string()))?;

    // A known name may still have no implementation loaded (legacy digests on OpenSSL 3).
    DigestContext::new(digest)
        .map_err(|_| CryptError::UnsupportedHasherAlgorithm(algorithm.to_string()))?;

    Ok(digest)
}

/// PBKDF2 needs at least one round and OpenSSL takes the count as a C `int`.
pub fn check_rounds(rounds: u32) -> CryptResult<()> {
    if rounds == 0 || rounds > c_int::max_value() as u32 {
        return Err(CryptError::BadIterationCount(rounds));
    }

    Ok(())
}

/// Output size in bytes of the named digest, which is also the derived key length.
pub fn digest_size(algorithm: &str) -> CryptResult<usize> {
    Ok(message_digest(algorithm)?.size())
}

pub fn is_algorithm_supported(algorithm: &str) -> CryptResult<()> {
    message_digest(algorithm).map(|_| ())
}
