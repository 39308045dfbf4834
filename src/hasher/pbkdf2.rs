extern crate hex;
extern crate openssl;
extern crate rand;

use std::time::Instant;

use log::{debug, trace};
use openssl::pkcs5::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CryptResult;
use crate::hasher::digest::{check_rounds, message_digest};

pub const DEFAULT_SALT_SIZE: usize = 16;
pub const DEFAULT_ALGORITHM: &str = "sha256";
pub const DEFAULT_ROUNDS: u32 = 100_000;

/// Salted PBKDF2-HMAC hasher.
///
/// All settings are taken at construction and may be changed with the setters
/// before calling [`Hasher::hash`]. Setters do not validate anything; a bad
/// algorithm name or round count is reported by `hash`.
#[derive(Debug, Clone)]
pub struct Hasher {
    data: Vec<u8>,
    salt: Vec<u8>,
    salt_size: usize,
    algorithm: String,
    rounds: u32,
}

impl Hasher {
    /// Creates a hasher for `data`.
    ///
    /// An empty `salt` means a fresh salt of `salt_size` bytes is drawn from the
    /// operating system. A non empty `salt` is used as is and `salt_size` is
    /// replaced by its length.
    pub fn new(
        data: &str,
        salt: &[u8],
        salt_size: usize,
        algorithm: &str,
        rounds: u32,
    ) -> CryptResult<Hasher> {
        let mut hasher = Hasher {
            data: data.as_bytes().to_vec(),
            salt: salt.to_vec(),
            salt_size: salt.len(),
            algorithm: algorithm.to_string(),
            rounds: rounds,
        };

        if salt.is_empty() {
            hasher.salt_size = salt_size;
            hasher.salt = hasher.generate_salt()?;
            debug!(
                "hasher created with generated salt: size={} algorithm={} rounds={}",
                hasher.salt_size, hasher.algorithm, hasher.rounds
            );
        } else {
            debug!(
                "hasher created with supplied salt: size={} algorithm={} rounds={}",
                hasher.salt_size, hasher.algorithm, hasher.rounds
            );
        }

        Ok(hasher)
    }

    /// Generated 16 byte salt, sha256 and 100000 rounds.
    pub fn with_defaults(data: &str) -> CryptResult<Hasher> {
        Hasher::new(data, &[], DEFAULT_SALT_SIZE, DEFAULT_ALGORITHM, DEFAULT_ROUNDS)
    }

    /// Same as [`Hasher::new`] for input that still has to be checked as utf-8.
    pub fn from_utf8(
        data: Vec<u8>,
        salt: &[u8],
        salt_size: usize,
        algorithm: &str,
        rounds: u32,
    ) -> CryptResult<Hasher> {
        let data = String::from_utf8(data)?;
        Hasher::new(&data, salt, salt_size, algorithm, rounds)
    }

    pub fn data_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn salt_size(&self) -> usize {
        self.salt_size
    }

    pub fn salt_bytes(&self) -> &[u8] {
        &self.salt
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Returns `salt_size` random bytes from the OS. The stored salt is left untouched.
    pub fn generate_salt(&self) -> CryptResult<Vec<u8>> {
        let mut salt = vec![0u8; self.salt_size];
        OsRng.try_fill_bytes(&mut salt)?;

        Ok(salt)
    }

    /// Only the recorded size changes, the current salt is kept.
    pub fn set_salt_size(&mut self, new_size: usize) {
        self.salt_size = new_size;
    }

    pub fn set_algorithm(&mut self, new_algorithm: &str) {
        self.algorithm = new_algorithm.to_string();
    }

    pub fn set_rounds(&mut self, new_rounds: u32) {
        self.rounds = new_rounds;
    }

    /// Raw derived key. Its length is the output size of the configured digest.
    pub fn derive(&self) -> CryptResult<Vec<u8>> {
        let digest = message_digest(&self.algorithm)?;
        check_rounds(self.rounds)?;

        let started = Instant::now();
        let mut output = vec![0u8; digest.size()];
        pbkdf2_hmac(
            &self.data,
            &self.salt,
            self.rounds as usize,
            digest,
            &mut output,
        )?;
        trace!(
            target: "perf",
            "pbkdf2-{} {} rounds: {}ms",
            self.algorithm,
            self.rounds,
            started.elapsed().as_millis()
        );

        Ok(output)
    }

    /// Lowercase hex of the derived key, as ascii bytes.
    pub fn hash(&self) -> CryptResult<Vec<u8>> {
        Ok(self.hash_string()?.into_bytes())
    }

    pub fn hash_string(&self) -> CryptResult<String> {
        Ok(hex::encode(self.derive()?))
    }
}
