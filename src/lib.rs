//! Salted PBKDF2-HMAC hashing.
//!
//! [`Hasher`] derives a key from text data with a configurable digest, salt and
//! round count and returns it hex encoded. [`HasherConfig`] stores the same
//! settings in a versioned json document.

extern crate base64;
extern crate hex;
extern crate openssl;

pub mod config;
pub mod error;
pub mod hasher;

pub use crate::config::{load_hasher_config, load_hasher_config_file, HasherConfig};
pub use crate::error::{CryptError, CryptResult};
pub use crate::hasher::{digest_size, Hasher};
