extern crate base64;
extern crate serde;
extern crate serde_json;

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::version::{get_config_version, get_hasher_loader, CONFIG_VERSION};
use crate::error::{CryptError, CryptResult};
use crate::hasher::{
    check_rounds, is_algorithm_supported, Hasher, DEFAULT_ALGORITHM, DEFAULT_ROUNDS,
    DEFAULT_SALT_SIZE,
};

/// Salts shorter than this are accepted but logged.
const RECOMMENDED_SALT_SIZE: usize = 16;

/// Hasher settings as stored in a config document. The salt is base64 encoded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HasherConfig {
    #[serde(default = "default_algorithm")]
    algorithm: String,
    #[serde(default = "default_rounds")]
    rounds: u32,
    #[serde(default = "default_salt_size")]
    salt_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct HasherDocument {
    version: String,
    hasher: HasherConfig,
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_salt_size() -> usize {
    DEFAULT_SALT_SIZE
}

impl Default for HasherConfig {
    fn default() -> HasherConfig {
        HasherConfig {
            algorithm: default_algorithm(),
            rounds: default_rounds(),
            salt_size: default_salt_size(),
            salt: None,
        }
    }
}

impl HasherConfig {
    pub fn new(algorithm: &str, rounds: u32, salt_size: usize, salt: Option<&[u8]>) -> HasherConfig {
        HasherConfig {
            algorithm: algorithm.to_string(),
            rounds: rounds,
            salt_size: salt_size,
            salt: salt.map(base64::encode),
        }
    }

    /// Captures the settings of an existing hasher, salt included.
    ///
    /// The stored salt size is the length of the salt itself, since that is what
    /// `build` gives back; a size changed later with `set_salt_size` is not kept.
    pub fn from_hasher(hasher: &Hasher) -> HasherConfig {
        let salt = hasher.salt_bytes();
        let salt_size = if salt.is_empty() { hasher.salt_size() } else { salt.len() };

        HasherConfig::new(hasher.algorithm(), hasher.rounds(), salt_size, Some(salt))
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn salt_size(&self) -> usize {
        self.salt_size
    }

    /// Decoded salt; empty when the document leaves the salt to be generated.
    pub fn salt(&self) -> CryptResult<Vec<u8>> {
        match self.salt {
            Some(ref salt) => Ok(base64::decode(salt)?),
            None => Ok(Vec::new()),
        }
    }

    /// Checks everything `Hasher::hash` would otherwise only report later.
    pub fn validate(&self) -> CryptResult<()> {
        check_rounds(self.rounds)?;
        is_algorithm_supported(&self.algorithm)?;

        let salt = self.salt()?;
        let salt_size = if salt.is_empty() { self.salt_size } else { salt.len() };
        if salt_size == 0 {
            return Err(CryptError::InvalidConfig("salt size must not be 0".to_string()));
        }
        if salt_size < RECOMMENDED_SALT_SIZE {
            warn!(
                "hasher config uses a {} byte salt, at least {} is recommended",
                salt_size, RECOMMENDED_SALT_SIZE
            );
        }

        Ok(())
    }

    pub fn build(&self, data: &str) -> CryptResult<Hasher> {
        let salt = self.salt()?;

        Hasher::new(data, &salt, self.salt_size, &self.algorithm, self.rounds)
    }

    pub fn to_json(&self) -> CryptResult<String> {
        let document = HasherDocument {
            version: CONFIG_VERSION.to_string(),
            hasher: self.clone(),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}

pub fn hasher_loader_1(json: &str) -> CryptResult<HasherConfig> {
    let document: HasherDocument = serde_json::from_str(json)?;

    document.hasher.validate()?;
    debug!(
        "loaded hasher config {}: algorithm={} rounds={}",
        document.version, document.hasher.algorithm, document.hasher.rounds
    );

    Ok(document.hasher)
}

pub fn load_hasher_config(json: &str) -> CryptResult<HasherConfig> {
    let version = get_config_version(json)?;
    let loader = get_hasher_loader(&version)?;

    loader(json)
}

pub fn load_hasher_config_file<P: AsRef<Path>>(path: P) -> CryptResult<HasherConfig> {
    let content = fs::read_to_string(path)?;

    load_hasher_config(&content)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{load_hasher_config, load_hasher_config_file, HasherConfig};
    use crate::error::CryptError;
    use crate::hasher::Hasher;

    fn get_test_data_path(fname: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("test_data");
        path.push(fname);
        path
    }

    #[test]
    fn load_configuration() {
        let config = load_hasher_config_file(get_test_data_path("hasher.json")).unwrap();

        assert_eq!("sha512", config.algorithm());
        assert_eq!(20000, config.rounds());
        assert_eq!(32, config.salt_size());
        assert!(config.salt().unwrap().is_empty());

        let hasher = config.build("password").unwrap();
        assert_eq!(32, hasher.salt_bytes().len());
        assert_eq!(128, hasher.hash().unwrap().len());
    }

    #[test]
    fn load_configuration_with_salt() {
        let path = get_test_data_path("hasher_explicit_salt.json");
        let config = load_hasher_config_file(path).unwrap();

        let hasher = config.build("password123").unwrap();
        assert_eq!(16, hasher.salt_size());
        assert_eq!(
            "43bb54b260ddf819896cc6c94d39d0f8e0c59272d459d4d83b01d8e36e6a98e4",
            hasher.hash_string().unwrap()
        );
    }

    #[test]
    fn missing_fields_use_defaults() {
        let json = r#"{ "version": "1.0", "hasher": {} }"#;

        assert_eq!(HasherConfig::default(), load_hasher_config(json).unwrap());
    }

    #[test]
    fn missing_file() {
        match load_hasher_config_file(get_test_data_path("missing.json")) {
            Err(CryptError::Io(_)) => {}
            _ => panic!("missing file should be an io error"),
        }
    }

    #[test]
    fn unsupported_version() {
        let json = r#"{ "version": "2.0", "hasher": {} }"#;

        match load_hasher_config(json) {
            Err(CryptError::UnsupportedConfigVersion(_)) => {}
            _ => panic!("version 2.0 should not load"),
        }
    }

    #[test]
    fn zero_rounds() {
        let json = r#"{ "version": "1.0", "hasher": { "rounds": 0 } }"#;

        match load_hasher_config(json) {
            Err(CryptError::BadIterationCount(0)) => {}
            _ => panic!("zero rounds should not load"),
        }
    }

    #[test]
    fn unknown_algorithm() {
        let json = r#"{ "version": "1.0", "hasher": { "algorithm": "unknown" } }"#;

        match load_hasher_config(json) {
            Err(CryptError::UnsupportedHasherAlgorithm(name)) => assert_eq!("unknown", name),
            _ => panic!("unknown algorithm should not load"),
        }
    }

    #[test]
    fn zero_salt_size() {
        let json = r#"{ "version": "1.0", "hasher": { "salt_size": 0 } }"#;

        match load_hasher_config(json) {
            Err(CryptError::InvalidConfig(_)) => {}
            _ => panic!("empty generated salt should not load"),
        }
    }

    #[test]
    fn bad_salt_encoding() {
        let json = r#"{ "version": "1.0", "hasher": { "salt": "not base64!" } }"#;

        match load_hasher_config(json) {
            Err(CryptError::Base64Decode(_)) => {}
            _ => panic!("salt must be base64"),
        }
    }

    #[test]
    fn hasher_settings_survive_json() {
        let hasher = Hasher::new("password", &[], 24, "sha384", 50).unwrap();
        let config = HasherConfig::from_hasher(&hasher);

        let loaded = load_hasher_config(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, loaded);

        let rebuilt = loaded.build("password").unwrap();
        assert_eq!(hasher.salt_bytes(), rebuilt.salt_bytes());
        assert_eq!(hasher.hash().unwrap(), rebuilt.hash().unwrap());
    }

    #[test]
    fn unavailable_legacy_digest() {
        if openssl::version::number() < 0x3000_0000 {
            return;
        }
        let json = r#"{ "version": "1.0", "hasher": { "algorithm": "md4", "rounds": 1 } }"#;

        match load_hasher_config(json) {
            Err(CryptError::UnsupportedHasherAlgorithm(name)) => assert_eq!("md4", name),
            _ => panic!("md4 should not load"),
        }
    }

    #[test]
    fn resized_hasher_stores_actual_salt_size() {
        let mut hasher = Hasher::new("password", &[5u8; 16], 16, "sha256", 2).unwrap();
        hasher.set_salt_size(32);

        let config = HasherConfig::from_hasher(&hasher);
        assert_eq!(16, config.salt_size());

        let rebuilt = load_hasher_config(&config.to_json().unwrap())
            .unwrap()
            .build("password")
            .unwrap();
        assert_eq!(config.salt_size(), rebuilt.salt_size());
        assert_eq!(hasher.hash().unwrap(), rebuilt.hash().unwrap());
    }
}
