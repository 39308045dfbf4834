extern crate serde;
extern crate serde_json;

use serde::{Deserialize, Serialize};

use crate::config::hasher::{hasher_loader_1, HasherConfig};
use crate::error::{CryptError, CryptResult};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Serialize, Deserialize)]
struct Version {
    version: String,
}

pub type HasherLoader = fn(&str) -> CryptResult<HasherConfig>;

pub fn get_config_version(json: &str) -> CryptResult<String> {
    let v: Version = serde_json::from_str(json)?;

    Ok(v.version)
}

/// Picks the document loader for a config version. Only the `1.x` layout exists.
pub fn get_hasher_loader(version: &str) -> CryptResult<HasherLoader> {
    if version == "1" || version.starts_with("1.") {
        Ok(hasher_loader_1)
    } else {
        Err(CryptError::UnsupportedConfigVersion(version.to_string()))
    }
}
