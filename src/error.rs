use std::fmt::Display;
use std::string;
use std::{error, io};

pub type CryptResult<T> = Result<T, CryptError>;

#[derive(Debug)]
pub enum CryptError {
    Io(io::Error),
    Base64Decode(base64::DecodeError),
    Str(string::FromUtf8Error),
    Json(serde_json::Error),
    OpenSSL(openssl::error::ErrorStack),
    Rand(rand::Error),
    UnsupportedConfigVersion(String),
    UnsupportedHasherAlgorithm(String),
    BadIterationCount(u32),
    InvalidConfig(String),
}

macro_rules! impl_from_error {
    ($f: ty, $e: expr) => {
        impl From<$f> for CryptError {
            fn from(f: $f) -> CryptError {
                $e(f)
            }
        }
    };
}

impl_from_error!(io::Error, CryptError::Io);
impl_from_error!(base64::DecodeError, CryptError::Base64Decode);
impl_from_error!(string::FromUtf8Error, CryptError::Str);
impl_from_error!(serde_json::Error, CryptError::Json);
impl_from_error!(openssl::error::ErrorStack, CryptError::OpenSSL);
impl_from_error!(rand::Error, CryptError::Rand);

impl Display for CryptError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> Result<(), ::std::fmt::Error> {
        match *self {
            CryptError::Io(ref err) => err.fmt(f),
            CryptError::Base64Decode(ref err) => err.fmt(f),
            CryptError::Str(ref err) => write!(f, "Data is not valid utf-8: {}", err),
            CryptError::Json(ref err) => err.fmt(f),
            CryptError::OpenSSL(ref err) => err.fmt(f),
            CryptError::Rand(ref err) => write!(f, "Entropy source failure: {}", err),
            CryptError::UnsupportedConfigVersion(ref version) => {
                write!(f, "Hasher config version: {} not supported", version)
            }
            CryptError::UnsupportedHasherAlgorithm(ref algorithm) => {
                write!(f, "Unsupported hasher algorithm: {}", algorithm)
            }
            CryptError::BadIterationCount(rounds) => write!(f, "Bad iteration count: {}", rounds),
            CryptError::InvalidConfig(ref reason) => write!(f, "Invalid hasher config: {}", reason),
        }
    }
}

impl error::Error for CryptError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            CryptError::Io(ref err) => Some(err),
            CryptError::Base64Decode(ref err) => Some(err),
            CryptError::Str(ref err) => Some(err),
            CryptError::Json(ref err) => Some(err),
            CryptError::OpenSSL(ref err) => Some(err),
            CryptError::Rand(ref err) => Some(err),
            _ => None,
        }
    }
}
