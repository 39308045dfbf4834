pub mod hasher;
pub mod version;

pub use self::hasher::*;
pub use self::version::*;
