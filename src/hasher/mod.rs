pub mod digest;
pub mod pbkdf2;

pub use self::digest::*;
pub use self::pbkdf2::*;
