pub mod error;
pub mod identity;
pub mod jwt;

pub use identity::{CurrentIdentity, Identity};
pub use jwt::{decode_jwt, encode_jwt};
