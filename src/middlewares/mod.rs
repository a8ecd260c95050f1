mod identity;

pub use identity::{identity_middleware, resolve_identity};
