use std::fmt;

use crate::error::Error;

use super::error::AuthError;

/// Authenticated subject, as issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Identity(subject.into())
    }

    pub fn subject(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity resolved for the current request, if any.
///
/// Inserted into the request extensions by
/// [`identity_middleware`](crate::middlewares::identity_middleware) on every
/// route; handlers decide for themselves whether absence is an error.
#[derive(Clone, Debug, Default)]
pub struct CurrentIdentity(pub Option<Identity>);

impl CurrentIdentity {
    pub fn anonymous() -> Self {
        CurrentIdentity(None)
    }

    pub fn authenticated(identity: Identity) -> Self {
        CurrentIdentity(Some(identity))
    }

    pub fn get(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn require(&self) -> Result<&Identity, Error> {
        self.0
            .as_ref()
            .ok_or(Error::Auth(AuthError::Unauthenticated))
    }
}
