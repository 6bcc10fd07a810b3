//! Transient login credentials.

use std::fmt;

use serde::Serialize;

/// Login form contents, serialized as the `/auth/login` request body.
///
/// Held only between prompt and submission; never persisted anywhere.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        }
    }
}

// Keep the secret out of logs and error chains.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
