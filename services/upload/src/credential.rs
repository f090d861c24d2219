use std::fmt::{Debug, Formatter};

use ucare_core::utils::Redact;

/// Credential for the Upload API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Public key of the project, sent with every request.
    pub public_key: String,
    /// Secret key of the project, only used to sign expiring uploads.
    pub secret_key: Option<String>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(public_key: impl Into<String>, secret_key: Option<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key,
        }
    }

    /// Whether uploads made with this credential must be signed.
    pub fn is_secure(&self) -> bool {
        self.secret_key.is_some()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("public_key", &Redact::from(&self.public_key))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .finish()
    }
}
