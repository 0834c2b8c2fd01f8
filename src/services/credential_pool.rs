use std::fmt;

use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

/// Provider API key. Only its fingerprint is ever logged.
#[derive(Clone)]
pub struct Credential {
    secret: SecretString,
    fingerprint: String,
}

impl Credential {
    pub fn new(secret: SecretString) -> Self {
        let digest = Sha256::digest(secret.expose_secret().as_bytes());
        let fingerprint = format!("{:x}", digest)[..8].to_string();
        Self {
            secret,
            fingerprint,
        }
    }

    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Read-only set of provider credentials shared by every request.
#[derive(Debug)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    pub fn new(secrets: Vec<SecretString>) -> AppResult<Self> {
        if secrets.is_empty() {
            return Err(AppError::ConfigurationError(
                "credential pool requires at least one API key".to_string(),
            ));
        }

        Ok(Self {
            credentials: secrets.into_iter().map(Credential::new).collect(),
        })
    }

    /// Uniform random choice with replacement.
    pub fn pick(&self) -> &Credential {
        let index = rand::thread_rng().gen_range(0..self.credentials.len());
        &self.credentials[index]
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
