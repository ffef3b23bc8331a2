//! Operator session service for the password-gated dashboard.
//!
//! Holds the operator password (taken from configuration, or generated at
//! startup and logged so the operator can find it) and the set of active
//! bearer tokens. Tokens live in memory for the process lifetime; a restart
//! logs every operator out. A single static password is the whole
//! authorization model by design.

use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::auth::AuthError;

const TOKEN_LENGTH: usize = 32;
const PASSWORD_LENGTH: usize = 32;

/// Service managing operator dashboard sessions.
#[derive(Clone)]
pub struct AdminSessionService {
    password: Arc<String>,
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl AdminSessionService {
    /// Creates the service with a fixed operator password.
    pub fn new(password: String) -> Self {
        Self {
            password: Arc::new(password),
            tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Creates the service with a freshly generated random password and
    /// returns it alongside, so startup can log it once.
    pub fn with_generated_password() -> (Self, String) {
        let password = Self::generate_random(PASSWORD_LENGTH);
        (Self::new(password.clone()), password)
    }

    /// Exchanges the operator password for a new session token.
    ///
    /// # Returns
    /// - `Ok(String)` - Freshly generated bearer token, now active
    /// - `Err(AuthError::InvalidPassword)` - Password did not match
    pub async fn login(&self, password: &str) -> Result<String, AuthError> {
        if password != self.password.as_str() {
            return Err(AuthError::InvalidPassword);
        }

        let token = Self::generate_random(TOKEN_LENGTH);
        self.tokens.write().await.insert(token.clone());
        Ok(token)
    }

    /// Checks whether the token belongs to an active session.
    pub async fn validate(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    /// Ends the session for the given token. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    /// Generates a random alphanumeric string of the given length.
    fn generate_random(length: usize) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";

        let mut rng = rand::rng();

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}
