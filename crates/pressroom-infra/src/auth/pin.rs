//! Admin PIN verification against the stored hash.

use std::sync::Arc;

use async_trait::async_trait;

use pressroom_core::ports::{AdminAuthRepository, AuthError, PasswordService, PinVerifier};

/// Verifies PINs against the hash held by an [`AdminAuthRepository`].
pub struct StoredPinVerifier {
    store: Arc<dyn AdminAuthRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl StoredPinVerifier {
    pub fn new(store: Arc<dyn AdminAuthRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { store, passwords }
    }

    /// Hash `pin` and store it, replacing any previous PIN.
    pub async fn set_pin(&self, pin: &str) -> Result<(), AuthError> {
        if pin.trim().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let hash = self.passwords.hash(pin)?;
        self.store
            .set_pin_hash(&hash)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    /// Store `pin` unless it already matches the stored hash.
    pub async fn ensure_pin(&self, pin: &str) -> Result<(), AuthError> {
        match self.verify_pin(pin).await {
            Ok(true) => Ok(()),
            Ok(false) | Err(AuthError::NotConfigured) => self.set_pin(pin).await,
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl PinVerifier for StoredPinVerifier {
    async fn verify_pin(&self, pin: &str) -> Result<bool, AuthError> {
        let hash = self
            .store
            .pin_hash()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or(AuthError::NotConfigured)?;

        self.passwords.verify(pin, &hash)
    }
}
