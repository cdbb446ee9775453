// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Key provider capability — the one collaborator outside the core's control.
//
// The vault never generates, inspects, or logs key material; it only asks a
// `KeyProvider` for an opaque `SymmetricKey` when an operation needs one.
// Real deployments back this trait with an HSM or KMS client; the providers
// here cover process-local custody and tests.

use std::fmt;

use age::secrecy::SecretString;
use ring::rand::{SecureRandom, SystemRandom};
use siegelwerk_core::error::{Result, SiegelwerkError};

/// Opaque symmetric key material.
///
/// Wraps the passphrase in a [`SecretString`] so it is zeroised on drop, and
/// redacts `Debug` so it can never leak through logs or error chains.
#[derive(Clone)]
pub struct SymmetricKey(SecretString);

impl SymmetricKey {
    pub fn new(material: impl Into<String>) -> Self {
        Self(SecretString::from(material.into()))
    }

    /// The passphrase handed to the cipher. Crate-private: hosts hold keys,
    /// they do not read them back out.
    pub(crate) fn passphrase(&self) -> SecretString {
        self.0.clone()
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Capability for obtaining the symmetric key of the current operation.
pub trait KeyProvider: Send + Sync {
    /// Obtain the key, failing with [`SiegelwerkError::KeyUnavailable`] when
    /// the backing store cannot produce one. Callers may retry.
    fn obtain_key(&self) -> Result<SymmetricKey>;
}

/// Process-lifetime key drawn once from the OS CSPRNG.
///
/// Every vault built on a fresh `EphemeralKeyProvider` gets its own key, so
/// ciphertexts do not survive the process. Suitable for tests and for hosts
/// that treat the vault as a session-scoped envelope.
pub struct EphemeralKeyProvider {
    key: SymmetricKey,
}

impl EphemeralKeyProvider {
    /// Generate a fresh 256-bit key using the OS CSPRNG.
    pub fn generate() -> Result<Self> {
        let rng = SystemRandom::new();
        let mut material = [0u8; 32];
        rng.fill(&mut material)
            .map_err(|_| SiegelwerkError::KeyUnavailable("system CSPRNG unavailable".into()))?;

        Ok(Self {
            key: SymmetricKey::new(hex::encode(material)),
        })
    }
}

impl KeyProvider for EphemeralKeyProvider {
    fn obtain_key(&self) -> Result<SymmetricKey> {
        Ok(self.key.clone())
    }
}

/// Caller-supplied key material, for hosts that already hold key custody.
pub struct StaticKeyProvider {
    key: SymmetricKey,
}

impl StaticKeyProvider {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            key: SymmetricKey::new(material),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn obtain_key(&self) -> Result<SymmetricKey> {
        Ok(self.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use age::secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn debug_never_prints_material() {
        let key = SymmetricKey::new("super-secret-material");
        let out = format!("{key:?}");
        assert!(!out.contains("super-secret-material"));
        assert!(out.contains("REDACTED"));
    }

    #[test]
    fn generated_keys_are_distinct() {
        let first = EphemeralKeyProvider::generate().unwrap();
        let second = EphemeralKeyProvider::generate().unwrap();

        let a = first.obtain_key().unwrap();
        let b = second.obtain_key().unwrap();
        assert_ne!(
            a.passphrase().expose_secret(),
            b.passphrase().expose_secret()
        );
    }

    #[test]
    fn ephemeral_provider_returns_the_same_key_each_call() {
        let provider = EphemeralKeyProvider::generate().unwrap();
        let a = provider.obtain_key().unwrap();
        let b = provider.obtain_key().unwrap();
        assert_eq!(
            a.passphrase().expose_secret(),
            b.passphrase().expose_secret()
        );
    }
}
