// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Record vault — orchestrates seal + encrypt on ingestion and
// decrypt + reseal-compare on read, with one audit entry per ingestion.
//
// Ingestion:  Received -> Sealed -> Encrypted -> Logged
// Read path:  CiphertextPresented -> Decrypted -> Resealed -> Accepted | Rejected
//
// The steps are strictly sequential: the seal is taken over the stamped
// plaintext, so stamping must precede sealing, and sealing must precede
// encryption so both cover byte-identical input.

use chrono::Utc;
use siegelwerk_core::config::VaultConfig;
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::{AuditEntry, Ciphertext, Record, Seal};
use tracing::{error, info, instrument};

use crate::keys::KeyProvider;
use crate::ledger::AuditLedger;
use crate::{canonical, cipher, integrity};

/// Outcome of [`RecordVault::verify_and_read`].
///
/// A seal mismatch is the designed-for tamper signal, not an exceptional
/// condition, so it is a verdict value rather than an error — callers
/// cannot accidentally `?` it away.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadVerdict {
    /// The re-derived seal matched; the decrypted record is released.
    Authentic(Record),
    /// The re-derived seal did not match; the plaintext is withheld.
    Tampered { expected: Seal, actual: Seal },
}

impl ReadVerdict {
    pub fn is_authentic(&self) -> bool {
        matches!(self, Self::Authentic(_))
    }

    /// The decrypted record, if the verdict released one.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Authentic(record) => Some(record),
            Self::Tampered { .. } => None,
        }
    }
}

/// Composes the canonical serializer, sealer, cipher, and audit ledger
/// behind the two-call surface the host sees.
///
/// One logical owner per instance; the only shared mutable state is the
/// ledger, whose appends are serialized internally. The vault retains no
/// reference to any plaintext after a call returns.
pub struct RecordVault {
    provider: Box<dyn KeyProvider>,
    ledger: AuditLedger,
    config: VaultConfig,
}

impl RecordVault {
    /// Build a vault with default stamp field names.
    pub fn new(provider: impl KeyProvider + 'static) -> Self {
        Self::with_config(provider, VaultConfig::default())
    }

    pub fn with_config(provider: impl KeyProvider + 'static, config: VaultConfig) -> Self {
        Self {
            provider: Box::new(provider),
            ledger: AuditLedger::new(),
            config,
        }
    }

    /// Seal, encrypt, and log one record.
    ///
    /// A *copy* of `record` is stamped with the subject identifier and an
    /// RFC 3339 processing timestamp; the caller's record is never mutated.
    /// The returned seal and ciphertext are computed over the same canonical
    /// bytes. On success the ledger grows by exactly one entry; on any
    /// failure it is untouched.
    ///
    /// Fails with `Unserializable` (record holds a non-canonical value),
    /// `KeyUnavailable` (provider), or `Encryption`.
    #[instrument(skip_all, fields(%subject_id))]
    pub fn ingest(&self, subject_id: &str, record: &Record) -> Result<(Ciphertext, Seal)> {
        let mut stamped = record.clone();
        let processed_at = Utc::now();
        stamped.set(self.config.subject_field.clone(), subject_id);
        stamped.set(
            self.config.timestamp_field.clone(),
            processed_at.to_rfc3339(),
        );

        let bytes = canonical::canonicalize(&stamped)?;
        let seal = integrity::seal_bytes(&bytes);
        let key = self.provider.obtain_key()?;
        let ciphertext = cipher::encrypt(&bytes, &key)?;

        // All fallible work is behind us; the append cannot fail.
        self.ledger.append(subject_id, seal, processed_at);

        info!(seal_prefix = %&seal.to_hex()[..12], "record secured");
        Ok((ciphertext, seal))
    }

    /// Decrypt a ciphertext and verify it against the seal taken at
    /// ingestion, recomputing the fingerprint from the decrypted content
    /// rather than trusting any stored metadata.
    ///
    /// Decryption failure is a hard error (`Decryption`) — ciphertext
    /// corruption is distinguishable from semantic tampering. A seal
    /// mismatch after successful decryption is the normal
    /// [`ReadVerdict::Tampered`] outcome. Reads leave no trace in the audit
    /// ledger; only ingestion produces provenance.
    ///
    /// Also fails with `KeyUnavailable` if the provider cannot produce the
    /// key for this operation.
    #[instrument(skip_all, fields(ciphertext_len = ciphertext.len()))]
    pub fn verify_and_read(
        &self,
        ciphertext: &Ciphertext,
        expected: &Seal,
    ) -> Result<ReadVerdict> {
        let key = self.provider.obtain_key()?;
        let plaintext = cipher::decrypt(ciphertext, &key)?;

        let record: Record = serde_json::from_slice(&plaintext)?;
        let bytes = canonical::canonicalize(&record)?;
        let actual = integrity::seal_bytes(&bytes);

        if integrity::seals_match(expected, &actual) {
            info!("verification successful: record is authentic");
            Ok(ReadVerdict::Authentic(record))
        } else {
            error!(%expected, %actual, "seal mismatch: tampering detected");
            Ok(ReadVerdict::Tampered {
                expected: *expected,
                actual,
            })
        }
    }

    /// Strict form of [`Self::verify_and_read`]: a tamper verdict becomes an
    /// [`SiegelwerkError::IntegrityMismatch`] error. For hosts that treat
    /// tampering as fatal rather than as a normal read outcome.
    pub fn read_authentic(&self, ciphertext: &Ciphertext, expected: &Seal) -> Result<Record> {
        match self.verify_and_read(ciphertext, expected)? {
            ReadVerdict::Authentic(record) => Ok(record),
            ReadVerdict::Tampered { expected, actual } => {
                Err(SiegelwerkError::IntegrityMismatch {
                    expected: expected.to_hex(),
                    actual: actual.to_hex(),
                })
            }
        }
    }

    /// Read-only snapshot of the audit trail, in ingestion order.
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.ledger.entries()
    }

    /// Number of records ingested so far.
    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }
}
