// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Integrity sealing — SHA-256 fingerprints over canonical record bytes.
//
// A seal is a content fingerprint, not a MAC: no key material is involved,
// so any holder of the plaintext can recompute it. That is what makes the
// read-path recheck meaningful to every party, not just the sealer.

use sha2::{Digest, Sha256};
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::Seal;

/// Compute the SHA-256 seal of `data`.
///
/// Pure and deterministic: the same bytes always produce the same seal.
pub fn seal_bytes(data: &[u8]) -> Seal {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Seal::from_bytes(hasher.finalize().into())
}

/// Compare two seals in constant time.
pub fn seals_match(left: &Seal, right: &Seal) -> bool {
    ring::constant_time::verify_slices_are_equal(left.as_bytes(), right.as_bytes()).is_ok()
}

/// Verify that `data` matches `expected`.
///
/// Returns `Ok(())` when the recomputed seal matches, or
/// [`SiegelwerkError::IntegrityMismatch`] carrying both hex digests when it
/// does not.
pub fn verify_seal(data: &[u8], expected: &Seal) -> Result<()> {
    let actual = seal_bytes(data);
    if seals_match(expected, &actual) {
        Ok(())
    } else {
        Err(SiegelwerkError::IntegrityMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        })
    }
}
