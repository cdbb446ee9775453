// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Confidentiality cipher — age (scrypt passphrase) authenticated encryption
// over canonical record bytes.  The key is injected per call; no key state
// is held here.  Encryption draws a fresh file key and salt every time, so
// two ciphertexts of identical bytes differ — ciphertext equality never
// implies plaintext equality.

use std::io::{Read, Write};

use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::Ciphertext;
use tracing::{debug, instrument};

use crate::keys::SymmetricKey;

/// Encrypt `plaintext` under `key` and return the ciphertext.
///
/// The output is a complete age file (header + authenticated payload); it is
/// self-describing enough for decryption to fail closed on corruption.
#[instrument(skip_all, fields(plaintext_len = plaintext.len()))]
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<Ciphertext> {
    let encryptor = age::Encryptor::with_user_passphrase(key.passphrase());
    let mut ciphertext = Vec::new();

    let mut writer = encryptor
        .wrap_output(&mut ciphertext)
        .map_err(|e| SiegelwerkError::Encryption(e.to_string()))?;

    writer
        .write_all(plaintext)
        .map_err(|e| SiegelwerkError::Encryption(e.to_string()))?;

    writer
        .finish()
        .map_err(|e| SiegelwerkError::Encryption(e.to_string()))?;

    debug!(ciphertext_len = ciphertext.len(), "encryption complete");
    Ok(Ciphertext::from_bytes(ciphertext))
}

/// Decrypt `ciphertext` under `key` and return the original plaintext bytes.
///
/// Fails with [`SiegelwerkError::Decryption`] if the blob was bit-flipped,
/// truncated, or encrypted under a different key — never returns corrupted
/// plaintext.
#[instrument(skip_all, fields(ciphertext_len = ciphertext.len()))]
pub fn decrypt(ciphertext: &Ciphertext, key: &SymmetricKey) -> Result<Vec<u8>> {
    let decryptor = age::Decryptor::new(ciphertext.as_bytes())
        .map_err(|e| SiegelwerkError::Decryption(e.to_string()))?;

    let identity = age::scrypt::Identity::new(key.passphrase());

    let mut reader = decryptor
        .decrypt(std::iter::once(&identity as &dyn age::Identity))
        .map_err(|e| SiegelwerkError::Decryption(e.to_string()))?;

    let mut plaintext = Vec::new();
    reader
        .read_to_end(&mut plaintext)
        .map_err(|e| SiegelwerkError::Decryption(e.to_string()))?;

    debug!(plaintext_len = plaintext.len(), "decryption complete");
    Ok(plaintext)
}
