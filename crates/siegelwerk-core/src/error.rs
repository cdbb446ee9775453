// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Siegelwerk.

use thiserror::Error;

/// Top-level error type for all Siegelwerk operations.
#[derive(Debug, Error)]
pub enum SiegelwerkError {
    // -- Canonical serialization --
    #[error("record field {field:?} has no canonical form: {reason}")]
    Unserializable { field: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Key provider --
    #[error("key provider failed: {0}")]
    KeyUnavailable(String),

    // -- Cipher --
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    // -- Integrity --
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("invalid seal encoding: {0}")]
    InvalidSeal(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SiegelwerkError>;
