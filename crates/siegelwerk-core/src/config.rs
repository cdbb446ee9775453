// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vault configuration.

use serde::{Deserialize, Serialize};

/// Settings for a record vault instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Field name stamped with the subject identifier at ingestion.
    ///
    /// Hosts with domain naming override this (a clinical host would use
    /// `"patient_id"`). Stamping replaces an existing field of the same name.
    pub subject_field: String,
    /// Field name stamped with the RFC 3339 processing timestamp.
    pub timestamp_field: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            subject_field: "subject_id".into(),
            timestamp_field: "processed_at".into(),
        }
    }
}
