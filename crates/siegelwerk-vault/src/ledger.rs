// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit ledger — append-only in-memory sequence of audit entries.
//
// There is no mutation or deletion API: the only writes are appends, and
// reads hand out snapshots.  Entries are not hash-chained to each other;
// the trail is tamper-evident by construction of its API, not
// cryptographically.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use siegelwerk_core::types::{AuditEntry, Seal};
use tracing::debug;

/// Append-only audit trail, one entry per ingested record.
///
/// Appends are serialized by an internal mutex, so a ledger shared between
/// threads cannot lose or reorder entries relative to their lock
/// acquisition.
#[derive(Default)]
pub struct AuditLedger {
    entries: Mutex<Vec<AuditEntry>>,
}

impl AuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and return it.
    ///
    /// Sequence numbers are assigned here, in append order, starting at 0.
    /// Never fails: a poisoned mutex is recovered by taking the inner value,
    /// since an append-only Vec is structurally sound even after a panicked
    /// writer.
    pub fn append(
        &self,
        subject_id: impl Into<String>,
        seal: Seal,
        timestamp: DateTime<Utc>,
    ) -> AuditEntry {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entry = AuditEntry {
            sequence: entries.len() as u64,
            subject_id: subject_id.into(),
            seal,
            timestamp,
        };
        entries.push(entry.clone());

        debug!(sequence = entry.sequence, "audit entry recorded");
        entry
    }

    /// A read-only snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
