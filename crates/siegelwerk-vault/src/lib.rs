// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! siegelwerk-vault — Seal/verify protocol for structured records.
//!
//! This crate provides the envelope primitives: deterministic canonical
//! serialization, SHA-256 integrity sealing, authenticated symmetric
//! encryption, and the record vault that composes them with an append-only
//! audit ledger.
//!
//! The modules compose in two ways. [`RecordVault`] is the audited path:
//! every ingestion stamps, seals, encrypts, and leaves one ledger entry.
//! The [`canonical`], [`integrity`], and [`cipher`] modules are also usable
//! directly when the host wants sealing and encryption without provenance.

pub mod canonical;
pub mod cipher;
pub mod integrity;
pub mod keys;
pub mod ledger;
pub mod vault;

// PUBLIC API: Re-export the protocol surface
pub use canonical::canonicalize;
pub use cipher::{decrypt, encrypt};
pub use integrity::{seal_bytes, seals_match, verify_seal};
pub use keys::{EphemeralKeyProvider, KeyProvider, StaticKeyProvider, SymmetricKey};
pub use ledger::AuditLedger;
pub use vault::{ReadVerdict, RecordVault};
