// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Siegelwerk record envelope.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single field value inside a [`Record`].
///
/// Integers and floats are distinct variants so that a record decrypted and
/// re-parsed from its canonical bytes serializes back to the exact same
/// bytes — `1` must never come back as `1.0`, or re-derived seals would
/// spuriously mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Items(Vec<FieldValue>),
    Map(Record),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        Self::Items(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        Self::Map(value)
    }
}

/// A structured record: a mapping from field names to values.
///
/// Backed by a `BTreeMap`, so field order is total and insertion order is
/// irrelevant at every nesting level — two records with the same field sets
/// and values compare equal and canonicalize to identical bytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any existing value under the same name.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Fields in canonical (sorted) order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Digest length of a [`Seal`] in bytes.
pub const SEAL_LEN: usize = 32;

/// A 32-byte SHA-256 content fingerprint over a record's canonical bytes.
///
/// Rendered as 64 lowercase hex characters in `Display`, logs, and serde.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seal([u8; SEAL_LEN]);

impl Seal {
    /// Digest length in bytes.
    pub const LEN: usize = SEAL_LEN;

    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Lowercase hex form (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a seal from its 64-character hex form.
    pub fn from_hex(text: &str) -> Result<Self, crate::SiegelwerkError> {
        let bytes = hex::decode(text)
            .map_err(|e| crate::SiegelwerkError::InvalidSeal(e.to_string()))?;
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            crate::SiegelwerkError::InvalidSeal(format!(
                "expected {} hex characters",
                Self::LEN * 2
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Seal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Seal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seal({})", self.to_hex())
    }
}

impl Serialize for Seal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Seal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// An opaque authenticated encrypted blob.
///
/// The host persists this alongside the seal; Siegelwerk itself does not
/// define a storage layout.
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never dump the blob itself into logs; the length is enough.
        write!(f, "Ciphertext({} bytes)", self.0.len())
    }
}

/// One immutable entry in the audit ledger, created per ingested record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Monotonically increasing position in the ledger, starting at 0.
    pub sequence: u64,
    /// Caller-supplied subject identifier.
    pub subject_id: String,
    /// Content fingerprint of the record as ingested (after stamping).
    pub seal: Seal,
    /// Processing timestamp, identical to the one stamped into the record.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_float_fields_stay_distinct_through_json() {
        let mut record = Record::new();
        record.set("count", 1);
        record.set("ratio", 1.0);

        let bytes = serde_json::to_vec(&record).unwrap();
        let parsed: Record = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(parsed.get("count"), Some(&FieldValue::Integer(1)));
        assert_eq!(parsed.get("ratio"), Some(&FieldValue::Float(1.0)));
        assert_eq!(serde_json::to_vec(&parsed).unwrap(), bytes);
    }

    #[test]
    fn seal_hex_round_trip() {
        let seal = Seal::from_bytes([0xAB; Seal::LEN]);
        let hex = seal.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Seal::from_hex(&hex).unwrap(), seal);
    }

    #[test]
    fn seal_rejects_malformed_hex() {
        assert!(Seal::from_hex("wrong_seal_12345").is_err());
        assert!(Seal::from_hex("abcd").is_err());
    }
}
