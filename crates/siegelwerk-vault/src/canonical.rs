// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canonical serialization — deterministic bytes for sealing and encryption.
//
// A record's canonical form is compact JSON with keys in sorted order at
// every nesting level. Sorting is structural (records are BTreeMap-backed),
// so two records with the same field sets and values always produce
// byte-identical output regardless of insertion order.

use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::{FieldValue, Record};

/// Serialize `record` into its canonical byte form.
///
/// Fails with [`SiegelwerkError::Unserializable`] if any field holds a value
/// with no canonical textual representation (a NaN or infinite float).
/// serde_json would render such a value as `null`, silently producing
/// canonical bytes for a different record — rejection happens up front
/// instead.
pub fn canonicalize(record: &Record) -> Result<Vec<u8>> {
    validate_record(record, "")?;
    Ok(serde_json::to_vec(record)?)
}

fn validate_record(record: &Record, path: &str) -> Result<()> {
    for (name, value) in record.fields() {
        let field_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}.{name}")
        };
        validate_value(value, &field_path)?;
    }
    Ok(())
}

fn validate_value(value: &FieldValue, path: &str) -> Result<()> {
    match value {
        FieldValue::Float(f) if !f.is_finite() => Err(SiegelwerkError::Unserializable {
            field: path.to_owned(),
            reason: format!("non-finite float {f}"),
        }),
        FieldValue::Items(items) => {
            for (index, item) in items.iter().enumerate() {
                validate_value(item, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        FieldValue::Map(nested) => validate_record(nested, path),
        _ => Ok(()),
    }
}
