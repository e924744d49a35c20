// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The domain synonym table.
//!
//! A static mapping from a surface token to the canonical tokens it should
//! also match: abbreviations (`ltd` → `limited`) and the Bengali/English
//! pairs shop owners mix freely (`রড` ↔ `rod`). The table is data, not
//! code. It carries a version number, and that version is stamped into every
//! semantic index fitted with it, because changing the table changes the
//! vocabulary.
//!
//! # File format
//!
//! ```json
//! { "version": 3, "entries": { "ltd": ["limited"], "এসি": ["ac", "air conditioner"] } }
//! ```
//!
//! Keys and values go through the same normalization as queries when the
//! table is loaded. A value with several words expands to several tokens.
//! Keys that don't normalize to exactly one token can never match and are
//! dropped.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::normalize::{fold_digits, normalize};
use super::tokenize::split_tokens;
use crate::error::ConfigError;

/// The table that ships with the crate.
const BUILTIN_TABLE: &str = include_str!("synonyms.json");

#[derive(Deserialize)]
struct SynonymFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, Vec<String>>,
}

/// Surface token → canonical tokens, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    version: u32,
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// No expansions at all. Version 0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded default table.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_TABLE) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(error = %e, "built-in synonym table is invalid; continuing without synonyms");
                Self::empty()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: SynonymFile = serde_json::from_str(raw)?;
        Ok(Self::from_entries(file.version, file.entries))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Build a table from raw entries, normalizing keys and values.
    pub fn from_entries<I, K, V>(version: u32, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();

        for (key, values) in entries {
            let mut key_tokens = split_tokens(&fold_digits(&normalize(key.as_ref())));
            let key = match (key_tokens.pop(), key_tokens.is_empty()) {
                (Some(only), true) => only,
                _ => {
                    tracing::debug!(key = key.as_ref(), "synonym key is not a single token; skipped");
                    continue;
                }
            };

            let expansions = table.entry(key.clone()).or_default();
            for value in values {
                for token in split_tokens(&fold_digits(&normalize(value.as_ref()))) {
                    if token != key && !expansions.contains(&token) {
                        expansions.push(token);
                    }
                }
            }
        }

        table.retain(|_, expansions| !expansions.is_empty());
        Self {
            version,
            entries: table,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical forms for a normalized token. Empty if there are none.
    pub fn expansions(&self, token: &str) -> &[String] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }
}
