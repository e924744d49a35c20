// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Only the administrative side of the crate returns errors to callers:
//! rebuilding the index, reading a catalog, loading configuration. Search
//! itself never fails; a broken semantic index is reported through
//! [`ArtifactError`] to the logs and the search carries on lexical-only.

use std::io;
use std::path::PathBuf;

/// Failures of `SearchContext::rebuild_index`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The record store could not be read.
    #[error("catalog read failed: {0}")]
    Catalog(#[from] CatalogError),

    /// The new artifact could not be written.
    #[error("artifact write failed: {0}")]
    Io(#[from] io::Error),
}

/// Why a persisted semantic index can't be used.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Never built, or the artifact directory can't be read.
    #[error("semantic index unavailable: {0}")]
    Unavailable(String),

    /// Present but inconsistent: bad checksum, mismatched generations,
    /// row/identifier count mismatch, column outside the vocabulary.
    #[error("semantic index corrupt: {0}")]
    Corrupt(String),
}

impl ArtifactError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, ArtifactError::Corrupt(_))
    }
}

/// Failures reading records from a catalog source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid catalog JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for store implementations outside this crate.
    #[error("catalog source failed: {0}")]
    Source(String),
}

/// Failures loading configuration or the synonym table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid synonym table: {0}")]
    Synonyms(#[from] serde_json::Error),
}
