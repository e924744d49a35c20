// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hybrid catalog search for a business directory.
//!
//! A query is matched two ways and the two scores are fused:
//!
//! - **Lexical**: exact and substring matches against a record's tags, token
//!   overlap with its name and products. Bounded, field-weighted, cheap.
//! - **Semantic**: cosine similarity in a TF-IDF space fitted offline over
//!   the whole catalog. Catches records that share vocabulary with the
//!   query without matching it field for field.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌────────────┐
//! │   text    │──▶│  scoring   │──▶│  ranking   │──▶ Vec<ScoredResult>
//! │ normalize │   │  lexical   │   │  fusion    │
//! │ tokenize  │   └────────────┘   └────────────┘
//! │ synonyms  │          ▲                ▲
//! └───────────┘          │                │
//!       │           records (store)       │
//!       ▼                                 │
//! ┌───────────┐   ┌────────────┐   ┌────────────┐
//! │  build    │──▶│  semantic  │──▶│  artifact  │  gen-N/{vocabulary,matrix,record_ids}.bin
//! │ (catalog) │   │  (tf-idf)  │   │  (binary)  │
//! └───────────┘   └────────────┘   └────────────┘
//! ```
//!
//! [`SearchContext`] ties it together: it owns the configuration, the
//! analyzer and the lazily loaded semantic index.
//!
//! # Usage
//!
//! ```ignore
//! use dokan::{SearchConfig, SearchContext};
//!
//! let context = SearchContext::new(SearchConfig::default())?;
//! context.rebuild_index(&records)?;
//! let results = context.search(&records, "বেকারি");
//! ```

pub mod artifact;
pub mod binary;
pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod semantic;
pub mod testing;
pub mod text;
mod types;

pub use build::{BuildOutcome, CatalogSource, JsonCatalog};
pub use config::{FusionConfig, LexicalWeights, SearchConfig, SemanticConfig};
pub use engine::{RebuildReport, SearchContext};
pub use error::{ArtifactError, CatalogError, ConfigError, SearchError};
pub use semantic::SemanticIndex;
pub use text::{Analyzer, SynonymTable};
pub use types::{Record, RecordId, ScoredResult, SemanticHit, Tag};
