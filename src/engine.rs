// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search context: configuration, analyzer and the semantic index slot.
//!
//! One context per process (or per test). It owns everything a search needs
//! except the records, which belong to the store and are passed in per call.
//!
//! # Index slot
//!
//! ```text
//! Unloaded ──first search──▶ Ready(Arc<SemanticIndex>)
//!     │                          ▲
//!     └──load failed──▶ Unavailable
//!                                │
//!            rebuild / install ──┘   reload ──▶ Unloaded
//! ```
//!
//! Searches clone the `Arc` and drop the lock before scoring, so a rebuild
//! swapping in a new index never waits on, or disturbs, searches in flight.
//! A failed load is remembered: it's logged once and every later search runs
//! lexical-only without touching the disk again.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::artifact;
use crate::build::{build_semantic_index, BuildOutcome, CatalogSource};
use crate::config::SearchConfig;
use crate::error::{ConfigError, SearchError};
use crate::scoring::{fuse, lexical_score, rank_results, rescale_similarity};
use crate::semantic::SemanticIndex;
use crate::text::{Analyzer, PreparedQuery, SynonymTable};
use crate::types::{Record, RecordId, ScoredResult};

#[derive(Debug)]
enum Slot {
    Unloaded,
    Ready(Arc<SemanticIndex>),
    Unavailable,
}

/// What `rebuild_index` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RebuildReport {
    Rebuilt {
        generation: u64,
        documents: usize,
        terms: usize,
    },
    /// Nothing to index. The previous artifact was left in place.
    SkippedEmpty,
}

#[derive(Debug)]
pub struct SearchContext {
    config: SearchConfig,
    analyzer: Analyzer,
    slot: RwLock<Slot>,
}

impl SearchContext {
    /// Create a context, loading the configured synonym table if one is set.
    ///
    /// The semantic index is not touched until the first search.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let synonyms = match &config.synonyms_path {
            Some(path) => SynonymTable::from_path(path)?,
            None => SynonymTable::builtin(),
        };
        Ok(Self::with_analyzer(config, Analyzer::new(synonyms)))
    }

    pub fn with_analyzer(config: SearchConfig, analyzer: Analyzer) -> Self {
        Self {
            config,
            analyzer,
            slot: RwLock::new(Slot::Unloaded),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// The current semantic index, loading it on first use.
    ///
    /// `None` when the artifact is unavailable or corrupt.
    pub fn semantic_index(&self) -> Option<Arc<SemanticIndex>> {
        match &*self.slot.read() {
            Slot::Ready(index) => return Some(Arc::clone(index)),
            Slot::Unavailable => return None,
            Slot::Unloaded => {}
        }

        let mut slot = self.slot.write();
        // Someone else may have loaded it while we waited for the write lock.
        match &*slot {
            Slot::Ready(index) => return Some(Arc::clone(index)),
            Slot::Unavailable => return None,
            Slot::Unloaded => {}
        }

        match artifact::load(&self.config.artifact_dir) {
            Ok(index) => {
                let table_version = self.analyzer.synonyms().version();
                if index.synonyms_version() != table_version {
                    tracing::warn!(
                        index_version = index.synonyms_version(),
                        table_version,
                        "Semantic index was fitted with a different synonym table; rebuild recommended"
                    );
                }
                let index = Arc::new(index);
                *slot = Slot::Ready(Arc::clone(&index));
                Some(index)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    corrupt = e.is_corrupt(),
                    "Semantic index not loaded; searching lexical-only"
                );
                *slot = Slot::Unavailable;
                None
            }
        }
    }

    /// Forget the loaded (or failed) index; the next search loads again.
    pub fn reload(&self) {
        *self.slot.write() = Slot::Unloaded;
    }

    /// Serve `index` from now on. In-flight searches keep their snapshot.
    pub fn install(&self, index: SemanticIndex) {
        *self.slot.write() = Slot::Ready(Arc::new(index));
    }

    /// Rank `records` for `query`.
    ///
    /// Never fails. An empty query gives an empty list. Without a semantic
    /// index every record is scored lexically only.
    pub fn search(&self, records: &[Record], query: &str) -> Vec<ScoredResult> {
        let prepared = self.analyzer.prepare_query(query);
        if prepared.is_empty() {
            return Vec::new();
        }

        let semantic: HashMap<RecordId, f64> = match self.semantic_index() {
            Some(index) => index
                .search(&prepared.tokens, &self.config.semantic)
                .into_iter()
                .map(|hit| (hit.record_id, rescale_similarity(hit.similarity)))
                .collect(),
            None => HashMap::new(),
        };

        #[cfg(feature = "parallel")]
        let scored: Vec<(ScoredResult, &Record)> = records
            .par_iter()
            .filter_map(|record| self.score_record(record, &prepared, &semantic))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let scored: Vec<(ScoredResult, &Record)> = records
            .iter()
            .filter_map(|record| self.score_record(record, &prepared, &semantic))
            .collect();

        let results = rank_results(scored, self.config.max_results);

        tracing::debug!(
            query,
            candidates = records.len(),
            semantic_hits = semantic.len(),
            results = results.len(),
            "Search complete"
        );
        results
    }

    fn score_record<'r>(
        &self,
        record: &'r Record,
        query: &PreparedQuery,
        semantic: &HashMap<RecordId, f64>,
    ) -> Option<(ScoredResult, &'r Record)> {
        let lexical = lexical_score(record, query, &self.analyzer, &self.config.lexical);
        let semantic_score = semantic.get(&record.id).copied().unwrap_or(0.0);
        let fused = fuse(lexical, semantic_score, &self.config.fusion);
        (fused > 0.0).then_some((
            ScoredResult {
                record_id: record.id,
                lexical_score: lexical,
                semantic_score,
                fused_score: fused,
            },
            record,
        ))
    }

    /// Refit the semantic index from a catalog snapshot and persist it.
    ///
    /// An empty catalog is not an error: the previous artifact stays
    /// authoritative and `SkippedEmpty` is returned.
    pub fn rebuild_index<S>(&self, source: &S) -> Result<RebuildReport, SearchError>
    where
        S: CatalogSource + ?Sized,
    {
        let records = source.load_records()?;

        let index = match build_semantic_index(&records, &self.analyzer, &self.config.semantic) {
            BuildOutcome::Built(index) => index,
            BuildOutcome::Empty => {
                tracing::warn!(
                    records = records.len(),
                    "No documents to index; skipping build"
                );
                return Ok(RebuildReport::SkippedEmpty);
            }
        };

        let generation = artifact::save(&index, &self.config.artifact_dir)?;
        let report = RebuildReport::Rebuilt {
            generation,
            documents: index.len(),
            terms: index.terms().len(),
        };
        self.install(index.with_generation(generation));

        tracing::info!(generation, records = records.len(), "Rebuilt semantic index");
        Ok(report)
    }
}
