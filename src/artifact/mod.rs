// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk semantic index: generations and the `CURRENT` pointer.
//!
//! ```text
//! <artifact_dir>/
//!   CURRENT              "gen-4"
//!   gen-3/               previous generation, kept for in-flight readers
//!   gen-4/
//!     vocabulary.bin
//!     matrix.bin
//!     record_ids.bin
//! ```
//!
//! A save writes a complete new generation directory, syncs it, and only then
//! replaces `CURRENT` (temp file + rename). A crash mid-save leaves the old
//! pointer in place, so a loader sees either the old generation or the new
//! one, never a mix.
//!
//! Loading never panics on bad input. Everything that can go wrong maps onto
//! [`ArtifactError`]: `Unavailable` when there is nothing to load or the
//! directory can't be read, `Corrupt` when what's there doesn't hold together.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::binary;
use crate::error::ArtifactError;
use crate::semantic::SemanticIndex;

/// Pointer file naming the live generation directory.
pub const CURRENT_FILE: &str = "CURRENT";
pub const VOCABULARY_FILE: &str = "vocabulary.bin";
pub const MATRIX_FILE: &str = "matrix.bin";
pub const RECORD_IDS_FILE: &str = "record_ids.bin";

const GENERATION_PREFIX: &str = "gen-";

fn generation_dir_name(generation: u64) -> String {
    format!("{}{}", GENERATION_PREFIX, generation)
}

fn parse_generation(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(GENERATION_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Generation directories present under `dir`, ascending.
pub fn list_generations(dir: &Path) -> io::Result<Vec<u64>> {
    let mut generations = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(generation) = entry.file_name().to_str().and_then(parse_generation) {
            generations.push(generation);
        }
    }
    generations.sort_unstable();
    Ok(generations)
}

/// Generation named by `CURRENT`, if there is a readable, well-formed one.
pub fn current_generation(dir: &Path) -> Option<u64> {
    let raw = fs::read_to_string(dir.join(CURRENT_FILE)).ok()?;
    parse_generation(raw.trim())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ============================================================================
// SAVE
// ============================================================================

/// Persist `index` as a new generation and make it current.
///
/// Returns the generation number. Afterwards every generation directory
/// except the new one and the one `CURRENT` named before is pruned, which
/// also clears out generations a failed save left half-written. A failure
/// to prune is logged, not returned.
pub fn save(index: &SemanticIndex, dir: &Path) -> io::Result<u64> {
    fs::create_dir_all(dir)?;

    let previous = current_generation(dir);
    let generation = list_generations(dir)?
        .last()
        .copied()
        .max(previous)
        .map_or(1, |g| g + 1);

    let gen_dir = dir.join(generation_dir_name(generation));
    fs::create_dir(&gen_dir)?;

    write_synced(
        &gen_dir.join(VOCABULARY_FILE),
        &binary::encode_vocabulary(index, generation),
    )?;
    write_synced(
        &gen_dir.join(MATRIX_FILE),
        &binary::encode_matrix(index, generation),
    )?;
    write_synced(
        &gen_dir.join(RECORD_IDS_FILE),
        &binary::encode_record_ids(index.record_ids(), generation),
    )?;

    let tmp = dir.join(format!("{}.tmp", CURRENT_FILE));
    write_synced(&tmp, generation_dir_name(generation).as_bytes())?;
    fs::rename(&tmp, dir.join(CURRENT_FILE))?;

    tracing::info!(
        generation,
        terms = index.terms().len(),
        rows = index.len(),
        dir = %dir.display(),
        "Saved semantic index"
    );

    prune(dir, generation, previous);
    Ok(generation)
}

/// Remove every generation except `current` and `previous`.
fn prune(dir: &Path, current: u64, previous: Option<u64>) {
    let generations = match list_generations(dir) {
        Ok(generations) => generations,
        Err(e) => {
            tracing::warn!(error = %e, "Could not list generations for pruning");
            return;
        }
    };

    for generation in generations {
        if generation == current || Some(generation) == previous {
            continue;
        }
        let path = dir.join(generation_dir_name(generation));
        match fs::remove_dir_all(&path) {
            Ok(()) => tracing::debug!(generation, "Pruned old generation"),
            Err(e) => tracing::warn!(generation, error = %e, "Failed to prune old generation"),
        }
    }
}

// ============================================================================
// LOAD
// ============================================================================

fn read_blob(gen_dir: &Path, file: &str) -> Result<Vec<u8>, ArtifactError> {
    let path = gen_dir.join(file);
    fs::read(&path).map_err(|e| match e.kind() {
        // CURRENT points here, so a missing blob is a broken generation.
        io::ErrorKind::NotFound => {
            ArtifactError::Corrupt(format!("missing blob {}", path.display()))
        }
        _ => ArtifactError::Unavailable(format!("cannot read {}: {}", path.display(), e)),
    })
}

fn corrupt(file: &str) -> impl Fn(io::Error) -> ArtifactError + '_ {
    move |e| ArtifactError::Corrupt(format!("{}: {}", file, e))
}

/// Load the current generation under `dir`.
pub fn load(dir: &Path) -> Result<SemanticIndex, ArtifactError> {
    let pointer = fs::read_to_string(dir.join(CURRENT_FILE)).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            ArtifactError::Unavailable(format!("no index built in {}", dir.display()))
        }
        _ => ArtifactError::Unavailable(format!(
            "cannot read {}: {}",
            dir.join(CURRENT_FILE).display(),
            e
        )),
    })?;

    let name = pointer.trim();
    let generation = parse_generation(name).ok_or_else(|| {
        ArtifactError::Corrupt(format!("{} holds invalid generation {:?}", CURRENT_FILE, name))
    })?;
    let gen_dir: PathBuf = dir.join(name);

    let (vocab_gen, vocab) =
        binary::decode_vocabulary(&read_blob(&gen_dir, VOCABULARY_FILE)?)
            .map_err(corrupt(VOCABULARY_FILE))?;
    let (matrix_gen, matrix) =
        binary::decode_matrix(&read_blob(&gen_dir, MATRIX_FILE)?).map_err(corrupt(MATRIX_FILE))?;
    let (ids_gen, record_ids) = binary::decode_record_ids(&read_blob(&gen_dir, RECORD_IDS_FILE)?)
        .map_err(corrupt(RECORD_IDS_FILE))?;

    if vocab_gen != generation || matrix_gen != generation || ids_gen != generation {
        return Err(ArtifactError::Corrupt(format!(
            "generation mismatch: pointer {}, vocabulary {}, matrix {}, record ids {}",
            generation, vocab_gen, matrix_gen, ids_gen
        )));
    }
    if matrix.vocab_len != vocab.terms.len() {
        return Err(ArtifactError::Corrupt(format!(
            "matrix written for {} terms, vocabulary has {}",
            matrix.vocab_len,
            vocab.terms.len()
        )));
    }

    let index = SemanticIndex::from_parts(
        vocab.terms,
        vocab.idf,
        matrix.rows,
        record_ids,
        vocab.synonyms_version,
    )?
    .with_generation(generation);

    tracing::info!(
        generation,
        terms = index.terms().len(),
        rows = index.len(),
        "Loaded semantic index"
    );
    Ok(index)
}

// ============================================================================
// INSPECT
// ============================================================================

/// What `inspect` reports about an artifact directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSummary {
    pub dir: PathBuf,
    pub generation: u64,
    pub generations_on_disk: Vec<u64>,
    pub synonyms_version: u32,
    pub terms: usize,
    pub rows: usize,
    pub nonzeros: usize,
    /// Rows whose document had no in-vocabulary term.
    pub empty_rows: usize,
}

/// Load the current generation and summarise it.
pub fn inspect(dir: &Path) -> Result<ArtifactSummary, ArtifactError> {
    let index = load(dir)?;
    let generations_on_disk = list_generations(dir).unwrap_or_default();
    let nonzeros = index.rows().iter().map(|r| r.nnz()).sum();
    let empty_rows = index.rows().iter().filter(|r| r.nnz() == 0).count();

    Ok(ArtifactSummary {
        dir: dir.to_path_buf(),
        generation: index.generation(),
        generations_on_disk,
        synonyms_version: index.synonyms_version(),
        terms: index.terms().len(),
        rows: index.len(),
        nonzeros,
        empty_rows,
    })
}
