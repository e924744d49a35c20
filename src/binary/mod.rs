// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format of the semantic index blobs.
//!
//! Three blobs per generation, each framed by [`header`]:
//!
//! ```text
//! vocabulary.bin   synonyms_version: u32 LE
//!                  term_count: varint
//!                  [term: varint len + UTF-8, idf: f32 LE] × term_count
//!
//! matrix.bin       vocab_len: varint
//!                  row_count: varint
//!                  [nnz: varint, col deltas: varint × nnz, weights: f32 LE × nnz] × row_count
//!
//! record_ids.bin   count: varint
//!                  [id: varint] × count
//! ```
//!
//! Columns are delta-encoded within a row (they're strictly ascending, so
//! deltas after the first are ≥ 1). Weights are raw `f32` bits: what's saved
//! is exactly what was fitted.
//!
//! Decoding only checks the framing and that each payload parses. The
//! cross-blob invariants (generations agree, rows == ids, columns in range)
//! are checked by the artifact loader and `SemanticIndex::from_parts`.

pub mod encoding;
pub mod header;

use std::io;

use crate::semantic::{SemanticIndex, SparseRow};
use crate::types::RecordId;

pub use encoding::{decode_varint, encode_varint, ByteReader};
pub use header::{BlobFooter, BlobHeader, BlobKind, FOOTER_MAGIC, MAX_BLOB_SIZE, VERSION};

// ============================================================================
// FRAMING
// ============================================================================

/// Frame a payload: header, payload, CRC footer.
pub fn seal(kind: BlobKind, generation: u64, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(BlobHeader::SIZE + payload.len() + BlobFooter::SIZE);
    // Writing into a Vec can't fail.
    let _ = BlobHeader::new(kind, generation).write(&mut buf);
    buf.extend_from_slice(payload);
    let crc32 = BlobFooter::compute_crc32(&buf);
    let _ = BlobFooter { crc32 }.write(&mut buf);
    buf
}

/// Check framing and checksum. Returns the generation and the payload.
pub fn open(kind: BlobKind, bytes: &[u8]) -> io::Result<(u64, &[u8])> {
    if bytes.len() > MAX_BLOB_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} blob too large: {} bytes (max {})",
                kind.name(),
                bytes.len(),
                MAX_BLOB_SIZE
            ),
        ));
    }
    if bytes.len() < BlobHeader::SIZE + BlobFooter::SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} blob truncated ({} bytes)", kind.name(), bytes.len()),
        ));
    }

    let header = BlobHeader::read(kind, bytes)?;
    let footer = BlobFooter::read(bytes)?;
    let content_end = bytes.len() - BlobFooter::SIZE;
    let computed = BlobFooter::compute_crc32(&bytes[..content_end]);
    if computed != footer.crc32 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} checksum mismatch: expected {:08x}, got {:08x}",
                kind.name(),
                footer.crc32,
                computed
            ),
        ));
    }

    Ok((header.generation, &bytes[BlobHeader::SIZE..content_end]))
}

// ============================================================================
// VOCABULARY
// ============================================================================

/// Decoded vocabulary blob.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyBlob {
    pub synonyms_version: u32,
    pub terms: Vec<String>,
    pub idf: Vec<f32>,
}

pub fn encode_vocabulary(index: &SemanticIndex, generation: u64) -> Vec<u8> {
    let mut payload = Vec::new();
    encoding::encode_u32(index.synonyms_version(), &mut payload);
    encode_varint(index.terms().len() as u64, &mut payload);
    for (term, &idf) in index.terms().iter().zip(index.idf()) {
        encoding::encode_string(term, &mut payload);
        encoding::encode_f32(idf, &mut payload);
    }
    seal(BlobKind::Vocabulary, generation, &payload)
}

pub fn decode_vocabulary(bytes: &[u8]) -> io::Result<(u64, VocabularyBlob)> {
    let (generation, payload) = open(BlobKind::Vocabulary, bytes)?;
    let mut reader = ByteReader::new(payload);

    let synonyms_version = reader.u32()?;
    // Each term takes at least a length byte and four idf bytes.
    let count = reader.count(5, "term")?;
    let mut terms = Vec::with_capacity(count);
    let mut idf = Vec::with_capacity(count);
    for _ in 0..count {
        terms.push(reader.string()?);
        idf.push(reader.f32()?);
    }
    reader.finish("vocabulary")?;

    Ok((
        generation,
        VocabularyBlob {
            synonyms_version,
            terms,
            idf,
        },
    ))
}

// ============================================================================
// MATRIX
// ============================================================================

/// Decoded matrix blob.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBlob {
    /// Vocabulary length the matrix was written against.
    pub vocab_len: usize,
    pub rows: Vec<SparseRow>,
}

pub fn encode_matrix(index: &SemanticIndex, generation: u64) -> Vec<u8> {
    let mut payload = Vec::new();
    encode_varint(index.terms().len() as u64, &mut payload);
    encode_varint(index.rows().len() as u64, &mut payload);
    for row in index.rows() {
        encode_varint(row.nnz() as u64, &mut payload);
        let mut prev = 0u32;
        for &col in &row.cols {
            encode_varint((col - prev) as u64, &mut payload);
            prev = col;
        }
        for &w in &row.weights {
            encoding::encode_f32(w, &mut payload);
        }
    }
    seal(BlobKind::Matrix, generation, &payload)
}

pub fn decode_matrix(bytes: &[u8]) -> io::Result<(u64, MatrixBlob)> {
    let (generation, payload) = open(BlobKind::Matrix, bytes)?;
    let mut reader = ByteReader::new(payload);

    let vocab_len = reader.varint()? as usize;
    let row_count = reader.count(1, "row")?;
    let mut rows = Vec::with_capacity(row_count);
    for r in 0..row_count {
        // Each entry is at least one delta byte and four weight bytes.
        let nnz = reader.count(5, "row entry")?;
        let mut cols = Vec::with_capacity(nnz);
        let mut col = 0u64;
        for _ in 0..nnz {
            col = col.saturating_add(reader.varint()?);
            let col32 = u32::try_from(col).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("row {} column {} overflows u32", r, col),
                )
            })?;
            cols.push(col32);
        }
        let mut weights = Vec::with_capacity(nnz);
        for _ in 0..nnz {
            weights.push(reader.f32()?);
        }
        rows.push(SparseRow { cols, weights });
    }
    reader.finish("matrix")?;

    Ok((generation, MatrixBlob { vocab_len, rows }))
}

// ============================================================================
// RECORD IDS
// ============================================================================

pub fn encode_record_ids(ids: &[RecordId], generation: u64) -> Vec<u8> {
    let mut payload = Vec::with_capacity(ids.len() * 2 + 4);
    encode_varint(ids.len() as u64, &mut payload);
    for &id in ids {
        encode_varint(id, &mut payload);
    }
    seal(BlobKind::RecordIds, generation, &payload)
}

pub fn decode_record_ids(bytes: &[u8]) -> io::Result<(u64, Vec<RecordId>)> {
    let (generation, payload) = open(BlobKind::RecordIds, bytes)?;
    let mut reader = ByteReader::new(payload);

    let count = reader.count(1, "record id")?;
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        ids.push(reader.varint()?);
    }
    reader.finish("record ids")?;

    Ok((generation, ids))
}
