// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Blob header and footer.
//!
//! Every blob of a semantic index generation is framed the same way:
//!
//! ```text
//! ┌────────────┬─────────┬──────────────┬─────────────┬────────────────┐
//! │ magic [4]  │ ver [1] │ gen [8] LE   │ payload ... │ footer [8]     │
//! └────────────┴─────────┴──────────────┴─────────────┴────────────────┘
//! ```
//!
//! The footer is a CRC32 over everything before it plus a footer magic. If
//! the footer is wrong, something got corrupted or truncated. Don't trust the
//! data.
//!
//! The generation is written into every blob so a half-replaced generation
//! directory (matrix from one build, record ids from another) is caught on
//! load instead of silently pairing rows with the wrong records.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;

/// Footer magic: "NAKD" ("DKAN" reversed, marks valid blob end)
pub const FOOTER_MAGIC: [u8; 4] = [0x4E, 0x41, 0x4B, 0x44];

/// Current blob format version.
pub const VERSION: u8 = 1;

/// Maximum blob size: 256 MB (prevents huge allocations from a bad length)
pub const MAX_BLOB_SIZE: usize = 256 * 1024 * 1024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

/// Which of the three blobs this is. Each has its own header magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Vocabulary,
    Matrix,
    RecordIds,
}

impl BlobKind {
    pub fn magic(self) -> [u8; 4] {
        match self {
            BlobKind::Vocabulary => *b"DKVO",
            BlobKind::Matrix => *b"DKMX",
            BlobKind::RecordIds => *b"DKID",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlobKind::Vocabulary => "vocabulary",
            BlobKind::Matrix => "matrix",
            BlobKind::RecordIds => "record ids",
        }
    }
}

/// Fixed-size blob header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    pub kind: BlobKind,
    pub version: u8,
    pub generation: u64,
}

impl BlobHeader {
    pub const SIZE: usize = 13; // 4 magic + 1 version + 8 generation

    pub fn new(kind: BlobKind, generation: u64) -> Self {
        Self {
            kind,
            version: VERSION,
            generation,
        }
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.kind.magic())?;
        w.write_all(&[self.version])?;
        w.write_all(&self.generation.to_le_bytes())?;
        Ok(())
    }

    /// Parse and check the header of a blob that should be `kind`.
    pub fn read(kind: BlobKind, bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} blob too short for header", kind.name()),
            ));
        }

        let magic = &bytes[0..4];
        if magic != kind.magic() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid {} magic: expected {:?}, got {:?}",
                    kind.name(),
                    kind.magic(),
                    magic
                ),
            ));
        }

        let version = bytes[4];
        if version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported {} version {} (expected {})",
                    kind.name(),
                    version,
                    VERSION
                ),
            ));
        }

        let mut gen = [0u8; 8];
        gen.copy_from_slice(&bytes[5..13]);

        Ok(Self {
            kind,
            version,
            generation: u64::from_le_bytes(gen),
        })
    }
}

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone)]
pub struct BlobFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl BlobFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Blob too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected NAKD, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
