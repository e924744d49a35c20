// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the dokan command-line interface.
//!
//! Four subcommands: `index` refits the semantic index from a catalog
//! export, `search` ranks the catalog for a query, `inspect` summarises the
//! artifact directory, and `terms` prints the corpus word frequencies used
//! to curate the synonym table.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dokan",
    about = "Hybrid lexical and TF-IDF search over a business directory",
    version
)]
pub struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured artifact directory
    #[arg(long, global = true)]
    pub artifact_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the semantic index from a catalog export
    Index {
        /// Catalog export (JSON with categories and shops)
        catalog: PathBuf,
    },

    /// Search a catalog export and display ranked results
    Search {
        /// Catalog export (JSON with categories and shops)
        catalog: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results (defaults to max_results from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summarise the current semantic index generation
    Inspect {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the most frequent words in record names and products
    Terms {
        /// Catalog export (JSON with categories and shops)
        catalog: PathBuf,

        /// Number of terms to show
        #[arg(short, long, default_value = "50")]
        top: usize,
    },
}
