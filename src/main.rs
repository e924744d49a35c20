// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dokan::build::{term_frequencies, CatalogSource, JsonCatalog};
use dokan::{artifact, SearchConfig, SearchContext};

mod cli;
use cli::{display, Cli, Commands};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dokan=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(dir) = &cli.artifact_dir {
        config = config.with_artifact_dir(dir);
    }
    Ok(config)
}

fn load_catalog(path: &std::path::Path) -> Result<Vec<dokan::Record>> {
    JsonCatalog::new(path)
        .load_records()
        .with_context(|| format!("loading catalog {}", path.display()))
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Index { catalog } => {
            let context = SearchContext::new(config)?;
            let report = context
                .rebuild_index(&JsonCatalog::new(catalog))
                .context("rebuilding semantic index")?;
            display::print_rebuild(&report);
        }

        Commands::Search {
            catalog,
            query,
            limit,
            json,
        } => {
            let config = match limit {
                Some(limit) => config.with_max_results(*limit),
                None => config,
            };
            let context = SearchContext::new(config)?;
            let records = load_catalog(catalog)?;
            let results = context.search(&records, query);

            if *json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                display::print_results(query, &results, &records, &context.config().fusion);
            }
        }

        Commands::Inspect { json } => {
            let summary = artifact::inspect(&config.artifact_dir)
                .with_context(|| format!("inspecting {}", config.artifact_dir.display()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                display::print_summary(&summary);
            }
        }

        Commands::Terms { catalog, top } => {
            let context = SearchContext::new(config)?;
            let records = load_catalog(catalog)?;
            let mut terms = term_frequencies(&records, context.analyzer());
            terms.truncate(*top);
            display::print_terms(&terms);
        }
    }

    Ok(())
}
