// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the dokan CLI.
//!
//! OneDark colors for dark terminals, One Light for light ones. The theme
//! comes from `DOKAN_THEME` when set, then `COLORFGBG`, then defaults to
//! dark. Respects `NO_COLOR` and turns colors off when stdout isn't a TTY.
//!
//! Widths are counted in chars. Bengali names with combining signs will
//! render a little narrower than counted; the columns stay readable.

use std::collections::HashMap;
use std::sync::OnceLock;

use dokan::artifact::ArtifactSummary;
use dokan::engine::RebuildReport;
use dokan::scoring::{classify, FusionBranch};
use dokan::{FusionConfig, Record, RecordId, ScoredResult};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Cached theme detection result
static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DOKAN_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut to `max` chars, marking the cut with an ellipsis.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = border();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = border();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        reset()
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded score value
pub fn score_value(score: f64) -> String {
    let text = format!("{:>6.1}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 100.0 {
        BRIGHT_GREEN()
    } else if score >= 50.0 {
        GREEN()
    } else if score >= 20.0 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

/// Short label for the fusion rule that produced a result.
pub fn branch_label(branch: FusionBranch) -> String {
    let (text, color): (&str, fn() -> String) = match branch {
        FusionBranch::Agreement => ("both", GREEN),
        FusionBranch::LexicalOnly => ("lexical", BLUE),
        FusionBranch::SemanticOnly => ("semantic", MAGENTA),
        FusionBranch::Excluded => ("-", GRAY),
    };
    themed(color, &[], text)
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND OUTPUT
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_results(query: &str, results: &[ScoredResult], records: &[Record], fusion: &FusionConfig) {
    let names: HashMap<RecordId, &str> = records.iter().map(|r| (r.id, r.name.as_str())).collect();

    section_top(&format!("{} results for \"{}\"", results.len(), query));
    if results.is_empty() {
        row(&format!(" {}", themed(GRAY, &[], "no matches")));
    } else {
        row(&themed(
            GRAY,
            &[],
            " #    fused    lex    sem  rule      id      name",
        ));
    }
    for (rank, result) in results.iter().enumerate() {
        let name = names.get(&result.record_id).copied().unwrap_or("?");
        let branch = classify(result.lexical_score, result.semantic_score, fusion);
        row(&format!(
            " {} {} {} {}  {} {} {}",
            pad_right(&(rank + 1).to_string(), 3),
            score_value(result.fused_score),
            score_value(result.lexical_score),
            score_value(result.semantic_score),
            pad_right(&branch_label(branch), 8),
            pad_left(&result.record_id.to_string(), 6),
            truncate_chars(name, 36),
        ));
    }
    section_bot();
}

pub fn print_summary(summary: &ArtifactSummary) {
    let generations: Vec<String> = summary
        .generations_on_disk
        .iter()
        .map(u64::to_string)
        .collect();

    section_top("Semantic index");
    row(&format!(" directory        {}", truncate_chars(&summary.dir.display().to_string(), 60)));
    row(&format!(" generation       {}", themed(GREEN, &[BOLD], &summary.generation.to_string())));
    row(&format!(" on disk          {}", generations.join(", ")));
    row(&format!(" synonym table    v{}", summary.synonyms_version));
    row(&format!(" terms            {}", summary.terms));
    row(&format!(" rows             {}", summary.rows));
    row(&format!(" non-zeros        {}", summary.nonzeros));
    row(&format!(" empty rows       {}", summary.empty_rows));
    section_bot();
}

pub fn print_rebuild(report: &RebuildReport) {
    match report {
        RebuildReport::Rebuilt {
            generation,
            documents,
            terms,
        } => {
            section_top("Index rebuilt");
            row(&format!(" generation       {}", themed(GREEN, &[BOLD], &generation.to_string())));
            row(&format!(" documents        {}", documents));
            row(&format!(" terms            {}", terms));
            section_bot();
        }
        RebuildReport::SkippedEmpty => {
            section_top("Index unchanged");
            row(&format!(" {}", themed(YELLOW, &[], "catalog had no indexable records")));
            section_bot();
        }
    }
}

pub fn print_terms(terms: &[(String, usize)]) {
    section_top(&format!("Top {} terms", terms.len()));
    for (term, count) in terms {
        row(&format!(" {}  {}", pad_left(&count.to_string(), 7), truncate_chars(term, 60)));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
