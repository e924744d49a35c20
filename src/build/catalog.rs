// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog sources: where the records for a rebuild come from.
//!
//! The record store is external. Anything that can hand over a full snapshot
//! of records implements [`CatalogSource`]. Two sources ship here: an
//! in-memory slice, and [`JsonCatalog`], the directory export format:
//!
//! ```json
//! {
//!   "categories": [{"id": 3, "name": "বেকারি", "name_english": "Bakery"}],
//!   "shops": [{"name": "Rahim Bakery", "products": "bread, cake",
//!              "mobile": "01711-223344", "category_id": 3}]
//! }
//! ```
//!
//! Shops in the export carry no tags of their own; they're derived from the
//! other fields (see [`derive_tags`]).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CatalogError;
use crate::types::{Record, RecordId, Tag};

/// A full snapshot of the record store.
pub trait CatalogSource {
    fn load_records(&self) -> Result<Vec<Record>, CatalogError>;
}

impl CatalogSource for [Record] {
    fn load_records(&self) -> Result<Vec<Record>, CatalogError> {
        Ok(self.to_vec())
    }
}

impl CatalogSource for Vec<Record> {
    fn load_records(&self) -> Result<Vec<Record>, CatalogError> {
        Ok(self.clone())
    }
}

/// A catalog export on disk.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalog {
    fn load_records(&self) -> Result<Vec<Record>, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&raw).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

// ============================================================================
// EXPORT FORMAT
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
    #[serde(default)]
    shops: Vec<ShopEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub name_english: Option<String>,
}

/// One shop as exported. Every field may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub products: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Parse an export into records.
///
/// Shops without an `id` get their 1-based position in the export.
pub fn parse_catalog(json: &str) -> Result<Vec<Record>, serde_json::Error> {
    let file: CatalogFile = serde_json::from_str(json)?;

    let by_id: HashMap<u64, &CategoryEntry> =
        file.categories.iter().map(|c| (c.id, c)).collect();
    let by_name: HashMap<String, &CategoryEntry> = file
        .categories
        .iter()
        .map(|c| (c.name.trim().to_lowercase(), c))
        .collect();

    let records = file
        .shops
        .iter()
        .enumerate()
        .map(|(i, shop)| {
            let category = shop
                .category_id
                .and_then(|id| by_id.get(&id).copied())
                .or_else(|| {
                    shop.category_name
                        .as_deref()
                        .and_then(|n| by_name.get(&n.trim().to_lowercase()).copied())
                });

            Record {
                id: shop.id.unwrap_or(i as RecordId + 1),
                name: shop.name.clone().unwrap_or_default(),
                products: shop.products.clone().unwrap_or_default(),
                tags: derive_tags(shop, category),
            }
        })
        .collect();

    Ok(records)
}

/// Searchable tags for a shop.
///
/// In order, lower-cased, first occurrence wins:
/// 1. explicit `tags`
/// 2. the category name, with the English name as alias
/// 3. each comma-separated product longer than one character
/// 4. each mobile number without spaces or hyphens, then as written
/// 5. each word of the shop name longer than one character
pub fn derive_tags(shop: &ShopEntry, category: Option<&CategoryEntry>) -> Vec<Tag> {
    let mut tags = TagSet::default();

    for tag in shop.tags.iter().flatten() {
        tags.push(tag, None);
    }

    let category_name = shop
        .category_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| category.map(|c| c.name.as_str()));
    if let Some(name) = category_name {
        let alias = category
            .and_then(|c| c.name_english.as_deref())
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty());
        tags.push(name, alias);
    }

    if let Some(products) = shop.products.as_deref() {
        for product in products.split(',') {
            if product.trim().chars().count() > 1 {
                tags.push(product, None);
            }
        }
    }

    if let Some(mobile) = shop.mobile.as_deref() {
        // Several numbers are often listed in one field.
        for number in mobile.split([',', '/']) {
            let cleaned: String = number.chars().filter(|c| *c != ' ' && *c != '-').collect();
            if !cleaned.is_empty() {
                tags.push(&cleaned, None);
                tags.push(number, None);
            }
        }
    }

    if let Some(name) = shop.name.as_deref() {
        for word in name.split_whitespace() {
            if word.chars().count() > 1 {
                tags.push(word, None);
            }
        }
    }

    tags.into_tags()
}

#[derive(Default)]
struct TagSet {
    seen: HashSet<String>,
    tags: Vec<Tag>,
}

impl TagSet {
    fn push(&mut self, name: &str, alias: Option<String>) {
        let name = name.trim().to_lowercase();
        if name.is_empty() || !self.seen.insert(name.clone()) {
            return;
        }
        self.tags.push(Tag { name, alias });
    }

    fn into_tags(self) -> Vec<Tag> {
        self.tags
    }
}
