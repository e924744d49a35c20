// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::types::{Record, RecordId, Tag};

/// A record with no tags.
pub fn make_record(id: RecordId, name: &str, products: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
        products: products.to_string(),
        tags: Vec::new(),
    }
}

/// A record with plain (alias-free) tags.
pub fn make_record_with_tags(id: RecordId, name: &str, products: &str, tags: &[&str]) -> Record {
    Record {
        tags: tags.iter().map(|t| make_tag(t)).collect(),
        ..make_record(id, name, products)
    }
}

pub fn make_tag(name: &str) -> Tag {
    Tag::new(name)
}

/// A small mixed-script directory: two bakeries, a hardware store, a
/// pharmacy and a tailor.
pub fn sample_catalog() -> Vec<Record> {
    vec![
        Record {
            tags: vec![
                Tag::with_alias("বেকারি", "bakery"),
                make_tag("bread"),
                make_tag("01711223344"),
            ],
            ..make_record(1, "Rahim Bakery", "bread, cake, biscuit")
        },
        make_record_with_tags(2, "Karim Sweets", "sweets, bakery items, cake", &["sweets"]),
        Record {
            tags: vec![Tag::with_alias("হার্ডওয়্যার", "hardware"), make_tag("rod")],
            ..make_record(3, "Iron House", "rod, cement, pipe")
        },
        make_record_with_tags(4, "Shifa Pharmacy", "medicine, syrup", &["pharmacy"]),
        make_record_with_tags(5, "Modern Tailors", "shirt, pant, suit", &["tailor"]),
    ]
}
