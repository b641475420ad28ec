//! Shared test utilities for the simple-press test suite.
//!
//! Provides the Digital Cat fixture (a real-world blog configuration), quick
//! settings builders, and lookup helpers over a [`Plan`] that panic with a
//! clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let settings = digital_cat_settings();
//! let items = digital_cat_items();
//! let plan = plan(&settings, &items).unwrap();
//!
//! let about = find_binding(&plan, "pages/about.html");
//! assert_eq!(about.url, "pages/about.html");
//! assert_listing_pages(&plan, ListingKind::Archives, None, 1);
//! ```

use std::path::Path;

use crate::config::{Settings, resolve};
use crate::content::{ContentItem, load_items};
use crate::paginate::ListingKind;
use crate::route::{Plan, RouteBinding, Target};

// =========================================================================
// Fixture setup
// =========================================================================

/// `fixtures/digital-cat/pelicanconf.toml`.
pub const DIGITAL_CAT_CONFIG: &str = include_str!("../fixtures/digital-cat/pelicanconf.toml");

/// `fixtures/digital-cat/publishconf.toml`.
pub const DIGITAL_CAT_PUBLISH: &str = include_str!("../fixtures/digital-cat/publishconf.toml");

/// Resolve a TOML string. Panics on any configuration error.
pub fn settings_from(toml_str: &str) -> Settings {
    let raw: toml::Value = toml::from_str(toml_str)
        .unwrap_or_else(|e| panic!("test config is not valid TOML: {e}"));
    resolve(raw).unwrap_or_else(|e| panic!("test config does not resolve: {e}"))
}

pub fn digital_cat_settings() -> Settings {
    settings_from(DIGITAL_CAT_CONFIG)
}

/// The items in `fixtures/digital-cat/content.json`.
pub fn digital_cat_items() -> Vec<ContentItem> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/digital-cat/content.json");
    load_items(&path).unwrap()
}

/// `n` published, dated articles with distinct slugs (`post-01`, ...).
pub fn dated_articles(n: usize) -> Vec<ContentItem> {
    assert!(n <= 28, "dated_articles only spans one month");
    (1..=n)
        .map(|i| ContentItem::article(format!("post-{i:02}")).with_date(2016, 2, i as u32))
        .collect()
}

// =========================================================================
// Plan lookups (panic with a clear message on miss)
// =========================================================================

/// Find the binding written to `save_as`. Panics if not found.
pub fn find_binding<'p, 'a>(plan: &'p Plan<'a>, save_as: &str) -> &'p RouteBinding<'a> {
    plan.find(save_as).unwrap_or_else(|| {
        let paths: Vec<&str> = plan.bindings.iter().map(|b| b.save_as.as_str()).collect();
        panic!("no binding for '{save_as}'. Available: {paths:?}")
    })
}

/// Find the binding of the item with this slug. Panics if not found.
pub fn find_item_binding<'p, 'a>(plan: &'p Plan<'a>, slug: &str) -> &'p RouteBinding<'a> {
    plan.find_item(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = plan
            .items()
            .filter_map(|b| match b.target {
                Target::Item { item } => Some(item.slug.as_str()),
                Target::Listing { .. } => None,
            })
            .collect();
        panic!("no binding for item '{slug}'. Available: {slugs:?}")
    })
}

/// All pages of one listing, in page order.
pub fn listing_pages<'p, 'a>(
    plan: &'p Plan<'a>,
    kind: ListingKind,
    term_slug: Option<&str>,
) -> Vec<&'p RouteBinding<'a>> {
    plan.listings()
        .filter(|b| match &b.target {
            Target::Listing { kind: k, term, .. } => {
                *k == kind && term.as_ref().map(|t| t.slug.as_str()) == term_slug
            }
            Target::Item { .. } => false,
        })
        .collect()
}

/// Slugs of the items shown on a listing page. Panics on item bindings.
pub fn page_slugs<'a>(binding: &RouteBinding<'a>) -> Vec<&'a str> {
    match &binding.target {
        Target::Listing { items, .. } => items.iter().map(|&i| i.slug.as_str()).collect(),
        Target::Item { item } => panic!("'{}' is an item, not a listing", item.slug),
    }
}

// =========================================================================
// Plan shape assertions
// =========================================================================

/// Assert that a listing has exactly `expected` pages, numbered 1..=expected.
pub fn assert_listing_pages(
    plan: &Plan<'_>,
    kind: ListingKind,
    term_slug: Option<&str>,
    expected: usize,
) {
    let pages = listing_pages(plan, kind, term_slug);
    let numbers: Vec<(usize, usize)> = pages
        .iter()
        .filter_map(|b| match b.target {
            Target::Listing { page, pages, .. } => Some((page, pages)),
            Target::Item { .. } => None,
        })
        .collect();
    let want: Vec<(usize, usize)> = (1..=expected).map(|n| (n, expected)).collect();
    assert_eq!(
        numbers,
        want,
        "{} listing {:?}: unexpected pages",
        kind.label(),
        term_slug
    );
}

/// Assert that no two bindings, feeds or statics share a save-as path.
pub fn assert_unique_paths(plan: &Plan<'_>) {
    let mut seen = std::collections::HashSet::new();
    let paths = plan
        .bindings
        .iter()
        .map(|b| b.save_as.as_str())
        .chain(plan.feeds.iter().map(|f| f.save_as.as_str()))
        .chain(plan.statics.iter().map(|s| s.save_as.as_str()));
    for path in paths {
        assert!(seen.insert(path), "'{path}' planned twice");
    }
}
