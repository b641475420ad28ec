//! Category, tag and author terms collected from listed content.
//!
//! Terms are grouped by slug, not by name: `C++` and `cpp` land in the same
//! listing when a `c++ → cpp` substitution is configured. The first name
//! seen for a slug is the one shown.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Settings;
use crate::content::ContentItem;
use crate::route::{RouteError, RouteErrorKind};
use crate::slug::term_slug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
    pub slug: String,
}

/// A term and the listed items filed under it, in input order.
#[derive(Debug, Clone)]
pub struct TermListing<'a> {
    pub term: Term,
    pub items: Vec<&'a ContentItem>,
}

/// Terms keyed by slug.
pub type TermMap<'a> = BTreeMap<String, TermListing<'a>>;

#[derive(Debug, Default)]
pub struct Taxonomies<'a> {
    pub categories: TermMap<'a>,
    pub tags: TermMap<'a>,
    pub authors: TermMap<'a>,
    /// Languages of listed items other than `DEFAULT_LANG`.
    pub languages: BTreeSet<String>,
}

impl<'a> Taxonomies<'a> {
    /// Collect terms from the published articles in `items`.
    ///
    /// Names whose slug comes out empty are reported once each and skipped.
    pub fn collect(settings: &Settings, items: &'a [ContentItem]) -> (Self, Vec<RouteError>) {
        let mut taxonomies = Self::default();
        let mut errors = Vec::new();
        let mut rejected = BTreeSet::new();

        for item in items.iter().filter(|i| i.is_listed()) {
            if let Some(category) = &item.category {
                file_under(
                    &mut taxonomies.categories,
                    "category",
                    category,
                    item,
                    settings,
                    &mut rejected,
                    &mut errors,
                );
            }
            for tag in &item.tags {
                file_under(
                    &mut taxonomies.tags,
                    "tag",
                    tag,
                    item,
                    settings,
                    &mut rejected,
                    &mut errors,
                );
            }
            let author = item.author.as_deref().unwrap_or(&settings.site.author);
            file_under(
                &mut taxonomies.authors,
                "author",
                author,
                item,
                settings,
                &mut rejected,
                &mut errors,
            );

            if let Some(lang) = &item.lang {
                if *lang != settings.site.default_lang {
                    taxonomies.languages.insert(lang.clone());
                }
            }
        }

        (taxonomies, errors)
    }
}

fn file_under<'a>(
    map: &mut TermMap<'a>,
    label: &str,
    name: &str,
    item: &'a ContentItem,
    settings: &Settings,
    rejected: &mut BTreeSet<(String, String)>,
    errors: &mut Vec<RouteError>,
) {
    let slug = term_slug(name, &settings.slug_substitutions);
    if slug.is_empty() {
        if rejected.insert((label.to_string(), name.to_string())) {
            errors.push(RouteError {
                item: format!("{label} '{name}'"),
                reason: RouteErrorKind::EmptyTermSlug,
            });
        }
        return;
    }
    map.entry(slug.clone())
        .or_insert_with(|| TermListing {
            term: Term {
                name: name.to_string(),
                slug,
            },
            items: Vec::new(),
        })
        .items
        .push(item);
}
