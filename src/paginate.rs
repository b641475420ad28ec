//! Listing pagination: page arithmetic and pattern rules.
//!
//! A listing (the index, the archives, one category, ...) is split into pages
//! of `page_size` items. Each page gets its URL and save-as path from the
//! pagination rule with the greatest `min_page` not above the page number,
//! expanded against the listing's base route:
//!
//! | Placeholder | Value for base save-as `category/python/index.html` |
//! |-------------|------------------------------------------------------|
//! | `{save_as}` | `category/python/index.html` |
//! | `{url}` | base URL, e.g. `category/python/` |
//! | `{name}` | `category/python/index` |
//! | `{base_name}` | `category/python` |
//! | `{extension}` | `.html` |
//! | `{number}` | page number |
//!
//! `base_name` is `name` with a trailing `index` component removed, so
//! `{base_name}/page/{number}/` works for both `archives.html` and
//! `archives/index.html`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

use crate::config::ConfigError;
use crate::template::{EscapesRoot, TemplateError, UrlTemplate, normalize_path};

pub const PATTERN_PLACEHOLDERS: &[&str] =
    &["url", "save_as", "name", "base_name", "number", "extension"];

/// Listing page kinds that may be paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Index,
    Archives,
    Category,
    Tag,
    Author,
}

impl ListingKind {
    pub const ALL: [ListingKind; 5] = [
        Self::Index,
        Self::Archives,
        Self::Category,
        Self::Tag,
        Self::Author,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Archives => "archives",
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Author => "author",
        }
    }
}

/// A resolved `(url, save_as)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub url: String,
    pub save_as: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationRule {
    pub min_page: usize,
    pub url: UrlTemplate,
    pub save_as: UrlTemplate,
}

impl PaginationRule {
    pub fn parse(min_page: usize, url: &str, save_as: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            min_page,
            url: UrlTemplate::parse_for(url, PATTERN_PLACEHOLDERS)?,
            save_as: UrlTemplate::parse_for(save_as, PATTERN_PLACEHOLDERS)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page_size: usize,
    pub orphans: usize,
    /// Sorted by `min_page`; the first rule starts at page 1.
    pub rules: Vec<PaginationRule>,
    pub paginated: BTreeSet<ListingKind>,
}

impl Pagination {
    /// Validate and order the rules.
    pub fn new(
        page_size: usize,
        orphans: usize,
        mut rules: Vec<PaginationRule>,
        paginated: BTreeSet<ListingKind>,
    ) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::Validation(
                "DEFAULT_PAGINATION must be at least 1".into(),
            ));
        }
        rules.sort_by_key(|r| r.min_page);
        if let Some(pair) = rules.windows(2).find(|w| w[0].min_page == w[1].min_page) {
            return Err(ConfigError::DuplicatePaginationRule(pair[0].min_page));
        }
        match rules.first() {
            None => {
                return Err(ConfigError::Validation(
                    "PAGINATION_PATTERNS must not be empty".into(),
                ));
            }
            Some(first) if first.min_page == 0 => {
                return Err(ConfigError::Validation(
                    "PAGINATION_PATTERNS page numbers start at 1".into(),
                ));
            }
            Some(first) if first.min_page != 1 => {
                return Err(ConfigError::Validation(format!(
                    "PAGINATION_PATTERNS has no rule for page 1 (first rule starts at {})",
                    first.min_page
                )));
            }
            Some(_) => {}
        }
        Ok(Self {
            page_size,
            orphans,
            rules,
            paginated,
        })
    }

    pub fn is_paginated(&self, kind: ListingKind) -> bool {
        self.paginated.contains(&kind)
    }

    /// Number of pages for `item_count` items; an empty listing still has
    /// one page.
    pub fn page_count(&self, item_count: usize) -> usize {
        let hits = item_count.saturating_sub(self.orphans).max(1);
        hits.div_ceil(self.page_size)
    }

    /// Item indices shown on page `number` (1-based).
    pub fn page_range(&self, number: usize, item_count: usize) -> Range<usize> {
        let start = ((number - 1) * self.page_size).min(item_count);
        let mut end = (start + self.page_size).min(item_count);
        if number == self.page_count(item_count) {
            end = item_count;
        }
        start..end
    }

    /// The rule with the greatest `min_page <= number`.
    pub fn rule_for(&self, number: usize) -> &PaginationRule {
        self.rules
            .iter()
            .rev()
            .find(|r| r.min_page <= number)
            .unwrap_or(&self.rules[0])
    }

    /// Route of page `number` of a listing whose first page lives at `base`.
    pub fn page_route(
        &self,
        number: usize,
        base: &Route,
        directory_index: &str,
    ) -> Result<Route, EscapesRoot> {
        let rule = self.rule_for(number);
        let (name, extension) = split_extension(&base.save_as);
        let base_name = strip_index(name);
        let number = number.to_string();
        let lookup = |placeholder: &str, _: Option<&str>| {
            Some(match placeholder {
                "url" => base.url.clone(),
                "save_as" => base.save_as.clone(),
                "name" => name.to_string(),
                "base_name" => base_name.to_string(),
                "number" => number.clone(),
                "extension" => extension.to_string(),
                _ => return None,
            })
        };
        // Rules are validated against PATTERN_PLACEHOLDERS, every name resolves.
        let url = rule.url.expand(lookup).unwrap_or_default();
        let save_as = rule.save_as.expand(lookup).unwrap_or_default();
        Ok(Route {
            url: normalize_path(&url)?,
            save_as: file_path(&save_as, directory_index)?,
        })
    }
}

/// Normalize a save-as path and append the directory index when it names a
/// directory.
pub fn file_path(save_as: &str, directory_index: &str) -> Result<String, EscapesRoot> {
    let path = normalize_path(save_as)?;
    Ok(if path.is_empty() || path.ends_with('/') {
        format!("{path}{directory_index}")
    } else {
        path
    })
}

/// Split `a/b/index.html` into `("a/b/index", ".html")`. Dots in directory
/// names are not extensions.
fn split_extension(path: &str) -> (&str, &str) {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(file_start + dot),
        _ => (path, ""),
    }
}

fn strip_index(name: &str) -> &str {
    if name == "index" {
        ""
    } else {
        name.strip_suffix("/index").unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page_size: usize, orphans: usize, rules: &[(usize, &str, &str)]) -> Pagination {
        Pagination::new(
            page_size,
            orphans,
            rules
                .iter()
                .map(|(n, u, s)| PaginationRule::parse(*n, u, s).unwrap())
                .collect(),
            ListingKind::ALL.into_iter().collect(),
        )
        .unwrap()
    }

    fn blog_patterns(page_size: usize) -> Pagination {
        pagination(
            page_size,
            0,
            &[
                (1, "{base_name}/", "{base_name}/index.html"),
                (2, "{base_name}/page/{number}/", "{base_name}/page/{number}/index.html"),
            ],
        )
    }

    fn route(url: &str, save_as: &str) -> Route {
        Route {
            url: url.into(),
            save_as: save_as.into(),
        }
    }

    #[test]
    fn twenty_items_nine_per_page_is_three_pages() {
        let p = blog_patterns(9);
        assert_eq!(p.page_count(20), 3);
        assert_eq!(p.page_range(1, 20), 0..9);
        assert_eq!(p.page_range(2, 20), 9..18);
        assert_eq!(p.page_range(3, 20), 18..20);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let p = blog_patterns(9);
        assert_eq!(p.page_count(18), 2);
        assert_eq!(p.page_count(9), 1);
        assert_eq!(p.page_count(10), 2);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let p = blog_patterns(9);
        assert_eq!(p.page_count(0), 1);
        assert_eq!(p.page_range(1, 0), 0..0);
    }

    #[test]
    fn orphans_fold_into_last_page() {
        let p = pagination(9, 2, &[(1, "{url}", "{save_as}")]);
        assert_eq!(p.page_count(20), 2);
        assert_eq!(p.page_range(2, 20), 9..20);
        assert_eq!(p.page_count(21), 3);
        assert_eq!(p.page_range(3, 21), 18..21);
    }

    #[test]
    fn page_one_uses_base_pattern_and_later_pages_numbered() {
        let p = blog_patterns(9);
        let base = route("category/python/", "category/python/index.html");
        assert_eq!(
            p.page_route(1, &base, "index.html").unwrap(),
            route("category/python/", "category/python/index.html")
        );
        assert_eq!(
            p.page_route(2, &base, "index.html").unwrap(),
            route("category/python/page/2/", "category/python/page/2/index.html")
        );
        assert_eq!(
            p.page_route(3, &base, "index.html").unwrap(),
            route("category/python/page/3/", "category/python/page/3/index.html")
        );
    }

    #[test]
    fn site_index_base_name_is_empty() {
        let p = blog_patterns(9);
        let base = route("", "index.html");
        assert_eq!(p.page_route(1, &base, "index.html").unwrap(), route("", "index.html"));
        assert_eq!(
            p.page_route(2, &base, "index.html").unwrap(),
            route("page/2/", "page/2/index.html")
        );
    }

    #[test]
    fn name_and_extension_patterns() {
        let p = pagination(
            5,
            0,
            &[
                (1, "{url}", "{save_as}"),
                (2, "{name}{number}{extension}", "{name}{number}{extension}"),
            ],
        );
        let base = route("archives.html", "archives.html");
        assert_eq!(p.page_route(1, &base, "index.html").unwrap(), base);
        assert_eq!(
            p.page_route(4, &base, "index.html").unwrap(),
            route("archives4.html", "archives4.html")
        );
    }

    #[test]
    fn dotted_directory_is_not_an_extension() {
        assert_eq!(split_extension("v1.2/index.html"), ("v1.2/index", ".html"));
        assert_eq!(split_extension("v1.2/feed"), ("v1.2/feed", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
    }

    #[test]
    fn rule_for_picks_greatest_min_page() {
        let p = pagination(
            5,
            0,
            &[(10, "b{number}", "b{number}"), (1, "{url}", "{save_as}"), (2, "a{number}", "a{number}")],
        );
        assert_eq!(p.rule_for(1).min_page, 1);
        assert_eq!(p.rule_for(9).min_page, 2);
        assert_eq!(p.rule_for(10).min_page, 10);
        assert_eq!(p.rule_for(99).min_page, 10);
    }

    #[test]
    fn duplicate_rule_rejected() {
        let err = Pagination::new(
            9,
            0,
            vec![
                PaginationRule::parse(1, "{url}", "{save_as}").unwrap(),
                PaginationRule::parse(2, "a/{number}/", "a/{number}/index.html").unwrap(),
                PaginationRule::parse(2, "b/{number}/", "b/{number}/index.html").unwrap(),
            ],
            BTreeSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePaginationRule(2)));
    }

    #[test]
    fn missing_first_page_rule_rejected() {
        let err = Pagination::new(
            9,
            0,
            vec![PaginationRule::parse(2, "p/{number}/", "p/{number}/index.html").unwrap()],
            BTreeSet::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("page 1"));
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = Pagination::new(
            0,
            0,
            vec![PaginationRule::parse(1, "{url}", "{save_as}").unwrap()],
            BTreeSet::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("DEFAULT_PAGINATION"));
    }

    #[test]
    fn unknown_pattern_placeholder_rejected() {
        assert!(PaginationRule::parse(2, "{slug}/{number}/", "x").is_err());
    }

    #[test]
    fn file_path_appends_directory_index() {
        assert_eq!(file_path("blog/a/", "index.html").unwrap(), "blog/a/index.html");
        assert_eq!(file_path("", "index.html").unwrap(), "index.html");
        assert_eq!(file_path("/a.html", "index.html").unwrap(), "a.html");
        assert_eq!(file_path("blog/..", "index.html").unwrap(), "index.html");
    }

    #[test]
    fn pattern_climbing_above_root_is_error() {
        let p = pagination(2, 0, &[(1, "{url}", "{save_as}"), (2, "../{number}/", "../{number}/")]);
        let base = route("", "index.html");
        assert!(p.page_route(1, &base, "index.html").is_ok());
        assert_eq!(
            p.page_route(2, &base, "index.html"),
            Err(EscapesRoot("../2/".to_string()))
        );
    }
}
