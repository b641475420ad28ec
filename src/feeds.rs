//! Feed path derivation.
//!
//! The feed writer is a separate stage; this module only decides which feed
//! files exist and where they go. Paths are expanded from the `*_FEED_*`
//! settings against the taxonomy terms and languages found in the content.

use log::debug;
use serde::Serialize;

use crate::config::Settings;
use crate::route::{RouteError, RouteErrorKind};
use crate::taxonomy::{Taxonomies, TermListing};
use crate::template::{EscapesRoot, UrlTemplate, normalize_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    Atom,
    Rss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedScope {
    All,
    Category,
    Tag,
    Author,
    Translation,
}

/// Atom and RSS templates for one scope; `None` disables that flavor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedPair {
    pub atom: Option<UrlTemplate>,
    pub rss: Option<UrlTemplate>,
}

impl FeedPair {
    fn enabled(&self) -> impl Iterator<Item = (FeedFormat, &UrlTemplate)> {
        [(FeedFormat::Atom, &self.atom), (FeedFormat::Rss, &self.rss)]
            .into_iter()
            .filter_map(|(format, t)| t.as_ref().map(|t| (format, t)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedSettings {
    pub all: FeedPair,
    pub category: FeedPair,
    pub tag: FeedPair,
    pub author: FeedPair,
    pub translation_atom: Option<UrlTemplate>,
    pub display_on_sidebar: bool,
}

/// One feed file to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedBinding {
    pub scope: FeedScope,
    pub format: FeedFormat,
    /// Term slug for taxonomy feeds, language code for translation feeds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub save_as: String,
}

impl FeedBinding {
    pub fn describe(&self) -> String {
        let scope = match self.scope {
            FeedScope::All => "all",
            FeedScope::Category => "category",
            FeedScope::Tag => "tag",
            FeedScope::Author => "author",
            FeedScope::Translation => "translation",
        };
        let format = match self.format {
            FeedFormat::Atom => "atom",
            FeedFormat::Rss => "rss",
        };
        match &self.key {
            Some(key) => format!("{scope} {format} feed '{key}'"),
            None => format!("{scope} {format} feed"),
        }
    }
}

/// Every feed implied by the settings and the collected taxonomies.
///
/// Order: site-wide feeds, then categories, tags, authors (each sorted by
/// slug, Atom before RSS), then translation feeds sorted by language. A feed
/// whose path climbs above the output root is returned as an error instead.
pub fn plan_feeds(
    settings: &Settings,
    taxonomies: &Taxonomies<'_>,
) -> (Vec<FeedBinding>, Vec<RouteError>) {
    let feeds = &settings.feeds;
    let mut out = FeedList::default();

    for (format, template) in feeds.all.enabled() {
        // Site-wide templates take no placeholders.
        if let Ok(path) = template.expand(|_, _| None) {
            out.push(FeedScope::All, format, None, &path);
        }
    }

    out.terms(FeedScope::Category, &feeds.category, taxonomies.categories.values());
    out.terms(FeedScope::Tag, &feeds.tag, taxonomies.tags.values());
    out.terms(FeedScope::Author, &feeds.author, taxonomies.authors.values());

    if let Some(template) = &feeds.translation_atom {
        for lang in &taxonomies.languages {
            let expanded = template.expand(|name, _| (name == "lang").then(|| lang.clone()));
            if let Ok(path) = expanded {
                out.push(FeedScope::Translation, FeedFormat::Atom, Some(lang.clone()), &path);
            }
        }
    }

    debug!("Planned {} feeds", out.bindings.len());
    (out.bindings, out.errors)
}

#[derive(Default)]
struct FeedList {
    bindings: Vec<FeedBinding>,
    errors: Vec<RouteError>,
}

impl FeedList {
    fn push(&mut self, scope: FeedScope, format: FeedFormat, key: Option<String>, path: &str) {
        let mut binding = FeedBinding {
            scope,
            format,
            key,
            save_as: String::new(),
        };
        match normalize_path(path) {
            Ok(save_as) => {
                binding.save_as = save_as;
                self.bindings.push(binding);
            }
            Err(EscapesRoot(path)) => self.errors.push(RouteError {
                item: binding.describe(),
                reason: RouteErrorKind::EscapesRoot(path),
            }),
        }
    }

    fn terms<'t, 'a: 't>(
        &mut self,
        scope: FeedScope,
        pair: &FeedPair,
        listings: impl Iterator<Item = &'t TermListing<'a>> + Clone,
    ) {
        for (format, template) in pair.enabled() {
            for listing in listings.clone() {
                let term = &listing.term;
                let expanded = template.expand(|name, _| match name {
                    "slug" => Some(term.slug.clone()),
                    "name" => Some(term.name.clone()),
                    _ => None,
                });
                if let Ok(path) = expanded {
                    self.push(scope, format, Some(term.slug.clone()), &path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;
    use crate::test_helpers::*;

    fn feed_paths(feeds: &[FeedBinding]) -> Vec<&str> {
        feeds.iter().map(|f| f.save_as.as_str()).collect()
    }

    #[test]
    fn digital_cat_feeds() {
        let settings = digital_cat_settings();
        let items = vec![
            ContentItem::article("a")
                .with_date(2016, 3, 5)
                .with_category("Programming")
                .with_tags(["C++", "Python"]),
            ContentItem::article("b")
                .with_date(2016, 4, 1)
                .with_category("Retro")
                .with_tags(["Python"]),
        ];
        let (taxonomies, errors) = Taxonomies::collect(&settings, &items);
        assert!(errors.is_empty());

        let (feeds, errors) = plan_feeds(&settings, &taxonomies);
        assert!(errors.is_empty());
        assert_eq!(
            feed_paths(&feeds),
            vec![
                "atom.xml",
                "category/programming/atom.xml",
                "category/retro/atom.xml",
                "categories/cpp/atom.xml",
                "categories/python/atom.xml",
                "feeds/leonardo-giordani.atom.xml",
                "feeds/leonardo-giordani.rss.xml",
            ]
        );
        assert_eq!(feeds[1].scope, FeedScope::Category);
        assert_eq!(feeds[1].key.as_deref(), Some("programming"));
        assert_eq!(feeds[6].format, FeedFormat::Rss);
    }

    #[test]
    fn translation_feeds_for_non_default_languages() {
        let settings = settings_from(
            r#"
AUTHOR = "Ada"
SITENAME = "Notes"
CATEGORY_FEED_ATOM = ""
AUTHOR_FEED_ATOM = ""
AUTHOR_FEED_RSS = ""
"#,
        );
        let items = vec![
            ContentItem::article("a"),
            ContentItem::article("b").with_lang("it"),
            ContentItem::article("c").with_lang("fr"),
            ContentItem::article("d").with_lang("en"),
        ];
        let (taxonomies, _) = Taxonomies::collect(&settings, &items);
        let (feeds, _) = plan_feeds(&settings, &taxonomies);
        assert_eq!(
            feed_paths(&feeds),
            vec![
                "feeds/all.atom.xml",
                "feeds/all-fr.atom.xml",
                "feeds/all-it.atom.xml",
            ]
        );
        assert_eq!(feeds[2].describe(), "translation atom feed 'it'");
    }

    #[test]
    fn disabled_feeds_produce_nothing() {
        let settings = settings_from(
            r#"
AUTHOR = "Ada"
SITENAME = "Notes"
FEED_ALL_ATOM = ""
CATEGORY_FEED_ATOM = ""
AUTHOR_FEED_ATOM = ""
AUTHOR_FEED_RSS = ""
TRANSLATION_FEED_ATOM = ""
"#,
        );
        let items = vec![ContentItem::article("a").with_category("X")];
        let (taxonomies, _) = Taxonomies::collect(&settings, &items);
        assert!(plan_feeds(&settings, &taxonomies).0.is_empty());
    }

    #[test]
    fn rss_flavor_for_all_articles() {
        let settings = settings_from(
            r#"
AUTHOR = "Ada"
SITENAME = "Notes"
FEED_ALL_RSS = "feeds/all.rss.xml"
"#,
        );
        let (taxonomies, _) = Taxonomies::collect(&settings, &[]);
        let (feeds, _) = plan_feeds(&settings, &taxonomies);
        assert_eq!(feed_paths(&feeds), vec!["feeds/all.atom.xml", "feeds/all.rss.xml"]);
        assert_eq!(feeds[0].describe(), "all atom feed");
    }

    #[test]
    fn feed_above_output_root_is_error() {
        let settings = settings_from(
            r#"
AUTHOR = "Ada"
SITENAME = "Notes"
CATEGORY_FEED_ATOM = "../{slug}.atom.xml"
"#,
        );
        let items = vec![ContentItem::article("a").with_category("News")];
        let (taxonomies, _) = Taxonomies::collect(&settings, &items);
        let (feeds, errors) = plan_feeds(&settings, &taxonomies);
        assert!(!feed_paths(&feeds).contains(&"../news.atom.xml"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].item, "category atom feed 'news'");
        assert_eq!(
            errors[0].reason,
            RouteErrorKind::EscapesRoot("../news.atom.xml".into())
        );
    }
}
