//! Route planning: from settings and content items to output paths.
//!
//! [`plan`] is a pure function. Given the same settings and the same items in
//! the same order it returns the same bindings in the same order:
//!
//! 1. one binding per content item, in input order;
//! 2. listing pages: index, archives, then every category, tag and author
//!    (terms sorted by slug, pages ascending);
//! 3. feeds and relocated static files, kept in their own lists.
//!
//! ## Failure modes
//!
//! - An item whose template needs an attribute it lacks (say `{date:%Y}` on an
//!   undated page) is a [`RouteError`]. So is an output whose path climbs
//!   above the output root through `..`. Planning carries on so every bad
//!   item is reported in one go.
//! - Two outputs with the same save-as path are a [`RouteCollision`]. That
//!   would silently overwrite a file, so it fails the pass outright, and is
//!   reported ahead of any unresolved items.

use log::{debug, info, warn};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::{RouteKind, RouteTemplate, Settings};
use crate::content::ContentItem;
use crate::feeds::{FeedBinding, plan_feeds};
use crate::paginate::{ListingKind, Route, file_path};
use crate::slug::term_slug;
use crate::taxonomy::{Taxonomies, Term, TermMap};
use crate::template::{DATE_PLACEHOLDER, EscapesRoot, Unresolved, normalize_path};

/// Format for a bare `{date}` placeholder.
const URL_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RouteErrorKind {
    #[error("no value for placeholder {{{0}}}: item has no {0}")]
    MissingField(String),
    #[error("slug is empty")]
    EmptySlug,
    #[error("name has no characters usable in a URL")]
    EmptyTermSlug,
    #[error("path '{0}' climbs above the output root")]
    EscapesRoot(String),
}

impl From<Unresolved> for RouteErrorKind {
    fn from(Unresolved(field): Unresolved) -> Self {
        RouteErrorKind::MissingField(field)
    }
}

impl From<EscapesRoot> for RouteErrorKind {
    fn from(EscapesRoot(path): EscapesRoot) -> Self {
        RouteErrorKind::EscapesRoot(path)
    }
}

/// A route that could not be resolved for one item.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{item}: {reason}")]
pub struct RouteError {
    pub item: String,
    pub reason: RouteErrorKind,
}

/// Several outputs claiming the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCollision {
    pub save_as: String,
    pub claimants: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{}", describe_collisions(.0))]
    Collision(Vec<RouteCollision>),
    #[error("{}", describe_unresolved(.0))]
    Unresolved(Vec<RouteError>),
}

fn describe_collisions(collisions: &[RouteCollision]) -> String {
    let mut lines = vec![format!(
        "{} output path{} claimed more than once:",
        collisions.len(),
        if collisions.len() == 1 { "" } else { "s" }
    )];
    for c in collisions {
        lines.push(format!("    {} ← {}", c.save_as, c.claimants.join(", ")));
    }
    lines.join("\n")
}

fn describe_unresolved(errors: &[RouteError]) -> String {
    let mut lines = vec![format!(
        "{} route{} could not be resolved:",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    )];
    lines.extend(errors.iter().map(|e| format!("    {e}")));
    lines.join("\n")
}

/// What a binding renders.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target<'a> {
    Item {
        item: &'a ContentItem,
    },
    Listing {
        kind: ListingKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        term: Option<Term>,
        page: usize,
        pages: usize,
        #[serde(serialize_with = "item_slugs")]
        items: Vec<&'a ContentItem>,
    },
}

fn item_slugs<S: Serializer>(items: &[&ContentItem], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(items.iter().map(|i| i.slug.as_str()))
}

impl Target<'_> {
    /// Short description used in collision reports and CLI output.
    pub fn describe(&self) -> String {
        match self {
            Target::Item { item } => item.identity(),
            Target::Listing {
                kind,
                term,
                page,
                pages,
                ..
            } => match term {
                Some(term) => format!("{} '{}' page {page}/{pages}", kind.label(), term.name),
                None => format!("{} page {page}/{pages}", kind.label()),
            },
        }
    }
}

/// One output: what it is, where it is linked from, where it is written.
#[derive(Debug, Clone, Serialize)]
pub struct RouteBinding<'a> {
    #[serde(flatten)]
    pub target: Target<'a>,
    pub url: String,
    pub save_as: String,
}

/// A static file moved by `EXTRA_PATH_METADATA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticBinding {
    pub source: String,
    pub save_as: String,
}

/// The result of one planning pass.
#[derive(Debug, Clone, Serialize)]
pub struct Plan<'a> {
    pub bindings: Vec<RouteBinding<'a>>,
    pub feeds: Vec<FeedBinding>,
    pub statics: Vec<StaticBinding>,
}

impl<'a> Plan<'a> {
    /// Bindings of individual content items.
    pub fn items(&self) -> impl Iterator<Item = &RouteBinding<'a>> {
        self.bindings
            .iter()
            .filter(|b| matches!(b.target, Target::Item { .. }))
    }

    /// Bindings of listing pages.
    pub fn listings(&self) -> impl Iterator<Item = &RouteBinding<'a>> {
        self.bindings
            .iter()
            .filter(|b| matches!(b.target, Target::Listing { .. }))
    }

    /// The binding written to `save_as`, if any.
    pub fn find(&self, save_as: &str) -> Option<&RouteBinding<'a>> {
        self.bindings.iter().find(|b| b.save_as == save_as)
    }

    /// The binding of the item with this (unsubstituted) slug, if any.
    pub fn find_item(&self, slug: &str) -> Option<&RouteBinding<'a>> {
        self.items().find(|b| match b.target {
            Target::Item { item } => item.slug == slug,
            Target::Listing { .. } => false,
        })
    }
}

/// Plan every output of a content set.
pub fn plan<'a>(settings: &Settings, items: &'a [ContentItem]) -> Result<Plan<'a>, PlanError> {
    let mut bindings = Vec::new();
    let mut errors = Vec::new();

    for item in items {
        match route_item(settings, item) {
            Ok(Some(route)) => {
                debug!("{} → {}", item.identity(), route.save_as);
                bindings.push(RouteBinding {
                    target: Target::Item { item },
                    url: route.url,
                    save_as: route.save_as,
                });
            }
            Ok(None) => debug!(
                "{} skipped: {}_SAVE_AS is empty",
                item.identity(),
                RouteKind::for_item(item).setting_prefix()
            ),
            Err(e) => {
                warn!("{e}");
                errors.push(e);
            }
        }
    }

    let (taxonomies, term_errors) = Taxonomies::collect(settings, items);
    for e in &term_errors {
        warn!("{e}");
    }
    errors.extend(term_errors);

    let listed: Vec<&ContentItem> = items.iter().filter(|i| i.is_listed()).collect();
    let mut listings = ListingPlanner {
        settings,
        bindings: &mut bindings,
        errors: &mut errors,
    };
    listings.plan(ListingKind::Index, None, &listed);
    listings.plan(ListingKind::Archives, None, &listed);
    listings.plan_terms(ListingKind::Category, &taxonomies.categories);
    listings.plan_terms(ListingKind::Tag, &taxonomies.tags);
    listings.plan_terms(ListingKind::Author, &taxonomies.authors);

    let (feeds, feed_errors) = plan_feeds(settings, &taxonomies);
    let (statics, static_errors) = plan_statics(settings);
    for e in feed_errors.iter().chain(&static_errors) {
        warn!("{e}");
    }
    errors.extend(feed_errors);
    errors.extend(static_errors);

    let collisions = detect_collisions(&bindings, &feeds, &statics);
    if !collisions.is_empty() {
        return Err(PlanError::Collision(collisions));
    }
    if !errors.is_empty() {
        return Err(PlanError::Unresolved(errors));
    }

    info!(
        "Planned {} bindings, {} feeds, {} static files",
        bindings.len(),
        feeds.len(),
        statics.len()
    );
    Ok(Plan {
        bindings,
        feeds,
        statics,
    })
}

/// Route of a single item. `Ok(None)` when its kind is switched off.
pub fn route_item(settings: &Settings, item: &ContentItem) -> Result<Option<Route>, RouteError> {
    let subs = &settings.slug_substitutions;
    let fail = |reason| RouteError {
        item: item.identity(),
        reason,
    };

    let slug = subs.apply(&item.slug);
    if slug.is_empty() {
        return Err(fail(RouteErrorKind::EmptySlug));
    }
    let category = item
        .category
        .as_deref()
        .map(|c| term_slug(c, subs))
        .filter(|c| !c.is_empty());
    let author = Some(term_slug(
        item.author.as_deref().unwrap_or(&settings.site.author),
        subs,
    ))
    .filter(|a| !a.is_empty());
    let lang = item.lang.as_deref().unwrap_or(&settings.site.default_lang);

    let template = settings.route(RouteKind::for_item(item));
    expand_route(
        template,
        &settings.site.directory_index,
        |name, format| match name {
            "slug" => Some(slug.clone()),
            DATE_PLACEHOLDER => item
                .date
                .map(|d| d.format(format.unwrap_or(URL_DATE_FORMAT)).to_string()),
            "category" => category.clone(),
            "author" => author.clone(),
            "lang" => Some(lang.to_string()),
            _ => None,
        },
    )
    .map_err(|reason| {
        fail(match reason {
            // The item has the term, but its name slugifies to nothing.
            RouteErrorKind::MissingField(field)
                if (field == "category" && item.category.is_some()) || field == "author" =>
            {
                RouteErrorKind::EmptyTermSlug
            }
            other => other,
        })
    })
}

fn expand_route<F>(
    template: &RouteTemplate,
    directory_index: &str,
    mut lookup: F,
) -> Result<Option<Route>, RouteErrorKind>
where
    F: FnMut(&str, Option<&str>) -> Option<String>,
{
    let Some(save_as) = &template.save_as else {
        return Ok(None);
    };
    let url = template.url.expand(&mut lookup)?;
    let save_as = save_as.expand(&mut lookup)?;
    Ok(Some(Route {
        url: normalize_path(&url)?,
        save_as: file_path(&save_as, directory_index)?,
    }))
}

struct ListingPlanner<'s, 'a> {
    settings: &'s Settings,
    bindings: &'s mut Vec<RouteBinding<'a>>,
    errors: &'s mut Vec<RouteError>,
}

impl<'a> ListingPlanner<'_, 'a> {
    fn plan_terms(&mut self, kind: ListingKind, terms: &TermMap<'a>) {
        for listing in terms.values() {
            self.plan(kind, Some(&listing.term), &listing.items);
        }
    }

    /// Bindings for every page of one listing.
    fn plan(&mut self, kind: ListingKind, term: Option<&Term>, items: &[&'a ContentItem]) {
        let settings = self.settings;
        let template = settings.route(RouteKind::for_listing(kind));
        let base = expand_route(template, &settings.site.directory_index, |name, _| {
            let term = term?;
            match name {
                "slug" => Some(term.slug.clone()),
                "name" => Some(term.name.clone()),
                _ => None,
            }
        });
        let base = match base {
            Ok(Some(base)) => base,
            Ok(None) => return,
            Err(reason) => return self.fail(kind, term, reason),
        };

        let pagination = &settings.pagination;
        if !pagination.is_paginated(kind) {
            self.push(kind, term, (1, 1), base, items.to_vec());
            return;
        }
        let pages = pagination.page_count(items.len());
        for number in 1..=pages {
            let route =
                match pagination.page_route(number, &base, &settings.site.directory_index) {
                    Ok(route) => route,
                    Err(escape) => return self.fail(kind, term, escape.into()),
                };
            let range = pagination.page_range(number, items.len());
            self.push(kind, term, (number, pages), route, items[range].to_vec());
        }
    }

    fn fail(&mut self, kind: ListingKind, term: Option<&Term>, reason: RouteErrorKind) {
        self.errors.push(RouteError {
            item: match term {
                Some(t) => format!("{} '{}'", kind.label(), t.name),
                None => kind.label().to_string(),
            },
            reason,
        });
    }

    fn push(
        &mut self,
        kind: ListingKind,
        term: Option<&Term>,
        (page, pages): (usize, usize),
        route: Route,
        items: Vec<&'a ContentItem>,
    ) {
        let binding = RouteBinding {
            target: Target::Listing {
                kind,
                term: term.cloned(),
                page,
                pages,
                items,
            },
            url: route.url,
            save_as: route.save_as,
        };
        debug!("{} → {}", binding.target.describe(), binding.save_as);
        self.bindings.push(binding);
    }
}

fn plan_statics(settings: &Settings) -> (Vec<StaticBinding>, Vec<RouteError>) {
    let mut statics = Vec::new();
    let mut errors = Vec::new();
    for (source, extra) in &settings.statics.extra_path_metadata {
        let Some(path) = &extra.path else {
            continue;
        };
        match normalize_path(path) {
            Ok(save_as) => statics.push(StaticBinding {
                source: source.clone(),
                save_as,
            }),
            Err(escape) => errors.push(RouteError {
                item: format!("static file '{source}'"),
                reason: escape.into(),
            }),
        }
    }
    (statics, errors)
}

/// Every save-as path claimed more than once, sorted by path.
pub fn detect_collisions(
    bindings: &[RouteBinding<'_>],
    feeds: &[FeedBinding],
    statics: &[StaticBinding],
) -> Vec<RouteCollision> {
    let mut claims: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for b in bindings {
        claims.entry(&b.save_as).or_default().push(b.target.describe());
    }
    for f in feeds {
        claims.entry(&f.save_as).or_default().push(f.describe());
    }
    for s in statics {
        claims
            .entry(&s.save_as)
            .or_default()
            .push(format!("static file '{}'", s.source));
    }
    claims
        .into_iter()
        .filter(|(_, claimants)| claimants.len() > 1)
        .map(|(save_as, claimants)| RouteCollision {
            save_as: save_as.to_string(),
            claimants,
        })
        .collect()
}
