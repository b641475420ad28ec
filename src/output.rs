//! CLI output formatting for settings and route plans.
//!
//! # Information-First Display
//!
//! Every output is listed by what it is (an item, a listing page, a feed)
//! with the file it lands in after an arrow. Where the output comes from
//! and the URL it is linked under are shown as indented context lines.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Items
//! 001 python-generators-in-practice → blog/2016/03/05/python-generators-in-practice/index.html
//!     Source: content/python-generators-in-practice.md
//!     URL: /blog/2016/03/05/python-generators-in-practice/
//! 002 about → pages/about.html
//!     URL: /pages/about.html
//!
//! Listings
//! index page 1/1 (5 items) → index.html
//! category 'Programming' page 1/1 (4 items) → category/programming/index.html
//!
//! Feeds
//! all atom feed → atom.xml
//!
//! Static files
//! extra/CNAME → CNAME
//!
//! Planned 2 items, 2 listing pages, 1 feed, 1 static file
//! ```
//!
//! ## Settings
//!
//! ```text
//! The Digital Cat by Leonardo Giordani
//!     Site URL: (development)
//!     Timezone: Europe/Paris, language: en
//! Routes
//!     article: blog/{date:%Y}/{date:%m}/{date:%d}/{slug}/ → blog/{date:%Y}/{date:%m}/{date:%d}/{slug}/index.html
//!     draft: drafts/{slug}.html (disabled)
//! Pagination: 9 per page, 0 orphans
//!     1: {base_name}/ → {base_name}/index.html
//! Slug substitutions
//!     c++ → cpp
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::{RouteKind, Settings};
use crate::route::{Plan, Target};
use crate::template::UrlTemplate;

const ROUTE_KINDS: [RouteKind; 8] = [
    RouteKind::Article,
    RouteKind::Page,
    RouteKind::Draft,
    RouteKind::Index,
    RouteKind::Archives,
    RouteKind::Category,
    RouteKind::Tag,
    RouteKind::Author,
];

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 item`, `3 items`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Templates that expand to the site root are shown as `(root)`.
fn display_template(template: &UrlTemplate) -> &str {
    if template.is_empty() {
        "(root)"
    } else {
        template.as_str()
    }
}

fn section(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
}

// ============================================================================
// Plan output
// ============================================================================

/// Format a route plan: items, listing pages, feeds and static files.
pub fn format_plan_output(plan: &Plan<'_>, settings: &Settings) -> Vec<String> {
    let mut lines = Vec::new();

    let items: Vec<_> = plan.items().collect();
    if !items.is_empty() {
        section(&mut lines, "Items");
        for (idx, binding) in items.iter().enumerate() {
            let Target::Item { item } = binding.target else {
                continue;
            };
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(idx + 1),
                item.slug,
                binding.save_as
            ));
            if let Some(source) = &item.source {
                lines.push(format!("{}Source: {}", indent(1), source));
            }
            lines.push(format!(
                "{}URL: {}",
                indent(1),
                settings.absolute_url(&binding.url)
            ));
        }
    }

    let listings: Vec<_> = plan.listings().collect();
    if !listings.is_empty() {
        section(&mut lines, "Listings");
        for binding in &listings {
            let count = match &binding.target {
                Target::Listing { items, .. } => items.len(),
                Target::Item { .. } => 0,
            };
            lines.push(format!(
                "{} ({}) \u{2192} {}",
                binding.target.describe(),
                plural(count, "item"),
                binding.save_as
            ));
        }
    }

    if !plan.feeds.is_empty() {
        section(&mut lines, "Feeds");
        for feed in &plan.feeds {
            lines.push(format!("{} \u{2192} {}", feed.describe(), feed.save_as));
        }
    }

    if !plan.statics.is_empty() {
        section(&mut lines, "Static files");
        for s in &plan.statics {
            lines.push(format!("{} \u{2192} {}", s.source, s.save_as));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Planned {}, {}, {}, {}",
        plural(items.len(), "item"),
        plural(listings.len(), "listing page"),
        plural(plan.feeds.len(), "feed"),
        plural(plan.statics.len(), "static file")
    ));
    lines
}

pub fn print_plan_output(plan: &Plan<'_>, settings: &Settings) {
    for line in format_plan_output(plan, settings) {
        println!("{}", line);
    }
}

/// One-line summary of a content set that planned cleanly.
pub fn format_check_line(label: &str, plan: &Plan<'_>) -> String {
    format!(
        "{}: {} planned, no collisions",
        label,
        plural(plan.bindings.len() + plan.feeds.len() + plan.statics.len(), "output")
    )
}

// ============================================================================
// Settings output
// ============================================================================

/// Format the parts of the settings that shape URLs.
pub fn format_settings_summary(settings: &Settings) -> Vec<String> {
    let site = &settings.site;
    let mut lines = vec![format!("{} by {}", site.name, site.author)];
    if let Some(subtitle) = &site.subtitle {
        lines.push(format!("{}{}", indent(1), subtitle));
    }
    lines.push(format!(
        "{}Site URL: {}",
        indent(1),
        if site.url.is_empty() {
            "(development)"
        } else {
            site.url.as_str()
        }
    ));
    lines.push(format!(
        "{}Timezone: {}, language: {}",
        indent(1),
        site.timezone,
        site.default_lang
    ));

    lines.push("Routes".to_string());
    for kind in ROUTE_KINDS {
        let route = settings.route(kind);
        let label = kind.setting_prefix().to_lowercase();
        let url = display_template(&route.url);
        match &route.save_as {
            Some(save_as) => lines.push(format!(
                "{}{}: {} \u{2192} {}",
                indent(1),
                label,
                url,
                display_template(save_as)
            )),
            None => lines.push(format!("{}{}: {} (disabled)", indent(1), label, url)),
        }
    }

    let pagination = &settings.pagination;
    lines.push(format!(
        "Pagination: {} per page, {}",
        pagination.page_size,
        plural(pagination.orphans, "orphan")
    ));
    for rule in &pagination.rules {
        lines.push(format!(
            "{}{}: {} \u{2192} {}",
            indent(1),
            rule.min_page,
            rule.url,
            rule.save_as
        ));
    }

    if !settings.slug_substitutions.is_empty() {
        lines.push("Slug substitutions".to_string());
        for sub in settings.slug_substitutions.iter() {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                sub.source,
                sub.replacement
            ));
        }
    }
    lines
}

pub fn print_settings_summary(settings: &Settings) {
    for line in format_settings_summary(settings) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
