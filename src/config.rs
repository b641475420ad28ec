//! Site configuration module.
//!
//! Turns a raw configuration mapping into an immutable, validated
//! [`Settings`] value. The mapping is flat and keyed by uppercase
//! identifiers, the way blog engines traditionally spell their settings:
//!
//! ```toml
//! AUTHOR = "Leonardo Giordani"
//! SITENAME = "The Digital Cat"
//! TIMEZONE = "Europe/Paris"
//!
//! ARTICLE_URL = "blog/{date:%Y}/{date:%m}/{date:%d}/{slug}/"
//! CATEGORY_URL = "category/{slug}/"
//! TAG_URL = "categories/{slug}/"
//! TAG_FEED_ATOM = "categories/%s/atom.xml"
//!
//! SLUG_SUBSTITUTIONS = [["c++", "cpp"]]
//!
//! DEFAULT_PAGINATION = 9
//! PAGINATION_PATTERNS = [
//!     [1, "{base_name}/", "{base_name}/index.html"],
//!     [2, "{base_name}/page/{number}/", "{base_name}/page/{number}/index.html"],
//! ]
//! ```
//!
//! Only `AUTHOR` and `SITENAME` are required. Everything else has a default,
//! documented in [`stock_config_toml`]. Unknown keys are rejected to catch
//! typos early.
//!
//! ## Route templates
//!
//! Each route kind has a `*_URL` and a `*_SAVE_AS` key. When `*_SAVE_AS` is
//! absent it follows the URL, with `DIRECTORY_INDEX` appended to URLs that
//! end in `/`. An explicitly empty `*_SAVE_AS` switches the kind off.
//!
//! ## Layers
//!
//! Several files can be layered, e.g. a development config and a publish
//! config that only overrides `SITEURL` and the feeds:
//!
//! ```text
//! pelicanconf.toml   ← base
//! publishconf.toml   ← overrides base
//! ```
//!
//! Tables merge key by key; scalars and arrays replace. See [`merge_toml`].

use chrono::NaiveDateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::{ContentItem, ContentKind, Status};
use crate::feeds::{FeedPair, FeedSettings};
use crate::paginate::{ListingKind, Pagination, PaginationRule};
use crate::slug::SlugSubstitutions;
use crate::template::{TemplateError, UrlTemplate, upgrade_legacy_placeholder, validate_date_format};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("required configuration key {0} is missing")]
    MissingKey(&'static str),
    #[error("invalid template in {key}: {source}")]
    Template { key: String, source: TemplateError },
    #[error("PAGINATION_PATTERNS has more than one rule for page {0}")]
    DuplicatePaginationRule(usize),
    #[error("SLUG_SUBSTITUTIONS lists source token '{0}' more than once")]
    DuplicateSubstitution(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Placeholders available to article, page and draft templates.
pub const ITEM_PLACEHOLDERS: &[&str] = &["slug", "date", "category", "author", "lang"];
/// Placeholders available to category, tag and author templates.
pub const TERM_PLACEHOLDERS: &[&str] = &["slug", "name"];

/// Everything that gets its own URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Article,
    Page,
    Draft,
    Index,
    Archives,
    Category,
    Tag,
    Author,
}

impl RouteKind {
    /// Key prefix in the configuration (`ARTICLE` for `ARTICLE_URL`).
    pub fn setting_prefix(self) -> &'static str {
        match self {
            Self::Article => "ARTICLE",
            Self::Page => "PAGE",
            Self::Draft => "DRAFT",
            Self::Index => "INDEX",
            Self::Archives => "ARCHIVES",
            Self::Category => "CATEGORY",
            Self::Tag => "TAG",
            Self::Author => "AUTHOR",
        }
    }

    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            Self::Article | Self::Page | Self::Draft => ITEM_PLACEHOLDERS,
            Self::Category | Self::Tag | Self::Author => TERM_PLACEHOLDERS,
            Self::Index | Self::Archives => &[],
        }
    }

    pub fn for_item(item: &ContentItem) -> Self {
        match (item.status, item.kind) {
            (Status::Draft, _) => Self::Draft,
            (_, ContentKind::Page) => Self::Page,
            (_, ContentKind::Article) => Self::Article,
        }
    }

    pub fn for_listing(kind: ListingKind) -> Self {
        match kind {
            ListingKind::Index => Self::Index,
            ListingKind::Archives => Self::Archives,
            ListingKind::Category => Self::Category,
            ListingKind::Tag => Self::Tag,
            ListingKind::Author => Self::Author,
        }
    }
}

/// URL and save-as templates for one route kind.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTemplate {
    pub url: UrlTemplate,
    /// `None` when the kind is switched off (`*_SAVE_AS = ""`).
    pub save_as: Option<UrlTemplate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteTemplates {
    pub article: RouteTemplate,
    pub page: RouteTemplate,
    pub draft: RouteTemplate,
    pub index: RouteTemplate,
    pub archives: RouteTemplate,
    pub category: RouteTemplate,
    pub tag: RouteTemplate,
    pub author: RouteTemplate,
}

impl RouteTemplates {
    pub fn get(&self, kind: RouteKind) -> &RouteTemplate {
        match kind {
            RouteKind::Article => &self.article,
            RouteKind::Page => &self.page,
            RouteKind::Draft => &self.draft,
            RouteKind::Index => &self.index,
            RouteKind::Archives => &self.archives,
            RouteKind::Category => &self.category,
            RouteKind::Tag => &self.tag,
            RouteKind::Author => &self.author,
        }
    }
}

/// Site identity and URL-wide options.
#[derive(Debug, Clone, Serialize)]
pub struct SiteIdentity {
    pub author: String,
    pub name: String,
    pub subtitle: Option<String>,
    /// Prefix for absolute URLs; empty during development.
    pub url: String,
    pub timezone: String,
    pub default_lang: String,
    pub content_path: String,
    /// strftime format for displaying dates.
    pub date_format: String,
    pub relative_urls: bool,
    /// File name appended to save-as paths that end in `/`.
    pub directory_index: String,
}

/// `(label, url)` pair for social and blogroll links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Options only the theme reads.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeSettings {
    pub theme: Option<String>,
    pub favicon: Option<String>,
    pub display_tags_on_sidebar: bool,
    pub social: Vec<Link>,
    pub links: Vec<Link>,
    pub twitter_username: Option<String>,
    pub google_analytics: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginSettings {
    pub paths: Vec<String>,
    pub names: Vec<String>,
    pub sitemap: toml::Table,
}

/// Relocation of one static file, from `EXTRA_PATH_METADATA`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPath {
    #[serde(default)]
    pub path: Option<String>,
    /// Any other metadata, passed through untouched.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticSettings {
    pub paths: Vec<String>,
    pub extra_path_metadata: BTreeMap<String, ExtraPath>,
}

/// Resolved site settings. Immutable once built by [`resolve`].
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub site: SiteIdentity,
    pub routes: RouteTemplates,
    pub slug_substitutions: SlugSubstitutions,
    pub pagination: Pagination,
    pub feeds: FeedSettings,
    pub theme: ThemeSettings,
    pub plugins: PluginSettings,
    /// Options for the markdown stage.
    pub markdown: toml::Table,
    /// Options for the template engine.
    pub jinja_environment: toml::Table,
    pub statics: StaticSettings,
}

impl Settings {
    pub fn route(&self, kind: RouteKind) -> &RouteTemplate {
        self.routes.get(kind)
    }

    /// Join `SITEURL` and a site-relative URL.
    pub fn absolute_url(&self, url: &str) -> String {
        format!("{}/{}", self.site.url.trim_end_matches('/'), url)
    }

    /// Site root as seen from the page written to `save_as`.
    ///
    /// With `RELATIVE_URLS` this is a chain of `..` matching the depth of
    /// `save_as` (`.` at the top level); otherwise it is `SITEURL`.
    pub fn site_url_for(&self, save_as: &str) -> String {
        if !self.site.relative_urls {
            return self.site.url.clone();
        }
        match save_as.matches('/').count() {
            0 => ".".to_string(),
            depth => vec![".."; depth].join("/"),
        }
    }

    /// Render a date with `DEFAULT_DATE_FORMAT`.
    pub fn format_date(&self, date: &NaiveDateTime) -> String {
        date.format(&self.site.date_format).to_string()
    }
}

// =============================================================================
// Raw configuration
// =============================================================================

fn default_siteurl() -> String {
    String::new()
}
fn default_path() -> String {
    "content".to_string()
}
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_lang() -> String {
    "en".to_string()
}
fn default_date_format() -> String {
    "%a %d %B %Y".to_string()
}
fn default_directory_index() -> String {
    "index.html".to_string()
}
fn default_article_url() -> String {
    "{slug}.html".to_string()
}
fn default_page_url() -> String {
    "pages/{slug}.html".to_string()
}
fn default_draft_url() -> String {
    "drafts/{slug}.html".to_string()
}
fn default_archives_url() -> String {
    "archives.html".to_string()
}
fn default_category_url() -> String {
    "category/{slug}.html".to_string()
}
fn default_tag_url() -> String {
    "tag/{slug}.html".to_string()
}
fn default_author_url() -> String {
    "author/{slug}.html".to_string()
}
fn default_pagination() -> usize {
    9
}
fn default_pagination_patterns() -> Vec<(usize, String, String)> {
    vec![
        (1, "{url}".to_string(), "{save_as}".to_string()),
        (
            2,
            "{name}{number}{extension}".to_string(),
            "{name}{number}{extension}".to_string(),
        ),
    ]
}
fn default_paginated_templates() -> Vec<ListingKind> {
    ListingKind::ALL.to_vec()
}
fn default_feed_all_atom() -> Option<String> {
    Some("feeds/all.atom.xml".to_string())
}
fn default_term_feed_atom() -> Option<String> {
    Some("feeds/{slug}.atom.xml".to_string())
}
fn default_author_feed_rss() -> Option<String> {
    Some("feeds/{slug}.rss.xml".to_string())
}
fn default_translation_feed_atom() -> Option<String> {
    Some("feeds/all-{lang}.atom.xml".to_string())
}
fn default_true() -> bool {
    true
}
fn default_static_paths() -> Vec<String> {
    vec!["images".to_string()]
}

/// The configuration exactly as written, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
struct RawConfig {
    author: Option<String>,
    sitename: Option<String>,
    #[serde(default)]
    sitesubtitle: Option<String>,
    #[serde(default = "default_siteurl")]
    siteurl: String,
    #[serde(default = "default_path")]
    path: String,
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default = "default_lang")]
    default_lang: String,
    #[serde(default = "default_date_format")]
    default_date_format: String,
    #[serde(default)]
    relative_urls: bool,
    #[serde(default = "default_directory_index")]
    directory_index: String,

    #[serde(default = "default_article_url")]
    article_url: String,
    #[serde(default)]
    article_save_as: Option<String>,
    #[serde(default = "default_page_url")]
    page_url: String,
    #[serde(default)]
    page_save_as: Option<String>,
    #[serde(default = "default_draft_url")]
    draft_url: String,
    #[serde(default)]
    draft_save_as: Option<String>,
    #[serde(default)]
    index_url: String,
    #[serde(default)]
    index_save_as: Option<String>,
    #[serde(default = "default_archives_url")]
    archives_url: String,
    #[serde(default)]
    archives_save_as: Option<String>,
    #[serde(default = "default_category_url")]
    category_url: String,
    #[serde(default)]
    category_save_as: Option<String>,
    #[serde(default = "default_tag_url")]
    tag_url: String,
    #[serde(default)]
    tag_save_as: Option<String>,
    #[serde(default = "default_author_url")]
    author_url: String,
    #[serde(default)]
    author_save_as: Option<String>,

    #[serde(default)]
    slug_substitutions: Vec<(String, String)>,

    #[serde(default = "default_pagination")]
    default_pagination: usize,
    #[serde(default)]
    default_orphans: usize,
    #[serde(default = "default_pagination_patterns")]
    pagination_patterns: Vec<(usize, String, String)>,
    #[serde(default = "default_paginated_templates")]
    paginated_templates: Vec<ListingKind>,

    #[serde(default = "default_feed_all_atom")]
    feed_all_atom: Option<String>,
    #[serde(default)]
    feed_all_rss: Option<String>,
    #[serde(default = "default_term_feed_atom")]
    category_feed_atom: Option<String>,
    #[serde(default)]
    category_feed_rss: Option<String>,
    #[serde(default)]
    tag_feed_atom: Option<String>,
    #[serde(default)]
    tag_feed_rss: Option<String>,
    #[serde(default = "default_term_feed_atom")]
    author_feed_atom: Option<String>,
    #[serde(default = "default_author_feed_rss")]
    author_feed_rss: Option<String>,
    #[serde(default = "default_translation_feed_atom")]
    translation_feed_atom: Option<String>,
    #[serde(default = "default_true")]
    display_feeds_on_sidebar: bool,
    #[serde(default = "default_true")]
    display_tags_on_sidebar: bool,

    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
    #[serde(default)]
    twitter_username: Option<String>,
    #[serde(default)]
    google_analytics_universal: Option<String>,
    #[serde(default)]
    social: Vec<(String, String)>,
    #[serde(default)]
    links: Vec<(String, String)>,

    #[serde(default)]
    plugin_paths: Vec<String>,
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default)]
    sitemap: toml::Table,
    #[serde(default)]
    markdown: toml::Table,
    #[serde(default)]
    jinja_environment: toml::Table,

    #[serde(default = "default_static_paths")]
    static_paths: Vec<String>,
    #[serde(default)]
    extra_path_metadata: BTreeMap<String, ExtraPath>,
}

fn template(key: &str, source: &str, allowed: &[&str]) -> Result<UrlTemplate, ConfigError> {
    UrlTemplate::parse_for(source, allowed).map_err(|source| ConfigError::Template {
        key: key.to_string(),
        source,
    })
}

fn route_template(
    kind: RouteKind,
    url: &str,
    save_as: Option<&str>,
) -> Result<RouteTemplate, ConfigError> {
    let prefix = kind.setting_prefix();
    let url = template(&format!("{prefix}_URL"), url, kind.placeholders())?;
    let save_as = match save_as {
        None => Some(url.clone()),
        Some("") => {
            debug!("{prefix}_SAVE_AS is empty, {prefix} routes are disabled");
            None
        }
        Some(s) => Some(template(&format!("{prefix}_SAVE_AS"), s, kind.placeholders())?),
    };
    Ok(RouteTemplate { url, save_as })
}

/// Parse a feed setting. Empty disables the feed; `%s` stands for `legacy`.
fn feed_template(
    key: &str,
    value: Option<&str>,
    allowed: &[&str],
    legacy: Option<&str>,
) -> Result<Option<UrlTemplate>, ConfigError> {
    match value {
        None | Some("") => Ok(None),
        Some(source) => {
            let source = match legacy {
                Some(name) => upgrade_legacy_placeholder(source, name),
                None => source.to_string(),
            };
            template(key, &source, allowed).map(Some)
        }
    }
}

fn links(pairs: Vec<(String, String)>) -> Vec<Link> {
    pairs
        .into_iter()
        .map(|(label, url)| Link { label, url })
        .collect()
}

impl RawConfig {
    fn into_settings(self) -> Result<Settings, ConfigError> {
        let author = self.author.ok_or(ConfigError::MissingKey("AUTHOR"))?;
        let name = self.sitename.ok_or(ConfigError::MissingKey("SITENAME"))?;

        validate_date_format(&self.default_date_format).map_err(|source| {
            ConfigError::Template {
                key: "DEFAULT_DATE_FORMAT".into(),
                source,
            }
        })?;
        if self.directory_index.is_empty() || self.directory_index.contains('/') {
            return Err(ConfigError::Validation(format!(
                "DIRECTORY_INDEX must be a plain file name, got '{}'",
                self.directory_index
            )));
        }

        let routes = RouteTemplates {
            article: route_template(
                RouteKind::Article,
                &self.article_url,
                self.article_save_as.as_deref(),
            )?,
            page: route_template(RouteKind::Page, &self.page_url, self.page_save_as.as_deref())?,
            draft: route_template(
                RouteKind::Draft,
                &self.draft_url,
                self.draft_save_as.as_deref(),
            )?,
            index: route_template(
                RouteKind::Index,
                &self.index_url,
                self.index_save_as.as_deref(),
            )?,
            archives: route_template(
                RouteKind::Archives,
                &self.archives_url,
                self.archives_save_as.as_deref(),
            )?,
            category: route_template(
                RouteKind::Category,
                &self.category_url,
                self.category_save_as.as_deref(),
            )?,
            tag: route_template(RouteKind::Tag, &self.tag_url, self.tag_save_as.as_deref())?,
            author: route_template(
                RouteKind::Author,
                &self.author_url,
                self.author_save_as.as_deref(),
            )?,
        };

        let rules = self
            .pagination_patterns
            .iter()
            .map(|(min_page, url, save_as)| {
                PaginationRule::parse(*min_page, url, save_as).map_err(|source| {
                    ConfigError::Template {
                        key: format!("PAGINATION_PATTERNS[{min_page}]"),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pagination = Pagination::new(
            self.default_pagination,
            self.default_orphans,
            rules,
            self.paginated_templates.into_iter().collect(),
        )?;

        let slug = Some("slug");
        let feeds = FeedSettings {
            all: FeedPair {
                atom: feed_template("FEED_ALL_ATOM", self.feed_all_atom.as_deref(), &[], None)?,
                rss: feed_template("FEED_ALL_RSS", self.feed_all_rss.as_deref(), &[], None)?,
            },
            category: FeedPair {
                atom: feed_template(
                    "CATEGORY_FEED_ATOM",
                    self.category_feed_atom.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
                rss: feed_template(
                    "CATEGORY_FEED_RSS",
                    self.category_feed_rss.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
            },
            tag: FeedPair {
                atom: feed_template(
                    "TAG_FEED_ATOM",
                    self.tag_feed_atom.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
                rss: feed_template(
                    "TAG_FEED_RSS",
                    self.tag_feed_rss.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
            },
            author: FeedPair {
                atom: feed_template(
                    "AUTHOR_FEED_ATOM",
                    self.author_feed_atom.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
                rss: feed_template(
                    "AUTHOR_FEED_RSS",
                    self.author_feed_rss.as_deref(),
                    TERM_PLACEHOLDERS,
                    slug,
                )?,
            },
            translation_atom: feed_template(
                "TRANSLATION_FEED_ATOM",
                self.translation_feed_atom.as_deref(),
                &["lang"],
                Some("lang"),
            )?,
            display_on_sidebar: self.display_feeds_on_sidebar,
        };

        let settings = Settings {
            site: SiteIdentity {
                author,
                name,
                subtitle: self.sitesubtitle,
                url: self.siteurl,
                timezone: self.timezone,
                default_lang: self.default_lang,
                content_path: self.path,
                date_format: self.default_date_format,
                relative_urls: self.relative_urls,
                directory_index: self.directory_index,
            },
            routes,
            slug_substitutions: SlugSubstitutions::new(self.slug_substitutions)?,
            pagination,
            feeds,
            theme: ThemeSettings {
                theme: self.theme,
                favicon: self.favicon,
                display_tags_on_sidebar: self.display_tags_on_sidebar,
                social: links(self.social),
                links: links(self.links),
                twitter_username: self.twitter_username,
                google_analytics: self.google_analytics_universal,
            },
            plugins: PluginSettings {
                paths: self.plugin_paths,
                names: self.plugins,
                sitemap: self.sitemap,
            },
            markdown: self.markdown,
            jinja_environment: self.jinja_environment,
            statics: StaticSettings {
                paths: self.static_paths,
                extra_path_metadata: self.extra_path_metadata,
            },
        };
        Ok(settings)
    }
}

// =============================================================================
// Config loading, merging, and resolution
// =============================================================================

/// Validate a raw configuration mapping and build [`Settings`].
pub fn resolve(raw: toml::Value) -> Result<Settings, ConfigError> {
    let raw: RawConfig = raw.try_into()?;
    let settings = raw.into_settings()?;
    info!(
        "Resolved settings for '{}' ({} slug substitutions, {} per page)",
        settings.site.name,
        settings.slug_substitutions.len(),
        settings.pagination.page_size
    );
    Ok(settings)
}

/// Merge layers left to right, then resolve.
pub fn resolve_layers<I>(layers: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = toml::Value>,
{
    let merged = layers
        .into_iter()
        .fold(toml::Value::Table(toml::Table::new()), merge_toml);
    resolve(merged)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Read one configuration file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config layer {}", path.display());
    Ok(value)
}

/// Load, layer, and resolve configuration files in order.
pub fn load_config(paths: &[PathBuf]) -> Result<Settings, ConfigError> {
    let layers = paths
        .iter()
        .map(|p| load_raw_config(p))
        .collect::<Result<Vec<_>, _>>()?;
    resolve_layers(layers)
}

/// Resolve the effective worker count for planning several content sets.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(requested: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.map(|n| n.clamp(1, cores)).unwrap_or(cores)
}

/// Returns a fully-commented stock configuration with every key and its
/// default value.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-press configuration
# ==========================
# AUTHOR and SITENAME are required; every other key is optional and shown
# with its default value. Unknown keys are rejected.
#
# Several files can be layered with repeated --config flags:
#   simple-press --config pelicanconf.toml --config publishconf.toml plan ...
# Later files override earlier ones key by key.

AUTHOR = "Your Name"
SITENAME = "My Blog"
# SITESUBTITLE = "A subtitle"

# Prefix for absolute URLs. Leave empty while developing.
SITEURL = ""
PATH = "content"
TIMEZONE = "UTC"
DEFAULT_LANG = "en"

# strftime format used to display dates.
DEFAULT_DATE_FORMAT = "%a %d %B %Y"

# Make the site root document-relative (../..) instead of SITEURL.
RELATIVE_URLS = false

# Appended to every save-as path that ends in "/".
DIRECTORY_INDEX = "index.html"

# ---------------------------------------------------------------------------
# URL schemes
# ---------------------------------------------------------------------------
# Articles, pages and drafts: {slug} {date} {date:<strftime>} {category}
#   {author} {lang}
# Categories, tags and authors: {slug} {name}
# Index and archives: no placeholders
#
# *_SAVE_AS defaults to the URL (plus DIRECTORY_INDEX when the URL ends in
# "/"). Set *_SAVE_AS = "" to skip generating that kind of page.
ARTICLE_URL = "{slug}.html"
PAGE_URL = "pages/{slug}.html"
DRAFT_URL = "drafts/{slug}.html"
INDEX_URL = ""
ARCHIVES_URL = "archives.html"
CATEGORY_URL = "category/{slug}.html"
TAG_URL = "tag/{slug}.html"
AUTHOR_URL = "author/{slug}.html"

# Ordered [source, replacement] pairs. The first pair whose source occurs in
# a slug replaces it; later pairs are not consulted.
SLUG_SUBSTITUTIONS = []

# ---------------------------------------------------------------------------
# Pagination
# ---------------------------------------------------------------------------
DEFAULT_PAGINATION = 9

# The last page absorbs up to this many trailing items.
DEFAULT_ORPHANS = 0

# [first page, URL, save-as]. Placeholders: {url} {save_as} {name}
# {base_name} {number} {extension}
PAGINATION_PATTERNS = [
    [1, "{url}", "{save_as}"],
    [2, "{name}{number}{extension}", "{name}{number}{extension}"],
]

PAGINATED_TEMPLATES = ["index", "archives", "category", "tag", "author"]

# ---------------------------------------------------------------------------
# Feeds ("" disables a feed; %s is accepted for {slug})
# ---------------------------------------------------------------------------
FEED_ALL_ATOM = "feeds/all.atom.xml"
FEED_ALL_RSS = ""
CATEGORY_FEED_ATOM = "feeds/{slug}.atom.xml"
CATEGORY_FEED_RSS = ""
TAG_FEED_ATOM = ""
TAG_FEED_RSS = ""
AUTHOR_FEED_ATOM = "feeds/{slug}.atom.xml"
AUTHOR_FEED_RSS = "feeds/{slug}.rss.xml"
TRANSLATION_FEED_ATOM = "feeds/all-{lang}.atom.xml"
DISPLAY_FEEDS_ON_SIDEBAR = true

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
# THEME = "themes/simple"
# FAVICON = "images/favicon.png"
# TWITTER_USERNAME = ""
# GOOGLE_ANALYTICS_UNIVERSAL = ""
DISPLAY_TAGS_ON_SIDEBAR = true
SOCIAL = []
LINKS = []

# ---------------------------------------------------------------------------
# Plugins and passthrough options
# ---------------------------------------------------------------------------
PLUGIN_PATHS = []
PLUGINS = []
SITEMAP = {}
MARKDOWN = {}
JINJA_ENVIRONMENT = {}

# ---------------------------------------------------------------------------
# Static files
# ---------------------------------------------------------------------------
STATIC_PATHS = ["images"]

# Relocate individual static files, e.g.
# [EXTRA_PATH_METADATA."extra/CNAME"]
# path = "CNAME"
EXTRA_PATH_METADATA = {}
"##
}
