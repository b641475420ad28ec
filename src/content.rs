//! Content items handed over by the ingestion stage.
//!
//! An item is one article or page, already parsed: the planner only needs
//! the attributes that can appear in a URL. Items are immutable once built;
//! the `with_*` builders consume and return `self` so a fully-formed item can
//! be assembled in one expression.
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "slug": "c++-templates",
//!   "date": "2016-03-05",
//!   "category": "Programming",
//!   "tags": ["C++", "templates"],
//!   "author": "Leonardo Giordani",
//!   "source": "content/cpp-templates.md"
//! }
//! ```
//!
//! `kind` defaults to `article` and `status` to `published`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Article,
    Page,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Published,
    /// Routed under the draft templates, never listed.
    Draft,
    /// Routed normally, never listed.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentItem {
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub status: Status,
    pub slug: String,
    #[serde(default, with = "item_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// Falls back to the site `AUTHOR` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Falls back to `DEFAULT_LANG` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Where the item came from, used to identify it in errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ContentItem {
    pub fn article(slug: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Article,
            status: Status::Published,
            slug: slug.into(),
            date: None,
            category: None,
            tags: BTreeSet::new(),
            author: None,
            lang: None,
            source: None,
        }
    }

    pub fn page(slug: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Page,
            ..Self::article(slug)
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the date to midnight of `y-m-d`. Invalid dates leave it unset.
    pub fn with_date(mut self, y: i32, m: u32, d: u32) -> Self {
        self.date = NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0));
        self
    }

    pub fn with_datetime(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Human-readable identity for error messages: the source path when
    /// known, the slug otherwise.
    pub fn identity(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => format!("{} '{}'", self.kind.label(), self.slug),
        }
    }

    /// Published articles are the only items that appear in listings.
    pub fn is_listed(&self) -> bool {
        self.kind == ContentKind::Article && self.status == Status::Published
    }
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Page => "page",
        }
    }
}

/// Read a content set: a JSON array of items.
pub fn load_items(path: &Path) -> Result<Vec<ContentItem>, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and the same with a space
/// instead of `T`. Always writes the full `T` form.
mod item_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FULL: &str = "%Y-%m-%dT%H:%M:%S";
    const DATETIME_FORMATS: &[&str] = &[
        FULL,
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FULL).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(raw.trim())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognized date '{raw}'")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        DATETIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}
