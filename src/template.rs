//! Placeholder templates for URLs and output paths.
//!
//! Every route, feed and pagination setting is a string with `{name}`
//! placeholders, e.g. `blog/{date:%Y}/{date:%m}/{slug}/`. Templates are parsed
//! once, when the configuration is resolved, so a typo in a placeholder name
//! is reported against its configuration key instead of surfacing halfway
//! through a build.
//!
//! ## Syntax
//!
//! - `{name}`: substitute the value of `name`
//! - `{name:spec}`: substitute with a format spec (only `date` accepts one,
//!   and the spec must be a valid strftime string)
//! - `{{` / `}}`: literal braces
//!
//! Expansion goes through a lookup closure so each caller decides where
//! values come from (a content item, a taxonomy term, a pagination page).

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};
use thiserror::Error;

/// Only this placeholder may carry a `:spec` suffix.
pub const DATE_PLACEHOLDER: &str = "date";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("unclosed '{{' at offset {0}")]
    Unclosed(usize),
    #[error("unmatched '}}' at offset {0}")]
    UnmatchedClose(usize),
    #[error("empty placeholder at offset {0}")]
    EmptyPlaceholder(usize),
    #[error("unknown placeholder {{{name}}} (allowed: {allowed})")]
    UnknownPlaceholder { name: String, allowed: String },
    #[error("placeholder {{{0}}} does not accept a format spec")]
    UnexpectedFormat(String),
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),
}

/// A placeholder that the lookup could not resolve during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved(pub String);

/// An expanded path whose `..` segments climb above the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapesRoot(pub String);

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field { name: String, format: Option<String> },
}

/// A parsed `{placeholder}` template.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template without restricting placeholder names.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClose(pos)),
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        body.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    let (name, format) = match body.split_once(':') {
                        Some((name, spec)) => (name.trim(), Some(spec.to_string())),
                        None => (body.trim(), None),
                    };
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder(pos));
                    }
                    if let Some(spec) = &format {
                        if name != DATE_PLACEHOLDER {
                            return Err(TemplateError::UnexpectedFormat(name.to_string()));
                        }
                        validate_date_format(spec)?;
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field {
                        name: name.to_string(),
                        format,
                    });
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Parse a template and reject any placeholder not in `allowed`.
    pub fn parse_for(source: &str, allowed: &[&str]) -> Result<Self, TemplateError> {
        let template = Self::parse(source)?;
        if let Some(name) = template.placeholders().find(|n| !allowed.contains(n)) {
            return Err(TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                allowed: if allowed.is_empty() {
                    "none".to_string()
                } else {
                    allowed.join(", ")
                },
            });
        }
        Ok(template)
    }

    /// Placeholder names in order of appearance (duplicates included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// The template text as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Expand every placeholder through `lookup(name, format)`.
    ///
    /// Stops at the first placeholder the lookup returns `None` for.
    pub fn expand<F>(&self, mut lookup: F) -> Result<String, Unresolved>
    where
        F: FnMut(&str, Option<&str>) -> Option<String>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { name, format } => {
                    let value = lookup(name, format.as_deref())
                        .ok_or_else(|| Unresolved(name.clone()))?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for UrlTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Reject strftime strings chrono cannot render for a naive date.
///
/// chrono panics when displaying a format it cannot render, so every date
/// format that reaches expansion has to pass through here first. Besides
/// malformed specs this catches the timezone specs (`%z`, `%Z`, `%+`), which
/// need an offset that naive dates do not have.
pub fn validate_date_format(spec: &str) -> Result<(), TemplateError> {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDateTime::default().format(spec))
        .map_err(|_| TemplateError::InvalidDateFormat(spec.to_string()))
}

/// Rewrite the `%s` form used by older feed settings into `{name}`.
pub fn upgrade_legacy_placeholder(source: &str, name: &str) -> String {
    source.replace("%s", &format!("{{{name}}}"))
}

/// Normalize an expanded path relative to the output root.
///
/// Leading, doubled and `.` segments are dropped and `..` folds into its
/// parent, so two spellings of one file compare equal. A trailing `/` is kept.
pub fn normalize_path(path: &str) -> Result<String, EscapesRoot> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(EscapesRoot(path.to_string()));
                }
            }
            _ => parts.push(segment),
        }
    }
    let mut out = parts.join("/");
    let names_directory = matches!(path.rsplit('/').next(), Some("" | "." | ".."));
    if names_directory && !out.is_empty() {
        out.push('/');
    }
    Ok(out)
}
