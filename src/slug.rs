//! Slug handling: ordered literal substitutions and slugify.
//!
//! Article slugs arrive from ingestion already URL-shaped (`c++-templates`);
//! they only go through [`SlugSubstitutions::apply`]. Taxonomy values
//! (category, tag and author names) are free text, so their slug is
//! [`term_slug`]: substitutions on the lowercased name, then [`slugify`].
//!
//! ## Substitution rules
//!
//! The list is scanned once, left to right. The first rule whose source token
//! occurs in the slug replaces every occurrence of that token and the scan
//! stops. Substitution is never applied recursively:
//!
//! - `c++-templates` with `[("c++", "cpp")]` → `cpp-templates`
//! - `cpp-templates` with the same list → unchanged
//! - `c#-and-c++` with `[("c++", "cpp"), ("c#", "csharp")]` → `c#-and-cpp`

use deunicode::deunicode;
use serde::Serialize;
use std::collections::HashSet;

use crate::config::ConfigError;

/// One `(source, replacement)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub source: String,
    pub replacement: String,
}

/// Ordered, validated substitution list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlugSubstitutions(Vec<Substitution>);

impl SlugSubstitutions {
    /// Build from raw pairs, rejecting lists that could not be applied
    /// deterministically.
    ///
    /// - a source token may appear only once
    /// - a source token may not be empty
    /// - a replacement may not contain any source token, otherwise running
    ///   the list over its own output would change it again
    pub fn new(pairs: Vec<(String, String)>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for (source, _) in &pairs {
            if source.is_empty() {
                return Err(ConfigError::Validation(
                    "SLUG_SUBSTITUTIONS source tokens must not be empty".into(),
                ));
            }
            if !seen.insert(source.as_str()) {
                return Err(ConfigError::DuplicateSubstitution(source.clone()));
            }
        }
        for (source, replacement) in &pairs {
            if let Some(token) = seen.iter().find(|token| replacement.contains(**token)) {
                return Err(ConfigError::Validation(format!(
                    "SLUG_SUBSTITUTIONS replacement '{replacement}' for '{source}' \
                     contains source token '{token}'"
                )));
            }
        }

        Ok(Self(
            pairs
                .into_iter()
                .map(|(source, replacement)| Substitution {
                    source,
                    replacement,
                })
                .collect(),
        ))
    }

    /// Apply the first matching rule, if any.
    pub fn apply(&self, slug: &str) -> String {
        match self.0.iter().find(|rule| slug.contains(&rule.source)) {
            Some(rule) => slug.replace(&rule.source, &rule.replacement),
            None => slug.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substitution> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Turn free text into a URL-safe slug.
///
/// Transliterates to ASCII, lowercases, keeps alphanumerics and `_`, and
/// collapses every other run of characters into a single `-`. Leading and
/// trailing dashes are dropped, so text with no usable characters yields `""`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_dash = true;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug of a category, tag or author name.
pub fn term_slug(name: &str, substitutions: &SlugSubstitutions) -> String {
    slugify(&substitutions.apply(&name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, &str)]) -> SlugSubstitutions {
        SlugSubstitutions::new(
            pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn substitutes_matching_token() {
        let s = subs(&[("c++", "cpp")]);
        assert_eq!(s.apply("c++-templates"), "cpp-templates");
    }

    #[test]
    fn unmatched_slug_passes_through() {
        let s = subs(&[("c++", "cpp")]);
        assert_eq!(s.apply("python-generators"), "python-generators");
    }

    #[test]
    fn substitution_is_idempotent() {
        let s = subs(&[("c++", "cpp")]);
        let once = s.apply("c++-templates");
        assert_eq!(s.apply(&once), once);
        assert_eq!(s.apply("cpp"), "cpp");
    }

    #[test]
    fn only_first_matching_rule_applies() {
        let s = subs(&[("c++", "cpp"), ("c#", "csharp")]);
        assert_eq!(s.apply("c#-and-c++"), "c#-and-cpp");
        assert_eq!(s.apply("c#-only"), "csharp-only");
    }

    #[test]
    fn two_tokens_need_two_passes() {
        // One pass rewrites only the first matching token; a second pass
        // picks up the next one. Planning applies the list exactly once.
        let s = subs(&[("c++", "cpp"), ("c#", "csharp")]);
        let once = s.apply("c#-and-c++");
        assert_eq!(once, "c#-and-cpp");
        let twice = s.apply(&once);
        assert_eq!(twice, "csharp-and-cpp");
        assert_eq!(s.apply(&twice), twice);
    }

    #[test]
    fn first_rule_replaces_every_occurrence() {
        let s = subs(&[("c++", "cpp")]);
        assert_eq!(s.apply("c++-vs-c++11"), "cpp-vs-cpp11");
    }

    #[test]
    fn duplicate_source_rejected() {
        let err = SlugSubstitutions::new(vec![
            ("c++".into(), "cpp".into()),
            ("c++".into(), "cplusplus".into()),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSubstitution(ref t) if t == "c++"));
    }

    #[test]
    fn empty_source_rejected() {
        let err = SlugSubstitutions::new(vec![(String::new(), "x".into())]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn replacement_containing_source_rejected() {
        let err = SlugSubstitutions::new(vec![("go".into(), "golang".into())]).unwrap_err();
        assert!(err.to_string().contains("golang"));
    }

    #[test]
    fn empty_list_is_noop() {
        let s = SlugSubstitutions::default();
        assert!(s.is_empty());
        assert_eq!(s.apply("c++"), "c++");
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Leonardo Giordani"), "leonardo-giordani");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn slugify_transliterates() {
        assert_eq!(slugify("Café Società"), "cafe-societa");
    }

    #[test]
    fn slugify_nothing_usable() {
        assert_eq!(slugify("+++"), "");
    }

    #[test]
    fn term_slug_substitutes_before_slugify() {
        let s = subs(&[("c++", "cpp")]);
        assert_eq!(term_slug("C++", &s), "cpp");
        assert_eq!(term_slug("Modern C++ Tips", &s), "modern-cpp-tips");
        assert_eq!(term_slug("C++", &SlugSubstitutions::default()), "c");
    }
}
