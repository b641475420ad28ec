//! # Simple Press
//!
//! The URL layer of a static blog engine. Given a blog configuration and a
//! set of content items, it decides where every output lives: the URL an
//! article is linked under, the file it is written to, how listings split
//! into pages, which feeds exist, and where relocated static files go.
//! Rendering, markdown and feed serialization are other stages' business;
//! this crate hands them a plan.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Resolve   pelicanconf.toml (+ layers)  →  Settings   (validated, immutable)
//! 2. Plan      Settings + content items     →  Plan       (bindings, feeds, statics)
//! ```
//!
//! Both stages are pure functions. Resolution rejects a bad configuration
//! before any content is looked at; planning never mutates its inputs, so
//! several content sets can be planned against one `Settings` at once.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Stage 1: TOML layering, defaults, validation into [`config::Settings`] |
//! | [`route`] | Stage 2: item routes, listing pages, collision detection |
//! | [`template`] | `{placeholder}` URL templates with strftime date specs |
//! | [`slug`] | Slug substitution rules and term slugification |
//! | [`paginate`] | Page counts, orphans, and pagination pattern rules |
//! | [`taxonomy`] | Category, tag and author terms grouped by slug |
//! | [`feeds`] | Feed path derivation |
//! | [`content`] | Content item model and JSON loading |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Settings Are Validated Once
//!
//! Blog configurations are traditionally a bag of loosely typed module
//! constants read wherever they are needed. Here the bag is parsed once into
//! a typed [`config::Settings`]: every template is parsed and checked
//! against the placeholders its route kind can supply, unknown keys are
//! rejected, and defaults are filled in. A typo in `ARTICLE_URL` fails at
//! startup with the key's name rather than producing a broken site.
//!
//! ## Collisions Are Fatal, Missing Fields Are Collected
//!
//! An item without a date under a date-based URL scheme is the author's
//! problem to fix, and there may be several; planning reports all of them
//! together. Two outputs claiming one file is different: one of them would
//! silently overwrite the other, so a collision fails the whole pass and is
//! reported ahead of anything else.
//!
//! ## Terms Group by Slug
//!
//! `C++` and `cpp` become one listing when a `c++ → cpp` substitution is
//! configured, because they would otherwise collide on disk. The first name
//! seen is the one displayed.

pub mod config;
pub mod content;
pub mod feeds;
pub mod output;
pub mod paginate;
pub mod route;
pub mod slug;
pub mod taxonomy;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
