// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Transformation logic that converts raw YAML configuration into the
//! normalized redirect model.
//!
//! Two input shapes are accepted for `redirects`:
//!
//! * a mapping from category key to a list of redirects, which is the
//!   authoritative layout and keeps the document's key order;
//! * a flat list of redirects tagged with an optional `category`, grouped
//!   into [`KNOWN_CATEGORIES`] order. Unknown categories follow the known
//!   ones in order of first appearance.
//!
//! Every default (status, description, category) is applied here so that the
//! renderers never have to.

use std::{borrow::Cow, collections::HashSet, fmt, fs, io, path::Path};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::{
    category::{CategoryTitle, DEFAULT_CATEGORY, KNOWN_CATEGORIES},
    error::{self, Error},
    model::{Category, DEFAULT_STATUS, NormalizedConfig, RedirectRule, RootRedirect}
};

/// Lowest status code accepted for a redirect.
const MIN_STATUS: u64 = 100;
/// Highest status code accepted for a redirect.
const MAX_STATUS: u64 = 599;

/// Loads and normalizes the redirect configuration stored at `path`.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`](Error::ConfigNotFound) when the file does
/// not exist, [`Error::Io`](Error::Io) when it cannot be read, and any error
/// produced by [`parse_config`].
pub fn load_config(path: &Path) -> Result<NormalizedConfig, Error> {
    debug!("Reading configuration from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            error::not_found(path)
        } else {
            error::io_error(path, source)
        }
    })?;
    parse_config(&contents)
}

/// Parses and normalizes a YAML configuration document.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded
/// and [`Error::ConfigShape`](Error::ConfigShape) from [`normalize`].
///
/// # Examples
///
/// ```
/// use redirgen::parse_config;
///
/// let yaml = r#"
/// redirects:
///   developer:
///     - path: gh
///       url: https://github.com/example
/// "#;
/// let config = parse_config(yaml)?;
/// assert_eq!(config.categories[0].title, "Developer");
/// assert_eq!(config.categories[0].rules[0].status, 301);
/// # Ok::<(), redirgen::Error>(())
/// ```
pub fn parse_config(contents: &str) -> Result<NormalizedConfig, Error> {
    let raw: Value = serde_yaml::from_str(contents)?;
    normalize(&raw)
}

/// Converts a raw configuration value into a [`NormalizedConfig`].
///
/// # Errors
///
/// Returns [`Error::ConfigShape`](Error::ConfigShape) when the document is not
/// a mapping, when `root` or `redirects` have an unexpected type, or when a
/// redirect entry lacks its `path` or `url`.
pub fn normalize(raw: &Value) -> Result<NormalizedConfig, Error> {
    let document = raw
        .as_mapping()
        .ok_or_else(|| Error::shape("configuration root must be a mapping"))?;

    let root = match document.get("root") {
        None | Some(Value::Null) => None,
        Some(value) => Some(normalize_root(value)?)
    };

    let categories = match document.get("redirects") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Mapping(groups)) => normalize_grouped(groups)?,
        Some(Value::Sequence(entries)) => {
            debug!("Grouping {} flat redirects by category tag", entries.len());
            normalize_flat(entries)?
        }
        Some(_) => {
            return Err(Error::shape(
                "`redirects` must be a mapping of categories or a list of redirects"
            ));
        }
    };

    warn_duplicate_paths(&categories);

    Ok(NormalizedConfig {
        root,
        categories
    })
}

fn normalize_root(value: &Value) -> Result<RootRedirect, Error> {
    let fields = value
        .as_mapping()
        .ok_or_else(|| Error::shape("`root` must be a mapping with a `url`"))?;

    let destination = match fields.get("url") {
        Some(Value::String(url)) => url.clone(),
        Some(_) => return Err(Error::shape("`root.url` must be a string")),
        None => return Err(Error::shape("`root` is missing required `url`"))
    };
    if !is_rule_token(&destination) {
        return Err(Error::shape("`root.url` must be a non-empty URL without whitespace"));
    }
    let status = optional_status(fields, "`root.status`")?;

    Ok(RootRedirect {
        destination,
        status
    })
}

fn normalize_grouped(groups: &Mapping) -> Result<Vec<Category>, Error> {
    let mut categories = Vec::with_capacity(groups.len());

    for (key, entries) in groups {
        let key = scalar_text(key)
            .ok_or_else(|| Error::shape("category keys under `redirects` must be scalars"))?;

        let entries = match entries {
            Value::Null => {
                debug!("Skipping category '{key}' without redirects");
                continue;
            }
            Value::Sequence(entries) if entries.is_empty() => {
                debug!("Skipping category '{key}' without redirects");
                continue;
            }
            Value::Sequence(entries) => entries,
            _ => {
                return Err(Error::shape(format!(
                    "category '{key}' must be a list of redirects"
                )));
            }
        };

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let location = EntryLocation {
                category: Some(&*key),
                index
            };
            rules.push(normalize_entry(entry, &location, Some(&*key))?);
        }

        categories.push(Category {
            title: CategoryTitle::builder(&key).build(),
            key: key.into_owned(),
            rules
        });
    }

    Ok(categories)
}

fn normalize_flat(entries: &[Value]) -> Result<Vec<Category>, Error> {
    let mut groups: Vec<(String, Vec<RedirectRule>)> = KNOWN_CATEGORIES
        .iter()
        .map(|key| ((*key).to_owned(), Vec::new()))
        .collect();

    for (index, entry) in entries.iter().enumerate() {
        let location = EntryLocation {
            category: None,
            index
        };
        let rule = normalize_entry(entry, &location, None)?;

        match groups.iter_mut().find(|(key, _)| *key == rule.category) {
            Some((_, rules)) => rules.push(rule),
            None => {
                debug!("Appending unlisted category '{}'", rule.category);
                groups.push((rule.category.clone(), vec![rule]));
            }
        }
    }

    let categories = groups
        .into_iter()
        .filter(|(_, rules)| !rules.is_empty())
        .map(|(key, rules)| Category {
            title: CategoryTitle::builder(&key).build(),
            key,
            rules
        })
        .collect();

    Ok(categories)
}

/// Position of a redirect entry, used in error messages.
struct EntryLocation<'a> {
    category: Option<&'a str>,
    index:    usize
}

impl fmt::Display for EntryLocation<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => {
                write!(formatter, "redirect #{} in category '{category}'", self.index + 1)
            }
            None => write!(formatter, "redirect #{}", self.index + 1)
        }
    }
}

/// Converts one redirect entry. `category` is the mapping key in the grouped
/// shape; in the flat shape the entry's own tag is used instead.
fn normalize_entry(
    entry: &Value,
    location: &EntryLocation<'_>,
    category: Option<&str>
) -> Result<RedirectRule, Error> {
    let fields = entry
        .as_mapping()
        .ok_or_else(|| Error::shape(format!("{location} must be a mapping")))?;

    let path = required_string(fields, "path", location)?;
    if path.is_empty() {
        return Err(Error::shape(format!("{location} has an empty `path`")));
    }
    if path.starts_with('/') {
        return Err(Error::shape(format!(
            "{location} has `path` '{path}' with a leading slash"
        )));
    }
    if !is_rule_token(&path) {
        return Err(Error::shape(format!("{location} has whitespace in `path` {path:?}")));
    }

    let destination = required_string(fields, "url", location)?;
    if !is_rule_token(&destination) {
        return Err(Error::shape(format!(
            "{location} has an empty `url` or whitespace in `url` {destination:?}"
        )));
    }
    let status = optional_status(fields, &location.to_string())?;

    let category = match category {
        Some(key) => key.to_owned(),
        None => optional_string(fields, "category", location)?
            .map_or_else(|| DEFAULT_CATEGORY.to_owned(), Cow::into_owned)
    };
    if category.chars().any(char::is_control) {
        return Err(Error::shape(format!(
            "{location} has control characters in category {category:?}"
        )));
    }

    let description = optional_string(fields, "description", location)?
        .map_or_else(|| destination.clone().into_owned(), Cow::into_owned);

    Ok(RedirectRule {
        path: path.into_owned(),
        destination: destination.into_owned(),
        status,
        category,
        description
    })
}

/// Rule file lines are split on whitespace, so every token must be a single
/// non-empty word.
fn is_rule_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

/// Renders a YAML scalar as text. Unquoted values such as `404` or `true`
/// decode as numbers and booleans but are used verbatim.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        _ => None
    }
}

fn required_string<'a>(
    fields: &'a Mapping,
    field: &str,
    location: &EntryLocation<'_>
) -> Result<Cow<'a, str>, Error> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            Err(Error::shape(format!("{location} is missing required `{field}`")))
        }
        Some(value) => scalar_text(value)
            .ok_or_else(|| Error::shape(format!("{location} has a non-scalar `{field}`")))
    }
}

fn optional_string<'a>(
    fields: &'a Mapping,
    field: &str,
    location: &EntryLocation<'_>
) -> Result<Option<Cow<'a, str>>, Error> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or_else(|| Error::shape(format!("{location} has a non-scalar `{field}`")))
    }
}

fn optional_status(fields: &Mapping, owner: &str) -> Result<u16, Error> {
    let value = match fields.get("status") {
        None | Some(Value::Null) => return Ok(DEFAULT_STATUS),
        Some(value) => value
    };

    value
        .as_u64()
        .filter(|status| (MIN_STATUS..=MAX_STATUS).contains(status))
        .and_then(|status| u16::try_from(status).ok())
        .ok_or_else(|| {
            Error::shape(format!(
                "{owner} has an invalid `status`; expected an integer between {MIN_STATUS} and {MAX_STATUS}"
            ))
        })
}

fn warn_duplicate_paths(categories: &[Category]) {
    let mut seen = HashSet::new();
    for category in categories {
        for rule in &category.rules {
            if !seen.insert(rule.path.as_str()) {
                warn!(
                    "Duplicate redirect path '{}' in category '{}'",
                    rule.path, category.key
                );
            }
        }
    }
}
