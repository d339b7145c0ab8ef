// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Category keys and the titles derived from them.
//!
//! Category keys are opaque identifiers such as `third_party`. Display titles
//! are derived purely from the key, so both renderers agree on the heading of
//! every section without consulting any lookup table.

/// Category applied to flat-list entries that carry no `category` field.
pub const DEFAULT_CATEGORY: &str = "personal";

/// Ordered allowlist used to group entries of the flat-list input shape.
///
/// Sections appear in exactly this order in both generated artifacts.
pub const KNOWN_CATEGORIES: &[&str] = &["personal", "developer", "ministry", "third_party"];

/// Suffix appended to category titles in rule-file section headers.
pub const RULES_HEADING_SUFFIX: &str = "Links";

/// Builder for display titles derived from category keys.
///
/// # Examples
///
/// ```
/// use redirgen::CategoryTitle;
///
/// assert_eq!(CategoryTitle::builder("third_party").build(), "Third Party");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CategoryTitle<'input> {
    key: &'input str
}

impl<'input> CategoryTitle<'input> {
    /// Creates a new title builder for the provided category key.
    pub fn builder(key: &'input str) -> Self {
        Self {
            key
        }
    }

    /// Builds the title: the key is split on underscores, every non-empty
    /// segment is capitalized and the segments are joined with single spaces.
    pub fn build(self) -> String {
        let mut title = String::with_capacity(self.key.len());

        for segment in self.key.trim().split('_').filter(|segment| !segment.is_empty()) {
            if !title.is_empty() {
                title.push(' ');
            }
            let mut characters = segment.chars();
            if let Some(first) = characters.next() {
                title.extend(first.to_uppercase());
                title.extend(characters.flat_map(char::to_lowercase));
            }
        }

        title
    }
}
