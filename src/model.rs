// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Normalized redirect model shared by both renderers.
//!
//! Values in this module are produced exclusively by the normalizer, which
//! applies every default. Renderers borrow a [`NormalizedConfig`] read-only,
//! so the rule file and the landing page always describe the same snapshot.

use serde::Serialize;

use crate::category::RULES_HEADING_SUFFIX;

/// HTTP status used whenever a rule or the root redirect omits `status`.
pub const DEFAULT_STATUS: u16 = 301;

/// Status used for every trailing-slash companion rule.
pub const TRAILING_SLASH_STATUS: u16 = 301;

/// A single short link.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    /// Source path without a leading slash.
    pub path:        String,
    /// Destination URL, emitted verbatim.
    pub destination: String,
    /// HTTP status code of the redirect.
    pub status:      u16,
    /// Key of the category the rule belongs to.
    pub category:    String,
    /// Human readable description; falls back to the destination.
    pub description: String
}

/// Redirect applied to the bare domain.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RootRedirect {
    /// Destination URL, emitted verbatim.
    pub destination: String,
    /// HTTP status code of the redirect.
    pub status:      u16
}

/// A non-empty group of rules sharing a category key.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Opaque category identifier from the configuration.
    pub key:   String,
    /// Display title derived from the key.
    pub title: String,
    /// Rules in configuration order.
    pub rules: Vec<RedirectRule>
}

impl Category {
    /// Heading used for the category's section in the rule file.
    pub fn rules_heading(&self) -> String {
        format!("{} {RULES_HEADING_SUFFIX}", self.title)
    }
}

/// Fully normalized configuration consumed by both renderers.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct NormalizedConfig {
    /// Optional root domain redirect.
    pub root:       Option<RootRedirect>,
    /// Categories in output order. None of them is empty.
    pub categories: Vec<Category>
}

impl NormalizedConfig {
    /// Returns `true` when a root domain redirect is configured.
    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    /// Number of redirect rules across all categories, root excluded.
    pub fn redirect_count(&self) -> usize {
        self.categories.iter().map(|category| category.rules.len()).sum()
    }

    /// Number of links shown on the landing page, root included.
    pub fn link_count(&self) -> usize {
        self.redirect_count() + usize::from(self.has_root())
    }

    /// Iterates over every rule in category order.
    pub fn rules(&self) -> impl Iterator<Item = &RedirectRule> {
        self.categories.iter().flat_map(|category| category.rules.iter())
    }
}
