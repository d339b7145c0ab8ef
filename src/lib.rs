//! Utilities for generating short link artifacts for static hosting.
//!
//! The library loads a YAML document describing redirects, normalizes it into
//! a [`NormalizedConfig`] and renders two artifacts from that single model:
//! the `_redirects` rule file read by the hosting platform's edge router and
//! an HTML landing page listing every short link by category.

mod category;
mod error;
mod generate;
mod html;
pub mod logging;
mod model;
mod normalizer;
mod rules;
mod site;

pub use category::{CategoryTitle, DEFAULT_CATEGORY, KNOWN_CATEGORIES};
pub use error::{Error, io_error, not_found, write_error};
pub use generate::{
    DEFAULT_CONFIG_PATH, DEFAULT_HTML_FILE, DEFAULT_RULES_FILE, GenerateOptions,
    GenerationSummary, generate
};
pub use html::{escape_html, render_html};
pub use model::{
    Category, DEFAULT_STATUS, NormalizedConfig, RedirectRule, RootRedirect, TRAILING_SLASH_STATUS
};
pub use normalizer::{load_config, normalize, parse_config};
pub use rules::render_rules;
pub use site::{DEFAULT_DOMAIN, DEFAULT_LANDING_ROUTE, LandingPage, Site};
