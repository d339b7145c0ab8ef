// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! One-shot generation of both artifacts from the redirect configuration.
//!
//! The configuration is loaded and normalized once, both documents are
//! rendered in memory from that single snapshot, and only then are the files
//! written. A configuration problem therefore never leaves a freshly written
//! rule file next to a stale landing page.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf}
};

use tracing::{debug, info, warn};

use crate::{
    error::{self, Error},
    html::render_html,
    model::{NormalizedConfig, RedirectRule},
    normalizer::load_config,
    rules::render_rules,
    site::{DEFAULT_DOMAIN, LandingPage, Site}
};

/// Configuration file read when no path is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "redirects.yaml";
/// File name of the generated rule file.
pub const DEFAULT_RULES_FILE: &str = "_redirects";
/// File name of the generated landing page.
pub const DEFAULT_HTML_FILE: &str = "links.html";

/// Inputs of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Redirect configuration to read.
    pub config_path: PathBuf,
    /// Directory receiving both artifacts.
    pub output_dir:  PathBuf,
    /// File name of the rule file inside `output_dir`.
    pub rules_file:  String,
    /// File name of the landing page inside `output_dir`.
    pub html_file:   String,
    /// Domain serving the short links.
    pub domain:      String,
    /// Whether the landing page (and the rule serving it) is generated.
    pub emit_html:   bool
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_dir:  PathBuf::from("."),
            rules_file:  DEFAULT_RULES_FILE.to_owned(),
            html_file:   DEFAULT_HTML_FILE.to_owned(),
            domain:      DEFAULT_DOMAIN.to_owned(),
            emit_html:   true
        }
    }
}

impl GenerateOptions {
    /// Location of the generated rule file.
    pub fn rules_path(&self) -> PathBuf {
        self.output_dir.join(&self.rules_file)
    }

    /// Location of the generated landing page.
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(&self.html_file)
    }

    /// Site settings shared by both renderers.
    pub fn site(&self) -> Site {
        let config_source = self
            .config_path
            .file_name()
            .map_or_else(
                || self.config_path.display().to_string(),
                |name| name.to_string_lossy().into_owned()
            );

        let landing_page = self.emit_html.then(|| LandingPage {
            route: Path::new(&self.html_file)
                .file_stem()
                .map_or_else(|| self.html_file.clone(), |stem| stem.to_string_lossy().into_owned()),
            file:  self.html_file.clone()
        });

        Site {
            domain: self.domain.clone(),
            config_source,
            landing_page
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of redirect rules, root excluded.
    pub total_redirects: usize,
    /// Whether a root domain redirect was configured.
    pub has_root:        bool,
    /// Location of the written rule file.
    pub rules_path:      PathBuf,
    /// Location of the written landing page, if one was generated.
    pub html_path:       Option<PathBuf>
}

/// Loads the configuration, renders both artifacts and writes them.
///
/// Existing artifacts are overwritten. Nothing is written unless the
/// configuration loads and normalizes successfully.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`](Error::ConfigNotFound) when the
/// configuration is missing, any error from
/// [`load_config`](crate::load_config), and
/// [`Error::Write`](Error::Write) when an artifact cannot be written.
///
/// # Example
///
/// ```no_run
/// use redirgen::{GenerateOptions, generate};
///
/// # fn main() -> Result<(), redirgen::Error> {
/// let summary = generate(&GenerateOptions::default())?;
/// println!("{} redirects", summary.total_redirects);
/// # Ok(())
/// # }
/// ```
pub fn generate(options: &GenerateOptions) -> Result<GenerationSummary, Error> {
    let config = load_config(&options.config_path)?;
    let site = options.site();

    for rule in landing_route_conflicts(&config, &site) {
        warn!(
            "Redirect '{}' in category '{}' competes with the landing page rule",
            rule.path, rule.category
        );
    }

    debug!(
        "Rendering {} redirects in {} categories",
        config.redirect_count(),
        config.categories.len()
    );
    let rules = render_rules(&config, &site);
    let html = options.emit_html.then(|| render_html(&config, &site));

    fs::create_dir_all(&options.output_dir)
        .map_err(|source| error::write_error(&options.output_dir, source))?;

    let rules_path = options.rules_path();
    write_artifact(&rules_path, &rules)?;
    info!("Wrote rule file to {}", rules_path.display());

    let html_path = match html {
        Some(page) => {
            let path = options.html_path();
            write_artifact(&path, &page)?;
            info!("Wrote landing page to {}", path.display());
            Some(path)
        }
        None => None
    };

    Ok(GenerationSummary {
        total_redirects: config.redirect_count(),
        has_root: config.has_root(),
        rules_path,
        html_path
    })
}

/// Rules whose path equals the landing page route.
fn landing_route_conflicts<'a>(
    config: &'a NormalizedConfig,
    site: &Site
) -> Vec<&'a RedirectRule> {
    let Some(landing) = site.landing_page.as_ref() else {
        return Vec::new();
    };
    config
        .rules()
        .filter(|rule| rule.path == landing.route)
        .collect()
}

fn write_artifact(path: &Path, contents: &str) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| error::write_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|source| error::write_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::write_error(path, source))
}
