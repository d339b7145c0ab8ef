// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Settings describing the site that serves the short links.

/// Domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "jsua.co";
/// Route under which the landing page is served.
pub const DEFAULT_LANDING_ROUTE: &str = "links";

/// Where the landing page lives on the published site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    /// Route without a leading slash, e.g. `links`.
    pub route: String,
    /// Published file name of the HTML artifact, e.g. `links.html`.
    pub file:  String
}

/// Site-wide values shared by both renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Bare domain serving the redirects, e.g. `jsua.co`.
    pub domain:        String,
    /// Name of the configuration source, mentioned in the rule file header.
    pub config_source: String,
    /// Landing page served next to the redirects, if one is generated.
    pub landing_page:  Option<LandingPage>
}

impl Site {
    /// Absolute short URL for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redirgen::Site;
    ///
    /// let site = Site::default();
    /// assert_eq!(site.short_url("gh"), "https://jsua.co/gh");
    /// assert_eq!(site.short_url(""), "https://jsua.co/");
    /// ```
    pub fn short_url(&self, path: &str) -> String {
        format!("https://{}/{path}", self.domain)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            domain:        DEFAULT_DOMAIN.to_owned(),
            config_source: "redirects.yaml".to_owned(),
            landing_page:  Some(LandingPage {
                route: DEFAULT_LANDING_ROUTE.to_owned(),
                file:  format!("{DEFAULT_LANDING_ROUTE}.html")
            })
        }
    }
}
