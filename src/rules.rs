// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Rendering of the `_redirects` rule file.
//!
//! The output is consumed by the hosting platform's edge router, so every
//! line is emitted explicitly and the block order is fixed: header, landing
//! page rule, root redirect, trailing-slash rules, categorized rules, footer.
//! Each block ends with a blank line.

use std::fmt::Write as _;

use crate::{
    model::{NormalizedConfig, TRAILING_SLASH_STATUS},
    site::Site
};

/// Status used for the rule serving the landing page.
const LANDING_PAGE_STATUS: u16 = 200;

/// Editor hint closing the file. Split so this source file is not itself
/// picked up as a modeline.
const MODELINE: &str = concat!("# vi", "m: set filetype=apache", ":");

/// Renders the complete rule file for `config`.
///
/// # Examples
///
/// ```
/// use redirgen::{Site, parse_config, render_rules};
///
/// let config = parse_config("redirects:\n  - path: test\n    url: https://test.com\n")?;
/// let rules = render_rules(&config, &Site::default());
/// assert!(rules.contains("/test/ /test 301\n"));
/// assert!(rules.contains("/test https://test.com 301\n"));
/// # Ok::<(), redirgen::Error>(())
/// ```
pub fn render_rules(config: &NormalizedConfig, site: &Site) -> String {
    let mut buffer = String::with_capacity(512 + config.redirect_count() * 96);

    write_header(&mut buffer, site);

    if let Some(landing) = site.landing_page.as_ref() {
        buffer.push_str("# Short link directory\n");
        let _ = writeln!(buffer, "/{} /{} {LANDING_PAGE_STATUS}", landing.route, landing.file);
        buffer.push('\n');
    }

    if let Some(root) = config.root.as_ref() {
        buffer.push_str("# Root domain redirect\n");
        let _ = writeln!(buffer, "/ {} {}", root.destination, root.status);
        buffer.push('\n');
    }

    if config.redirect_count() > 0 {
        buffer.push_str("# Trailing slash redirects (handle URLs with trailing slashes)\n");
        for rule in config.rules() {
            let _ = writeln!(buffer, "/{path}/ /{path} {TRAILING_SLASH_STATUS}", path = rule.path);
        }
        buffer.push('\n');
    }

    for category in &config.categories {
        let _ = writeln!(buffer, "# {}", category.rules_heading());
        for rule in &category.rules {
            let _ = writeln!(buffer, "/{} {} {}", rule.path, rule.destination, rule.status);
        }
        buffer.push('\n');
    }

    buffer.push('\n');
    buffer.push_str(MODELINE);
    buffer.push_str("\n\n");

    buffer
}

fn write_header(buffer: &mut String, site: &Site) {
    let _ = writeln!(buffer, "# {} URL Redirects", site.domain);
    buffer.push_str("# WARNING: This file is auto-generated. DO NOT EDIT DIRECTLY!\n");
    let _ = writeln!(
        buffer,
        "# To modify redirects, edit {} and run: {}",
        site.config_source,
        env!("CARGO_PKG_NAME")
    );
    buffer.push_str("#\n");
    buffer.push_str("# Format: /path https://destination-url status-code\n");
    buffer.push('\n');
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{MODELINE, render_rules};
    use crate::{normalizer::parse_config, site::Site};

    fn render(yaml: &str) -> String {
        let config = parse_config(yaml).expect("expected configuration to normalize");
        render_rules(&config, &Site::default())
    }

    fn without_landing_page() -> Site {
        Site {
            landing_page: None,
            ..Site::default()
        }
    }

    #[test]
    fn renders_single_redirect_exactly() {
        let output = render("redirects:\n  - path: test\n    url: https://test.com\n");

        let expected = format!(
            "\
# jsua.co URL Redirects
# WARNING: This file is auto-generated. DO NOT EDIT DIRECTLY!
# To modify redirects, edit redirects.yaml and run: redirgen
#
# Format: /path https://destination-url status-code

# Short link directory
/links /links.html 200

# Trailing slash redirects (handle URLs with trailing slashes)
/test/ /test 301

# Personal Links
/test https://test.com 301


{MODELINE}

"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_config_renders_header_landing_rule_and_footer_only() {
        let output = render("{}");

        assert!(output.starts_with("# jsua.co URL Redirects\n"));
        assert!(output.contains("/links /links.html 200\n"));
        assert!(!output.contains("Trailing slash"));
        assert!(!output.contains("Root domain redirect"));
        assert!(output.ends_with(&format!("\n{MODELINE}\n\n")));
    }

    #[test]
    fn landing_rule_is_omitted_without_html_page() {
        let config = parse_config("{}").expect("expected configuration to normalize");
        let output = render_rules(&config, &without_landing_page());

        assert!(!output.contains("Short link directory"));
        assert!(!output.contains(" 200\n"));
    }

    #[test]
    fn root_redirect_defaults_to_301() {
        let output = render("root:\n  url: https://example.com/\n");
        assert!(output.contains("# Root domain redirect\n/ https://example.com/ 301\n"));
    }

    #[test]
    fn root_block_precedes_trailing_slash_block() {
        let output = render(
            "root:\n  url: https://example.com/\n  status: 302\nredirects:\n  - path: a\n    url: https://a.example\n"
        );

        let root = output.find("/ https://example.com/ 302").expect("missing root line");
        let trailing = output.find("/a/ /a 301").expect("missing trailing slash line");
        assert!(root < trailing);
    }

    #[test]
    fn trailing_slash_rules_ignore_rule_status() {
        let output = render(
            "redirects:\n  - path: temp\n    url: https://temp.example\n    status: 302\n"
        );

        assert!(output.contains("/temp/ /temp 301\n"));
        assert!(output.contains("/temp https://temp.example 302\n"));
    }

    #[test]
    fn trailing_slash_rules_follow_category_order() {
        let output = render(
            r#"
redirects:
  - path: dev1
    url: https://dev1.com
    category: developer
  - path: personal1
    url: https://personal1.com
"#
        );

        let personal = output.find("/personal1/ /personal1 301").expect("missing personal1");
        let developer = output.find("/dev1/ /dev1 301").expect("missing dev1");
        assert!(personal < developer);
    }

    #[test]
    fn category_headers_follow_allowlist_order() {
        let output = render(
            r#"
redirects:
  - path: third1
    url: https://third1.com
    category: third_party
  - path: ministry1
    url: https://ministry1.com
    category: ministry
  - path: dev1
    url: https://dev1.com
    category: developer
  - path: personal1
    url: https://personal1.com
    category: personal
"#
        );

        let positions: Vec<usize> = [
            "# Personal Links\n/personal1 https://personal1.com 301\n",
            "# Developer Links\n/dev1 https://dev1.com 301\n",
            "# Ministry Links\n/ministry1 https://ministry1.com 301\n",
            "# Third Party Links\n/third1 https://third1.com 301\n"
        ]
        .iter()
        .map(|block| output.find(block).expect("missing category block"))
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn empty_categories_produce_no_header() {
        let output = render(
            "redirects:\n  - path: dev1\n    url: https://dev1.com\n    category: developer\n"
        );

        assert!(output.contains("# Developer Links"));
        assert!(!output.contains("# Personal Links"));
        assert!(!output.contains("# Ministry Links"));
        assert!(!output.contains("# Third Party Links"));
    }

    #[test]
    fn uses_configured_domain_and_source_in_header() {
        let config = parse_config("{}").expect("expected configuration to normalize");
        let site = Site {
            domain: "go.example".to_owned(),
            config_source: "links.yml".to_owned(),
            ..Site::default()
        };

        let output = render_rules(&config, &site);
        assert!(output.starts_with("# go.example URL Redirects\n"));
        assert!(output.contains("edit links.yml and run: redirgen\n"));
    }

    #[test]
    fn modeline_is_complete_in_output() {
        assert_eq!(MODELINE.len(), 27);
        assert!(MODELINE.starts_with("# vi"));
        assert!(MODELINE.ends_with("filetype=apache:"));
    }

    proptest! {
        #[test]
        fn one_trailing_slash_line_per_rule(
            paths in prop::collection::vec("[a-z0-9]{1,12}", 0..16),
            status in prop::sample::select(vec![301_u16, 302, 307, 308])
        ) {
            let mut yaml = String::from("redirects:\n  personal:\n");
            if paths.is_empty() {
                yaml = String::from("redirects: {}\n");
            }
            for (index, path) in paths.iter().enumerate() {
                yaml.push_str(&format!(
                    "    - path: p{index}{path}\n      url: https://{path}.example\n      status: {status}\n"
                ));
            }

            let config = parse_config(&yaml).expect("expected configuration to normalize");
            let output = render_rules(&config, &Site::default());

            let trailing = output
                .lines()
                .filter(|line| line.starts_with('/') && line.contains("/ /"))
                .count();
            prop_assert_eq!(trailing, paths.len());
            for rule in config.rules() {
                let expected = format!("/{path}/ /{path} 301", path = rule.path);
                prop_assert_eq!(output.lines().filter(|line| *line == expected).count(), 1);
            }

            let categorized = output
                .lines()
                .filter(|line| line.starts_with('/') && line.contains(" https://"))
                .count();
            prop_assert_eq!(categorized, config.redirect_count());
        }
    }
}
