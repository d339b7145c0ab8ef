// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Rendering of the HTML landing page listing every short link.
//!
//! The page is a single self-contained document: styling and the clipboard
//! script are inlined and nothing is loaded from elsewhere. All values taken
//! from the configuration pass through [`escape_html`] exactly once.

use std::{borrow::Cow, fmt::Write as _};

use crate::{model::NormalizedConfig, site::Site};

const STYLESHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            margin: 0;
            padding: 2rem;
            min-height: 100vh;
        }
        .container {
            max-width: 1000px;
            margin: 0 auto;
            background: rgba(255, 255, 255, 0.1);
            border-radius: 12px;
            padding: 2rem;
            backdrop-filter: blur(10px);
        }
        h1 {
            text-align: center;
            margin-bottom: 0.5rem;
            font-size: 2.5rem;
        }
        .subtitle {
            text-align: center;
            margin-bottom: 2rem;
            opacity: 0.9;
            font-size: 1.1rem;
        }
        .section {
            margin: 2rem 0;
        }
        .section h2 {
            font-size: 1.5rem;
            margin-bottom: 1rem;
            border-bottom: 2px solid rgba(255, 255, 255, 0.3);
            padding-bottom: 0.5rem;
        }
        .links-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
            gap: 12px;
            margin-bottom: 1rem;
        }
        .link-card {
            display: flex;
            align-items: center;
            justify-content: space-between;
            background: rgba(255, 255, 255, 0.15);
            padding: 12px 16px;
            border-radius: 8px;
            border: 1px solid rgba(255, 255, 255, 0.2);
            transition: all 0.3s ease;
        }
        .link-card:hover {
            background: rgba(255, 255, 255, 0.25);
            border-color: rgba(255, 255, 255, 0.4);
            transform: translateY(-2px);
        }
        .link-info {
            flex: 1;
            min-width: 0;
        }
        .link-url {
            display: block;
            color: white;
            text-decoration: none;
            font-weight: 600;
            font-size: 0.95rem;
            margin-bottom: 0.25rem;
            overflow: hidden;
            text-overflow: ellipsis;
            white-space: nowrap;
        }
        .link-url:hover {
            text-decoration: underline;
        }
        .link-desc {
            font-size: 0.8rem;
            opacity: 0.8;
            overflow: hidden;
            text-overflow: ellipsis;
            white-space: nowrap;
        }
        .copy-btn {
            background: rgba(255, 255, 255, 0.2);
            border: 1px solid rgba(255, 255, 255, 0.3);
            color: white;
            padding: 6px 12px;
            border-radius: 6px;
            cursor: pointer;
            font-size: 0.85rem;
            transition: all 0.3s ease;
            white-space: nowrap;
            margin-left: 12px;
        }
        .copy-btn:hover {
            background: rgba(255, 255, 255, 0.3);
            border-color: rgba(255, 255, 255, 0.5);
        }
        .copy-btn.copied {
            background: rgba(76, 175, 80, 0.3);
            border-color: rgba(76, 175, 80, 0.5);
        }
        .stats {
            text-align: center;
            margin-top: 2rem;
            padding: 1rem;
            background: rgba(255, 255, 255, 0.1);
            border-radius: 8px;
        }
        .root-redirect {
            background: rgba(255, 255, 255, 0.2);
            border: 2px solid rgba(255, 255, 255, 0.3);
        }
        @media (max-width: 640px) {
            .links-grid {
                grid-template-columns: 1fr;
            }
            h1 {
                font-size: 2rem;
            }
            .container {
                padding: 1.5rem;
            }
            body {
                padding: 1rem;
            }
        }
"#;

const SCRIPT: &str = r#"        function copyToClipboard(text, button) {
            if (navigator.clipboard && navigator.clipboard.writeText) {
                navigator.clipboard.writeText(text).then(() => {
                    showCopiedFeedback(button);
                }).catch(() => {
                    fallbackCopy(text, button);
                });
            } else {
                fallbackCopy(text, button);
            }
        }

        function fallbackCopy(text, button) {
            const textArea = document.createElement('textarea');
            textArea.value = text;
            textArea.style.position = 'fixed';
            textArea.style.left = '-9999px';
            textArea.style.opacity = '0';
            document.body.appendChild(textArea);
            textArea.select();
            try {
                document.execCommand('copy');
                showCopiedFeedback(button);
            } catch (err) {
                console.error('Failed to copy:', err);
            }
            document.body.removeChild(textArea);
        }

        function showCopiedFeedback(button) {
            const originalText = button.textContent;
            button.textContent = 'Copied!';
            button.classList.add('copied');
            setTimeout(() => {
                button.textContent = originalText;
                button.classList.remove('copied');
            }, 2000);
        }
"#;

/// A single card on the landing page.
struct LinkCard<'a> {
    path:        &'a str,
    description: Cow<'a, str>,
    root:        bool
}

/// Renders the landing page for `config`.
///
/// # Examples
///
/// ```
/// use redirgen::{Site, parse_config, render_html};
///
/// let config = parse_config("redirects:\n  - path: test\n    url: https://test.com\n")?;
/// let page = render_html(&config, &Site::default());
/// assert!(page.contains("href=\"https://jsua.co/test\""));
/// assert!(page.contains(">https://test.com</div>"));
/// # Ok::<(), redirgen::Error>(())
/// ```
pub fn render_html(config: &NormalizedConfig, site: &Site) -> String {
    let mut buffer = String::with_capacity(8192 + config.redirect_count() * 640);
    let domain = escape_html(&site.domain);

    buffer.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    buffer.push_str("    <meta charset=\"UTF-8\">\n");
    buffer.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n"
    );
    let _ = writeln!(buffer, "    <title>{domain} Short URLs</title>");
    buffer.push_str("    <style>\n");
    buffer.push_str(STYLESHEET);
    buffer.push_str("    </style>\n</head>\n<body>\n");

    buffer.push_str("    <div class=\"container\">\n");
    let _ = writeln!(buffer, "        <h1>{domain} Short URLs</h1>");
    buffer.push_str("        <p class=\"subtitle\">Click to visit or copy any short URL</p>\n");

    if let Some(root) = config.root.as_ref() {
        write_section_start(&mut buffer, "Root Domain");
        let card = LinkCard {
            path:        "",
            description: Cow::Owned(format!("Redirects to {}", root.destination)),
            root:        true
        };
        write_card(&mut buffer, site, &card);
        write_section_end(&mut buffer);
    }

    for category in &config.categories {
        write_section_start(&mut buffer, &category.title);
        for rule in &category.rules {
            let card = LinkCard {
                path:        &rule.path,
                description: Cow::Borrowed(rule.description.as_str()),
                root:        false
            };
            write_card(&mut buffer, site, &card);
        }
        write_section_end(&mut buffer);
    }

    write_statistics(&mut buffer, config);

    buffer.push_str("    </div>\n");
    buffer.push_str("    <script>\n");
    buffer.push_str(SCRIPT);
    buffer.push_str("    </script>\n</body>\n</html>\n");

    buffer
}

fn write_section_start(buffer: &mut String, title: &str) {
    buffer.push_str("        <div class=\"section\">\n");
    let _ = writeln!(buffer, "            <h2>{}</h2>", escape_html(title));
    buffer.push_str("            <div class=\"links-grid\">\n");
}

fn write_section_end(buffer: &mut String) {
    buffer.push_str("            </div>\n");
    buffer.push_str("        </div>\n");
}

fn write_card(buffer: &mut String, site: &Site, card: &LinkCard<'_>) {
    let short_url = site.short_url(card.path);
    let url = escape_html(&short_url);
    let label = escape_html(&format!("{}/{}", site.domain, card.path)).into_owned();
    let description = escape_html(&card.description);

    if card.root {
        buffer.push_str("                <div class=\"link-card root-redirect\">\n");
    } else {
        buffer.push_str("                <div class=\"link-card\">\n");
    }
    buffer.push_str("                    <div class=\"link-info\">\n");
    let _ = writeln!(
        buffer,
        "                        <a href=\"{url}\" class=\"link-url\" target=\"_blank\" rel=\"noopener\">{label}</a>"
    );
    let _ = writeln!(
        buffer,
        "                        <div class=\"link-desc\" title=\"{description}\">{description}</div>"
    );
    buffer.push_str("                    </div>\n");
    let _ = writeln!(
        buffer,
        "                    <button class=\"copy-btn\" type=\"button\" data-url=\"{url}\" onclick=\"copyToClipboard(this.dataset.url, this)\">Copy</button>"
    );
    buffer.push_str("                </div>\n");
}

fn write_statistics(buffer: &mut String, config: &NormalizedConfig) {
    buffer.push_str("        <div class=\"stats\">\n");
    let _ = writeln!(
        buffer,
        "            <p><strong>Total Short URLs:</strong> {}</p>",
        config.link_count()
    );
    if config.has_root() {
        buffer.push_str("            <p><strong>Root redirect:</strong> Yes</p>\n");
    }
    for category in &config.categories {
        let _ = writeln!(
            buffer,
            "            <p><strong>{}:</strong> {} links</p>",
            escape_html(&category.title),
            category.rules.len()
        );
    }
    buffer.push_str("        </div>\n");
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes.
///
/// Every character is inspected once, so an existing entity such as `&amp;`
/// is escaped to `&amp;amp;` rather than being left alone or escaped twice
/// within the same call.
///
/// # Examples
///
/// ```
/// use redirgen::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len() + 16);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}
