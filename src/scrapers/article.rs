//! Article body extraction with CSS selectors.
//!
//! Selectors are tried in order and the first one that matches anything
//! wins. Text inside `script`, `style` and `noscript` is dropped and runs of
//! whitespace collapse to a single space.

use crate::error::{ConfigError, SanitizeError};
use crate::scrapers::Sanitizer;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument};

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

#[derive(Debug)]
pub struct HtmlSanitizer {
    selectors: Vec<Selector>,
}

impl HtmlSanitizer {
    /// Compile the article selectors. At least one is required.
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ConfigError> {
        if selectors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "article_selectors",
                reason: "at least one selector is required".to_string(),
            });
        }
        let selectors = selectors
            .iter()
            .map(|s| {
                Selector::parse(s.as_ref()).map_err(|e| ConfigError::Invalid {
                    field: "article_selectors",
                    reason: format!("{:?}: {e}", s.as_ref()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }
}

fn is_skipped(element: &ElementRef<'_>) -> bool {
    SKIPPED_TAGS.contains(&element.value().name())
}

/// Visible text of `root`, with skipped subtrees left out.
fn visible_text(root: ElementRef<'_>, out: &mut Vec<String>) {
    for child in root.children() {
        match child.value() {
            Node::Text(text) => out.push(text.to_string()),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    if !is_skipped(&element) {
                        visible_text(element, out);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Sanitizer for HtmlSanitizer {
    #[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
    fn extract_plaintext(&self, html: &str) -> Result<String, SanitizeError> {
        let document = Html::parse_document(html);

        for selector in &self.selectors {
            let mut pieces = Vec::new();
            let mut matched = false;
            for element in document.select(selector) {
                matched = true;
                visible_text(element, &mut pieces);
            }
            if !matched {
                continue;
            }

            let text = pieces
                .iter()
                .flat_map(|piece| piece.split_whitespace())
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                debug!("Article element is empty");
                return Err(SanitizeError::ContentNotFound);
            }
            debug!(chars = text.chars().count(), "Extracted article text");
            return Ok(text);
        }

        Err(SanitizeError::ContentNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> HtmlSanitizer {
        HtmlSanitizer::new(&["article.article", "article"]).unwrap()
    }

    #[test]
    fn test_extracts_article_text() {
        let html = r#"
            <html><body>
              <nav>Menu items</nav>
              <article>
                <h1>Скандал   века</h1>
                <p>Первый абзац.</p>
                <script>var tracking = 1;</script>
                <style>p { color: red; }</style>
                <p>Второй <b>абзац</b>.</p>
              </article>
              <footer>Copyright</footer>
            </body></html>
        "#;
        let text = sanitizer().extract_plaintext(html).unwrap();
        assert_eq!(text, "Скандал века Первый абзац. Второй абзац .");
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let html = r#"
            <article class="teaser">Teaser text</article>
            <article class="article">Main text</article>
        "#;
        let text = sanitizer().extract_plaintext(html).unwrap();
        assert_eq!(text, "Main text");
    }

    #[test]
    fn test_missing_article_is_content_not_found() {
        let html = "<html><body><div class=\"brief\">News in brief</div></body></html>";
        let err = sanitizer().extract_plaintext(html).unwrap_err();
        assert!(matches!(err, SanitizeError::ContentNotFound));
    }

    #[test]
    fn test_empty_article_is_content_not_found() {
        let html = "<article><script>only()</script>   </article>";
        assert!(sanitizer().extract_plaintext(html).is_err());
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let err = HtmlSanitizer::new(&["article[["]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "article_selectors",
                ..
            }
        ));
        let none: [&str; 0] = [];
        assert!(HtmlSanitizer::new(&none).is_err());
    }
}
