// src/services/html.rs

//! HTML scraping strategy for the reports page.
//!
//! The page renders the latest reports as `<article>` items inside a
//! `div.sismos-list` container. Each item carries the local date/time and
//! the epicenter reference as its first two paragraphs, with magnitude and
//! depth in labeled sub-elements.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::RawRecord;
use crate::services::{FetchOutcome, SourceReader};
use crate::utils::http::fetch_text;

const CONTAINER_SELECTOR: &str = "div.sismos-list";
const ITEM_SELECTOR: &str = "article";
const PARAGRAPH_SELECTOR: &str = "p";
const MAGNITUDE_SELECTOR: &str = "div.sismo-mag p";
const DEPTH_SELECTOR: &str = "div.sismo-prof p";

/// Source reader that scrapes the public reports page.
pub struct HtmlSource {
    client: Client,
    url: String,
    limit: usize,
    selectors: Selectors,
}

struct Selectors {
    container: Selector,
    item: Selector,
    paragraph: Selector,
    magnitude: Selector,
    depth: Selector,
}

impl HtmlSource {
    /// Create a new HTML source for the given page URL.
    pub fn new(client: Client, url: String, limit: usize) -> Result<Self> {
        Ok(Self {
            client,
            url,
            limit,
            selectors: Selectors {
                container: parse_selector(CONTAINER_SELECTOR)?,
                item: parse_selector(ITEM_SELECTOR)?,
                paragraph: parse_selector(PARAGRAPH_SELECTOR)?,
                magnitude: parse_selector(MAGNITUDE_SELECTOR)?,
                depth: parse_selector(DEPTH_SELECTOR)?,
            },
        })
    }

    /// Extract up to `limit` records from a parsed document.
    fn extract(&self, document: &Html) -> Result<FetchOutcome> {
        let container = document
            .select(&self.selectors.container)
            .next()
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Reports container not found (selector: {CONTAINER_SELECTOR})"
                ))
            })?;

        let items: Vec<ElementRef> = container
            .select(&self.selectors.item)
            .take(self.limit)
            .collect();
        if items.is_empty() {
            return Err(AppError::not_found(format!(
                "No report items ({ITEM_SELECTOR}) found in the list"
            )));
        }

        let mut outcome = FetchOutcome::default();
        for item in items {
            match self.extract_item(&item) {
                Some(record) => outcome.records.push(record),
                None => {
                    outcome.skipped += 1;
                    log::warn!("Skipping report item with unexpected structure");
                }
            }
        }
        Ok(outcome)
    }

    /// Extract a single item, or `None` if its structure does not match.
    fn extract_item(&self, item: &ElementRef) -> Option<RawRecord> {
        let mut paragraphs = item.select(&self.selectors.paragraph);
        let local_datetime = element_text(&paragraphs.next()?);
        let reference_location = element_text(&paragraphs.next()?);

        let magnitude = element_text(&item.select(&self.selectors.magnitude).next()?);
        let depth = element_text(&item.select(&self.selectors.depth).next()?);

        if local_datetime.is_empty() || reference_location.is_empty() {
            return None;
        }

        Some(RawRecord {
            local_datetime,
            reference_location,
            magnitude,
            depth,
            ..RawRecord::default()
        })
    }
}

#[async_trait]
impl SourceReader for HtmlSource {
    async fn fetch_batch(&self) -> Result<FetchOutcome> {
        let body = fetch_text(&self.client, &self.url).await?;
        let document = Html::parse_document(&body);
        self.extract(&document)
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HtmlSource {
        HtmlSource::new(Client::new(), "https://example.com/sismos".to_string(), 10).unwrap()
    }

    fn article(datetime: &str, reference: &str, mag: &str, depth: &str) -> String {
        format!(
            r#"<article>
                <p>{datetime}</p>
                <p>{reference}</p>
                <div class="sismo-mag"><span>Magnitud</span><p>{mag}</p></div>
                <div class="sismo-prof"><span>Profundidad</span><p>{depth}</p></div>
            </article>"#
        )
    }

    fn page(articles: &[String]) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div class="sismos-list">{}</div></body></html>"#,
            articles.join("\n")
        ))
    }

    #[test]
    fn test_extract_well_formed_items() {
        let doc = page(&[
            article("26/08/2026 21:50:12", "23 km al SO de Mala, Cañete - Lima", "4.2", "52 km"),
            article("26/08/2026 14:03:40", "10 km al O de Chilca, Cañete - Lima", "3.8", "33 km"),
        ]);

        let outcome = source().extract(&doc).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.records[0].local_datetime, "26/08/2026 21:50:12");
        assert_eq!(
            outcome.records[0].reference_location,
            "23 km al SO de Mala, Cañete - Lima"
        );
        assert_eq!(outcome.records[0].magnitude, "4.2");
        assert_eq!(outcome.records[1].depth, "33 km");
        assert!(outcome.records[0].code.is_none());
    }

    #[test]
    fn test_malformed_item_is_skipped_not_fatal() {
        let doc = page(&[
            article("26/08/2026 21:50:12", "Mala, Cañete - Lima", "4.2", "52 km"),
            "<article><p>26/08/2026 09:00:00</p></article>".to_string(),
            article("26/08/2026 14:03:40", "Chilca, Cañete - Lima", "3.8", "33 km"),
        ]);

        let outcome = source().extract(&doc).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_missing_container_is_not_found() {
        let doc = Html::parse_document("<html><body><div class='other'></div></body></html>");
        let err = source().extract(&doc).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_empty_container_is_not_found() {
        let doc = page(&[]);
        let err = source().extract(&doc).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_limit_is_enforced() {
        let articles: Vec<String> = (0..15)
            .map(|i| article(&format!("26/08/2026 0{}:00:00", i % 10), "Lima", "4.0", "40 km"))
            .collect();
        let doc = page(&articles);

        let outcome = source().extract(&doc).unwrap();
        assert_eq!(outcome.records.len(), 10);
    }
}
