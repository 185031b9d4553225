use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

use crate::query::QuerySpec;
use crate::{info_time, Error, Result};

/// Longest reason kept when describing a payload that isn't a search page.
const REASON_LEN: usize = 200;

/// Anything that can answer a search query with a raw response body.
///
/// The body is returned unparsed so that the collector can log it verbatim when it
/// doesn't turn out to be a [`SearchPage`].
#[async_trait]
pub trait SearchEndpoint: Send + Sync {
    async fn search(&self, query: &QuerySpec) -> Result<String>;
}

/// One page of the search grid.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    /// Raw records, in the order the endpoint sorted them.
    pub results: Vec<Value>,
    /// Number of records matching the filter, regardless of page size.
    #[serde(rename = "countRaw")]
    pub count_raw: u64,
}

impl SearchPage {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Protocol {
            reason: describe_payload(body).unwrap_or_else(|| e.to_string()),
        })
    }
}

/// Pulls the visible text out of an HTML body, which is what the endpoint serves
/// instead of JSON when it refuses a request.
fn describe_payload(body: &str) -> Option<String> {
    if !body.trim_start().starts_with('<') {
        return None;
    }
    let doc = Html::parse_document(body);
    let text = doc
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(format!("HTML page: {}", text.chars().take(REASON_LEN).collect::<String>()))
}

/// The Blue Nile diamond search grid, queried over one cookie-carrying session.
pub struct BlueNile {
    client: Client,
    search_url: String,
}

impl BlueNile {
    /// Opens a session: the landing page sets the cookies the search API expects,
    /// the client's cookie store replays them on every search.
    pub async fn connect(landing_url: &str, search_url: &str) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;

        info_time!("Opening session at {}", landing_url);
        client.get(landing_url).send().await?;

        Ok(Self {
            client,
            search_url: search_url.to_string(),
        })
    }
}

#[async_trait]
impl SearchEndpoint for BlueNile {
    async fn search(&self, query: &QuerySpec) -> Result<String> {
        let res = self
            .client
            .get(&self.search_url)
            .query(&query.params())
            .send()
            .await?;
        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_and_count() {
        let page = SearchPage::parse(
            r#"{"results": [{"id": "a"}, {"id": "b"}], "countRaw": 1500, "extra": true}"#,
        )
        .unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.count_raw, 1500);
    }

    #[test]
    fn html_error_page_is_a_protocol_error() {
        let err = SearchPage::parse("<html><body><h1>Access   denied</h1></body></html>").unwrap_err();

        match err {
            Error::Protocol { reason } => assert_eq!(reason, "HTML page: Access denied"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_without_count_is_a_protocol_error() {
        assert!(matches!(
            SearchPage::parse(r#"{"results": []}"#),
            Err(Error::Protocol { .. })
        ));
        assert!(matches!(SearchPage::parse(""), Err(Error::Protocol { .. })));
    }
}
