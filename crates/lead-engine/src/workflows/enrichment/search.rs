use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::OnceLock;
use std::time::Duration;

/// One web search result as handed to the extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(String),
    #[error("search service returned status {0}")]
    Status(u16),
    #[error("unreadable search response: {0}")]
    Decode(String),
}

/// Web search used by Pass 2. Implementations report failures as errors;
/// the enrichment engine decides how to recover.
pub trait SearchProvider: Debug {
    fn search(&self, company_name: &str, industry: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Search backed by DuckDuckGo's HTML results page (sync HTTP via ureq).
pub struct DuckDuckGoSearch {
    agent: ureq::Agent,
    endpoint: String,
    query_template: String,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new(
        endpoint: impl Into<String>,
        query_template: impl Into<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        Self {
            agent,
            endpoint: endpoint.into(),
            query_template: query_template.into(),
            max_results,
        }
    }

    fn query_for(&self, company_name: &str, industry: &str) -> String {
        render_query(&self.query_template, company_name, industry)
    }
}

impl Debug for DuckDuckGoSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDuckGoSearch")
            .field("endpoint", &self.endpoint)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl SearchProvider for DuckDuckGoSearch {
    fn search(&self, company_name: &str, industry: &str) -> Result<Vec<SearchHit>, SearchError> {
        let query = self.query_for(company_name, industry);

        let response = self
            .agent
            .get(self.endpoint.as_str())
            .header("User-Agent", USER_AGENT)
            .query("q", &query)
            .call()
            .map_err(|err| SearchError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(SearchError::Status(status));
        }

        let page = response
            .into_body()
            .read_to_string()
            .map_err(|err| SearchError::Decode(err.to_string()))?;

        Ok(parse_results_page(&page, self.max_results))
    }
}

const USER_AGENT: &str = "Mozilla/5.0 (compatible; lead-engine/0.1)";

pub(crate) fn render_query(template: &str, company_name: &str, industry: &str) -> String {
    template
        .replace("{name}", company_name)
        .replace("{industry}", industry)
}

fn result_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)<a\s([^>]*\bclass="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
            .expect("valid regex")
    })
}

fn snippet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?s)<(a|div|td)\s[^>]*\bclass="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</(?:a|div|td)>"#,
        )
        .expect("valid regex")
    })
}

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\bhref="([^"]*)""#).expect("valid regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Turns a DuckDuckGo HTML results page into hits, in page order.
///
/// Each `result__a` link starts a result; its snippet is the first
/// `result__snippet` element before the next link. Sponsored results and
/// links without a title are skipped.
pub(crate) fn parse_results_page(page: &str, limit: usize) -> Vec<SearchHit> {
    let links: Vec<_> = result_link_pattern().captures_iter(page).collect();
    let mut hits = Vec::new();

    for (index, link) in links.iter().enumerate() {
        if hits.len() >= limit {
            break;
        }
        let (Some(whole), Some(attributes), Some(inner)) = (link.get(0), link.get(1), link.get(2))
        else {
            continue;
        };

        let Some(href) = href_pattern()
            .captures(attributes.as_str())
            .and_then(|captures| captures.get(1))
        else {
            continue;
        };
        let url = resolve_result_url(&html_escape::decode_html_entities(href.as_str()));
        if url.is_empty() || is_sponsored(&url) {
            continue;
        }

        let title = plain_text(inner.as_str());
        if title.is_empty() {
            continue;
        }

        let section_end = links
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(page.len(), |next| next.start());
        let snippet = snippet_pattern()
            .captures(&page[whole.end()..section_end])
            .and_then(|captures| captures.get(2))
            .map(|body| plain_text(body.as_str()))
            .unwrap_or_default();

        hits.push(SearchHit {
            title,
            url,
            snippet,
        });
    }

    hits
}

fn plain_text(fragment: &str) -> String {
    let stripped = tag_pattern().replace_all(fragment, "");
    html_escape::decode_html_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result links point at a redirect (`//duckduckgo.com/l/?uddg=<target>&rut=..`);
/// the real target is the percent-encoded `uddg` parameter.
fn resolve_result_url(href: &str) -> String {
    let href = href.trim();
    let Some((_, query)) = href.split_once("/l/?") else {
        return absolute(href);
    };

    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("uddg="))
        .map(percent_decode)
        .unwrap_or_else(|| absolute(href))
}

fn absolute(href: &str) -> String {
    match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_string(),
    }
}

fn is_sponsored(url: &str) -> bool {
    url.contains("duckduckgo.com/y.js")
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'%' if index + 2 < bytes.len() => {
                let pair = std::str::from_utf8(&bytes[index + 1..index + 3]).ok();
                match pair.and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                    Some(byte) => {
                        decoded.push(byte);
                        index += 3;
                    }
                    None => {
                        decoded.push(b'%');
                        index += 1;
                    }
                }
            }
            b'+' => {
                decoded.push(b' ');
                index += 1;
            }
            byte => {
                decoded.push(byte);
                index += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
