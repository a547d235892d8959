use super::search::SearchHit;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Write as _};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 512;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction request failed: {0}")]
    Transport(String),
    #[error("extraction service returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("extraction response had no text content")]
    EmptyResponse,
    #[error("extraction payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Turns search snippets into a JSON signal payload. The payload may be
/// partial; the enrichment engine backfills missing fields.
pub trait SignalExtractor: Debug {
    fn extract(
        &self,
        company_name: &str,
        industry: &str,
        results: &[SearchHit],
    ) -> Result<serde_json::Value, ExtractionError>;
}

/// Extractor calling the Anthropic Messages API over sync HTTP.
pub struct AnthropicExtractor {
    agent: ureq::Agent,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicExtractor {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        Self {
            agent,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl Debug for AnthropicExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicExtractor")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl SignalExtractor for AnthropicExtractor {
    fn extract(
        &self,
        company_name: &str,
        industry: &str,
        results: &[SearchHit],
    ) -> Result<serde_json::Value, ExtractionError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![RequestMessage {
                role: "user",
                content: build_prompt(company_name, industry, results),
            }],
        };

        let response = self
            .agent
            .post(self.api_url.as_str())
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send_json(&body)
            .map_err(|err| ExtractionError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(ExtractionError::Status { status, message });
        }

        let reply: MessagesResponse = response
            .into_body()
            .read_json()
            .map_err(|err| ExtractionError::Transport(err.to_string()))?;

        let text = reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(ExtractionError::EmptyResponse)?;

        parse_payload(&text)
    }
}

pub(crate) fn build_prompt(company_name: &str, industry: &str, results: &[SearchHit]) -> String {
    let industry = if industry.trim().is_empty() {
        "Unknown"
    } else {
        industry
    };

    let mut snippets = String::new();
    for (index, hit) in results.iter().enumerate() {
        if index > 0 {
            snippets.push('\n');
        }
        let _ = writeln!(snippets, "[{}] {}\n{}\n{}", index + 1, hit.title, hit.url, hit.snippet);
    }

    format!(
        "Read the web search results below about one company and report organizational and HR signals.\n\
\n\
Company: {company_name}\n\
Industry: {industry}\n\
\n\
Search results:\n\
{snippets}\n\
Report only what the results clearly support. Respond with a single JSON object holding these keys:\n\
- \"num_locations\": integer or null, the number of offices, sites, or branches\n\
- \"employee_sentiment\": \"positive\", \"negative\", \"neutral\", or \"unknown\"\n\
- \"hr_initiatives\": true if the company runs HR transformation, people programs, employer branding, or talent initiatives\n\
- \"competitor_tools\": list of employee engagement, survey, or feedback products in use (for example Qualtrics, Peakon, Culture Amp); empty list if none\n\
- \"decentralized\": true if the organization operates across many regions or independent units\n\
- \"summary\": one or two sentences on the most relevant findings\n\
\n\
Return the JSON object only."
    )
}

/// Parses the model's reply, tolerating a surrounding Markdown code fence.
pub(crate) fn parse_payload(text: &str) -> Result<serde_json::Value, ExtractionError> {
    let mut body = text.trim();

    if body.starts_with("```") {
        body = match body.split_once('\n') {
            Some((_, rest)) => rest,
            None => &body[3..],
        };
        body = body.trim_end();
        if let Some(stripped) = body.strip_suffix("```") {
            body = stripped.trim();
        }
    }

    Ok(serde_json::from_str(body)?)
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}
