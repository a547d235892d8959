use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub(crate) const FALLBACK_SUMMARY: &str = "No search results available.";

/// Employee sentiment as reported by the extraction service. Anything
/// outside the four known values is treated as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "unknown" => Ok(Sentiment::Unknown),
            other => Err(format!(
                "sentiment must be positive, negative, neutral, or unknown (got '{other}')"
            )),
        }
    }
}

/// Organizational signals extracted for one company. Every field has a
/// default and is coerced on its own, so a partial or loosely typed payload
/// still deserializes into a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSignals {
    #[serde(default, deserialize_with = "lenient_count")]
    pub num_locations: Option<u32>,
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub employee_sentiment: Sentiment,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hr_initiatives: bool,
    #[serde(default, deserialize_with = "lenient_tools")]
    pub competitor_tools: Vec<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decentralized: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
}

impl Default for EnrichmentSignals {
    fn default() -> Self {
        Self {
            num_locations: None,
            employee_sentiment: Sentiment::Unknown,
            hr_initiatives: false,
            competitor_tools: Vec::new(),
            decentralized: false,
            summary: String::new(),
        }
    }
}

impl EnrichmentSignals {
    /// Record substituted when search yields nothing or extraction fails.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            ..Self::default()
        }
    }

    /// Backfills a (possibly partial) extraction payload. Only a payload that
    /// is not an object is an error; a mistyped field falls back on its own.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload)
    }
}

// Models sometimes answer `3.0`, `"12"` or `-1`; keep whole non-negative counts only.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(number
        .filter(|count| count.is_finite() && *count >= 0.0)
        .map(|count| u32::try_from(count.trunc() as u64).unwrap_or(u32::MAX)))
}

fn lenient_sentiment<'de, D>(deserializer: D) -> Result<Sentiment, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| text.trim().to_ascii_lowercase().parse().ok())
        .unwrap_or_default())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Null | Value::Object(_) => false,
    })
}

// A lone tool name or a comma-separated string becomes a list.
fn lenient_tools<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let tools = match value {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::String(text) => text
            .split(',')
            .map(|tool| tool.trim().to_string())
            .filter(|tool| !tool.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    Ok(tools)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value).unwrap_or_default())
}

fn scalar_text(value: Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_payload_is_backfilled_with_defaults() {
        let signals = EnrichmentSignals::from_payload(json!({
            "num_locations": 4,
            "hr_initiatives": true
        }))
        .expect("partial payload accepted");

        assert_eq!(signals.num_locations, Some(4));
        assert!(signals.hr_initiatives);
        assert_eq!(signals.employee_sentiment, Sentiment::Unknown);
        assert!(signals.competitor_tools.is_empty());
        assert!(!signals.decentralized);
        assert_eq!(signals.summary, "");
    }

    #[test]
    fn nulls_and_unexpected_sentiments_fall_back() {
        let signals = EnrichmentSignals::from_payload(json!({
            "num_locations": null,
            "employee_sentiment": "Mixed",
            "hr_initiatives": null,
            "competitor_tools": null,
            "decentralized": null,
            "summary": null
        }))
        .expect("nulls accepted");

        assert_eq!(signals, EnrichmentSignals::default());
    }

    #[test]
    fn location_counts_are_read_leniently() {
        let fractional =
            EnrichmentSignals::from_payload(json!({ "num_locations": 3.0 })).expect("float");
        assert_eq!(fractional.num_locations, Some(3));

        let negative =
            EnrichmentSignals::from_payload(json!({ "num_locations": -2 })).expect("negative");
        assert_eq!(negative.num_locations, None);
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(EnrichmentSignals::from_payload(json!("no signals found")).is_err());
        assert!(EnrichmentSignals::from_payload(json!(["Peakon"])).is_err());
    }

    #[test]
    fn loosely_typed_fields_are_coerced_one_by_one() {
        let signals = EnrichmentSignals::from_payload(json!({
            "num_locations": "12",
            "employee_sentiment": "Positive",
            "hr_initiatives": "true",
            "competitor_tools": "Peakon, Culture Amp",
            "decentralized": 1,
            "summary": "Regional chain with 12 stores."
        }))
        .expect("loosely typed payload accepted");

        assert_eq!(signals.num_locations, Some(12));
        assert_eq!(signals.employee_sentiment, Sentiment::Positive);
        assert!(signals.hr_initiatives);
        assert_eq!(signals.competitor_tools, vec!["Peakon", "Culture Amp"]);
        assert!(signals.decentralized);
        assert_eq!(signals.summary, "Regional chain with 12 stores.");
    }

    #[test]
    fn one_mistyped_field_keeps_the_others() {
        let signals = EnrichmentSignals::from_payload(json!({
            "num_locations": 7,
            "hr_initiatives": { "unexpected": true },
            "competitor_tools": ["Peakon", 42, null],
            "summary": ["not", "text"]
        }))
        .expect("payload accepted");

        assert_eq!(signals.num_locations, Some(7));
        assert!(!signals.hr_initiatives);
        assert_eq!(signals.competitor_tools, vec!["Peakon", "42"]);
        assert_eq!(signals.summary, "");
    }

    #[test]
    fn fallback_record_is_fully_unknown() {
        let fallback = EnrichmentSignals::fallback();
        assert_eq!(fallback.employee_sentiment, Sentiment::Unknown);
        assert_eq!(fallback.num_locations, None);
        assert_eq!(fallback.summary, FALLBACK_SUMMARY);
    }
}
