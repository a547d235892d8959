use super::signals::{EnrichmentSignals, Sentiment};
use crate::config::EnrichmentConfig;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// One clause of the bonus-rule vocabulary, resolved from its textual form
/// when the ICP document is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum BonusCondition {
    /// `num_locations >= N`; an unknown count is treated as zero.
    MinLocations(u32),
    /// `employee_sentiment == <value>`
    SentimentIs(Sentiment),
    /// `hr_initiatives == true`
    HrInitiatives,
    /// `decentralized == true`
    Decentralized,
    /// `competitor_tools is empty`
    NoCompetitorTools,
    /// `competitor_tools is not empty`
    UsesCompetitorTools,
}

impl BonusCondition {
    pub fn matches(&self, signals: &EnrichmentSignals) -> bool {
        match self {
            BonusCondition::MinLocations(threshold) => {
                signals.num_locations.unwrap_or(0) >= *threshold
            }
            BonusCondition::SentimentIs(expected) => signals.employee_sentiment == *expected,
            BonusCondition::HrInitiatives => signals.hr_initiatives,
            BonusCondition::Decentralized => signals.decentralized,
            BonusCondition::NoCompetitorTools => signals.competitor_tools.is_empty(),
            BonusCondition::UsesCompetitorTools => !signals.competitor_tools.is_empty(),
        }
    }
}

impl FromStr for BonusCondition {
    type Err = ConditionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let condition = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        match condition.as_str() {
            "hr_initiatives == true" => return Ok(BonusCondition::HrInitiatives),
            "decentralized == true" => return Ok(BonusCondition::Decentralized),
            "competitor_tools is empty" => return Ok(BonusCondition::NoCompetitorTools),
            "competitor_tools is not empty" => return Ok(BonusCondition::UsesCompetitorTools),
            _ => {}
        }

        if let Some((field, threshold)) = condition.split_once(">=") {
            if field.trim() == "num_locations" {
                return threshold
                    .trim()
                    .parse::<u32>()
                    .map(BonusCondition::MinLocations)
                    .map_err(|_| {
                        ConditionParseError::new(
                            raw,
                            "location threshold must be a non-negative integer",
                        )
                    });
            }
        }

        if let Some((field, value)) = condition.split_once("==") {
            if field.trim() == "employee_sentiment" {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                return value
                    .parse::<Sentiment>()
                    .map(BonusCondition::SentimentIs)
                    .map_err(|reason| ConditionParseError::new(raw, reason));
            }
        }

        Err(ConditionParseError::new(
            raw,
            "expected num_locations >= N, employee_sentiment == <value>, hr_initiatives == true, \
             decentralized == true, or competitor_tools is [not] empty",
        ))
    }
}

impl TryFrom<String> for BonusCondition {
    type Error = ConditionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for BonusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusCondition::MinLocations(threshold) => write!(f, "num_locations >= {threshold}"),
            BonusCondition::SentimentIs(sentiment) => {
                write!(f, "employee_sentiment == {sentiment}")
            }
            BonusCondition::HrInitiatives => f.write_str("hr_initiatives == true"),
            BonusCondition::Decentralized => f.write_str("decentralized == true"),
            BonusCondition::NoCompetitorTools => f.write_str("competitor_tools is empty"),
            BonusCondition::UsesCompetitorTools => f.write_str("competitor_tools is not empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized enrichment condition '{condition}': {reason}")]
pub struct ConditionParseError {
    condition: String,
    reason: String,
}

impl ConditionParseError {
    fn new(condition: &str, reason: impl Into<String>) -> Self {
        Self {
            condition: condition.to_string(),
            reason: reason.into(),
        }
    }
}

/// Bonus points earned from enrichment, already clamped to the configured cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentBonus {
    pub points: i32,
    pub signals: Vec<String>,
}

/// Sums the points of every matching rule (in configured order) and clamps
/// the total to `[-bonus_cap, bonus_cap]`.
pub fn score_enrichment(signals: &EnrichmentSignals, config: &EnrichmentConfig) -> EnrichmentBonus {
    let mut total: i32 = 0;
    let mut matched = Vec::new();

    for rule in &config.bonus_rules {
        if rule.condition.matches(signals) {
            total = total.saturating_add(rule.points);
            matched.push(rule.signal.clone());
        }
    }

    let cap = config.bonus_cap.max(0);
    EnrichmentBonus {
        points: total.clamp(-cap, cap),
        signals: matched,
    }
}
