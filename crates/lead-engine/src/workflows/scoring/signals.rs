use crate::config::{IcpConfig, SignalCondition};

/// Outcome of scanning one company's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordScan {
    /// Capped at `keyword_signals.cap`; no floor.
    pub score: i32,
    /// Matched categories then conditional signals, in configured order.
    pub signals: Vec<String>,
    pub flags: Vec<String>,
}

/// Scans lowercased free text for categories, industry-gated conditional
/// signals, and penalty flags. Terms are matched as plain substrings.
pub fn scan_keywords(text: &str, industry: &str, config: &IcpConfig) -> KeywordScan {
    let keywords = &config.keyword_signals;
    let mut total: i32 = 0;
    let mut signals: Vec<String> = Vec::new();
    let mut flags = Vec::new();

    for category in &keywords.categories {
        if any_term_in(&category.terms, text) {
            total = total.saturating_add(category.points);
            signals.push(category.name.clone());
        }
    }

    for signal in &config.conditional_signals {
        if !industry_applies(&signal.condition, industry) {
            continue;
        }
        let excluded = &signal.condition.exclude_if_category_matched;
        if !excluded.is_empty() && signals.iter().any(|name| name == excluded) {
            continue;
        }
        if any_term_in(&signal.terms, text) {
            total = total.saturating_add(signal.points);
            signals.push(signal.name.clone());
        }
    }

    for flag in &config.flags {
        if industry_applies(&flag.condition, industry) && any_term_in(&flag.terms, text) {
            total = total.saturating_sub(flag.penalty);
            flags.push(flag.name.clone());
        }
    }

    KeywordScan {
        score: total.min(keywords.cap),
        signals,
        flags,
    }
}

/// Builds the text the scanner reads: name, description, and keywords,
/// lowercased.
pub(crate) fn scan_text(name: &str, description: Option<&str>, keywords: Option<&str>) -> String {
    format!(
        "{} {} {}",
        name,
        description.unwrap_or_default(),
        keywords.unwrap_or_default()
    )
    .to_lowercase()
}

fn industry_applies(condition: &SignalCondition, industry: &str) -> bool {
    !condition.industry_contains.is_empty()
        && !industry.is_empty()
        && industry.contains(condition.industry_contains.as_str())
}

fn any_term_in(terms: &[String], text: &str) -> bool {
    terms.iter().any(|term| text.contains(term.as_str()))
}
