use crate::config::TierThreshold;
use crate::workflows::enrichment::EnrichedCompany;
use crate::workflows::scoring::{ScoredCompany, DISQUALIFIED};
use serde::Serialize;
use std::collections::HashMap;

/// Number of leading records listed in a run summary.
pub const TOP_LIMIT: usize = 20;

/// One company as listed in a run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub score: i32,
    pub tier: String,
    pub name: String,
    pub signals: Vec<String>,
    pub flags: Vec<String>,
    pub enrichment_signals: Vec<String>,
}

impl SummaryLine {
    fn from_scored(company: &ScoredCompany) -> Self {
        Self {
            score: company.total_score,
            tier: company.tier.clone(),
            name: company.name().to_string(),
            signals: company.keyword_signals.clone(),
            flags: company.flags.clone(),
            enrichment_signals: Vec::new(),
        }
    }

    fn from_enriched(company: &EnrichedCompany) -> Self {
        Self {
            score: company.pass2_score,
            tier: company.pass2_tier.clone(),
            enrichment_signals: company.enrichment_signals.clone(),
            ..Self::from_scored(&company.scored)
        }
    }
}

/// Tier counts, leading records, and flagged companies for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    /// Configured tiers in order, then `Disqualified`.
    pub tier_counts: Vec<(String, usize)>,
    pub top: Vec<SummaryLine>,
    pub flagged: Vec<SummaryLine>,
}

impl RunSummary {
    pub fn for_pass1(results: &[ScoredCompany], tiers: &[TierThreshold]) -> Self {
        let lines: Vec<SummaryLine> = results.iter().map(SummaryLine::from_scored).collect();
        Self::from_lines(lines, tiers)
    }

    /// Uses Pass 2 scores and tiers.
    pub fn for_pass2(results: &[EnrichedCompany], tiers: &[TierThreshold]) -> Self {
        let lines: Vec<SummaryLine> = results.iter().map(SummaryLine::from_enriched).collect();
        Self::from_lines(lines, tiers)
    }

    pub fn count_for(&self, tier: &str) -> usize {
        self.tier_counts
            .iter()
            .find(|(name, _)| name == tier)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    fn from_lines(lines: Vec<SummaryLine>, tiers: &[TierThreshold]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for line in &lines {
            *counts.entry(line.tier.as_str()).or_default() += 1;
        }

        let tier_counts = tiers
            .iter()
            .map(|tier| tier.name.as_str())
            .chain(std::iter::once(DISQUALIFIED))
            .map(|name| (name.to_string(), counts.get(name).copied().unwrap_or(0)))
            .collect();

        let flagged = lines
            .iter()
            .filter(|line| !line.flags.is_empty())
            .cloned()
            .collect();
        let total = lines.len();
        let top = lines.into_iter().take(TOP_LIMIT).collect();

        Self {
            total,
            tier_counts,
            top,
            flagged,
        }
    }
}
