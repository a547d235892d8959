mod extraction;
mod pacing;
mod rules;
mod search;
mod signals;

pub use extraction::{AnthropicExtractor, ExtractionError, SignalExtractor};
pub use pacing::{CallPacer, Sleeper, ThreadSleeper};
pub use rules::{score_enrichment, BonusCondition, ConditionParseError, EnrichmentBonus};
pub use search::{DuckDuckGoSearch, SearchError, SearchHit, SearchProvider};
pub use signals::{EnrichmentSignals, Sentiment};

use crate::config::{EnrichmentConfig, IcpConfig, IcpConfigError, TierThreshold};
use crate::workflows::leads::truncate_chars;
use crate::workflows::scoring::{assign_tier, ScoredCompany};
use serde::{Deserialize, Serialize};

pub(crate) const NOT_ENRICHED_SUMMARY: &str = "Not enriched (outside top N)";
const SNIPPET_COUNT: usize = 3;
const SNIPPET_CHARS: usize = 100;

/// A Pass 1 record wrapped with its Pass 2 outcome. The inner record is
/// never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCompany {
    pub scored: ScoredCompany,
    pub enrichment_bonus: i32,
    pub enrichment_signals: Vec<String>,
    pub enrichment_summary: String,
    pub enrichment_raw: Option<EnrichmentSignals>,
    pub search_snippets: String,
    pub pass2_score: i32,
    pub pass2_tier: String,
}

impl EnrichedCompany {
    pub fn enriched(
        scored: ScoredCompany,
        bonus: EnrichmentBonus,
        signals: EnrichmentSignals,
        hits: &[SearchHit],
        tiers: &[TierThreshold],
    ) -> Self {
        let pass2_score = scored.total_score.saturating_add(bonus.points);
        let pass2_tier = assign_tier(pass2_score, tiers).to_string();

        Self {
            enrichment_bonus: bonus.points,
            enrichment_signals: bonus.signals,
            enrichment_summary: signals.summary.clone(),
            enrichment_raw: Some(signals),
            search_snippets: join_snippets(hits),
            pass2_score,
            pass2_tier,
            scored,
        }
    }

    /// A company outside the enrichment quota: zero bonus, Pass 1 score and
    /// tier carried over.
    pub fn pass_through(scored: ScoredCompany) -> Self {
        Self {
            enrichment_bonus: 0,
            enrichment_signals: Vec::new(),
            enrichment_summary: NOT_ENRICHED_SUMMARY.to_string(),
            enrichment_raw: None,
            search_snippets: String::new(),
            pass2_score: scored.total_score,
            pass2_tier: scored.tier.clone(),
            scored,
        }
    }

    pub fn name(&self) -> &str {
        self.scored.name()
    }

    pub fn was_enriched(&self) -> bool {
        self.enrichment_raw.is_some()
    }
}

fn join_snippets(hits: &[SearchHit]) -> String {
    hits.iter()
        .take(SNIPPET_COUNT)
        .map(|hit| truncate_chars(&hit.snippet, SNIPPET_CHARS))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pass 2: enriches the strongest Pass 1 survivors through the injected
/// search and extraction collaborators, then re-tiers them.
#[derive(Debug)]
pub struct EnrichmentEngine<'a> {
    settings: &'a EnrichmentConfig,
    tiers: &'a [TierThreshold],
    search: Box<dyn SearchProvider>,
    extractor: Box<dyn SignalExtractor>,
    pacer: CallPacer,
}

impl<'a> EnrichmentEngine<'a> {
    /// Fails when the document has no `enrichment` section.
    pub fn new(
        config: &'a IcpConfig,
        search: Box<dyn SearchProvider>,
        extractor: Box<dyn SignalExtractor>,
    ) -> Result<Self, IcpConfigError> {
        let settings = config.enrichment()?;
        let pacer = CallPacer::from_seconds(settings.search_delay_seconds, Box::new(ThreadSleeper));

        Ok(Self {
            settings,
            tiers: &config.tiers,
            search,
            extractor,
            pacer,
        })
    }

    pub fn with_pacer(mut self, pacer: CallPacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Configured enrichment quota.
    pub fn top_n(&self) -> usize {
        self.settings.top_n
    }

    pub fn enrich(&self, pass1: Vec<ScoredCompany>) -> Vec<EnrichedCompany> {
        self.enrich_top(pass1, self.settings.top_n)
    }

    /// Like [`enrich`](Self::enrich) with an explicit quota.
    pub fn enrich_top(&self, pass1: Vec<ScoredCompany>, top_n: usize) -> Vec<EnrichedCompany> {
        let mut eligible: Vec<ScoredCompany> = pass1
            .into_iter()
            .filter(|company| !company.is_disqualified())
            .collect();
        eligible.sort_by(|left, right| right.total_score.cmp(&left.total_score));

        let skipped = eligible.split_off(top_n.min(eligible.len()));
        let total = eligible.len();
        tracing::info!(
            enriching = total,
            eligible = total + skipped.len(),
            "pass 2 enrichment started"
        );

        let mut results = Vec::with_capacity(total + skipped.len());
        for (index, company) in eligible.into_iter().enumerate() {
            results.push(self.enrich_company(company, index, total));
            self.pacer.after_call(index, total);
        }
        results.extend(skipped.into_iter().map(EnrichedCompany::pass_through));

        results.sort_by(|left, right| right.pass2_score.cmp(&left.pass2_score));
        tracing::info!(companies = results.len(), "pass 2 enrichment complete");
        results
    }

    fn enrich_company(
        &self,
        company: ScoredCompany,
        index: usize,
        total: usize,
    ) -> EnrichedCompany {
        let name = company.name().to_string();
        let industry = company.record.industry.clone().unwrap_or_default();

        let hits = match self.search.search(&name, &industry) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(company = %name, error = %err, "search failed; continuing without results");
                Vec::new()
            }
        };

        let signals = self.extract_signals(&name, &industry, &hits);
        let bonus = score_enrichment(&signals, self.settings);
        let enriched = EnrichedCompany::enriched(company, bonus, signals, &hits, self.tiers);

        tracing::debug!(
            company = %name,
            position = index + 1,
            total,
            results = hits.len(),
            bonus = enriched.enrichment_bonus,
            pass2_score = enriched.pass2_score,
            pass2_tier = %enriched.pass2_tier,
            "company enriched"
        );
        enriched
    }

    fn extract_signals(&self, name: &str, industry: &str, hits: &[SearchHit]) -> EnrichmentSignals {
        if hits.is_empty() {
            return EnrichmentSignals::fallback();
        }

        let payload = match self.extractor.extract(name, industry, hits) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(company = %name, error = %err, "signal extraction failed; using defaults");
                return EnrichmentSignals::fallback();
            }
        };

        EnrichmentSignals::from_payload(payload).unwrap_or_else(|err| {
            tracing::warn!(company = %name, error = %err, "malformed signal payload; using defaults");
            EnrichmentSignals::fallback()
        })
    }
}
