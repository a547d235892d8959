mod industry;
mod signals;
mod size;
mod tier;

pub use industry::{score_industry, IndustryScore};
pub use signals::{scan_keywords, KeywordScan};
pub use size::score_size;
pub use tier::{assign_tier, DISQUALIFIED};

use crate::config::IcpConfig;
use crate::workflows::leads::{parse_employees, CompanyRecord};
use serde::{Deserialize, Serialize};

/// A company after Pass 1. Built only through [`ScoredCompany::qualified`]
/// or [`ScoredCompany::disqualified`], so a disqualified record always has
/// zero subscores and a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCompany {
    pub record: CompanyRecord,
    pub employees_num: Option<i64>,
    pub size_score: i32,
    pub industry_tier: String,
    pub industry_score: i32,
    pub keyword_score: i32,
    pub keyword_signals: Vec<String>,
    pub flags: Vec<String>,
    pub total_score: i32,
    pub tier: String,
    pub disqualify_reason: String,
}

impl ScoredCompany {
    pub fn disqualified(
        record: CompanyRecord,
        employees_num: Option<i64>,
        industry_tier: String,
        reasons: &[String],
    ) -> Self {
        Self {
            record,
            employees_num,
            size_score: 0,
            industry_tier,
            industry_score: 0,
            keyword_score: 0,
            keyword_signals: Vec::new(),
            flags: Vec::new(),
            total_score: 0,
            tier: DISQUALIFIED.to_string(),
            disqualify_reason: reasons.join("; "),
        }
    }

    pub fn qualified(
        record: CompanyRecord,
        employees_num: Option<i64>,
        industry_tier: String,
        size_score: i32,
        industry_score: i32,
        scan: KeywordScan,
        tier: &str,
    ) -> Self {
        Self {
            record,
            employees_num,
            size_score,
            industry_tier,
            industry_score,
            keyword_score: scan.score,
            keyword_signals: scan.signals,
            flags: scan.flags,
            total_score: size_score
                .saturating_add(industry_score)
                .saturating_add(scan.score),
            tier: tier.to_string(),
            disqualify_reason: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_disqualified(&self) -> bool {
        self.tier == DISQUALIFIED
    }
}

/// Pass 1: scores each company from structured fields and keyword text.
pub struct ScoringEngine<'a> {
    config: &'a IcpConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(config: &'a IcpConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, record: CompanyRecord) -> ScoredCompany {
        let employees = parse_employees(record.employees.as_ref());
        let size_points = score_size(employees, &self.config.size_scoring);
        let industry_label = record.industry.as_deref().unwrap_or_default();
        let industry = score_industry(industry_label, &self.config.industry_tiers);

        let (size_points, industry_points) = match (size_points, industry.points) {
            (Some(size), Some(points)) => (size, points),
            (size, points) => {
                let mut reasons = Vec::new();
                if size.is_none() {
                    reasons.push(size::size_disqualification(employees));
                }
                if points.is_none() {
                    reasons.push(industry::industry_disqualification(
                        record.industry.as_deref(),
                    ));
                }
                tracing::debug!(
                    company = %record.name,
                    reason = %reasons.join("; "),
                    "company disqualified"
                );
                return ScoredCompany::disqualified(record, employees, industry.tier, &reasons);
            }
        };

        let text = signals::scan_text(
            &record.name,
            record.description.as_deref(),
            record.keywords.as_deref(),
        );
        let scan = scan_keywords(&text, industry_label, self.config);
        let total = size_points
            .saturating_add(industry_points)
            .saturating_add(scan.score);
        let tier = assign_tier(total, &self.config.tiers);

        tracing::debug!(company = %record.name, total, tier, "company scored");
        ScoredCompany::qualified(
            record,
            employees,
            industry.tier,
            size_points,
            industry_points,
            scan,
            tier,
        )
    }

    /// Scores every record and stable-sorts by total score, highest first.
    pub fn score_all(&self, records: Vec<CompanyRecord>) -> Vec<ScoredCompany> {
        let mut scored: Vec<ScoredCompany> =
            records.into_iter().map(|record| self.score(record)).collect();
        scored.sort_by(|left, right| right.total_score.cmp(&left.total_score));

        let disqualified = scored.iter().filter(|company| company.is_disqualified()).count();
        tracing::info!(
            companies = scored.len(),
            disqualified,
            "pass 1 scoring complete"
        );
        scored
    }
}

#[cfg(test)]
mod tests;
