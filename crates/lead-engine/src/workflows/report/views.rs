use crate::workflows::enrichment::EnrichedCompany;
use crate::workflows::leads::truncate_chars;
use crate::workflows::scoring::ScoredCompany;

/// Placeholder for absent values and empty lists.
pub const ABSENT: &str = "—";

pub const SCORED_HEADERS: [&str; 16] = [
    "Rank",
    "Company Name",
    "Industry",
    "Industry Tier",
    "# Employees",
    "Size Score",
    "Industry Score",
    "Keyword Score",
    "Total Score",
    "Tier",
    "Keyword Signals",
    "Flags",
    "Disqualify Reason",
    "Website",
    "LinkedIn URL",
    "Short Description",
];

pub const ENRICHMENT_HEADERS: [&str; 6] = [
    "Enrichment Bonus",
    "Enrichment Signals",
    "Pass 2 Score",
    "Pass 2 Tier",
    "Enrichment Summary",
    "Search Snippets",
];

pub(crate) const LIST_SEPARATOR: &str = ", ";

pub(crate) fn join_list(items: &[String]) -> String {
    if items.is_empty() {
        ABSENT.to_string()
    } else {
        items.join(LIST_SEPARATOR)
    }
}

pub(crate) fn split_list(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    if cell.is_empty() || cell == ABSENT {
        return Vec::new();
    }

    cell.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn text_or_absent(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => ABSENT.to_string(),
    }
}

/// Hands out display ranks to ranked rows only.
#[derive(Debug, Default)]
pub(crate) struct RankCounter {
    next: usize,
}

impl RankCounter {
    pub(crate) fn assign(&mut self, ranked: bool) -> String {
        if ranked {
            self.next += 1;
            self.next.to_string()
        } else {
            ABSENT.to_string()
        }
    }
}

pub(crate) fn scored_cells(rank: String, company: &ScoredCompany, description_chars: usize) -> Vec<String> {
    let record = &company.record;
    let description = record
        .description
        .as_deref()
        .map(|text| truncate_chars(text, description_chars));

    vec![
        rank,
        record.name.clone(),
        text_or_absent(record.industry.as_deref()),
        company.industry_tier.clone(),
        company
            .employees_num
            .map(|count| count.to_string())
            .unwrap_or_else(|| ABSENT.to_string()),
        company.size_score.to_string(),
        company.industry_score.to_string(),
        company.keyword_score.to_string(),
        company.total_score.to_string(),
        company.tier.clone(),
        join_list(&company.keyword_signals),
        join_list(&company.flags),
        text_or_absent(Some(company.disqualify_reason.as_str())),
        text_or_absent(record.website.as_deref()),
        text_or_absent(record.linkedin.as_deref()),
        text_or_absent(description.as_deref()),
    ]
}

pub(crate) fn enrichment_cells(company: &EnrichedCompany) -> Vec<String> {
    vec![
        company.enrichment_bonus.to_string(),
        join_list(&company.enrichment_signals),
        company.pass2_score.to_string(),
        company.pass2_tier.clone(),
        text_or_absent(Some(company.enrichment_summary.as_str())),
        text_or_absent(Some(company.search_snippets.as_str())),
    ]
}
