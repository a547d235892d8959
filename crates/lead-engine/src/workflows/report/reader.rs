use super::views::{split_list, ABSENT};
use super::ReportError;
use crate::workflows::leads::{CompanyRecord, EmployeeCount};
use crate::workflows::scoring::ScoredCompany;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

/// Reads a Pass 1 table back into scored records, e.g. to run Pass 2
/// separately. Extra columns (such as a previous run's enrichment) are
/// ignored.
pub struct ScoredResultReader;

impl ScoredResultReader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScoredCompany>, ReportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ScoredCompany>, ReportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut results = Vec::new();

        for row in csv_reader.deserialize::<ScoredRow>() {
            results.push(row?.into_scored());
        }

        tracing::debug!(records = results.len(), "loaded pass 1 results");
        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct ScoredRow {
    #[serde(rename = "Company Name")]
    name: String,
    #[serde(rename = "Industry", default, deserialize_with = "absent_as_none")]
    industry: Option<String>,
    #[serde(rename = "Industry Tier")]
    industry_tier: String,
    #[serde(rename = "# Employees", default, deserialize_with = "absent_as_none")]
    employees: Option<String>,
    #[serde(rename = "Size Score")]
    size_score: i32,
    #[serde(rename = "Industry Score")]
    industry_score: i32,
    #[serde(rename = "Keyword Score")]
    keyword_score: i32,
    #[serde(rename = "Total Score")]
    total_score: i32,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Keyword Signals", default)]
    keyword_signals: String,
    #[serde(rename = "Flags", default)]
    flags: String,
    #[serde(rename = "Disqualify Reason", default, deserialize_with = "absent_as_none")]
    disqualify_reason: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "absent_as_none")]
    website: Option<String>,
    #[serde(rename = "LinkedIn URL", default, deserialize_with = "absent_as_none")]
    linkedin: Option<String>,
    #[serde(rename = "Short Description", default, deserialize_with = "absent_as_none")]
    description: Option<String>,
}

impl ScoredRow {
    fn into_scored(self) -> ScoredCompany {
        let employees_num = self
            .employees
            .as_deref()
            .and_then(|value| value.parse::<i64>().ok());

        ScoredCompany {
            record: CompanyRecord {
                industry: self.industry,
                employees: self
                    .employees
                    .as_deref()
                    .and_then(EmployeeCount::from_cell),
                website: self.website,
                linkedin: self.linkedin,
                description: self.description,
                ..CompanyRecord::named(self.name)
            },
            employees_num,
            size_score: self.size_score,
            industry_tier: self.industry_tier,
            industry_score: self.industry_score,
            keyword_score: self.keyword_score,
            keyword_signals: split_list(&self.keyword_signals),
            flags: split_list(&self.flags),
            total_score: self.total_score,
            tier: self.tier,
            disqualify_reason: self.disqualify_reason.unwrap_or_default(),
        }
    }
}

fn absent_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| {
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed != ABSENT
    }))
}
