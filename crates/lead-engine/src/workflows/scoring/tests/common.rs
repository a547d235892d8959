use crate::config::IcpConfig;
use crate::workflows::leads::{CompanyRecord, EmployeeCount};
use crate::workflows::scoring::ScoringEngine;

pub(super) const ICP_YAML: &str = r#"
input:
  columns:
    company_name: 0
    industry: 1
    employees: 2
    description: 3
    keywords: 4
output:
  file_name: scored.csv
size_scoring:
  min_employees: 50
  brackets:
    - { max: 199, points: 5 }
    - { max: 1000, points: 15 }
    - { max: 5000, points: 25 }
industry_tiers:
  A:
    industries: [Software, Healthcare]
    points: 20
  B:
    industries: [Retail, Logistics]
    points: 15
  C:
    industries: [Consulting]
    points: 5
  OUT:
    industries: [Gambling]
  default_tier: C
  default_points: 10
keyword_signals:
  cap: 25
  categories:
    - name: Engagement
      terms: [employee engagement, pulse survey]
      points: 10
    - name: Distributed workforce
      terms: [branches, frontline]
      points: 10
    - name: Growth
      terms: [hiring, expansion]
      points: 8
conditional_signals:
  - name: Care staffing
    terms: [nurses, caregivers]
    points: 6
    condition:
      industry_contains: Health
      exclude_if_category_matched: Distributed workforce
flags:
  - name: Staffing agency
    terms: [temporary staffing]
    penalty: 12
    condition:
      industry_contains: Consult
tiers:
  - { name: A — Hot, min_score: 40 }
  - { name: B — Warm, min_score: 20 }
  - { name: C — Cool, min_score: 0 }
enrichment:
  top_n: 2
  search_delay_seconds: 1.5
  bonus_cap: 20
  bonus_rules:
    - { condition: "num_locations >= 3", points: 5, signal: Multi-location }
    - { condition: "employee_sentiment == positive", points: 5, signal: Positive sentiment }
    - { condition: "competitor_tools is empty", points: 3, signal: Greenfield }
    - { condition: "competitor_tools is not empty", points: -8, signal: Competitor in place }
"#;

pub(super) fn icp_config() -> IcpConfig {
    IcpConfig::from_yaml_str(ICP_YAML).expect("fixture config is valid")
}

pub(super) fn company(name: &str, industry: &str, employees: f64) -> CompanyRecord {
    CompanyRecord {
        industry: Some(industry.to_string()),
        employees: Some(EmployeeCount::Number(employees)),
        ..CompanyRecord::named(name)
    }
}

pub(super) fn described(mut record: CompanyRecord, description: &str) -> CompanyRecord {
    record.description = Some(description.to_string());
    record
}

pub(super) fn score(config: &IcpConfig, record: CompanyRecord) -> crate::workflows::scoring::ScoredCompany {
    ScoringEngine::new(config).score(record)
}
