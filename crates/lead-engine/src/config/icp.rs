use crate::workflows::enrichment::BonusCondition;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const REQUIRED_SECTIONS: &[&str] = &[
    "input",
    "output",
    "size_scoring",
    "industry_tiers",
    "keyword_signals",
    "tiers",
];

/// The ideal customer profile: every bracket, keyword list, threshold, and
/// bonus rule the engines consult. Loaded once per run and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct IcpConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub size_scoring: SizeScoring,
    pub industry_tiers: IndustryTiers,
    pub keyword_signals: KeywordSignals,
    #[serde(default)]
    pub conditional_signals: Vec<ConditionalSignal>,
    #[serde(default)]
    pub flags: Vec<FlagRule>,
    pub tiers: Vec<TierThreshold>,
    #[serde(default)]
    pub enrichment: Option<EnrichmentConfig>,
}

impl IcpConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IcpConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| IcpConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Parses and validates a YAML document. Structural checks run before
    /// typed deserialization so a missing section is reported by name.
    pub fn from_yaml_str(raw: &str) -> Result<Self, IcpConfigError> {
        let document: serde_yaml::Value = serde_yaml::from_str(raw)?;
        validate_sections(&document)?;
        let config: IcpConfig = serde_yaml::from_value(document)?;
        Ok(config)
    }

    /// The Pass 2 settings; only required when enrichment actually runs.
    pub fn enrichment(&self) -> Result<&EnrichmentConfig, IcpConfigError> {
        self.enrichment
            .as_ref()
            .ok_or(IcpConfigError::MissingSection("enrichment"))
    }
}

fn validate_sections(document: &serde_yaml::Value) -> Result<(), IcpConfigError> {
    if !document.is_mapping() {
        return Err(IcpConfigError::NotAMapping);
    }

    for section in REQUIRED_SECTIONS {
        if document.get(*section).is_none() {
            return Err(IcpConfigError::MissingSection(section));
        }
    }

    require_field(document, "size_scoring", "brackets")?;
    require_field(document, "keyword_signals", "categories")?;
    Ok(())
}

fn require_field(
    document: &serde_yaml::Value,
    section: &'static str,
    field: &'static str,
) -> Result<(), IcpConfigError> {
    let present = document
        .get(section)
        .and_then(|value| value.get(field))
        .is_some();

    if present {
        Ok(())
    } else {
        Err(IcpConfigError::MissingField { section, field })
    }
}

/// Where to find each field in the source table. Indexes are zero-based.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub columns: ColumnMapping,
    #[serde(default = "default_data_start_row")]
    pub data_start_row: usize,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub company_name: usize,
    #[serde(default)]
    pub industry: Option<usize>,
    #[serde(default)]
    pub employees: Option<usize>,
    #[serde(default)]
    pub website: Option<usize>,
    #[serde(default)]
    pub linkedin: Option<usize>,
    #[serde(default)]
    pub revenue: Option<usize>,
    #[serde(default)]
    pub founded: Option<usize>,
    #[serde(default)]
    pub description: Option<usize>,
    #[serde(default)]
    pub keywords: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file_name: String,
    #[serde(default = "default_enriched_file")]
    pub enriched_file_name: String,
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizeScoring {
    #[serde(default)]
    pub min_employees: i64,
    pub brackets: Vec<SizeBracket>,
}

/// Employee-count bracket. Brackets are expected in ascending `max` order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SizeBracket {
    pub max: i64,
    pub points: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryTiers {
    #[serde(rename = "A", default)]
    pub tier_a: Option<IndustryTierRule>,
    #[serde(rename = "B", default)]
    pub tier_b: Option<IndustryTierRule>,
    #[serde(rename = "C", default)]
    pub tier_c: Option<IndustryTierRule>,
    #[serde(rename = "OUT", default)]
    pub out: Option<IndustryTierRule>,
    #[serde(default = "default_industry_tier")]
    pub default_tier: String,
    /// `null` in the document disqualifies unmatched industries.
    #[serde(default = "default_industry_points")]
    pub default_points: Option<i32>,
}

impl IndustryTiers {
    /// Configured tiers in lookup priority: A, B, C, then OUT.
    pub fn ordered(&self) -> impl Iterator<Item = (&'static str, &IndustryTierRule)> {
        [
            ("A", &self.tier_a),
            ("B", &self.tier_b),
            ("C", &self.tier_c),
            ("OUT", &self.out),
        ]
        .into_iter()
        .filter_map(|(label, rule)| rule.as_ref().map(|rule| (label, rule)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndustryTierRule {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub points: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSignals {
    #[serde(default = "default_keyword_cap")]
    pub cap: i32,
    pub categories: Vec<KeywordCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub terms: Vec<String>,
    pub points: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionalSignal {
    pub name: String,
    pub terms: Vec<String>,
    pub points: i32,
    #[serde(default)]
    pub condition: SignalCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlagRule {
    pub name: String,
    pub terms: Vec<String>,
    pub penalty: i32,
    #[serde(default)]
    pub condition: SignalCondition,
}

/// Industry gate shared by conditional signals and flags. Empty strings
/// mean "not set".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalCondition {
    #[serde(default)]
    pub industry_contains: String,
    #[serde(default)]
    pub exclude_if_category_matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierThreshold {
    pub name: String,
    pub min_score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_search_delay")]
    pub search_delay_seconds: f64,
    #[serde(default = "default_query_template")]
    pub search_query_template: String,
    #[serde(default = "default_search_max_results")]
    pub search_max_results: usize,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_bonus_cap")]
    pub bonus_cap: i32,
    #[serde(default)]
    pub bonus_rules: Vec<BonusRule>,
}

/// A bonus rule; the condition is parsed when the document loads, so an
/// unknown clause fails the load instead of silently never matching.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BonusRule {
    pub condition: BonusCondition,
    pub points: i32,
    pub signal: String,
}

fn default_data_start_row() -> usize {
    2
}

fn default_delimiter() -> char {
    ','
}

fn default_output_file() -> String {
    "leads_scored.csv".to_string()
}

fn default_enriched_file() -> String {
    "leads_enriched.csv".to_string()
}

fn default_description_chars() -> usize {
    200
}

fn default_industry_tier() -> String {
    "C".to_string()
}

fn default_industry_points() -> Option<i32> {
    Some(10)
}

fn default_keyword_cap() -> i32 {
    25
}

fn default_top_n() -> usize {
    50
}

fn default_search_delay() -> f64 {
    2.0
}

fn default_query_template() -> String {
    "{name}".to_string()
}

fn default_search_max_results() -> usize {
    5
}

fn default_llm_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_bonus_cap() -> i32 {
    20
}

#[derive(Debug, thiserror::Error)]
pub enum IcpConfigError {
    #[error("unable to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("config document must be a mapping of sections")]
    NotAMapping,
    #[error("Missing required config section: '{0}'")]
    MissingSection(&'static str),
    #[error("{section} must contain '{field}'")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::enrichment::Sentiment;

    const MINIMAL: &str = r#"
input:
  columns:
    company_name: 0
output: {}
size_scoring:
  brackets:
    - { max: 1000, points: 15 }
industry_tiers: {}
keyword_signals:
  categories: []
tiers:
  - { name: "A — Hot", min_score: 40 }
"#;

    fn without_section(section: &str) -> String {
        let mut document: serde_yaml::Value = serde_yaml::from_str(MINIMAL).expect("valid yaml");
        document
            .as_mapping_mut()
            .expect("mapping")
            .remove(section);
        serde_yaml::to_string(&document).expect("serialize")
    }

    #[test]
    fn minimal_document_applies_defaults() {
        let config = IcpConfig::from_yaml_str(MINIMAL).expect("minimal config loads");

        assert_eq!(config.input.data_start_row, 2);
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.output.description_chars, 200);
        assert_eq!(config.size_scoring.min_employees, 0);
        assert_eq!(config.keyword_signals.cap, 25);
        assert_eq!(config.industry_tiers.default_tier, "C");
        assert_eq!(config.industry_tiers.default_points, Some(10));
        assert!(config.conditional_signals.is_empty());
        assert!(config.flags.is_empty());
        assert!(config.enrichment.is_none());
    }

    #[test]
    fn every_required_section_is_enforced() {
        for section in REQUIRED_SECTIONS {
            let error = IcpConfig::from_yaml_str(&without_section(section))
                .expect_err("missing section must fail");
            match error {
                IcpConfigError::MissingSection(name) => assert_eq!(name, *section),
                other => panic!("expected missing section for {section}, got {other:?}"),
            }
        }
    }

    #[test]
    fn nested_required_fields_are_enforced() {
        let document = MINIMAL.replace("  brackets:\n    - { max: 1000, points: 15 }\n", "  min_employees: 10\n");
        let error = IcpConfig::from_yaml_str(&document).expect_err("brackets required");
        assert_eq!(error.to_string(), "size_scoring must contain 'brackets'");

        let document = MINIMAL.replace("  categories: []\n", "  cap: 10\n");
        let error = IcpConfig::from_yaml_str(&document).expect_err("categories required");
        assert_eq!(error.to_string(), "keyword_signals must contain 'categories'");
    }

    #[test]
    fn explicit_null_default_points_is_preserved() {
        let document = MINIMAL.replace(
            "industry_tiers: {}",
            "industry_tiers:\n  default_tier: Unlisted\n  default_points: null\n  OUT:\n    industries: [Gambling]",
        );
        let config = IcpConfig::from_yaml_str(&document).expect("config loads");

        assert_eq!(config.industry_tiers.default_tier, "Unlisted");
        assert_eq!(config.industry_tiers.default_points, None);
        let ordered: Vec<_> = config.industry_tiers.ordered().collect();
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].0, "OUT");
        assert_eq!(ordered[0].1.points, None);
    }

    #[test]
    fn bonus_conditions_are_parsed_at_load_time() {
        let document = format!(
            "{MINIMAL}enrichment:\n  bonus_rules:\n    - condition: \"employee_sentiment == negative\"\n      points: 4\n      signal: Engagement pain\n"
        );
        let config = IcpConfig::from_yaml_str(&document).expect("config loads");
        let enrichment = config.enrichment().expect("enrichment present");

        assert_eq!(enrichment.top_n, 50);
        assert_eq!(enrichment.bonus_cap, 20);
        assert_eq!(
            enrichment.bonus_rules[0].condition,
            BonusCondition::SentimentIs(Sentiment::Negative)
        );
    }

    #[test]
    fn unknown_bonus_condition_fails_the_load() {
        let document = format!(
            "{MINIMAL}enrichment:\n  bonus_rules:\n    - condition: \"revenue > 10\"\n      points: 4\n      signal: Rich\n"
        );
        let error = IcpConfig::from_yaml_str(&document).expect_err("unknown condition rejected");

        match error {
            IcpConfigError::Parse(inner) => assert!(inner.to_string().contains("revenue > 10")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn enrichment_section_is_required_on_demand() {
        let config = IcpConfig::from_yaml_str(MINIMAL).expect("config loads");
        assert!(matches!(
            config.enrichment(),
            Err(IcpConfigError::MissingSection("enrichment"))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let error = IcpConfig::load("./does-not-exist.yaml").expect_err("missing file");
        match error {
            IcpConfigError::Io { path, .. } => assert!(path.ends_with("does-not-exist.yaml")),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
