use crate::config::IndustryTiers;

/// Industry tier letter and its points. `points == None` disqualifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryScore {
    pub tier: String,
    pub points: Option<i32>,
}

/// Looks the label up in tiers A, B, C, OUT (that order); labels listed
/// nowhere get the configured default tier and points.
pub fn score_industry(industry: &str, config: &IndustryTiers) -> IndustryScore {
    for (label, rule) in config.ordered() {
        if rule.industries.iter().any(|listed| listed == industry) {
            return IndustryScore {
                tier: label.to_string(),
                points: rule.points,
            };
        }
    }

    IndustryScore {
        tier: config.default_tier.clone(),
        points: config.default_points,
    }
}

pub(crate) fn industry_disqualification(industry: Option<&str>) -> String {
    let label = industry.filter(|value| !value.is_empty()).unwrap_or("unspecified");
    format!("Industry excluded ({label})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndustryTierRule;

    fn rule(industries: &[&str], points: Option<i32>) -> Option<IndustryTierRule> {
        Some(IndustryTierRule {
            industries: industries.iter().map(|value| value.to_string()).collect(),
            points,
        })
    }

    fn tiers() -> IndustryTiers {
        IndustryTiers {
            tier_a: rule(&["Software", "Retail"], Some(20)),
            tier_b: rule(&["Logistics", "Retail"], Some(15)),
            tier_c: rule(&["Consulting"], Some(5)),
            out: rule(&["Gambling"], None),
            default_tier: "C".to_string(),
            default_points: Some(10),
        }
    }

    #[test]
    fn earlier_tiers_take_priority() {
        let score = score_industry("Retail", &tiers());
        assert_eq!(score.tier, "A");
        assert_eq!(score.points, Some(20));
    }

    #[test]
    fn labels_match_literally() {
        assert_eq!(score_industry("Logistics", &tiers()).tier, "B");
        let lowercase = score_industry("software", &tiers());
        assert_eq!(lowercase.tier, "C");
        assert_eq!(lowercase.points, Some(10));
    }

    #[test]
    fn out_tier_without_points_disqualifies() {
        let score = score_industry("Gambling", &tiers());
        assert_eq!(score.tier, "OUT");
        assert_eq!(score.points, None);
    }

    #[test]
    fn null_default_points_disqualify_unlisted_industries() {
        let config = IndustryTiers {
            default_points: None,
            default_tier: "OUT".to_string(),
            ..tiers()
        };
        assert_eq!(
            score_industry("", &config),
            IndustryScore {
                tier: "OUT".to_string(),
                points: None
            }
        );
    }

    #[test]
    fn missing_tiers_are_skipped() {
        let config = IndustryTiers {
            tier_a: None,
            ..tiers()
        };
        assert_eq!(score_industry("Software", &config).tier, "C");
        assert_eq!(score_industry("Retail", &config).tier, "B");
    }

    #[test]
    fn reason_names_the_industry() {
        assert_eq!(
            industry_disqualification(Some("Gambling")),
            "Industry excluded (Gambling)"
        );
        assert_eq!(
            industry_disqualification(None),
            "Industry excluded (unspecified)"
        );
    }
}
