use crate::config::TierThreshold;

pub const DISQUALIFIED: &str = "Disqualified";

/// First configured tier whose threshold the score reaches. Thresholds are
/// read in configured order and never re-sorted.
pub fn assign_tier(score: i32, tiers: &[TierThreshold]) -> &str {
    tiers
        .iter()
        .find(|tier| score >= tier.min_score)
        .map(|tier| tier.name.as_str())
        .unwrap_or(DISQUALIFIED)
}
