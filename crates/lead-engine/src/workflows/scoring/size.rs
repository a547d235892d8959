use crate::config::SizeScoring;

/// Points for a normalized employee count, or `None` when the company is
/// disqualified on size: unknown, below `min_employees`, or above every
/// bracket.
pub fn score_size(employees: Option<i64>, config: &SizeScoring) -> Option<i32> {
    let employees = employees?;
    if employees < config.min_employees {
        return None;
    }

    config
        .brackets
        .iter()
        .find(|bracket| employees <= bracket.max)
        .map(|bracket| bracket.points)
}

/// A count of zero reads as unknown, like a missing one.
pub(crate) fn size_disqualification(employees: Option<i64>) -> String {
    match employees {
        Some(count) if count != 0 => format!("Too small ({count} employees)"),
        _ => "Too small (unknown employees)".to_string(),
    }
}
