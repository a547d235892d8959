use serde::{Deserialize, Serialize};

/// Raw employee figure as found in the source: a number, or free text such
/// as `"~500 FTE"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeCount {
    Number(f64),
    Text(String),
}

impl EmployeeCount {
    /// Classifies a text cell. Cells that parse as a finite decimal are
    /// numeric; everything else stays text. Blank cells yield `None`.
    pub fn from_cell(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(EmployeeCount::Number(value)),
            _ => Some(EmployeeCount::Text(trimmed.to_string())),
        }
    }
}

/// A candidate company as read from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub industry: Option<String>,
    pub employees: Option<EmployeeCount>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub revenue: Option<String>,
    pub founded: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

impl CompanyRecord {
    /// A record carrying only a name; other fields are filled with struct
    /// update syntax.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: None,
            employees: None,
            website: None,
            linkedin: None,
            revenue: None,
            founded: None,
            description: None,
            keywords: None,
        }
    }
}
