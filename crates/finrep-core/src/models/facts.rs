//! Financial fact records: raw per-document facts and finalized metrics.

use serde::{Deserialize, Serialize};

/// Unvalidated financial figures extracted from one document.
///
/// Amounts are in the reporting currency, in millions. `None` means the
/// figure is unknown; it is never replaced by zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFacts {
    /// Company name as reported (or derived from the file name).
    pub company_name: Option<String>,

    /// Total revenue / net sales for the period.
    pub revenue: Option<f64>,

    /// Net income / net profit for the period.
    pub net_income: Option<f64>,

    /// Operating income for the period.
    pub operating_income: Option<f64>,

    /// Shares outstanding (for EPS).
    pub shares_outstanding: Option<f64>,

    /// Revenue of the comparable previous period.
    pub previous_revenue: Option<f64>,
}

impl RawFacts {
    /// Facts carrying only a company name.
    pub fn named(company_name: impl Into<String>) -> Self {
        Self {
            company_name: Some(company_name.into()),
            ..Self::default()
        }
    }

    /// Whether a non-blank company name is present.
    pub fn has_company_name(&self) -> bool {
        self.company_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// Whether no numeric figure was extracted.
    pub fn has_no_figures(&self) -> bool {
        self.missing_fields().len() == 5
    }

    /// Names of numeric fields that are still unknown.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("revenue", self.revenue),
            ("net_income", self.net_income),
            ("operating_income", self.operating_income),
            ("shares_outstanding", self.shares_outstanding),
            ("previous_revenue", self.previous_revenue),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Finalized metrics for one company, one row of the comparison table.
///
/// Field order is the column order of the comparison output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMetrics {
    /// Company name (never empty).
    pub company_name: String,

    /// Revenue as extracted.
    pub revenue: Option<f64>,

    /// Net income as extracted.
    pub net_income: Option<f64>,

    /// Earnings per share.
    pub eps: Option<f64>,

    /// Operating margin, percent.
    pub operating_margin: Option<f64>,

    /// Profit margin, percent.
    pub profit_margin: Option<f64>,

    /// Revenue growth over the previous period, percent.
    pub revenue_growth: Option<f64>,
}

/// Column names of the comparison table, in field order.
pub const COMPARISON_COLUMNS: [&str; 7] = [
    "company_name",
    "revenue",
    "net_income",
    "eps",
    "operating_margin",
    "profit_margin",
    "revenue_growth",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_name_is_not_a_name() {
        assert!(!RawFacts::default().has_company_name());
        assert!(!RawFacts::named("   ").has_company_name());
        assert!(RawFacts::named("Acme").has_company_name());
    }

    #[test]
    fn test_missing_fields() {
        let facts = RawFacts {
            revenue: Some(1000.0),
            net_income: Some(0.0),
            ..RawFacts::default()
        };
        assert_eq!(
            facts.missing_fields(),
            vec!["operating_income", "shares_outstanding", "previous_revenue"]
        );
        assert!(!facts.has_no_figures());
        assert!(RawFacts::named("Acme").has_no_figures());
    }

    #[test]
    fn test_metrics_serialize_every_column() {
        let metrics = CompanyMetrics {
            company_name: "Acme".to_string(),
            revenue: Some(1000.0),
            net_income: None,
            eps: None,
            operating_margin: None,
            profit_margin: None,
            revenue_growth: None,
        };
        let json = serde_json::to_value(&metrics).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        let mut expected = COMPARISON_COLUMNS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert!(json["net_income"].is_null());
    }
}
