//! Derived financial ratios.
//!
//! Every function returns `None` when an input is unknown or the
//! denominator is zero, and rounds to two decimal places. A zero numerator
//! is a real zero.

use crate::models::RawFacts;

/// Ratios derived from one document's [`RawFacts`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    pub eps: Option<f64>,
    pub operating_margin: Option<f64>,
    pub profit_margin: Option<f64>,
    pub revenue_growth: Option<f64>,
}

/// Compute every ratio available from `facts`.
pub fn derive(facts: &RawFacts) -> DerivedMetrics {
    DerivedMetrics {
        eps: eps(facts.net_income, facts.shares_outstanding),
        operating_margin: operating_margin(facts.operating_income, facts.revenue),
        profit_margin: profit_margin(facts.net_income, facts.revenue),
        revenue_growth: revenue_growth(facts.revenue, facts.previous_revenue),
    }
}

/// Net income as a percentage of revenue.
pub fn profit_margin(net_income: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    ratio(net_income?, revenue?).map(|r| round2(r * 100.0))
}

/// Operating income as a percentage of revenue.
pub fn operating_margin(operating_income: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    ratio(operating_income?, revenue?).map(|r| round2(r * 100.0))
}

/// Net income per share.
pub fn eps(net_income: Option<f64>, shares_outstanding: Option<f64>) -> Option<f64> {
    ratio(net_income?, shares_outstanding?).map(round2)
}

/// Percentage change from the previous period's revenue.
pub fn revenue_growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    ratio(current - previous, previous).map(|r| round2(r * 100.0))
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profit_margin() {
        assert_eq!(profit_margin(Some(100.0), Some(1000.0)), Some(10.0));
        assert_eq!(profit_margin(Some(1.0), Some(3.0)), Some(33.33));
        assert_eq!(profit_margin(Some(2.0), Some(3.0)), Some(66.67));
        assert_eq!(profit_margin(Some(0.0), Some(500.0)), Some(0.0));
        assert_eq!(profit_margin(Some(100.0), Some(0.0)), None);
        assert_eq!(profit_margin(None, Some(1000.0)), None);
        assert_eq!(profit_margin(Some(100.0), None), None);
    }

    #[test]
    fn test_operating_margin() {
        assert_eq!(operating_margin(Some(150.0), Some(1000.0)), Some(15.0));
        assert_eq!(operating_margin(Some(-50.0), Some(400.0)), Some(-12.5));
        assert_eq!(operating_margin(Some(150.0), Some(0.0)), None);
    }

    #[test]
    fn test_eps() {
        assert_eq!(eps(Some(100.0), Some(50.0)), Some(2.0));
        assert_eq!(eps(Some(10.0), Some(3.0)), Some(3.33));
        assert_eq!(eps(Some(100.0), Some(0.0)), None);
        assert_eq!(eps(Some(100.0), None), None);
    }

    #[test]
    fn test_revenue_growth() {
        assert_eq!(revenue_growth(Some(1000.0), Some(800.0)), Some(25.0));
        assert_eq!(revenue_growth(Some(800.0), Some(1000.0)), Some(-20.0));
        assert_eq!(revenue_growth(Some(1000.0), Some(0.0)), None);
        assert_eq!(revenue_growth(None, Some(800.0)), None);
    }

    #[test]
    fn test_derive_all_absent() {
        assert_eq!(derive(&RawFacts::named("Acme")), DerivedMetrics::default());
    }

    #[test]
    fn test_derive_complete() {
        let facts = RawFacts {
            company_name: Some("Acme".to_string()),
            revenue: Some(1000.0),
            net_income: Some(100.0),
            operating_income: Some(150.0),
            shares_outstanding: Some(50.0),
            previous_revenue: Some(800.0),
        };
        assert_eq!(
            derive(&facts),
            DerivedMetrics {
                eps: Some(2.0),
                operating_margin: Some(15.0),
                profit_margin: Some(10.0),
                revenue_growth: Some(25.0),
            }
        );
    }
}
