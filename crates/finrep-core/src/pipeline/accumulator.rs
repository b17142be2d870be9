//! Folding per-document facts into finalized company records.

use tracing::debug;

use crate::metrics::{derive, DerivedMetrics};
use crate::models::{CompanyMetrics, RawFacts};

impl CompanyMetrics {
    /// Combine a company name, its raw facts and derived ratios.
    pub fn from_parts(company_name: &str, facts: &RawFacts, derived: &DerivedMetrics) -> Self {
        Self {
            company_name: company_name.trim().to_string(),
            revenue: facts.revenue,
            net_income: facts.net_income,
            eps: derived.eps,
            operating_margin: derived.operating_margin,
            profit_margin: derived.profit_margin,
            revenue_growth: derived.revenue_growth,
        }
    }
}

/// Derive ratios for `facts` and build the finalized record.
///
/// A blank `company_name` is replaced by `fallback_company` so that every
/// record is identifiable.
pub fn company_record(company_name: &str, facts: &RawFacts, fallback_company: &str) -> CompanyMetrics {
    let name = if company_name.trim().is_empty() {
        fallback_company
    } else {
        company_name
    };
    CompanyMetrics::from_parts(name, facts, &derive(facts))
}

/// Append the finalized record for `facts`.
///
/// Records are never merged or deduplicated; two documents for the same
/// company produce two rows.
pub fn accumulate<'a>(
    records: &'a mut Vec<CompanyMetrics>,
    company_name: &str,
    facts: &RawFacts,
    fallback_company: &str,
) -> &'a CompanyMetrics {
    let record = company_record(company_name, facts, fallback_company);
    debug!("Recording metrics for {}", record.company_name);
    records.push(record);
    &records[records.len() - 1]
}
