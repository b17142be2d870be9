//! Ordered, first-success-wins combination of extraction strategies.

use tracing::debug;

use super::json::{BareJsonStrategy, FencedJsonStrategy};
use super::scrape::PatternScrapeStrategy;
use super::{company_name_from_path, ExtractionStrategy};
use crate::models::RawFacts;

/// Company name used when neither the response nor the path yields one.
pub const DEFAULT_FALLBACK_COMPANY: &str = "Unknown";

/// Ordered list of extraction strategies.
pub struct FactCascade {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    fallback_company: String,
}

impl FactCascade {
    /// Create a cascade from explicit strategies, tried in order.
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self {
            strategies,
            fallback_company: DEFAULT_FALLBACK_COMPANY.to_string(),
        }
    }

    /// Set the name used when no company name can be found at all.
    pub fn with_fallback_company(mut self, name: impl Into<String>) -> Self {
        self.fallback_company = name.into();
        self
    }

    /// Name used when no company name can be found at all.
    pub fn fallback_company(&self) -> &str {
        &self.fallback_company
    }

    /// Names of the configured strategies, in order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract facts, filling in the company name from `name_hint` if needed.
    pub fn extract(&self, response: &str, source: &str, name_hint: &str) -> RawFacts {
        self.extract_with_strategy(response, source, name_hint).0
    }

    /// Like [`FactCascade::extract`], also returning the name of the winning
    /// strategy (`None` if none applied).
    pub fn extract_with_strategy(
        &self,
        response: &str,
        source: &str,
        name_hint: &str,
    ) -> (RawFacts, Option<&'static str>) {
        let found = self
            .strategies
            .iter()
            .find_map(|s| s.extract(response, source).map(|facts| (facts, s.name())));

        let (mut facts, winner) = match found {
            Some((facts, name)) => {
                debug!("Extracted facts with {} strategy", name);
                (facts, Some(name))
            }
            None => {
                debug!("No extraction strategy applied");
                (RawFacts::default(), None)
            }
        };

        if !facts.has_company_name() {
            let name = company_name_from_path(name_hint)
                .unwrap_or_else(|| self.fallback_company.clone());
            debug!("Using company name {:?} from file name", name);
            facts.company_name = Some(name);
        }

        (facts, winner)
    }
}

impl Default for FactCascade {
    fn default() -> Self {
        Self::new(vec![
            Box::new(FencedJsonStrategy),
            Box::new(BareJsonStrategy),
            Box::new(PatternScrapeStrategy),
        ])
    }
}

impl std::fmt::Debug for FactCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactCascade")
            .field("strategies", &self.strategy_names())
            .field("fallback_company", &self.fallback_company)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OBJECT: &str = r#"{"company_name": "Acme", "revenue": 1000, "net_income": 100}"#;

    #[test]
    fn test_default_order() {
        assert_eq!(
            FactCascade::default().strategy_names(),
            vec!["fenced_json", "bare_json", "pattern_scrape"]
        );
    }

    #[test]
    fn test_fenced_and_bare_agree() {
        let cascade = FactCascade::default();
        let fenced = format!("Result:\n```json\n{OBJECT}\n```");
        let bare = format!("Result: {OBJECT}");

        let (from_fenced, s1) = cascade.extract_with_strategy(&fenced, "", "x.pdf");
        let (from_bare, s2) = cascade.extract_with_strategy(&bare, "", "x.pdf");

        assert_eq!(s1, Some("fenced_json"));
        assert_eq!(s2, Some("bare_json"));
        assert_eq!(from_fenced, from_bare);
    }

    #[test]
    fn test_fenced_block_wins_over_later_object() {
        let response = concat!(
            "```json\n{\"company_name\": \"Acme\", \"revenue\": 1000}\n```\n",
            "Also: {\"company_name\": \"Other\", \"revenue\": 5}"
        );
        let facts = FactCascade::default().extract(response, "", "x.pdf");
        assert_eq!(facts.company_name.as_deref(), Some("Acme"));
        assert_eq!(facts.revenue, Some(1000.0));
    }

    #[test]
    fn test_falls_through_to_scrape() {
        let (facts, winner) = FactCascade::default().extract_with_strategy(
            "Revenue: 1,500\nNet Income: 150",
            "",
            "data/initech_fy.pdf",
        );
        assert_eq!(winner, Some("pattern_scrape"));
        assert_eq!(facts.revenue, Some(1500.0));
        assert_eq!(facts.net_income, Some(150.0));
        assert_eq!(facts.company_name.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_blank_json_name_uses_hint() {
        let response = r#"{"company_name": "  ", "revenue": 10}"#;
        let facts = FactCascade::default().extract(response, "", "globex_q1.pdf");
        assert_eq!(facts.company_name.as_deref(), Some("Globex"));
    }

    #[test]
    fn test_placeholder_json_name_uses_hint() {
        let response = r#"{"company_name": "N/A", "revenue": 10}"#;
        let (facts, winner) =
            FactCascade::default().extract_with_strategy(response, "", "globex_q1.pdf");
        assert_eq!(winner, Some("bare_json"));
        assert_eq!(facts.company_name.as_deref(), Some("Globex"));
        assert_eq!(facts.revenue, Some(10.0));
    }

    #[test]
    fn test_empty_cascade_uses_fallback_company() {
        let cascade = FactCascade::new(Vec::new()).with_fallback_company("N/A Corp");
        let (facts, winner) = cascade.extract_with_strategy("{}", "", "");
        assert_eq!(winner, None);
        assert_eq!(facts, RawFacts::named("N/A Corp"));
        assert_eq!(cascade.fallback_company(), "N/A Corp");
    }
}
