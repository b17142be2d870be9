//! Pattern-based scraping of labeled figures from free text.

use regex::{Captures, Regex};

use super::patterns::{
    NET_INCOME, NUMBER_TOKEN, OPERATING_INCOME, PREVIOUS_REVENUE, PRIOR_PERIOD_QUALIFIER,
    RESPONSE_COMPANY, REVENUE, SHARES_OUTSTANDING, SOURCE_COMPANY,
};
use super::{is_placeholder_name, ExtractionStrategy};
use crate::models::RawFacts;

/// Last-resort strategy: ordered regex patterns per field.
///
/// Figures are only read from the model response; the company name is also
/// searched for in the report text. Always succeeds, possibly with every
/// field absent.
#[derive(Debug, Default)]
pub struct PatternScrapeStrategy;

impl ExtractionStrategy for PatternScrapeStrategy {
    fn name(&self) -> &'static str {
        "pattern_scrape"
    }

    fn extract(&self, response: &str, source: &str) -> Option<RawFacts> {
        Some(RawFacts {
            company_name: scrape_company(response, source),
            revenue: scrape_current_revenue(response),
            net_income: scrape_amount(&NET_INCOME, response),
            operating_income: scrape_amount(&OPERATING_INCOME, response),
            shares_outstanding: scrape_amount(&SHARES_OUTSTANDING, response),
            previous_revenue: scrape_amount(&PREVIOUS_REVENUE, response),
        })
    }
}

/// First amount captured by the first matching pattern.
fn scrape_amount(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|caps| labeled_value(&caps)))
}

/// Like [`scrape_amount`] but skips labels qualified as a prior period
/// ("Previous period revenue: 900" is not the current revenue).
fn scrape_current_revenue(text: &str) -> Option<f64> {
    REVENUE.iter().find_map(|re| {
        re.captures_iter(text).find_map(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
            if PRIOR_PERIOD_QUALIFIER.is_match(&text[line_start..start]) {
                return None;
            }
            labeled_value(&caps)
        })
    })
}

/// Value of a labeled amount match, negated when a
/// minus precedes the currency marker ("-$50").
fn labeled_value(caps: &Captures<'_>) -> Option<f64> {
    let value = parse_amount(caps.name("amount")?.as_str())?;
    if caps.name("neg").is_some() {
        Some(-value.abs())
    } else {
        Some(value)
    }
}

fn scrape_company(response: &str, source: &str) -> Option<String> {
    first_company(&RESPONSE_COMPANY, response).or_else(|| first_company(&SOURCE_COMPANY, source))
}

fn first_company(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures_iter(text)
            .find_map(|caps| clean_company(&caps[1]))
    })
}

fn clean_company(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | ',' | ';'))
        .trim();

    if name.is_empty() || is_placeholder_name(name) {
        None
    } else {
        Some(name.to_string())
    }
}

/// Parse a free-form amount such as "1,234", "$1,234.50" or "12.5 million".
///
/// Thousands separators are stripped; only the first numeric token counts.
/// Scale words are not applied.
pub fn parse_amount(text: &str) -> Option<f64> {
    let token = NUMBER_TOKEN.find(text)?;
    let cleaned: String = token.as_str().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scrape(response: &str, source: &str) -> RawFacts {
        PatternScrapeStrategy.extract(response, source).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234"), Some(1234.0));
        assert_eq!(parse_amount("$94,930.5"), Some(94930.5));
        assert_eq!(parse_amount("12.5 million"), Some(12.5));
        assert_eq!(parse_amount("-3.2"), Some(-3.2));
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_net_income_phrase() {
        let facts = scrape("The quarter closed with Net Income: $1,234 overall.", "");
        assert_eq!(facts.net_income, Some(1234.0));
    }

    #[test]
    fn test_negative_net_income() {
        assert_eq!(scrape("Net Income: -50", "").net_income, Some(-50.0));
        assert_eq!(scrape("Net Income: -$50", "").net_income, Some(-50.0));
        assert_eq!(scrape("Net Income: $-1,250.5", "").net_income, Some(-1250.5));
        assert_eq!(scrape("Operating income - 75", "").operating_income, Some(75.0));
    }

    #[test]
    fn test_markdown_list_response() {
        let response = "\
Here is what I found:
- **Company Name**: Apple Inc.
- **Revenue**: $94,930
- **Net Income**: $14,736
- **Operating Income**: $29,591
- **Shares Outstanding**: 15,408
- **Previous Period Revenue**: $89,498
";
        let facts = scrape(response, "");
        assert_eq!(
            facts,
            RawFacts {
                company_name: Some("Apple Inc.".to_string()),
                revenue: Some(94930.0),
                net_income: Some(14736.0),
                operating_income: Some(29591.0),
                shares_outstanding: Some(15408.0),
                previous_revenue: Some(89498.0),
            }
        );
    }

    #[test]
    fn test_previous_revenue_before_current() {
        let response = "Previous period revenue: 900\nRevenue: 1,000";
        let facts = scrape(response, "");
        assert_eq!(facts.revenue, Some(1000.0));
        assert_eq!(facts.previous_revenue, Some(900.0));
    }

    #[test]
    fn test_company_from_source_text() {
        let source = "FOURTH QUARTER RESULTS\nInitech Corporation today reported revenue of ...";
        let facts = scrape("no structured output", source);
        assert_eq!(facts.company_name.as_deref(), Some("Initech Corporation"));
    }

    #[test]
    fn test_placeholder_company_is_ignored() {
        let facts = scrape("Company Name: Not specified", "");
        assert_eq!(facts.company_name, None);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(scrape("I could not read the document.", ""), RawFacts::default());
    }
}
