//! Structured fact extraction from model responses.
//!
//! The model is asked for a JSON object, but its output is not trusted to
//! be well-formed. A [`FactCascade`] tries several strategies in order and
//! keeps the first result:
//!
//! 1. a fenced code block parsed as JSON,
//! 2. the first brace-delimited object parsed as JSON,
//! 3. labeled figures scraped with regex patterns.
//!
//! Extraction never fails; unknown figures stay `None`.

mod cascade;
mod json;
pub mod patterns;
mod prompt;
mod scrape;

pub use cascade::{FactCascade, DEFAULT_FALLBACK_COMPANY};
pub use json::{facts_from_json, BareJsonStrategy, FencedJsonStrategy};
pub use prompt::{build_prompt, truncate_chars, DEFAULT_MAX_PROMPT_CHARS};
pub use scrape::{parse_amount, PatternScrapeStrategy};

use std::path::Path;

use crate::models::RawFacts;

/// A single way of turning a model response into [`RawFacts`].
///
/// Returns `None` when the strategy does not apply to the response, which
/// lets the cascade move on to the next one. Implementations must not panic.
pub trait ExtractionStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Attempt extraction. `source` is the document text the response was
    /// produced from.
    fn extract(&self, response: &str, source: &str) -> Option<RawFacts>;
}

/// Run the default cascade over a model response.
///
/// A missing or blank company name is derived from `name_hint` (usually the
/// document path).
pub fn extract_facts(response: &str, source: &str, name_hint: &str) -> RawFacts {
    FactCascade::default().extract(response, source, name_hint)
}

/// Company name guessed from a document path.
///
/// Uses the file stem up to the first underscore, title-cased:
/// `data/acme_q4_2025.pdf` becomes `Acme`. Returns `None` when nothing
/// usable remains.
pub fn company_name_from_path(path: &str) -> Option<String> {
    let stem = Path::new(path).file_stem()?.to_str()?;
    let token = stem.split('_').next().unwrap_or(stem).trim();
    if token.is_empty() {
        return None;
    }
    Some(title_case(token))
}

/// Values models put in place of a name they could not find: "N/A",
/// "Unknown", "Not specified" and the like.
pub(crate) fn is_placeholder_name(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    matches!(
        lower.as_str(),
        "n/a" | "na" | "none" | "null" | "unknown" | "-" | "?"
    ) || lower.starts_with("not ")
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_company_name_from_path() {
        assert_eq!(
            company_name_from_path("data/inputs/acme_q4_2025.pdf").as_deref(),
            Some("Acme")
        );
        assert_eq!(company_name_from_path("GLOBEX.pdf").as_deref(), Some("Globex"));
        assert_eq!(
            company_name_from_path("/tmp/wayne-enterprises_fy24.pdf").as_deref(),
            Some("Wayne-Enterprises")
        );
        assert_eq!(company_name_from_path("_q4.pdf"), None);
        assert_eq!(company_name_from_path(""), None);
    }

    #[test]
    fn test_title_case_after_digits_and_apostrophes() {
        assert_eq!(title_case("3m"), "3M");
        assert_eq!(title_case("o'reilly"), "O'Reilly");
    }

    #[test]
    fn test_placeholder_names() {
        assert!(is_placeholder_name("N/A"));
        assert!(is_placeholder_name(" unknown "));
        assert!(is_placeholder_name("Not disclosed"));
        assert!(!is_placeholder_name("Nokia"));
        assert!(!is_placeholder_name("Notion Labs"));
    }

    #[test]
    fn test_unusable_response_yields_only_a_name() {
        let facts = extract_facts("", "", "data/inputs/acme_q4_2025.pdf");
        assert_eq!(facts, RawFacts::named("Acme"));
    }
}
