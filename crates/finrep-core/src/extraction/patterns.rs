//! Regex patterns for locating structured data and financial figures in
//! model responses and report text.

use lazy_static::lazy_static;
use regex::Regex;

/// Separator between a label and its amount: punctuation and markdown bold.
/// Letters are not allowed so that "Revenue growth: 12%" does not read as
/// revenue. A dash only separates when followed by whitespace; "-50" keeps
/// its sign.
const SEP: &str = r#"[\s:*=|"'–—]*(?:-\s+)?"#;

/// Optional leading minus (group `neg`), currency marker and an amount
/// with optional thousands separators (group `amount`, which may carry its
/// own sign as in "$-50").
const AMOUNT: &str =
    r"(?P<neg>-)?\s*(?:USD|US\$|\$|€|£)?\s*(?P<amount>-?(?:\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?))";

fn labeled_amount(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{label}{SEP}{AMOUNT}")).unwrap()
}

lazy_static! {
    // Structured blocks
    pub static ref FENCED_BLOCK: Regex = Regex::new(
        r"(?s)```[ \t]*(?:[A-Za-z]+)?[ \t]*\r?\n?(.*?)```"
    ).unwrap();

    /// Brace-delimited object allowing one level of nested braces.
    pub static ref BARE_OBJECT: Regex = Regex::new(
        r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}"
    ).unwrap();

    /// First numeric token in a free-form value ("$1,234.5 million").
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"-?\d[\d,]*(?:\.\d+)?|-?\.\d+"
    ).unwrap();

    // Revenue
    pub static ref REVENUE: Vec<Regex> = vec![
        labeled_amount(r"(?:total\s+)?(?:net\s+)?revenues?"),
        labeled_amount(r"(?:total\s+)?net\s+sales"),
        labeled_amount(r"turnover"),
    ];

    /// Qualifiers that turn a revenue label into a previous-period one.
    pub static ref PRIOR_PERIOD_QUALIFIER: Regex = Regex::new(
        r"(?i)(?:previous|prior|last|year[\s-]ago)[\s\-]*(?:(?:fiscal\s+)?(?:period|year|quarter)(?:'s)?[\s\-]*)?$"
    ).unwrap();

    // Net income
    pub static ref NET_INCOME: Vec<Regex> = vec![
        labeled_amount(r"net\s+(?:income|profit|earnings)"),
        labeled_amount(r"profit\s+(?:after\s+tax|for\s+the\s+(?:period|year|quarter))"),
    ];

    // Operating income
    pub static ref OPERATING_INCOME: Vec<Regex> = vec![
        labeled_amount(r"operating\s+(?:income|profit)"),
        labeled_amount(r"(?:income|profit)\s+from\s+operations"),
    ];

    // Previous period revenue
    pub static ref PREVIOUS_REVENUE: Vec<Regex> = vec![
        labeled_amount(
            r"(?:previous|prior|last)[\s\-]+(?:(?:fiscal\s+)?(?:period|year|quarter)(?:'s)?[\s\-]+)?revenues?"
        ),
        labeled_amount(r"revenues?\s*\((?:previous|prior)[^)\n]*\)"),
        labeled_amount(r"year[\s-]ago\s+revenues?"),
    ];

    // Shares outstanding
    pub static ref SHARES_OUTSTANDING: Vec<Regex> = vec![
        labeled_amount(r"shares\s+outstanding"),
        labeled_amount(r"outstanding\s+shares"),
        labeled_amount(r"(?:weighted[\s-]+average\s+)?(?:diluted\s+|basic\s+)?(?:common\s+)?shares"),
    ];

    // Company name as stated by the model
    pub static ref RESPONSE_COMPANY: Vec<Regex> = vec![
        Regex::new(
            r"(?im)^[\s\-*•]*(?:\*\*)?company(?:\s+name)?(?:\*\*)?\s*[:\-–]\s*(?:\*\*)?([^\n*]+?)\s*(?:\*\*)?\s*$"
        ).unwrap(),
        Regex::new(
            r#"\b(?i:company)(?:\s+(?i:name))?\s*(?:is|:)\s*"?([A-Z][A-Za-z0-9&.'\- ]{0,60}[A-Za-z0-9.])"#
        ).unwrap(),
    ];

    // Company name as it appears in the report itself
    pub static ref SOURCE_COMPANY: Vec<Regex> = vec![
        Regex::new(
            r"\b((?:[A-Z][\w&'\-]*[ \t]+){1,3}(?:Inc\.|Inc\b|Incorporated\b|Corporation\b|Corp\.|Ltd\.|Limited\b|PLC\b|plc\b|LLC\b|Holdings\b|Group\b))"
        ).unwrap(),
        Regex::new(
            r"(?m)^[ \t]*([A-Z][\w&.'\- ]{0,60}?)[ \t]+(?:[Rr]eports|[Aa]nnounces)\b"
        ).unwrap(),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object_allows_one_nesting_level() {
        let text = r#"noise {"a": {"b": 1}, "c": 2} tail"#;
        let found = BARE_OBJECT.find(text).unwrap().as_str();
        assert_eq!(found, r#"{"a": {"b": 1}, "c": 2}"#);
    }

    #[test]
    fn test_fenced_block_with_tag() {
        let text = "Here:\n```json\n{\"revenue\": 1}\n```\nDone";
        let caps = FENCED_BLOCK.captures(text).unwrap();
        assert_eq!(caps[1].trim(), "{\"revenue\": 1}");
    }

    #[test]
    fn test_revenue_growth_is_not_revenue() {
        assert!(!REVENUE[0].is_match("Revenue growth: 12%"));
        assert!(REVENUE[0].is_match("- **Revenue**: $94,930"));
    }

    #[test]
    fn test_sign_is_not_a_separator() {
        let caps = NET_INCOME[0].captures("Net Income: -$50").unwrap();
        assert_eq!(caps.name("neg").map(|m| m.as_str()), Some("-"));
        assert_eq!(&caps["amount"], "50");

        let caps = NET_INCOME[0].captures("Net income - 50").unwrap();
        assert!(caps.name("neg").is_none());
        assert_eq!(&caps["amount"], "50");
    }

    #[test]
    fn test_prior_period_qualifier() {
        assert!(PRIOR_PERIOD_QUALIFIER.is_match("- Previous period "));
        assert!(PRIOR_PERIOD_QUALIFIER.is_match("Prior-year "));
        assert!(!PRIOR_PERIOD_QUALIFIER.is_match("- Total "));
    }
}
