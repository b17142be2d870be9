//! Extraction prompt construction.

/// Default number of report characters included in the prompt.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 10_000;

const INSTRUCTIONS: &str = "\
You are a financial analyst. Analyse the following earnings report.

Extract the following information:
- Company name
- Revenue (total revenue or net sales)
- Net income / net profit
- Operating income
- Shares outstanding
- Previous period revenue

Respond with a single JSON object in a ```json code block using exactly
these keys: company_name, revenue, net_income, operating_income,
shares_outstanding, previous_revenue.
Amounts and share counts are plain numbers in millions, without currency
symbols or thousands separators. Use null for anything the report does
not state.";

/// Build the extraction prompt for a report, including at most
/// `max_chars` characters of its text.
pub fn build_prompt(text: &str, max_chars: usize) -> String {
    format!(
        "{INSTRUCTIONS}\n\nText from earnings report:\n{}\n",
        truncate_chars(text, max_chars)
    )
}

/// The first `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("€1,000 revenue", 2), "€1");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_prompt_contains_truncated_text() {
        let text = "x".repeat(50);
        let prompt = build_prompt(&text, 10);

        assert!(prompt.contains(&format!("\n{}\n", "x".repeat(10))));
        assert!(!prompt.contains(&"x".repeat(11)));
        assert!(prompt.contains("previous_revenue"));
    }
}
