//! JSON-based extraction strategies.
//!
//! Models are asked for a JSON object but routinely wrap it in prose, in a
//! code fence, or use slightly different key names. Both strategies here
//! locate a candidate object and map it leniently onto [`RawFacts`].

use serde_json::{Map, Value};
use tracing::trace;

use super::patterns::{BARE_OBJECT, FENCED_BLOCK};
use super::scrape::parse_amount;
use super::{is_placeholder_name, ExtractionStrategy};
use crate::models::RawFacts;

const COMPANY_KEYS: &[&str] = &["companyname", "company", "name", "issuer"];
const REVENUE_KEYS: &[&str] = &[
    "revenue",
    "totalrevenue",
    "revenues",
    "netsales",
    "totalnetsales",
    "sales",
];
const NET_INCOME_KEYS: &[&str] = &["netincome", "netprofit", "netearnings", "profit"];
const OPERATING_INCOME_KEYS: &[&str] = &[
    "operatingincome",
    "operatingprofit",
    "incomefromoperations",
];
const SHARES_KEYS: &[&str] = &[
    "sharesoutstanding",
    "outstandingshares",
    "shares",
    "dilutedshares",
    "weightedaverageshares",
];
const PREVIOUS_REVENUE_KEYS: &[&str] = &[
    "previousrevenue",
    "priorrevenue",
    "previousperiodrevenue",
    "priorperiodrevenue",
    "previousyearrevenue",
    "prioryearrevenue",
    "lastyearrevenue",
];

/// Parses the content of a fenced code block.
#[derive(Debug, Default)]
pub struct FencedJsonStrategy;

impl ExtractionStrategy for FencedJsonStrategy {
    fn name(&self) -> &'static str {
        "fenced_json"
    }

    fn extract(&self, response: &str, _source: &str) -> Option<RawFacts> {
        FENCED_BLOCK
            .captures_iter(response)
            .find_map(|caps| facts_from_json(caps[1].trim()))
    }
}

/// Parses the first brace-delimited object found anywhere in the response.
#[derive(Debug, Default)]
pub struct BareJsonStrategy;

impl ExtractionStrategy for BareJsonStrategy {
    fn name(&self) -> &'static str {
        "bare_json"
    }

    fn extract(&self, response: &str, _source: &str) -> Option<RawFacts> {
        BARE_OBJECT
            .find_iter(response)
            .find_map(|m| facts_from_json(m.as_str()))
    }
}

/// Parse `text` as a JSON object and map its fields onto [`RawFacts`].
///
/// Returns `None` only when `text` is not a well-formed JSON object.
/// Unrecognized keys and unparseable values are ignored.
pub fn facts_from_json(text: &str) -> Option<RawFacts> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            trace!("Candidate is not valid JSON: {}", e);
            return None;
        }
    };

    let object = value.as_object()?;
    let fields = FieldIndex::new(object);

    Some(RawFacts {
        company_name: fields.lookup(COMPANY_KEYS).and_then(json_text),
        revenue: fields.lookup(REVENUE_KEYS).and_then(json_amount),
        net_income: fields.lookup(NET_INCOME_KEYS).and_then(json_amount),
        operating_income: fields.lookup(OPERATING_INCOME_KEYS).and_then(json_amount),
        shares_outstanding: fields.lookup(SHARES_KEYS).and_then(json_amount),
        previous_revenue: fields.lookup(PREVIOUS_REVENUE_KEYS).and_then(json_amount),
    })
}

/// Nested objects whose fields are read as if they were top-level. Any other
/// nested object, such as a per-period breakdown under `"q4_2025"`, is
/// ignored.
const SECTION_KEYS: &[&str] = &[
    "financials",
    "financialdata",
    "financialmetrics",
    "keyfinancials",
    "keymetrics",
    "metrics",
    "figures",
    "data",
    "results",
];

/// Normalized view over an object's keys, including known sections.
struct FieldIndex<'a> {
    entries: Vec<(String, &'a Value)>,
}

impl<'a> FieldIndex<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        let mut entries: Vec<(String, &'a Value)> = object
            .iter()
            .map(|(k, v)| (normalize_key(k), v))
            .collect();

        // Top-level keys win over nested ones.
        let nested: Vec<(String, &'a Value)> = object
            .iter()
            .filter(|(k, _)| SECTION_KEYS.contains(&normalize_key(k).as_str()))
            .filter_map(|(_, v)| v.as_object())
            .flat_map(|inner| inner.iter().map(|(k, v)| (normalize_key(k), v)))
            .collect();
        entries.extend(nested);

        Self { entries }
    }

    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| {
            self.entries
                .iter()
                .find(|(k, v)| k == key && !v.is_null() && !v.is_object())
                .map(|(_, v)| *v)
        })
    }
}

/// "Company Name", "company_name" and "companyName" all become "companyname".
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn json_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() && !is_placeholder_name(s) => {
            Some(s.trim().to_string())
        }
        _ => None,
    }
}
