use regex::Regex;
use serde_json::Value;

/// The restricted incoterm vocabulary. Anything else normalizes to FOB.
pub const VALID_INCOTERMS: [&str; 10] = [
    "FOB", "CIF", "CFR", "EXW", "DDP", "DAP", "FCA", "CPT", "CIP", "DPU",
];

/// Negative dangerous-goods markers. These win over any positive signal.
const NEGATIVE_DG_MARKERS: [&str; 4] = ["non-hazardous", "non-dg", "not dangerous", "non hazardous"];

pub fn normalize_incoterm(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "FOB".to_string();
    };

    let upper = raw.trim().to_uppercase();
    if VALID_INCOTERMS.contains(&upper.as_str()) {
        upper
    } else {
        "FOB".to_string()
    }
}

/// Decides the dangerous-goods flag from the email text alone; whatever the
/// oracle guessed is not consulted. No signal at all is a confident false.
pub fn classify_dangerous_goods(text: &str) -> bool {
    let text = text.to_lowercase();

    if NEGATIVE_DG_MARKERS.iter().any(|m| text.contains(m)) {
        return false;
    }

    let positive = Regex::new(r"\b(?:dg|imo|imdg)\b|dangerous|hazardous|class\s*\d").unwrap();
    positive.is_match(&text)
}

/// Coerces a loosely-typed cargo metric (number or numeric string) into a
/// 2-decimal float. Nulls, parse failures, and non-finite values all come
/// back as `None`.
pub fn coerce_metric(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if !parsed.is_finite() {
        return None;
    }
    Some(round2(parsed))
}

/// Rounds to 2 decimal places, half away from zero (`f64::round` semantics).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalized form used for exact-match field comparison: absent values
/// become the sentinel "NULL", everything else is trimmed and uppercased so
/// that `null` and a textual "null" compare consistently.
pub fn comparison_key(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.trim().to_uppercase(),
        other => other.to_string().to_uppercase(),
    }
}

/// Float equality at 2-decimal precision. Both-absent is equal, one-absent
/// is not.
pub fn float_eq_2dp(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => round2(a) == round2(b),
        _ => false,
    }
}
