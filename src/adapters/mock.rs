use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use crate::core::normalize::VALID_INCOTERMS;
use crate::core::port_reference::PortReference;
use crate::core::product_line::{SEA_EXPORT_LCL, SEA_IMPORT_LCL};
use crate::domain::model::{Email, PortEntry, RawDraft};
use crate::domain::ports::ExtractionOracle;
use crate::utils::error::Result;

/// Offline stand-in for the chat oracle: pure regex extraction over the email
/// text. Deterministic, infallible, used when no API key is configured or
/// `--mock` is passed.
pub struct MockOracle {
    reference: PortReference,
    // (surface form, code): codes, full names, and '/'-split name aliases
    search_patterns: Vec<(String, String)>,
}

impl MockOracle {
    /// Built from the raw reference rows rather than the resolved map so
    /// alias names that lost the duplicate resolution still match in text.
    pub fn new(entries: &[PortEntry], reference: PortReference) -> Self {
        let mut search_patterns = Vec::new();
        for entry in entries {
            let (Some(code), Some(name)) = (&entry.code, &entry.name) else {
                continue;
            };
            search_patterns.push((code.clone(), code.clone()));
            search_patterns.push((name.clone(), code.clone()));
            if name.contains('/') {
                for part in name.split('/') {
                    let part = part.trim();
                    if part.len() > 2 {
                        search_patterns.push((part.to_string(), code.clone()));
                    }
                }
            }
        }

        Self {
            reference,
            search_patterns,
        }
    }

    /// Distinct port codes mentioned in the text, ordered by first position
    /// of any of their surface forms.
    fn scan_ports(&self, text: &str) -> Vec<String> {
        let mut hits: Vec<(usize, &String)> = Vec::new();
        for (surface, code) in &self.search_patterns {
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(surface))).unwrap();
            for found in pattern.find_iter(text) {
                hits.push((found.start(), code));
            }
        }
        hits.sort_by_key(|(position, _)| *position);

        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|(_, code)| seen.insert((*code).clone()))
            .map(|(_, code)| code.clone())
            .collect()
    }
}

#[async_trait]
impl ExtractionOracle for MockOracle {
    async fn extract(&self, email: &Email) -> Result<RawDraft> {
        let text = email.source_text();
        let text_lower = text.to_lowercase();

        let ports = self.scan_ports(&text);
        let india: Vec<&String> = ports.iter().filter(|c| c.starts_with("IN")).collect();
        let foreign: Vec<&String> = ports.iter().filter(|c| !c.starts_with("IN")).collect();

        // "import" beats "export" because company names often contain
        // "Export"
        let is_import = text_lower.contains("import");
        let is_export = text_lower.contains("export") && !is_import;

        let (origin_code, destination_code) = if !india.is_empty() && !foreign.is_empty() {
            if is_export {
                (Some(india[0].clone()), Some(foreign[0].clone()))
            } else {
                (Some(foreign[0].clone()), Some(india[0].clone()))
            }
        } else if ports.len() >= 2 {
            (Some(ports[0].clone()), Some(ports[1].clone()))
        } else if ports.len() == 1 {
            let code = ports[0].clone();
            if code.starts_with("IN") {
                if is_export {
                    (Some(code), None)
                } else {
                    (None, Some(code))
                }
            } else {
                (Some(code), None)
            }
        } else {
            (None, None)
        };

        let origin_name = origin_code
            .as_deref()
            .and_then(|code| self.reference.lookup(code))
            .map(str::to_string);
        let destination_name = destination_code
            .as_deref()
            .and_then(|code| self.reference.lookup(code))
            .map(str::to_string);

        let weight = first_figure(&text_lower, r"(\d+(?:,\d+)*(?:\.\d+)?)\s*(?:kgs?|gross weight|gw)");
        let cbm = first_figure(&text_lower, r"(\d+(?:,\d+)*(?:\.\d+)?)\s*(?:cbm|m3|vol)");

        let incoterm = VALID_INCOTERMS
            .iter()
            .find(|term| {
                Regex::new(&format!(r"(?i)\b{}\b", term))
                    .unwrap()
                    .is_match(&text)
            })
            .map(|term| term.to_string());

        let has_dg_keyword = Regex::new(r"\b(dg|dangerous|hazardous|imo|imdg|class \d)\b")
            .unwrap()
            .is_match(&text_lower);
        let has_negation = Regex::new(r"\b(non-dg|non-dangerous|non-hazardous)\b")
            .unwrap()
            .is_match(&text_lower);
        let is_dangerous = has_dg_keyword && !has_negation;

        let product_line = if text_lower.contains("export") {
            SEA_EXPORT_LCL
        } else {
            SEA_IMPORT_LCL
        };

        Ok(RawDraft {
            product_line: Some(product_line.to_string()),
            origin_port_code: origin_code,
            origin_port_name: origin_name,
            destination_port_code: destination_code,
            destination_port_name: destination_name,
            incoterm,
            cargo_weight_kg: weight.map(Value::from).unwrap_or(Value::Null),
            cargo_cbm: cbm.map(Value::from).unwrap_or(Value::Null),
            is_dangerous: Some(is_dangerous),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn first_figure(text: &str, pattern: &str) -> Option<f64> {
    let re = Regex::new(pattern).unwrap();
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> MockOracle {
        let entries = vec![
            PortEntry::new("INMAA", "Chennai ICD"),
            PortEntry::new("INMAA", "Chennai"),
            PortEntry::new("HKHKG", "Hong Kong"),
            PortEntry::new("NLRTM", "Rotterdam / Europoort"),
        ];
        let reference = PortReference::build(&entries);
        MockOracle::new(&entries, reference)
    }

    fn email(subject: &str, body: &str) -> Email {
        Email {
            id: "e1".to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_import_assigns_foreign_origin_and_indian_destination() {
        let draft = oracle()
            .extract(&email(
                "Import quote",
                "Shipment from Hong Kong to Chennai, 500 kgs, 2.5 cbm, CIF terms.",
            ))
            .await
            .unwrap();

        assert_eq!(draft.origin_port_code.as_deref(), Some("HKHKG"));
        assert_eq!(draft.origin_port_name.as_deref(), Some("Hong Kong"));
        assert_eq!(draft.destination_port_code.as_deref(), Some("INMAA"));
        assert_eq!(draft.incoterm.as_deref(), Some("CIF"));
        assert_eq!(draft.cargo_weight_kg, serde_json::json!(500.0));
        assert_eq!(draft.cargo_cbm, serde_json::json!(2.5));
        assert_eq!(draft.product_line.as_deref(), Some(SEA_IMPORT_LCL));
    }

    #[tokio::test]
    async fn test_export_keyword_flips_assignment() {
        let draft = oracle()
            .extract(&email(
                "Export booking",
                "Cargo ex Chennai for Hong Kong, FOB.",
            ))
            .await
            .unwrap();

        assert_eq!(draft.origin_port_code.as_deref(), Some("INMAA"));
        assert_eq!(draft.destination_port_code.as_deref(), Some("HKHKG"));
        assert_eq!(draft.product_line.as_deref(), Some(SEA_EXPORT_LCL));
    }

    #[tokio::test]
    async fn test_alias_part_matches_after_slash_split() {
        let draft = oracle()
            .extract(&email("Quote", "Pickup near Europoort, delivery Chennai."))
            .await
            .unwrap();

        assert_eq!(draft.origin_port_code.as_deref(), Some("NLRTM"));
        assert_eq!(draft.destination_port_code.as_deref(), Some("INMAA"));
    }

    #[tokio::test]
    async fn test_comma_grouped_weight_parses() {
        let draft = oracle()
            .extract(&email("Quote", "Total 12,500.5 kgs general cargo."))
            .await
            .unwrap();

        assert_eq!(draft.cargo_weight_kg, serde_json::json!(12500.5));
    }

    #[tokio::test]
    async fn test_dangerous_goods_negation_wins() {
        let positive = oracle()
            .extract(&email("DG shipment", "IMO class 3 paint."))
            .await
            .unwrap();
        let negated = oracle()
            .extract(&email("Quote", "Cargo is non-hazardous."))
            .await
            .unwrap();

        assert_eq!(positive.is_dangerous, Some(true));
        assert_eq!(negated.is_dangerous, Some(false));
    }

    #[tokio::test]
    async fn test_no_ports_found_leaves_codes_absent() {
        let draft = oracle()
            .extract(&email("Quote", "Rate request for general cargo."))
            .await
            .unwrap();

        assert_eq!(draft.origin_port_code, None);
        assert_eq!(draft.destination_port_code, None);
    }
}
