use serde::{Deserialize, Serialize};

/// One email from the input file. Subject and body default to empty so a
/// record that only carries an id still parses.
#[derive(Debug, Clone, Deserialize)]
pub struct Email {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

impl Email {
    /// Subject and body concatenated; the text the dangerous-goods
    /// classifier and the mock oracle scan.
    pub fn source_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}

/// Untrusted structured guess coming back from an extraction oracle.
///
/// Every field is optional and nothing is validated here: port codes may be
/// lowercase or invalid, cargo metrics may arrive as strings, the boolean may
/// be missing. `Default` is the all-absent draft the pipeline falls back to
/// when the oracle fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawDraft {
    pub product_line: Option<String>,
    pub origin_port_code: Option<String>,
    pub origin_port_name: Option<String>,
    pub destination_port_code: Option<String>,
    pub destination_port_name: Option<String>,
    pub incoterm: Option<String>,
    pub cargo_weight_kg: serde_json::Value,
    pub cargo_cbm: serde_json::Value,
    pub is_dangerous: Option<bool>,
}

impl Default for RawDraft {
    fn default() -> Self {
        Self {
            product_line: None,
            origin_port_code: None,
            origin_port_name: None,
            destination_port_code: None,
            destination_port_name: None,
            incoterm: None,
            cargo_weight_kg: serde_json::Value::Null,
            cargo_cbm: serde_json::Value::Null,
            is_dangerous: None,
        }
    }
}

/// Canonical, schema-valid shipment record.
///
/// Invariant: a port name is present iff the matching code is present, and a
/// present code is always a key of the port reference the record was
/// assembled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: String,
    pub product_line: Option<String>,
    pub origin_port_code: Option<String>,
    pub origin_port_name: Option<String>,
    pub destination_port_code: Option<String>,
    pub destination_port_name: Option<String>,
    #[serde(default = "default_incoterm")]
    pub incoterm: String,
    pub cargo_weight_kg: Option<f64>,
    pub cargo_cbm: Option<f64>,
    #[serde(default)]
    pub is_dangerous: bool,
}

fn default_incoterm() -> String {
    "FOB".to_string()
}

/// One row of the raw port reference file. Rows with a missing code or name
/// are skipped during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortEntry {
    pub code: Option<String>,
    pub name: Option<String>,
}

impl PortEntry {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
        }
    }
}
