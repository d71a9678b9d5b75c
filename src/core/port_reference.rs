use std::collections::HashMap;

use crate::domain::model::PortEntry;

/// Disambiguation rule for a code whose first-listed reference name is known
/// to be wrong. Kept as data so new bad rows are an entry here, not a code
/// change.
struct NameOverride {
    code: &'static str,
    prefer_containing: &'static str,
    reject_containing: &'static str,
}

// INMAA appears in the reference as "Bangalore ICD" before its real Chennai
// entries.
const NAME_OVERRIDES: &[NameOverride] = &[NameOverride {
    code: "INMAA",
    prefer_containing: "Chennai",
    reject_containing: "Bangalore",
}];

/// Immutable mapping from UN/LOCODE to canonical port name, built once at
/// startup and shared read-only for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct PortReference {
    ports: HashMap<String, String>,
}

impl PortReference {
    /// Collapses the raw reference rows into one canonical name per code.
    ///
    /// Rows missing a code or name are skipped. Duplicate codes keep their
    /// first-seen name unless an override rule selects a better one.
    pub fn build(entries: &[PortEntry]) -> Self {
        let mut names_by_code: HashMap<&str, Vec<&str>> = HashMap::new();
        for entry in entries {
            let (Some(code), Some(name)) = (&entry.code, &entry.name) else {
                continue;
            };
            names_by_code
                .entry(code.as_str())
                .or_default()
                .push(name.as_str());
        }

        let mut ports = HashMap::with_capacity(names_by_code.len());
        for (code, names) in names_by_code {
            ports.insert(code.to_string(), select_name(code, &names).to_string());
        }

        Self { ports }
    }

    /// `None` for unknown codes, which is distinct from a legitimately empty
    /// name.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.ports.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

fn select_name<'a>(code: &str, names: &[&'a str]) -> &'a str {
    if let Some(rule) = NAME_OVERRIDES.iter().find(|r| r.code == code) {
        if let Some(name) = names
            .iter()
            .find(|n| n.contains(rule.prefer_containing) && !n.contains(rule.reject_containing))
        {
            tracing::debug!("Override applied for {}: selected '{}'", code, name);
            return name;
        }
    }
    names[0]
}
