/// Extraction prompt sent to the chat oracle. `{subject}` and `{body}` are
/// filled per email.
const EXTRACTION_PROMPT: &str = r#"
You are an expert freight forwarding assistant. Your task is to extract structured shipment details from the email below, strictly following the business rules.

### Input Data
Ref: Port Codes = Use UN/LOCODE (5 chars, e.g., INMAA, HKHKG).

### Business Rules

1. **Product Line**:
   - `pl_sea_import_lcl` if Destination is India (UN/LOCODE starts with 'IN').
   - `pl_sea_export_lcl` if Origin is India (UN/LOCODE starts with 'IN').
   - Default/Context: All shipments are LCL.

2. **Ports**:
   - Identify Origin and Destination ports.
   - Return the 5-letter UN/LOCODE.
   - If a port is not found or ambiguous, return `null`.

3. **Incoterm**:
   - Allowed: FOB, CIF, CFR, EXW, DDP, DAP, FCA, CPT, CIP, DPU.
   - Default: `FOB` if missing, ambiguous, or invalid.
   - Conflict: Body < Subject (Body wins).

4. **Cargo**:
   - `cargo_weight_kg`: Number (kgs). Convert lbs (* 0.4536) or tonnes (* 1000).
   - `cargo_cbm`: Number (m3). Extract explicit volume. Do not calc from dims.
   - Round to 2 decimals.
   - "0" is 0.0. "TBD"/"N/A" is null.

5. **Dangerous Goods**:
   - `true` if email mentions: "DG", "hazardous", "Class <num>", "IMO", "IMDG".
   - `false` if email says: "non-hazardous", "non-DG", "not dangerous".
   - Default to `false`.

6. **General**:
   - If multiple shipments, extract the FIRST one.
   - Return valid JSON only.

### Output Schema
{
  "product_line": "string or null",
  "origin_port_code": "string or null",
  "origin_port_name": "string or null",
  "destination_port_code": "string or null",
  "destination_port_name": "string or null",
  "incoterm": "string",
  "cargo_weight_kg": number or null,
  "cargo_cbm": number or null,
  "is_dangerous": boolean
}

**Email:**
Subject: {subject}
Body: {body}

**JSON Response:**
"#;

pub fn render(subject: &str, body: &str) -> String {
    EXTRACTION_PROMPT
        .replace("{subject}", subject)
        .replace("{body}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_both_placeholders() {
        let prompt = render("Quote request", "500 kgs to Chennai");

        assert!(prompt.contains("Subject: Quote request"));
        assert!(prompt.contains("Body: 500 kgs to Chennai"));
        assert!(!prompt.contains("{subject}"));
        assert!(!prompt.contains("{body}"));
    }
}
