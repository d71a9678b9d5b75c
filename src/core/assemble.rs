use crate::core::normalize::{classify_dangerous_goods, coerce_metric, normalize_incoterm};
use crate::core::port_reference::PortReference;
use crate::core::product_line::derive_product_line;
use crate::domain::model::{RawDraft, ShipmentRecord};

/// Builds the canonical record from an untrusted draft and the email text.
///
/// Total over its inputs: any malformed field degrades to absent or a safe
/// default, and an entirely empty draft still produces a valid record with
/// the id preserved, incoterm FOB, and the dangerous-goods flag computed from
/// the text alone.
pub fn assemble(
    id: &str,
    draft: &RawDraft,
    source_text: &str,
    reference: &PortReference,
) -> ShipmentRecord {
    let (origin_code, origin_name) = resolve_port(draft.origin_port_code.as_deref(), reference);
    let (destination_code, destination_name) =
        resolve_port(draft.destination_port_code.as_deref(), reference);

    // The code-prefix rule can come up empty (cross-trade, missing ports);
    // the draft's own guess is sometimes better informed, so it stands in
    // verbatim.
    let product_line = derive_product_line(origin_code.as_deref(), destination_code.as_deref())
        .map(str::to_string)
        .or_else(|| draft.product_line.clone().filter(|line| !line.is_empty()));

    ShipmentRecord {
        id: id.to_string(),
        product_line,
        origin_port_code: origin_code,
        origin_port_name: origin_name,
        destination_port_code: destination_code,
        destination_port_name: destination_name,
        incoterm: normalize_incoterm(draft.incoterm.as_deref()),
        cargo_weight_kg: coerce_metric(&draft.cargo_weight_kg),
        cargo_cbm: coerce_metric(&draft.cargo_cbm),
        is_dangerous: classify_dangerous_goods(source_text),
    }
}

/// Uppercases the drafted code and validates it against the reference. The
/// name always comes from the reference, never from the draft; an unresolved
/// code nulls both sides together.
fn resolve_port(
    raw_code: Option<&str>,
    reference: &PortReference,
) -> (Option<String>, Option<String>) {
    let Some(raw) = raw_code else {
        return (None, None);
    };

    let code = raw.to_uppercase();
    match reference.lookup(&code) {
        Some(name) => (Some(code), Some(name.to_string())),
        None => (None, None),
    }
}
