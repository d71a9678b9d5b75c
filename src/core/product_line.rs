pub const SEA_IMPORT_LCL: &str = "pl_sea_import_lcl";
pub const SEA_EXPORT_LCL: &str = "pl_sea_export_lcl";

/// Derives the product line from validated port codes: an Indian destination
/// is an import, an Indian origin an export. Destination is checked first, so
/// a shipment between two Indian ports classifies as an import rather than a
/// conflict. Neither side Indian (or codes missing) yields `None` and the
/// caller applies its fallback.
pub fn derive_product_line(
    origin_code: Option<&str>,
    destination_code: Option<&str>,
) -> Option<&'static str> {
    if destination_code.is_some_and(|code| code.starts_with("IN")) {
        return Some(SEA_IMPORT_LCL);
    }
    if origin_code.is_some_and(|code| code.starts_with("IN")) {
        return Some(SEA_EXPORT_LCL);
    }
    None
}
