use async_trait::async_trait;
use clap::Parser;
use serde_json::json;
use shipment_etl::adapters::mock::MockOracle;
use shipment_etl::core::port_reference::PortReference;
use shipment_etl::core::{ExtractionOracle, Pipeline};
use shipment_etl::domain::model::{Email, PortEntry, RawDraft, ShipmentRecord};
use shipment_etl::utils::error::{ExtractError, Result};
use shipment_etl::{CliConfig, EtlEngine, ExtractionPipeline, LocalStorage};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &serde_json::Value) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(content).unwrap()).unwrap();
    path.to_str().unwrap().to_string()
}

fn port_entries() -> Vec<PortEntry> {
    vec![
        PortEntry::new("INMAA", "Bangalore ICD"),
        PortEntry::new("INMAA", "Chennai ICD"),
        PortEntry::new("INMAA", "Chennai"),
        PortEntry::new("HKHKG", "Hong Kong"),
    ]
}

fn config_for(dir: &TempDir, emails_path: &str, port_codes_path: &str) -> CliConfig {
    let output_path = dir.path().join("output.json").to_str().unwrap().to_string();
    CliConfig::parse_from([
        "shipment-etl",
        "--emails-path",
        emails_path,
        "--port-codes-path",
        port_codes_path,
        "--output-path",
        output_path.as_str(),
        "--request-delay-ms",
        "0",
        "--mock",
    ])
}

#[tokio::test]
async fn test_end_to_end_mock_extraction_run() {
    let temp_dir = TempDir::new().unwrap();

    let emails = json!([
        {
            "id": "email_001",
            "subject": "Import quote HKHKG to INMAA",
            "body": "Shipment from Hong Kong to Chennai, 500 kgs, CIF. Cargo is non-hazardous."
        },
        {
            "id": "email_002",
            "subject": "Rate request",
            "body": "General cargo, no route decided yet."
        }
    ]);
    let emails_path = write_fixture(&temp_dir, "emails_input.json", &emails);

    let ports = json!([
        {"code": "INMAA", "name": "Bangalore ICD"},
        {"code": "INMAA", "name": "Chennai ICD"},
        {"code": "INMAA", "name": "Chennai"},
        {"code": "HKHKG", "name": "Hong Kong"}
    ]);
    let ports_path = write_fixture(&temp_dir, "port_codes_reference.json", &ports);

    let config = config_for(&temp_dir, &emails_path, &ports_path);
    let output_path = config.output_path.clone();

    let entries = port_entries();
    let reference = PortReference::build(&entries);
    let oracle = Box::new(MockOracle::new(&entries, reference.clone()));

    let storage = LocalStorage::new(".".to_string());
    let pipeline = ExtractionPipeline::new(storage, config, oracle, reference);
    let engine = EtlEngine::new(pipeline);

    let result_path = engine.run().await.unwrap();
    assert_eq!(result_path, output_path);

    let written = std::fs::read(&output_path).unwrap();
    let records: Vec<ShipmentRecord> = serde_json::from_slice(&written).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.id, "email_001");
    assert_eq!(first.origin_port_code.as_deref(), Some("HKHKG"));
    assert_eq!(first.origin_port_name.as_deref(), Some("Hong Kong"));
    assert_eq!(first.destination_port_code.as_deref(), Some("INMAA"));
    // the known-bad Bangalore row loses to the Chennai entry
    assert_eq!(first.destination_port_name.as_deref(), Some("Chennai ICD"));
    assert_eq!(first.product_line.as_deref(), Some("pl_sea_import_lcl"));
    assert_eq!(first.incoterm, "CIF");
    assert_eq!(first.cargo_weight_kg, Some(500.0));
    assert!(!first.is_dangerous);

    let second = &records[1];
    assert_eq!(second.id, "email_002");
    assert_eq!(second.origin_port_code, None);
    assert_eq!(second.origin_port_name, None);
    assert_eq!(second.incoterm, "FOB");
    assert!(!second.is_dangerous);
}

struct FailingOracle;

#[async_trait]
impl ExtractionOracle for FailingOracle {
    async fn extract(&self, _email: &Email) -> Result<RawDraft> {
        Err(ExtractError::OracleError {
            message: "oracle unreachable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn test_oracle_failure_still_produces_records_for_every_email() {
    let temp_dir = TempDir::new().unwrap();

    let emails = json!([
        {"id": "email_001", "subject": "DG cargo", "body": "IMO class 3"},
        {"id": "email_002", "subject": "Plain cargo", "body": "nothing special"}
    ]);
    let emails_path = write_fixture(&temp_dir, "emails_input.json", &emails);
    let ports_path = write_fixture(&temp_dir, "port_codes_reference.json", &json!([]));

    let config = config_for(&temp_dir, &emails_path, &ports_path);
    let output_path = config.output_path.clone();

    let pipeline = ExtractionPipeline::new(
        LocalStorage::new(".".to_string()),
        config,
        Box::new(FailingOracle),
        PortReference::default(),
    );
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let written = std::fs::read(&output_path).unwrap();
    let records: Vec<ShipmentRecord> = serde_json::from_slice(&written).unwrap();
    assert_eq!(records.len(), 2);

    // ids survive, everything else degrades to safe defaults
    assert_eq!(records[0].id, "email_001");
    assert_eq!(records[0].incoterm, "FOB");
    assert_eq!(records[0].cargo_weight_kg, None);
    assert!(records[0].is_dangerous); // from the email text, not the oracle
    assert_eq!(records[1].id, "email_002");
    assert!(!records[1].is_dangerous);
}

#[tokio::test]
async fn test_missing_email_file_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let ports_path = write_fixture(&temp_dir, "port_codes_reference.json", &json!([]));
    let missing = temp_dir
        .path()
        .join("no_such_file.json")
        .to_str()
        .unwrap()
        .to_string();

    let config = config_for(&temp_dir, &missing, &ports_path);
    let entries = port_entries();
    let reference = PortReference::build(&entries);
    let pipeline = ExtractionPipeline::new(
        LocalStorage::new(".".to_string()),
        config,
        Box::new(MockOracle::new(&entries, reference.clone())),
        reference,
    );

    assert!(pipeline.extract().await.is_err());
}
