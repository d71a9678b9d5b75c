use anyhow::Context;
use clap::Parser;
use shipment_etl::adapters::{chat::ChatOracle, mock::MockOracle};
use shipment_etl::config::settings::OracleSettings;
use shipment_etl::core::evaluate::{evaluate, DEFAULT_EVAL_FIELDS};
use shipment_etl::core::port_reference::PortReference;
use shipment_etl::core::ExtractionOracle;
use shipment_etl::domain::model::{PortEntry, ShipmentRecord};
use shipment_etl::utils::{logger, validation::Validate};
use shipment_etl::{CliConfig, EtlEngine, ExtractionPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting shipment-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match OracleSettings::load(&config.settings_path) {
        Ok(Some(settings)) => {
            tracing::info!("Applying settings from {}", config.settings_path);
            settings.apply(&mut config);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let entries = load_port_entries(&config.port_codes_path);
    let reference = PortReference::build(&entries);
    if reference.is_empty() {
        tracing::warn!("Port reference is empty; every extracted port code will be dropped");
    } else {
        tracing::info!("Loaded {} port codes", reference.len());
    }

    let api_key = config.api_key();
    let oracle: Box<dyn ExtractionOracle> = if config.mock || api_key.is_none() {
        if !config.mock {
            tracing::warn!("No API key configured; switching to the offline mock oracle");
        }
        Box::new(MockOracle::new(&entries, reference.clone()))
    } else {
        Box::new(ChatOracle::new(
            config.api_endpoint.clone(),
            api_key.unwrap_or_default(),
            config.model.clone(),
        ))
    };
    tracing::info!("Using {} oracle", oracle.name());

    let storage = LocalStorage::new(".".to_string());
    let pipeline = ExtractionPipeline::new(storage, config.clone(), oracle, reference);
    let engine = EtlEngine::new(pipeline);

    let output_path = match engine.run().await {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Extraction run failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    println!("Extraction complete. Results saved to {}", output_path);

    if config.evaluate {
        let predictions =
            load_records(&output_path).with_context(|| format!("reading {}", output_path))?;
        let ground_truth = match load_records(&config.ground_truth_path) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Could not load ground truth from {}: {}",
                    config.ground_truth_path,
                    e
                );
                Vec::new()
            }
        };

        let report = evaluate(&predictions, &ground_truth, &DEFAULT_EVAL_FIELDS);
        println!("{report}");
    }

    Ok(())
}

/// Missing or malformed reference files degrade to an empty list so every
/// later code validation fails closed instead of crashing the run.
fn load_port_entries(path: &str) -> Vec<PortEntry> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not read {}: {}; port validation disabled", path, e);
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Malformed port reference {}: {}; port validation disabled", path, e);
            Vec::new()
        }
    }
}

fn load_records(path: &str) -> anyhow::Result<Vec<ShipmentRecord>> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
