use clap::Parser;
use shipment_etl::core::evaluate::{evaluate, DEFAULT_EVAL_FIELDS};
use shipment_etl::domain::model::ShipmentRecord;
use shipment_etl::utils::logger;

#[derive(Debug, Parser)]
#[command(name = "evaluate")]
#[command(about = "Scores extraction output against a ground-truth set")]
struct EvalArgs {
    #[arg(long, default_value = "output.json")]
    output_path: String,

    #[arg(long, default_value = "ground_truth.json")]
    ground_truth_path: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() {
    let args = EvalArgs::parse();
    logger::init_cli_logger(args.verbose);

    let predictions = load_records(&args.output_path);
    let ground_truth = load_records(&args.ground_truth_path);

    if predictions.is_empty() {
        println!("No output data found to evaluate.");
        return;
    }

    let report = evaluate(&predictions, &ground_truth, &DEFAULT_EVAL_FIELDS);
    println!("{report}");
}

/// A missing or malformed file is a warning and an empty list, not a crash;
/// the zero-total report that follows tells the same story.
fn load_records(path: &str) -> Vec<ShipmentRecord> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path, e);
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Malformed records in {}: {}", path, e);
            Vec::new()
        }
    }
}
