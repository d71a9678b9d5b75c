pub mod settings;
pub mod storage;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "shipment-etl")]
#[command(about = "Extracts structured shipment details from freight-forwarding emails")]
pub struct CliConfig {
    #[arg(long, default_value = "emails_input.json")]
    pub emails_path: String,

    #[arg(long, default_value = "port_codes_reference.json")]
    pub port_codes_path: String,

    #[arg(long, default_value = "output.json")]
    pub output_path: String,

    #[arg(long, default_value = "ground_truth.json")]
    pub ground_truth_path: String,

    #[arg(long, help = "Score the output against the ground-truth file after the run")]
    pub evaluate: bool,

    #[arg(long, help = "Use the offline regex oracle instead of the chat API")]
    pub mock: bool,

    #[arg(long, default_value = "https://api.groq.com/openai/v1")]
    pub api_endpoint: String,

    #[arg(long, default_value = "llama-3.1-70b-versatile")]
    pub model: String,

    #[arg(long, help = "API key for the chat oracle; falls back to GROQ_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long, default_value = "400", help = "Pause between oracle calls")]
    pub request_delay_ms: u64,

    #[arg(long, default_value = "shipment-etl.toml")]
    pub settings_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Explicit flag first, then the GROQ_API_KEY environment variable.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl ConfigProvider for CliConfig {
    fn emails_path(&self) -> &str {
        &self.emails_path
    }

    fn port_codes_path(&self) -> &str {
        &self.port_codes_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn ground_truth_path(&self) -> &str {
        &self.ground_truth_path
    }

    fn request_delay_ms(&self) -> u64 {
        self.request_delay_ms
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("emails_path", &self.emails_path)?;
        validation::validate_path("port_codes_path", &self.port_codes_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_path("ground_truth_path", &self.ground_truth_path)?;
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("request_delay_ms", self.request_delay_ms, 0, 60_000)?;
        Ok(())
    }
}
