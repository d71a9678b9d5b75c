use std::time::Duration;

use crate::core::assemble::assemble;
use crate::core::port_reference::PortReference;
use crate::core::{ConfigProvider, Email, ExtractionOracle, Pipeline, RawDraft, ShipmentRecord, Storage};
use crate::utils::error::Result;

/// End-to-end extraction run over one email input file: read emails, get an
/// untrusted draft per email from the oracle, assemble canonical records,
/// write them out.
pub struct ExtractionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    oracle: Box<dyn ExtractionOracle>,
    reference: PortReference,
}

impl<S: Storage, C: ConfigProvider> ExtractionPipeline<S, C> {
    pub fn new(
        storage: S,
        config: C,
        oracle: Box<dyn ExtractionOracle>,
        reference: PortReference,
    ) -> Self {
        Self {
            storage,
            config,
            oracle,
            reference,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ExtractionPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Email>> {
        tracing::debug!("Reading emails from: {}", self.config.emails_path());
        let bytes = self.storage.read_file(self.config.emails_path()).await?;
        let emails: Vec<Email> = serde_json::from_slice(&bytes)?;
        Ok(emails)
    }

    async fn transform(&self, emails: Vec<Email>) -> Result<Vec<ShipmentRecord>> {
        let delay = Duration::from_millis(self.config.request_delay_ms());
        let mut records = Vec::with_capacity(emails.len());

        for (index, email) in emails.iter().enumerate() {
            let draft = match self.oracle.extract(email).await {
                Ok(draft) => draft,
                Err(e) => {
                    // one bad oracle response never aborts the run
                    tracing::warn!(
                        "Oracle failed for {}: {}; assembling from an empty draft",
                        email.id,
                        e
                    );
                    RawDraft::default()
                }
            };

            let record = assemble(&email.id, &draft, &email.source_text(), &self.reference);
            tracing::debug!("Assembled record for {}", record.id);
            records.push(record);

            if !delay.is_zero() && index + 1 < emails.len() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(records)
    }

    async fn load(&self, records: Vec<ShipmentRecord>) -> Result<String> {
        let json = serde_json::to_string_pretty(&records)?;
        tracing::debug!(
            "Writing {} records to {}",
            records.len(),
            self.config.output_path()
        );
        self.storage
            .write_file(self.config.output_path(), json.as_bytes())
            .await?;
        Ok(self.config.output_path().to_string())
    }
}
