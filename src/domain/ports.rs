use crate::domain::model::{Email, RawDraft, ShipmentRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn emails_path(&self) -> &str;
    fn port_codes_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn ground_truth_path(&self) -> &str;
    fn request_delay_ms(&self) -> u64;
}

/// External extraction service producing an untrusted draft per email.
/// Object safe so the pipeline can hold whichever adapter was picked at
/// startup.
#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    async fn extract(&self, email: &Email) -> Result<RawDraft>;

    /// Short adapter name for startup logging ("chat", "mock").
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Email>>;
    async fn transform(&self, emails: Vec<Email>) -> Result<Vec<ShipmentRecord>>;
    async fn load(&self, records: Vec<ShipmentRecord>) -> Result<String>;
}
