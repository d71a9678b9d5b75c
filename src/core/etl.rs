use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting extraction run");

        let emails = self.pipeline.extract().await?;
        tracing::info!("Read {} emails", emails.len());

        let records = self.pipeline.transform(emails).await?;
        tracing::info!("Assembled {} records", records.len());

        let output_path = self.pipeline.load(records).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
