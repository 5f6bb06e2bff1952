use crate::core::batch;
use crate::core::{
    BatchRequest, BatchResponse, ConfigProvider, Pipeline, Record, RecordSource, SyncClient,
};
use crate::utils::error::Result;

/// MySQL → Mailchimp 的同步管道：extract 查詢、transform 組批次、load 送出
pub struct SyncPipeline<S: RecordSource, C: SyncClient, P: ConfigProvider> {
    source: S,
    client: C,
    config: P,
}

impl<S: RecordSource, C: SyncClient, P: ConfigProvider> SyncPipeline<S, C, P> {
    pub fn new(source: S, client: C, config: P) -> Self {
        Self {
            source,
            client,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: RecordSource, C: SyncClient, P: ConfigProvider> Pipeline for SyncPipeline<S, C, P> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Running query: {}", self.config.query());
        self.source.fetch(self.config.query()).await
    }

    async fn transform(&self, records: Vec<Record>) -> Result<BatchRequest> {
        let request = batch::build(records, self.config.list_id());
        let named = request
            .entries
            .iter()
            .filter(|entry| entry.merge_fields.is_some())
            .count();
        tracing::debug!(
            "Built batch for list {}: {} entries, {} with merge fields",
            request.list_id,
            request.entries.len(),
            named
        );
        Ok(request)
    }

    async fn load(&self, request: BatchRequest) -> Result<BatchResponse> {
        let Some(size) = self.config.batch_size() else {
            return self.client.submit(&request).await;
        };

        // 分批送出並合併結果；任何一批失敗即中止，已送出的批次不回滾
        let chunks = request.into_chunks(size);
        let total_chunks = chunks.len();
        let mut aggregated = BatchResponse::default();
        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!(
                "📤 Submitting chunk {}/{} ({} entries)",
                index + 1,
                total_chunks,
                chunk.entries.len()
            );
            aggregated.absorb(self.client.submit(chunk).await?);
        }
        Ok(aggregated)
    }
}
