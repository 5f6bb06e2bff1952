use crate::domain::model::{BatchRequest, BatchResponse, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 關聯式資料來源：執行查詢並回傳完整的聯絡人清單
pub trait RecordSource: Send + Sync {
    fn fetch(&self, query: &str) -> impl std::future::Future<Output = Result<Vec<Record>>> + Send;
}

/// 郵件名單服務：送出一個批次訂閱請求
pub trait SyncClient: Send + Sync {
    fn submit(
        &self,
        request: &BatchRequest,
    ) -> impl std::future::Future<Output = Result<BatchResponse>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn list_id(&self) -> &str;
    fn query(&self) -> &str;
    /// `None` 表示整批一次送出
    fn batch_size(&self) -> Option<usize>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, records: Vec<Record>) -> Result<BatchRequest>;
    async fn load(&self, request: BatchRequest) -> Result<BatchResponse>;
}
