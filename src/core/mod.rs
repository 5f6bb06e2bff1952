pub mod batch;
pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    BatchRequest, BatchResponse, MergeFields, QueryShape, Record, SubscriberError,
    SubscriberPayload, SyncOutcome,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, SyncClient};
pub use crate::utils::error::Result;
