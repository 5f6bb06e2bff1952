use crate::core::{BatchRequest, MergeFields, Record, SubscriberPayload};

/// 已存在的訂閱者一律更新
pub const UPDATE_EXISTING: bool = true;
/// 不寄送確認信
pub const DOUBLE_OPTIN: bool = false;

pub fn build_payload(record: Record) -> SubscriberPayload {
    let merge_fields = if record.has_full_name() {
        Some(MergeFields {
            first_name: record.first_name,
            last_name: record.last_name,
        })
    } else {
        None
    };

    SubscriberPayload {
        email: record.email_address,
        merge_fields,
    }
}

/// 將全部紀錄依原順序組成單一批次請求
pub fn build(records: Vec<Record>, list_id: &str) -> BatchRequest {
    BatchRequest {
        list_id: list_id.to_string(),
        update_existing: UPDATE_EXISTING,
        double_optin: DOUBLE_OPTIN,
        entries: records.into_iter().map(build_payload).collect(),
    }
}

impl BatchRequest {
    /// 切成每批最多 `size` 筆的連續子批次，順序與旗標不變。
    /// 空批次仍回傳一個空的子批次。
    pub fn into_chunks(self, size: usize) -> Vec<BatchRequest> {
        let size = size.max(1);
        if self.entries.is_empty() {
            return vec![self];
        }

        let BatchRequest {
            list_id,
            update_existing,
            double_optin,
            entries,
        } = self;

        let mut chunks = Vec::with_capacity(entries.len().div_ceil(size));
        let mut remaining = entries.into_iter().peekable();
        while remaining.peek().is_some() {
            chunks.push(BatchRequest {
                list_id: list_id.clone(),
                update_existing,
                double_optin,
                entries: remaining.by_ref().take(size).collect(),
            });
        }
        chunks
    }
}
